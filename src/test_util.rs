//! Shared fixtures for the unit tests.

use embedded_storage::{ReadStorage, Storage};

use crate::adc::{AdcReference, AnalogMonitor};

/// Byte-addressable in-memory storage, erased to 0xFF like a blank EEPROM.
pub struct MemStorage {
    pub bytes: [u8; 64],
}

impl MemStorage {
    pub fn blank() -> Self {
        Self { bytes: [0xff; 64] }
    }
}

impl ReadStorage for MemStorage {
    type Error = core::convert::Infallible;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        bytes.copy_from_slice(&self.bytes[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for MemStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

/// Scripted analog monitor returning fixed sample words.
pub struct MockMonitor {
    pub temperature: u16,
    pub battery_voltage: u16,
    pub supply_voltage: u16,
    pub reference: Option<AdcReference>,
}

impl MockMonitor {
    pub fn new() -> Self {
        Self {
            temperature: 0x0123,
            battery_voltage: 0x0456,
            supply_voltage: 0x0789,
            reference: None,
        }
    }
}

impl AnalogMonitor for MockMonitor {
    fn temperature(&mut self) -> u16 {
        self.temperature
    }

    fn battery_voltage(&mut self) -> u16 {
        self.battery_voltage
    }

    fn supply_voltage(&mut self) -> u16 {
        self.supply_voltage
    }

    fn set_reference(&mut self, reference: AdcReference) {
        self.reference = Some(reference);
    }
}
