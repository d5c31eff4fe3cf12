//! Bus-facing register access handler.
//!
//! One synchronous call per bus transaction: the handler is meant to run
//! from the bus interrupt context on a target with no scheduler, so it
//! never blocks beyond the storage backend's own write cycle. It owns the
//! settings record outright; the integrator masks the bus interrupt around
//! calls that span multiple bytes of a transaction.
//!
//! The bus protocol has no error-response channel. A rejected request is
//! simply not actioned; the error return is for the integrator's logs.

use embedded_storage::Storage;

use crate::adc::{AdcReference, AnalogMonitor};
use crate::config;
use crate::registers::Register;
use crate::reset::ResetReason;
use crate::settings::{CRC8, Settings};
use crate::store::{LoadError, SettingsStore};
use crate::wdt::WdtTimeout;
use crate::{info, warn};

/// Magic bytes a host writes to the power-down trigger register, guarding
/// the sleep path against a stray bus write. The full arming payload is
/// these bytes followed by their CRC-8.
pub const POWER_DOWN_MAGIC: &[u8; 5] = b"SLEEP";

/// Length of the full arming payload, trailer included.
pub const POWER_DOWN_SEQUENCE_LEN: usize = POWER_DOWN_MAGIC.len() + 1;

/// Rejected bus requests and storage failures.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The address is not in the register table.
    UnknownRegister(u8),
    /// Write to a read-only register.
    NotWritable(Register),
    /// Read of the write-only trigger register.
    NotReadable(Register),
    /// Payload length does not match the register width.
    Length {
        register: Register,
        expected: usize,
        got: usize,
    },
    /// An enumerated-code register was offered a code outside its range.
    ValueOutOfRange(Register),
    /// The power-down arming payload did not match the magic sequence.
    SequenceRejected,
    /// The storage backend failed while committing the record.
    Storage(E),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Storage(error)
    }
}

/// A validated power-down request, handed to the sleep sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerDownRequest {
    /// Watchdog interval used while asleep.
    pub timeout: WdtTimeout,
    /// Number of watchdog intervals to sleep through.
    pub duration: u16,
}

/// Value read out of a register, carrying its bus width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterValue {
    Byte(u8),
    Word(u16),
}

impl RegisterValue {
    /// Serialize for the bus in the device's native little-endian order.
    /// Returns the buffer and the number of significant bytes.
    pub fn to_le_bytes(self) -> ([u8; 2], usize) {
        match self {
            Self::Byte(value) => ([value, 0], 1),
            Self::Word(value) => (value.to_le_bytes(), 2),
        }
    }
}

/// The register access handler: owns the settings record, its storage
/// home, and the analog sampling seam.
pub struct BusHandler<S, M> {
    settings: Settings,
    store: SettingsStore<S>,
    monitor: M,
    reset_reason: ResetReason,
    adc_reference: AdcReference,
    pending_power_down: Option<PowerDownRequest>,
}

impl<S: Storage, M: AnalogMonitor> BusHandler<S, M> {
    /// Bring the handler up after reset.
    ///
    /// The stored record is validated; a corrupt or incompatible record is
    /// replaced with compiled-in defaults and flagged in the reset reason.
    /// The handler always comes up with a valid in-memory record; a
    /// failing rewrite is logged and the defaults are used unsaved.
    pub fn boot(mut store: SettingsStore<S>, mut monitor: M, hardware_flags: ResetReason) -> Self {
        let mut reset_reason = hardware_flags;
        let settings = match store.load() {
            Ok(settings) => settings,
            Err(error) => {
                match error {
                    LoadError::Corrupt => warn!("stored settings corrupt, restoring defaults"),
                    LoadError::IncompatibleFormat => {
                        warn!("stored settings from another firmware build, restoring defaults")
                    }
                    LoadError::Storage(_) => warn!("settings read failed, restoring defaults"),
                }
                reset_reason |= ResetReason::SETTINGS_CORRUPT;
                match store.restore_defaults() {
                    Ok(settings) => settings,
                    Err(_) => {
                        warn!("default rewrite failed, running on in-memory defaults");
                        Settings::default()
                    }
                }
            }
        };
        let adc_reference = AdcReference::Vcc;
        monitor.set_reference(adc_reference);
        Self {
            settings,
            store,
            monitor,
            reset_reason,
            adc_reference,
            pending_power_down: None,
        }
    }

    /// Handle a bus read of one register.
    pub fn read(&mut self, address: u8) -> Result<RegisterValue, Error<S::Error>> {
        let register = Register::from_address(address).ok_or(Error::UnknownRegister(address))?;
        let value = match register {
            Register::I2cAddress => RegisterValue::Byte(self.settings.i2c_address),
            Register::ResetReason => RegisterValue::Byte(self.reset_reason.bits()),
            Register::Temperature => RegisterValue::Word(self.monitor.temperature()),
            Register::BatteryVoltage => RegisterValue::Word(self.monitor.battery_voltage()),
            Register::SupplyVoltage => RegisterValue::Word(self.monitor.supply_voltage()),
            Register::AdcReference => RegisterValue::Byte(self.adc_reference.code()),
            Register::WdtPrescaler => RegisterValue::Byte(self.settings.wdt_prescaler),
            Register::PowerDownDuration => RegisterValue::Word(self.settings.power_down_duration),
            Register::PowerDownNow => return Err(Error::NotReadable(register)),
            Register::FirmwareVersion => RegisterValue::Byte(config::FIRMWARE_VERSION),
        };
        Ok(value)
    }

    /// Handle a bus write of one register.
    ///
    /// Rejected writes have no side effect. A write to a persisted
    /// register commits the whole record so the stored CRC stays
    /// consistent with the stored fields.
    pub fn write(&mut self, address: u8, payload: &[u8]) -> Result<(), Error<S::Error>> {
        let register = Register::from_address(address).ok_or(Error::UnknownRegister(address))?;
        let descriptor = register.descriptor();
        if !descriptor.access.writable() {
            warn!("write to read-only register {}", address);
            return Err(Error::NotWritable(register));
        }
        if register == Register::PowerDownNow {
            // The trigger register validates its own arming payload.
            return self.trigger_power_down(payload);
        }
        if payload.len() != descriptor.width {
            return Err(Error::Length {
                register,
                expected: descriptor.width,
                got: payload.len(),
            });
        }
        match register {
            Register::I2cAddress => {
                let value = payload[0];
                if value & 0x80 != 0 {
                    return Err(Error::ValueOutOfRange(register));
                }
                self.settings.i2c_address = value;
                info!("bus address changed to {}", value);
            }
            Register::AdcReference => {
                let reference = AdcReference::from_code(payload[0])
                    .ok_or(Error::ValueOutOfRange(register))?;
                self.adc_reference = reference;
                self.monitor.set_reference(reference);
            }
            Register::WdtPrescaler => {
                let timeout =
                    WdtTimeout::from_code(payload[0]).ok_or(Error::ValueOutOfRange(register))?;
                self.settings.wdt_prescaler = timeout.code();
                info!("watchdog timeout set to {} ms", timeout.timeout_ms());
            }
            Register::PowerDownDuration => {
                self.settings.power_down_duration = u16::from_le_bytes([payload[0], payload[1]]);
            }
            // Read-only targets were filtered on the descriptor above.
            _ => return Err(Error::NotWritable(register)),
        }
        if descriptor.persisted {
            self.commit()?;
        }
        Ok(())
    }

    /// Take the armed power-down request, if any. The sleep sequencer
    /// polls this after each bus transaction; the request is handed out
    /// exactly once.
    pub fn take_power_down(&mut self) -> Option<PowerDownRequest> {
        self.pending_power_down.take()
    }

    /// Current in-memory settings record.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Flags as served by the reset-reason register.
    pub fn reset_reason(&self) -> ResetReason {
        self.reset_reason
    }

    /// Tear the handler down, handing back the storage seam and the
    /// monitor.
    pub fn release(self) -> (SettingsStore<S>, M) {
        (self.store, self.monitor)
    }

    fn trigger_power_down(&mut self, payload: &[u8]) -> Result<(), Error<S::Error>> {
        let armed = payload.len() == POWER_DOWN_SEQUENCE_LEN
            && payload[..POWER_DOWN_MAGIC.len()] == *POWER_DOWN_MAGIC
            && payload[POWER_DOWN_MAGIC.len()] == CRC8.checksum(POWER_DOWN_MAGIC);
        if !armed {
            warn!("power-down arming sequence rejected");
            return Err(Error::SequenceRejected);
        }
        let timeout = WdtTimeout::from_code(self.settings.wdt_prescaler)
            .unwrap_or(config::DEFAULT_WDT_TIMEOUT);
        self.pending_power_down = Some(PowerDownRequest {
            timeout,
            duration: self.settings.power_down_duration,
        });
        info!(
            "power-down armed for {} watchdog intervals",
            self.settings.power_down_duration
        );
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Error<S::Error>> {
        self.store.save(&self.settings).map_err(Error::Storage)
    }
}
