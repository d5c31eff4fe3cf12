//! The persisted settings record.
//!
//! Seven bytes with a fixed layout: the record length and the firmware
//! version are the first two bytes so a reader can judge compatibility
//! before interpreting anything else, and the CRC trailer is always the
//! last byte. Multi-byte fields are little-endian, the native order of the
//! device.

use crc::{CRC_8_SMBUS, Crc};

use crate::config;

/// CRC-8/SMBus, the bus world's packet-error-check polynomial. Shared by
/// the settings record trailer and the power-down arming sequence.
pub(crate) const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Stored size of the record, trailer included.
pub const RECORD_LEN: usize = 7;

const OFFSET_RECORD_LEN: usize = 0;
const OFFSET_FIRMWARE_VERSION: usize = 1;
const OFFSET_I2C_ADDRESS: usize = 2;
const OFFSET_WDT_PRESCALER: usize = 3;
const OFFSET_POWER_DOWN_DURATION: usize = 4;
const OFFSET_CRC: usize = RECORD_LEN - 1;

/// In-memory copy of the persisted configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Byte length of the record as stored.
    pub record_len: u8,
    /// Version tag of the firmware that wrote the record.
    pub firmware_version: u8,
    /// 7-bit bus address the device answers on.
    pub i2c_address: u8,
    /// Watchdog timeout code used while sleeping.
    pub wdt_prescaler: u8,
    /// Watchdog intervals spent asleep per power-down.
    pub power_down_duration: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            record_len: RECORD_LEN as u8,
            firmware_version: config::FIRMWARE_VERSION,
            i2c_address: config::DEFAULT_I2C_ADDRESS,
            wdt_prescaler: config::DEFAULT_WDT_TIMEOUT.code(),
            power_down_duration: config::DEFAULT_POWER_DOWN_DURATION,
        }
    }
}

impl Settings {
    /// Serialize the record with a freshly computed CRC trailer.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[OFFSET_RECORD_LEN] = self.record_len;
        buf[OFFSET_FIRMWARE_VERSION] = self.firmware_version;
        buf[OFFSET_I2C_ADDRESS] = self.i2c_address;
        buf[OFFSET_WDT_PRESCALER] = self.wdt_prescaler;
        buf[OFFSET_POWER_DOWN_DURATION..OFFSET_POWER_DOWN_DURATION + 2]
            .copy_from_slice(&self.power_down_duration.to_le_bytes());
        buf[OFFSET_CRC] = CRC8.checksum(&buf[..OFFSET_CRC]);
        buf
    }

    /// Deserialize a raw record. Returns `None` if the stored CRC does not
    /// match the preceding bytes.
    pub fn from_bytes(buf: &[u8; RECORD_LEN]) -> Option<Self> {
        if CRC8.checksum(&buf[..OFFSET_CRC]) != buf[OFFSET_CRC] {
            return None;
        }
        Some(Self {
            record_len: buf[OFFSET_RECORD_LEN],
            firmware_version: buf[OFFSET_FIRMWARE_VERSION],
            i2c_address: buf[OFFSET_I2C_ADDRESS],
            wdt_prescaler: buf[OFFSET_WDT_PRESCALER],
            power_down_duration: u16::from_le_bytes([
                buf[OFFSET_POWER_DOWN_DURATION],
                buf[OFFSET_POWER_DOWN_DURATION + 1],
            ]),
        })
    }

    /// Whether the record was laid down by this firmware build's layout.
    pub fn is_compatible(&self) -> bool {
        self.record_len as usize == RECORD_LEN && self.firmware_version == config::FIRMWARE_VERSION
    }
}
