//! Register protocol core for the BattPack battery power board.
//!
//! The board sits on an I2C bus and gates power for a host system: the
//! host reads battery telemetry, tunes the watchdog-paced sleep cycle, and
//! arms a guarded power-down through a flat byte-addressed register map.
//! Three of those registers are backed by a CRC-protected settings record
//! in on-chip EEPROM and survive power cycles.
//!
//! This crate is the hardware-agnostic core of that firmware: the settings
//! record and its storage lifecycle, the register table, the watchdog
//! prescaler encoding, the reset-reason flags, and the bus-facing access
//! handler. The bus transceiver, the ADC sampling loop, and the sleep
//! sequencer live in the integrating firmware and plug into the seams
//! defined here ([`embedded_storage::Storage`] for the EEPROM,
//! [`adc::AnalogMonitor`] for telemetry, [`bus::BusHandler::take_power_down`]
//! for the sleep path).

#![no_std]

mod fmt;

pub mod adc;
pub mod bus;
pub mod config;
pub mod registers;
pub mod reset;
pub mod settings;
pub mod store;
pub mod wdt;

pub use adc::{AdcReference, AnalogMonitor};
pub use bus::{BusHandler, Error, PowerDownRequest, RegisterValue};
pub use registers::{Access, Descriptor, Register};
pub use reset::ResetReason;
pub use settings::Settings;
pub use store::{LoadError, SettingsStore};
pub use wdt::WdtTimeout;

#[cfg(test)]
pub(crate) mod test_util;
