//! Settings persistence over byte-addressed non-volatile storage.
//!
//! The durability unit is the whole record: every commit rewrites all
//! seven bytes so the stored CRC always matches the stored fields. A
//! storage write stalls the caller for the hardware write cycle; there is
//! no cancellation; it either completes or the device resets.

use embedded_storage::Storage;

use crate::config::SETTINGS_OFFSET;
use crate::settings::{RECORD_LEN, Settings};

/// Failures while reading the stored record back.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError<E> {
    /// The CRC trailer does not match the stored bytes.
    Corrupt,
    /// The CRC holds but the record was written by a different firmware
    /// build: the length or version tag differs from this build's.
    IncompatibleFormat,
    /// The storage backend itself failed.
    Storage(E),
}

impl<E> From<E> for LoadError<E> {
    fn from(error: E) -> Self {
        Self::Storage(error)
    }
}

/// The settings record's home in non-volatile storage.
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: Storage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read and validate the stored record.
    pub fn load(&mut self) -> Result<Settings, LoadError<S::Error>> {
        let mut buf = [0u8; RECORD_LEN];
        self.storage.read(SETTINGS_OFFSET, &mut buf)?;
        let settings = Settings::from_bytes(&buf).ok_or(LoadError::Corrupt)?;
        if !settings.is_compatible() {
            return Err(LoadError::IncompatibleFormat);
        }
        Ok(settings)
    }

    /// Commit the whole record.
    pub fn save(&mut self, settings: &Settings) -> Result<(), S::Error> {
        self.storage.write(SETTINGS_OFFSET, &settings.to_bytes())
    }

    /// Overwrite the stored record with compiled-in defaults.
    pub fn restore_defaults(&mut self) -> Result<Settings, S::Error> {
        let defaults = Settings::default();
        self.save(&defaults)?;
        Ok(defaults)
    }

    /// Hand the storage backend back, e.g. so the integrator can reach
    /// bytes beyond the record.
    pub fn release(self) -> S {
        self.storage
    }
}
