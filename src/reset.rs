use bitflags::bitflags;

bitflags! {
    /// Why the board last came out of reset.
    ///
    /// Bits 0-3 mirror the MCU status register captured by the reset
    /// handler; bit 4 is set by firmware when the persisted settings were
    /// found corrupt at boot and replaced with defaults. The register is
    /// read-only over the bus and cleared only by the next reset cycle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ResetReason: u8 {
        /// Power-on reset.
        const POWER_ON = 1 << 0;
        /// External reset pin.
        const EXTERNAL = 1 << 1;
        /// Brown-out detector.
        const BROWN_OUT = 1 << 2;
        /// Watchdog system reset.
        const WATCHDOG = 1 << 3;
        /// Stored settings failed validation and were replaced.
        const SETTINGS_CORRUPT = 1 << 4;
    }
}

impl ResetReason {
    /// Capture the hardware reset-source bits. Only the four MCU-defined
    /// bits are taken; the corrupt-settings flag is firmware-owned.
    pub const fn from_mcusr(mcusr: u8) -> Self {
        Self::from_bits_truncate(mcusr & 0x0f)
    }
}

#[cfg(test)]
mod test {
    extern crate std;
    use super::*;

    #[test]
    fn mcusr_capture_masks_firmware_bits() {
        let reason = ResetReason::from_mcusr(0xff);
        assert!(reason.contains(ResetReason::POWER_ON));
        assert!(reason.contains(ResetReason::WATCHDOG));
        assert!(!reason.contains(ResetReason::SETTINGS_CORRUPT));
    }

    #[test]
    fn corrupt_flag_is_bit_four() {
        assert_eq!(ResetReason::SETTINGS_CORRUPT.bits(), 0x10);
    }
}
