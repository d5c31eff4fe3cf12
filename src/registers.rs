//! Bus register address space.
//!
//! The host reaches every board function through a flat byte-addressed
//! register table. Three registers mirror fields of the persisted settings
//! record; the rest are live samples, boot-time status, or the guarded
//! power-down trigger.

/// Address value reserved to mean "no/unknown register".
pub const UNKNOWN_ADDRESS: u8 = 0xff;

/// Register access modes as seen from the bus host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    ReadWrite,
    WriteOnly,
}

impl Access {
    pub const fn writable(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }

    pub const fn readable(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }
}

/// One entry of the register table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Descriptor {
    /// Payload width in bytes for a bus transaction on this register.
    pub width: usize,
    pub access: Access,
    /// Whether the register is backed by the settings record and survives
    /// power cycles.
    pub persisted: bool,
}

/// The bus-exposed registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    I2cAddress = 0x00,
    ResetReason = 0x01,
    Temperature = 0x02,
    BatteryVoltage = 0x03,
    SupplyVoltage = 0x04,
    AdcReference = 0x05,
    WdtPrescaler = 0x06,
    PowerDownDuration = 0x07,
    PowerDownNow = 0x08,
    FirmwareVersion = 0x09,
}

impl Register {
    /// Resolve a raw bus address.
    pub const fn from_address(address: u8) -> Option<Self> {
        Some(match address {
            0x00 => Self::I2cAddress,
            0x01 => Self::ResetReason,
            0x02 => Self::Temperature,
            0x03 => Self::BatteryVoltage,
            0x04 => Self::SupplyVoltage,
            0x05 => Self::AdcReference,
            0x06 => Self::WdtPrescaler,
            0x07 => Self::PowerDownDuration,
            0x08 => Self::PowerDownNow,
            0x09 => Self::FirmwareVersion,
            _ => return None,
        })
    }

    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Table entry for this register, driving uniform validation in the
    /// bus handler.
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::I2cAddress => Descriptor {
                width: 1,
                access: Access::ReadWrite,
                persisted: true,
            },
            Self::ResetReason => Descriptor {
                width: 1,
                access: Access::ReadOnly,
                persisted: false,
            },
            Self::Temperature => Descriptor {
                width: 2,
                access: Access::ReadOnly,
                persisted: false,
            },
            Self::BatteryVoltage => Descriptor {
                width: 2,
                access: Access::ReadOnly,
                persisted: false,
            },
            Self::SupplyVoltage => Descriptor {
                width: 2,
                access: Access::ReadOnly,
                persisted: false,
            },
            Self::AdcReference => Descriptor {
                width: 1,
                access: Access::ReadWrite,
                persisted: false,
            },
            Self::WdtPrescaler => Descriptor {
                width: 1,
                access: Access::ReadWrite,
                persisted: true,
            },
            Self::PowerDownDuration => Descriptor {
                width: 2,
                access: Access::ReadWrite,
                persisted: true,
            },
            // Magic bytes plus trailing checksum.
            Self::PowerDownNow => Descriptor {
                width: 6,
                access: Access::WriteOnly,
                persisted: false,
            },
            Self::FirmwareVersion => Descriptor {
                width: 1,
                access: Access::ReadOnly,
                persisted: false,
            },
        }
    }
}

#[cfg(test)]
mod test {
    extern crate std;
    use super::*;

    #[test]
    fn addresses_round_trip() {
        for address in 0x00..=0x09 {
            let register = Register::from_address(address).unwrap();
            assert_eq!(register.address(), address);
        }
    }

    #[test]
    fn unknown_addresses_do_not_resolve() {
        assert_eq!(Register::from_address(0x0a), None);
        assert_eq!(Register::from_address(UNKNOWN_ADDRESS), None);
    }

    #[test]
    fn persisted_registers_match_the_settings_record() {
        let persisted: std::vec::Vec<Register> = (0x00..=0x09)
            .filter_map(Register::from_address)
            .filter(|r| r.descriptor().persisted)
            .collect();
        assert_eq!(
            persisted,
            [
                Register::I2cAddress,
                Register::WdtPrescaler,
                Register::PowerDownDuration
            ]
        );
    }

    #[test]
    fn access_modes() {
        assert!(!Register::ResetReason.descriptor().access.writable());
        assert!(!Register::PowerDownNow.descriptor().access.readable());
        assert!(Register::I2cAddress.descriptor().access.writable());
        assert!(Register::I2cAddress.descriptor().access.readable());
    }

    #[test]
    fn widths_follow_the_register_map() {
        assert_eq!(Register::Temperature.descriptor().width, 2);
        assert_eq!(Register::PowerDownDuration.descriptor().width, 2);
        assert_eq!(Register::WdtPrescaler.descriptor().width, 1);
    }
}
