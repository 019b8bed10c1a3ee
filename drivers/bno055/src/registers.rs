use num_derive::{FromPrimitive, ToPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ChipRegisters {
    ChipId = 0x00,
    PageId = 0x07,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum EulerRegisters {
    HLsb = 0x1A,
    HMsb = 0x1B,
    RLsb = 0x1C,
    RMsb = 0x1D,
    PLsb = 0x1E,
    PMsb = 0x1F,
}

impl EulerRegisters {
    /// Read order of a full sample: heading, roll, pitch, LSB first.
    pub const SAMPLE: [EulerRegisters; 6] = [
        EulerRegisters::HLsb,
        EulerRegisters::HMsb,
        EulerRegisters::RLsb,
        EulerRegisters::RMsb,
        EulerRegisters::PLsb,
        EulerRegisters::PMsb,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum StatusRegisters {
    OprMode = 0x3D,
    PwrMode = 0x3E,
    SysTrigger = 0x3F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum SysTrigger {
    Clear = 0x00,
    RstSys = 0x20,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PowerMode {
    Normal = 0x00,
    Low = 0x01,
    Suspend = 0x02,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum OperationMode {
    Config = 0x00,
    AccOnly = 0x01,
    MagOnly = 0x02,
    GyrOnly = 0x03,
    AccMag = 0x04,
    AccGyro = 0x05,
    MagGyro = 0x06,
    Amg = 0x07,
    Imu = 0x08,
    Compass = 0x09,
    M4g = 0x0A,
    NdofFmcOff = 0x0B,
    Ndof = 0x0C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RegisterPage {
    Page0 = 0,
    Page1 = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Constants {
    ChipId = 0xA0,
    DefaultI2cAddr = 0x28,
    AlternateI2cAddr = 0x29,
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn euler_sample_covers_consecutive_registers() {
        let addrs: Vec<u8> = EulerRegisters::SAMPLE.iter().map(|r| *r as u8).collect();
        assert_eq!(addrs, (0x1A..=0x1F).collect::<Vec<u8>>());
    }

    #[test]
    fn operation_mode_decodes_from_register_value() {
        assert_eq!(OperationMode::from_u8(0x00), Some(OperationMode::Config));
        assert_eq!(OperationMode::from_u8(0x0C), Some(OperationMode::Ndof));
        assert_eq!(OperationMode::from_u8(0x0D), None);
    }
}
