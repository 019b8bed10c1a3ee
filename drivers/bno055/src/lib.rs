pub mod bus;
pub mod delay;
mod init;
pub mod mock;
pub mod registers;
pub mod telemetry;

use byteorder::{ByteOrder, LittleEndian};
pub use bus::RegisterBus;
pub use delay::{DelayMs, ThreadDelay};
pub use imu_traits::{EulerAngles, OrientationReader, RawEulerAngles};
pub use init::{BringUpConfig, ChipIdPolicy};
use registers::EulerRegisters;
pub use registers::{Constants, OperationMode};
pub use telemetry::{TelemetryConfig, TelemetryLoop, TelemetryStats};

#[derive(Debug)]
pub enum Error<E> {
    /// The bus device could not be opened.
    Open(E),
    /// A register read or write failed.
    I2c(E),
    /// The chip ID register did not hold the BNO055 ID.
    InvalidChipId(u8),
    /// The chip did not answer with its ID after a reset.
    ResetTimeout { attempts: u32 },
}

impl<E: std::fmt::Display> std::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Open(err) => write!(f, "Failed to open I2C device: {}", err),
            Error::I2c(err) => write!(f, "I2C error: {}", err),
            Error::InvalidChipId(id) => write!(
                f,
                "Invalid chip ID. Expected {:#04x}, got {:#04x}",
                Constants::ChipId as u8,
                id
            ),
            Error::ResetTimeout { attempts } => write!(
                f,
                "Chip did not come back after reset ({} chip ID reads)",
                attempts
            ),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open(err) | Error::I2c(err) => Some(err),
            _ => None,
        }
    }
}

/// Reassembles the six Euler bytes (H, R, P; LSB first) into raw angles.
pub fn decode_euler(buf: &[u8; 6]) -> RawEulerAngles {
    RawEulerAngles {
        heading: LittleEndian::read_i16(&buf[0..2]),
        roll: LittleEndian::read_i16(&buf[2..4]),
        pitch: LittleEndian::read_i16(&buf[4..6]),
    }
}

/// A BNO055 that has been through bring-up and is running in fusion mode.
pub struct Bno055<B> {
    bus: B,
}

impl<B: RegisterBus> Bno055<B> {
    pub(crate) fn read(&mut self, register: u8) -> Result<u8, Error<B::Error>> {
        self.bus.read_register(register).map_err(Error::I2c)
    }

    pub(crate) fn write(&mut self, register: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus.write_register(register, value).map_err(Error::I2c)
    }

    /// Returns the current orientation as raw fixed-point Euler angles.
    pub fn get_raw_euler_angles(&mut self) -> Result<RawEulerAngles, Error<B::Error>> {
        let mut buf = [0u8; 6];

        // One single-byte read per register
        for (byte, register) in buf.iter_mut().zip(EulerRegisters::SAMPLE) {
            *byte = self.read(register as u8)?;
        }

        Ok(decode_euler(&buf))
    }

    /// Returns the current orientation in Euler angles.
    /// All angles (heading, roll, pitch) are in degrees.
    pub fn get_euler_angles(&mut self) -> Result<EulerAngles, Error<B::Error>> {
        self.get_raw_euler_angles().map(RawEulerAngles::to_degrees)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: RegisterBus> OrientationReader for Bno055<B> {
    type Error = Error<B::Error>;

    fn read_raw_euler(&mut self) -> Result<RawEulerAngles, Self::Error> {
        self.get_raw_euler_angles()
    }
}
