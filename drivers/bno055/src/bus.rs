//! Byte-wide register access to a single device.

use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::debug;

use crate::Error;

/// Single-register reads and writes against one device on the bus.
pub trait RegisterBus {
    type Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

impl RegisterBus for LinuxI2CDevice {
    type Error = LinuxI2CError;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        self.smbus_read_byte_data(register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.smbus_write_byte_data(register, value)
    }
}

/// Opens the device at `address` on the given I2C bus.
///
/// # Arguments
/// * `i2c_bus` - The I2C bus path (e.g., "/dev/i2c-1")
/// * `address` - 7-bit slave address of the device
pub fn open(i2c_bus: &str, address: u16) -> Result<LinuxI2CDevice, Error<LinuxI2CError>> {
    debug!("Opening {} at address {:#04x}", i2c_bus, address);
    LinuxI2CDevice::new(i2c_bus, address).map_err(Error::Open)
}
