//! I2C bus implementation backed by the i2cdev library.

use crate::{I2cBus, LcdError, LcdResult};
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};

/// I2cdevBus drives the Linux i2c-dev character device through the i2cdev
/// library. One instance corresponds to one `/dev/i2c-N` adapter.
pub struct I2cdevBus {
    device: LinuxI2CDevice,
    path: PathBuf,
    bound: Option<u16>,
}

impl I2cdevBus {
    /// Opens the adapter at the given path, e.g. `/dev/i2c-1`.
    ///
    /// No slave address is selected yet; the device is re-bound lazily
    /// whenever a write targets a different address than the previous one.
    pub fn open(path: impl AsRef<Path>) -> LcdResult<Self> {
        let path = path.as_ref().to_path_buf();
        let device = LinuxI2CDevice::new(&path, 0).map_err(from_i2c_error)?;
        Ok(I2cdevBus {
            device,
            path,
            bound: None,
        })
    }
}

impl Debug for I2cdevBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "I2cdevBus({})", self.path.display())
    }
}

impl I2cBus for I2cdevBus {
    fn write_byte(&mut self, address: u16, value: u8) -> LcdResult<()> {
        if self.bound != Some(address) {
            self.device
                .set_slave_address(address)
                .map_err(from_i2c_error)?;
            self.bound = Some(address);
        }
        self.device.write(&[value]).map_err(from_i2c_error)
    }
}

fn from_i2c_error(err: LinuxI2CError) -> LcdError {
    LcdError::Other(err.to_string())
}
