//! Raw I2C bus implementation talking to `/dev/i2c-N` directly.
//!
//! Does the same job as [crate::i2cdev::I2cdevBus] without going through the
//! i2cdev library: the slave address is selected with the `I2C_SLAVE` ioctl
//! and data bytes are plain `write(2)` calls on the character device.

use crate::{I2cBus, LcdResult};
use log::trace;
use std::fmt::{Debug, Formatter};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

const I2C_SLAVE: libc::c_ulong = 0x0703;

pub struct RawI2cBus {
    file: File,
    path: PathBuf,
    bound: Option<u16>,
}

impl RawI2cBus {
    /// Opens the adapter at the given path, e.g. `/dev/i2c-1`.
    pub fn open(path: impl AsRef<Path>) -> LcdResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        Ok(RawI2cBus {
            file,
            path,
            bound: None,
        })
    }

    fn bind(&mut self, address: u16) -> LcdResult<()> {
        if self.bound == Some(address) {
            return Ok(());
        }

        let result = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                I2C_SLAVE,
                address as libc::c_ulong,
            )
        };
        if result < 0 {
            return Err(std::io::Error::last_os_error().into());
        }

        trace!("Bound {} to slave 0x{:02X}", self.path.display(), address);
        self.bound = Some(address);
        Ok(())
    }
}

impl Debug for RawI2cBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawI2cBus({})", self.path.display())
    }
}

impl I2cBus for RawI2cBus {
    fn write_byte(&mut self, address: u16, value: u8) -> LcdResult<()> {
        self.bind(address)?;
        self.file.write_all(&[value])?;
        Ok(())
    }
}
