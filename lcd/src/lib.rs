pub mod encoding;
pub mod hd44780;
pub mod i2cdev;
pub mod raw;

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("invalid argument")]
    InvalidArgument,
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
    #[error("error: {0}")]
    Other(String),
}

impl From<std::io::Error> for LcdError {
    fn from(err: std::io::Error) -> Self {
        LcdError::Io(err.kind())
    }
}

pub type LcdResult<T> = Result<T, LcdError>;

/// A write-only I2C bus carrying single-byte transfers to a GPIO expander.
///
/// This is the whole transport contract of the display: one byte per write,
/// no acknowledgement beyond the bus-level one, no readback. A failed write
/// is surfaced as-is; the controller offers no retry semantics, so the
/// in-flight byte is simply lost.
pub trait I2cBus: Debug {
    /// Writes a single byte to the device at the given 7-bit address.
    fn write_byte(&mut self, address: u16, value: u8) -> LcdResult<()>;
}
