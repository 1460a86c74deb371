mod i2c;

use crate::{LcdError, LcdResult};
pub use i2c::*;
use std::fmt::Debug;
use std::thread::sleep;
use std::time::Duration;

/// The write-only HD44780 instruction set.
///
/// The expander boards this targets tie the controller's R/W line to ground,
/// so there is no busy-flag polling and no readback of any kind; commands
/// that need longer than the generic post-write settle carry their own fixed
/// delay instead.
pub trait HD44780Driver: Debug {
    /// Initializes the controller: forces it into a known interface mode and
    /// applies the default function set, display control, and a clear.
    fn init(&mut self, multiline: bool, alt_font: bool) -> LcdResult<()>;

    /// Clears the display and sets the cursor to the home position.
    ///
    /// Clearing takes far longer than an ordinary command on real hardware;
    /// writes issued before the settle elapses corrupt the display state.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(0b00000001)?;
        sleep(Duration::from_millis(2));
        Ok(())
    }

    /// Sets the cursor to the home position and undoes any display shift.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(0b00000010)?;
        sleep(Duration::from_millis(2));
        Ok(())
    }

    /// Sets the display to the specified entry mode.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> LcdResult<()> {
        let mut command = 0b00000100;
        if cursor_direction == CursorDirection::Right {
            command |= 0b00000010;
        }
        if shift {
            command |= 0b00000001;
        }
        self.send_command(command)
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> LcdResult<()> {
        let mut command = 0b00001000;
        if display_on {
            command |= 0b00000100;
        }
        if cursor_on {
            command |= 0b00000010;
        }
        if blink_on {
            command |= 0b00000001;
        }
        self.send_command(command)
    }

    /// Moves the cursor or shifts the display.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> LcdResult<()> {
        let mut command = 0b00010000;
        if display_shift {
            command |= 0b00001000;
        }
        if direction == CursorDirection::Right {
            command |= 0b00000100;
        }
        self.send_command(command)
    }

    /// Sets the interface width, line count, and font.
    fn function_set(&mut self, data_length: bool, two_lines: bool, font: bool) -> LcdResult<()> {
        let mut command = 0b00100000;
        if data_length {
            command |= 0b00010000;
        }
        if two_lines {
            command |= 0b00001000;
        }
        if font {
            command |= 0b00000100;
        }
        self.send_command(command)
    }

    /// Sets the CGRAM address.
    fn set_cgram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b00111111 {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(0b01000000 | address)
    }

    /// Sets the DDRAM address.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b01111111 {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(0b10000000 | address)
    }

    // Low-level primitives, implemented by the transport-specific driver.

    /// Sends a command byte. RS is held low.
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends a data byte, written at the current address counter. RS is held high.
    fn send_data(&mut self, data: u8) -> LcdResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    Right,
}
