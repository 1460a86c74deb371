//! HD44780 character LCD module.
//!
//! [driver] holds the controller instruction set and the I2C expander
//! transport; [Lcd] is the screen-level API on top of it: geometry-aware
//! cursor positioning, text printing through the [crate::encoding] tables,
//! and user-defined glyph upload.

pub mod driver;

use crate::encoding;
use crate::hd44780::driver::HD44780Driver;
use crate::{LcdError, LcdResult};
use log::warn;
use std::thread::sleep;
use std::time::Duration;

/// A character LCD of `width` columns by `lines` rows.
///
/// Every operation writes to the bus and sleeps its mandated settle time
/// inline before returning. The controller's address counter is shared,
/// mutable state behind every call, so an `Lcd` must not be driven from
/// multiple threads without external serialization; it takes `&mut self`
/// everywhere and holds no lock of its own.
#[derive(Debug)]
pub struct Lcd<D: HD44780Driver> {
    driver: D,
    width: usize,
    lines: usize,
}

impl<D: HD44780Driver> Lcd<D> {
    /// Rows start every 0x40 bytes of DDRAM no matter the configured width.
    const ROW_STRIDE: u8 = 0x40;

    /// Runs the controller initialization sequence and returns the ready
    /// screen.
    pub fn new(mut driver: D, width: usize, lines: usize) -> LcdResult<Self> {
        if width == 0 || lines == 0 {
            return Err(LcdError::InvalidArgument);
        }
        driver.init(lines > 1, false)?;
        Ok(Lcd {
            driver,
            width,
            lines,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Issues a raw controller command byte.
    pub fn command(&mut self, command: u8) -> LcdResult<()> {
        self.driver.send_command(command)
    }

    /// Writes a raw character code at the current address counter.
    pub fn data(&mut self, data: u8) -> LcdResult<()> {
        self.driver.send_data(data)
    }

    /// Clears the display, including the long settle the command needs.
    pub fn clear(&mut self) -> LcdResult<()> {
        self.driver.clear_display()
    }

    /// Moves the cursor to the given column and row.
    ///
    /// Out-of-range coordinates are clamped to the edge of the display
    /// rather than rejected.
    pub fn set_position(&mut self, column: usize, row: usize) -> LcdResult<()> {
        let column = column.min(self.width - 1);
        let row = row.min(self.lines - 1);
        self.driver
            .set_ddram_address(row as u8 * Self::ROW_STRIDE + column as u8)
    }

    /// Prints `text` starting at the given position.
    ///
    /// Characters the ROM cannot render encode to their raw codepoint;
    /// anything above a byte is masked to its low 8 bits here, as the bus
    /// only carries bytes. Text longer than the remaining row is not
    /// wrapped or truncated; the controller's auto-incrementing address
    /// counter decides where the overflow lands.
    pub fn print(&mut self, text: &str, column: usize, row: usize) -> LcdResult<()> {
        self.set_position(column, row)?;
        for code in encoding::encode(text) {
            if code > 0xFF {
                warn!("No character code for U+{:04X}, sending low byte", code);
            }
            self.driver.send_data((code & 0xFF) as u8)?;
        }
        Ok(())
    }

    /// Uploads a user-defined 5x8 glyph into one of the 8 CGRAM slots.
    ///
    /// The glyph is addressable in text as the character code equal to
    /// `slot`. `bitmap` must hold exactly 8 rows, lowest 5 bits significant.
    pub fn define_glyph(&mut self, slot: u8, bitmap: &[u8]) -> LcdResult<()> {
        if slot > 7 || bitmap.len() != 8 {
            return Err(LcdError::InvalidArgument);
        }

        self.driver.set_cgram_address(slot << 3)?;
        sleep(Duration::from_micros(50));
        for &row in bitmap {
            self.driver.send_data(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Sent {
        Command(u8),
        Data(u8),
    }

    /// Driver fake that records the command/data stream without timing.
    #[derive(Debug, Default)]
    struct RecordingDriver {
        sent: Vec<Sent>,
        initialized: bool,
    }

    impl HD44780Driver for RecordingDriver {
        fn init(&mut self, multiline: bool, alt_font: bool) -> LcdResult<()> {
            self.initialized = true;
            self.send_command(0b00110011)?;
            self.send_command(0b00110010)?;
            self.function_set(false, multiline, alt_font)?;
            self.set_display_control(true, false, false)?;
            self.send_command(0b00000001)
        }

        fn send_command(&mut self, command: u8) -> LcdResult<()> {
            self.sent.push(Sent::Command(command));
            Ok(())
        }

        fn send_data(&mut self, data: u8) -> LcdResult<()> {
            self.sent.push(Sent::Data(data));
            Ok(())
        }
    }

    fn lcd_16x2() -> Lcd<RecordingDriver> {
        let mut lcd = Lcd::new(RecordingDriver::default(), 16, 2).unwrap();
        lcd.driver.sent.clear();
        lcd
    }

    #[test]
    fn new_runs_the_init_sequence() {
        let lcd = Lcd::new(RecordingDriver::default(), 16, 2).unwrap();
        assert!(lcd.driver.initialized);
        assert_eq!(
            lcd.driver.sent,
            vec![
                Sent::Command(0x33),
                Sent::Command(0x32),
                Sent::Command(0x28),
                Sent::Command(0x0C),
                Sent::Command(0x01),
            ]
        );
    }

    #[test]
    fn new_rejects_empty_geometry() {
        assert!(Lcd::new(RecordingDriver::default(), 0, 2).is_err());
        assert!(Lcd::new(RecordingDriver::default(), 16, 0).is_err());
    }

    #[test]
    fn command_and_data_pass_through_to_the_driver() {
        let mut lcd = lcd_16x2();
        lcd.command(0x02).unwrap();
        lcd.data(0xB6).unwrap();
        assert_eq!(
            lcd.driver.sent,
            vec![Sent::Command(0x02), Sent::Data(0xB6)]
        );
    }

    #[test]
    fn set_position_addresses_rows_at_the_hardware_stride() {
        let mut lcd = lcd_16x2();
        lcd.set_position(0, 0).unwrap();
        lcd.set_position(5, 1).unwrap();
        assert_eq!(
            lcd.driver.sent,
            vec![Sent::Command(0x80), Sent::Command(0xC5)]
        );
    }

    #[test]
    fn set_position_clamps_to_the_display_edge() {
        let mut lcd = lcd_16x2();
        lcd.set_position(99, 99).unwrap();
        lcd.set_position(15, 1).unwrap();
        assert_eq!(lcd.driver.sent[0], lcd.driver.sent[1]);
        assert_eq!(lcd.driver.sent[0], Sent::Command(0x80 | 0x40 | 15));
    }

    #[test]
    fn print_positions_then_streams_encoded_codes() {
        let mut lcd = lcd_16x2();
        lcd.print("Ab", 1, 1).unwrap();
        assert_eq!(
            lcd.driver.sent,
            vec![
                Sent::Command(0xC1),
                Sent::Data(0x41),
                Sent::Data(0x62),
            ]
        );
    }

    #[test]
    fn print_streams_kana_decompositions() {
        let mut lcd = lcd_16x2();
        lcd.print("がっこう", 0, 0).unwrap();
        assert_eq!(
            lcd.driver.sent,
            vec![
                Sent::Command(0x80),
                Sent::Data(0xB6),
                Sent::Data(0xDE),
                Sent::Data(0xAF),
                Sent::Data(0xBA),
                Sent::Data(0xB3),
            ]
        );
    }

    #[test]
    fn print_masks_unrenderable_codepoints_to_a_byte() {
        let mut lcd = lcd_16x2();
        lcd.print("愛", 0, 0).unwrap();
        // U+611B has no ROM code; only its low byte reaches the bus.
        assert_eq!(
            lcd.driver.sent,
            vec![Sent::Command(0x80), Sent::Data(0x1B)]
        );
    }

    #[test]
    fn print_does_not_wrap_at_the_row_end() {
        let mut lcd = lcd_16x2();
        lcd.print("ABCDEFGHIJKLMNOPQR", 0, 0).unwrap();
        // One position command, then every code streamed in order.
        assert_eq!(lcd.driver.sent.len(), 1 + 18);
        assert_eq!(lcd.driver.sent[0], Sent::Command(0x80));
        assert_eq!(lcd.driver.sent[18], Sent::Data(b'R'));
    }

    #[test]
    fn define_glyph_writes_cgram_rows() {
        let mut lcd = lcd_16x2();
        let bitmap = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];
        lcd.define_glyph(2, &bitmap).unwrap();
        assert_eq!(lcd.driver.sent[0], Sent::Command(0x40 | (2 << 3)));
        let rows: Vec<Sent> = bitmap.iter().map(|&row| Sent::Data(row)).collect();
        assert_eq!(&lcd.driver.sent[1..], &rows[..]);
    }

    #[test]
    fn define_glyph_rejects_bad_slots_and_bitmaps() {
        let mut lcd = lcd_16x2();
        assert_eq!(
            lcd.define_glyph(8, &[0; 8]),
            Err(LcdError::InvalidArgument)
        );
        assert_eq!(
            lcd.define_glyph(0, &[0; 7]),
            Err(LcdError::InvalidArgument)
        );
        assert_eq!(
            lcd.define_glyph(0, &[0; 9]),
            Err(LcdError::InvalidArgument)
        );
        assert!(lcd.driver.sent.is_empty());
    }
}
