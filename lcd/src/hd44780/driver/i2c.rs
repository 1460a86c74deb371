use crate::hd44780::driver::HD44780Driver;
use crate::{I2cBus, LcdResult};
use log::trace;
use std::thread::sleep;
use std::time::Duration;

/// HD44780 driver speaking through an I2C GPIO expander (PCF8574-style
/// backpack boards).
///
/// The expander's eight outputs are wired RS to bit 0, R/W to bit 1 (held
/// low, the controller is never read), E to bit 2, backlight transistor to
/// bit 3, and the controller's upper data lines D4–D7 to bits 4–7. A full
/// command or data byte therefore goes out as two enable-pulsed nibble
/// writes, high nibble first.
#[derive(Debug)]
pub struct I2cHD44780Driver<'a> {
    bus: &'a mut dyn I2cBus,
    address: u16,
    backlight: bool,
}

impl<'a> I2cHD44780Driver<'a> {
    const RS: u8 = 0x01;
    const EN: u8 = 0x04;
    const BL: u8 = 0x08;

    pub fn new(bus: &'a mut dyn I2cBus, address: u16, backlight: bool) -> Self {
        I2cHD44780Driver {
            bus,
            address,
            backlight,
        }
    }

    /// Switches the backlight flag. The new level goes out with the next
    /// bus write; the bit has to be repeated on every write anyway, or the
    /// backlight would flicker with the data lines.
    pub fn set_backlight(&mut self, backlight: bool) {
        self.backlight = backlight;
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    fn write_bus(&mut self, mut data: u8) -> LcdResult<()> {
        if self.backlight {
            data |= Self::BL;
        }
        self.bus.write_byte(self.address, data)
    }

    fn pulse_enable(&mut self, data: u8) -> LcdResult<()> {
        self.write_bus(data | Self::EN)?;
        sleep(Duration::from_micros(1));
        self.write_bus(data & !Self::EN)?;
        // The controller needs ~37 us to execute most instructions; this
        // settle dominates the write throughput.
        sleep(Duration::from_micros(50));
        Ok(())
    }

    fn send(&mut self, value: u8, rs: bool) -> LcdResult<()> {
        trace!("Sending data: {:08b}, RS: {}", value, rs);

        let mode = if rs { Self::RS } else { 0 };
        let high = (value & 0xF0) | mode;
        let low = ((value << 4) & 0xF0) | mode;
        self.pulse_enable(high)?;
        self.pulse_enable(low)
    }
}

impl HD44780Driver for I2cHD44780Driver<'_> {
    fn init(&mut self, multiline: bool, alt_font: bool) -> LcdResult<()> {
        // Synchronize: force 8-bit mode from whatever state the controller
        // powered up in, then drop to 4-bit.
        self.send_command(0b00110011)?;
        self.send_command(0b00110010)?;
        self.function_set(false, multiline, alt_font)?;
        self.set_display_control(true, false, false)?;
        self.clear_display()?;
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.send(command, false)
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.send(data, true)
    }
}
