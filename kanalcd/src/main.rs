mod config;
mod utils;

use crate::config::Config;
use crate::utils::unescape;
use dotenv::dotenv;
use kanalcd_lcd::hd44780::driver::{HD44780Driver, I2cHD44780Driver};
use kanalcd_lcd::hd44780::Lcd;
use kanalcd_lcd::i2cdev::I2cdevBus;
use kanalcd_lcd::raw::RawI2cBus;
use kanalcd_lcd::I2cBus;
use log::{debug, info};
use std::env::var;
use std::io::stdin;

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("kanalcd starting...");

    debug!("Trying to load config...");
    let config = if let Some(config) = Config::try_load() {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };

    info!(
        "LCD @ 0x{:02X}, {}x{}, backlight: {}",
        config.address, config.width, config.lines, config.backlight
    );

    let bus_path = var("KANALCD_I2C_DEV").unwrap_or_else(|_| "/dev/i2c-1".to_string());
    let use_raw_bus = var("KANALCD_RAW_BUS").map(|v| v == "1").unwrap_or(false);

    debug!("Opening I2C bus at {} (raw: {})...", bus_path, use_raw_bus);
    let mut bus: Box<dyn I2cBus> = if use_raw_bus {
        Box::new(RawI2cBus::open(&bus_path)?)
    } else {
        Box::new(I2cdevBus::open(&bus_path)?)
    };
    debug!("{:?} initialized.", bus);

    debug!("Initializing LCD...");
    let driver = I2cHD44780Driver::new(&mut *bus, config.address, config.backlight);
    let mut lcd = Lcd::new(driver, config.width, config.lines)?;
    debug!("{:?} initialized.", lcd);

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("test") => subcmd_test(&mut lcd),
        Some("udc") => subcmd_udc(&mut lcd),
        _ => {
            for row in 0..2 {
                let text = args.get(row + 1).map(String::as_str).unwrap_or("");
                lcd.print(&unescape(text)?, 0, row)?;
            }
            Ok(())
        }
    }
}

/// Sweeps every character code across the display, a screenful at a time,
/// waiting for Enter between screenfuls.
fn subcmd_test<D: HD44780Driver>(lcd: &mut Lcd<D>) -> eyre::Result<()> {
    lcd.set_position(0, 0)?;
    for code in 0..=255u8 {
        lcd.data(code)?;
        if code % 32 == 31 {
            wait_for_enter()?;
            lcd.set_position(0, 0)?;
        } else if code % 16 == 15 {
            lcd.set_position(0, 1)?;
        }
    }
    Ok(())
}

/// Defines a sample box glyph in CGRAM slot 0.
fn subcmd_udc<D: HD44780Driver>(lcd: &mut Lcd<D>) -> eyre::Result<()> {
    lcd.define_glyph(
        0,
        &[
            0b11111,
            0b10001,
            0b10001,
            0b10001,
            0b10001,
            0b10001,
            0b10001,
            0b11111,
        ],
    )?;
    Ok(())
}

fn wait_for_enter() -> eyre::Result<()> {
    let mut line = String::new();
    stdin().read_line(&mut line)?;
    Ok(())
}
