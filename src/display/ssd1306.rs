//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C.  Text is
//! rasterized into a page-organized frame buffer through
//! `embedded-graphics`, using the 6x10 monospace font (21 chars per line).

use core::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use crate::app::ports::StatusDisplay;
use crate::error::DisplayError;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Vertical distance between text rows, px.
pub const LINE_PITCH: i32 = 12;
/// Rows that fit on the panel at [`LINE_PITCH`].
pub const MAX_LINES: usize = 5;

/// Control bytes preceding every I2C transfer.
const CONTROL_CMD: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
}

const INIT_SEQUENCE: &[u8] = &[
    CONTROL_CMD,
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // internal VCC
    cmd::SET_MEMORY_MODE,
    0x02, // page addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    addr: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            buffer: [[0; WIDTH]; PAGES],
            initialized: false,
        }
    }

    /// Power the panel up and blank it.  Fails if nothing acks on the bus.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.i2c
            .write(self.addr, INIT_SEQUENCE)
            .map_err(|_| DisplayError::Bus)?;
        self.initialized = true;
        self.clear();
        self.flush()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Clear the frame buffer
    pub fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Draw `text` on text row `row` (0-based).  Rows past the panel are dropped.
    pub fn draw_line(&mut self, row: usize, text: &str) {
        if row >= MAX_LINES {
            return;
        }
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let origin = Point::new(0, row as i32 * LINE_PITCH);
        // Drawing into the RAM buffer cannot fail.
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(self);
    }

    /// Push the frame buffer to the panel, one page at a time.
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        for page in 0..PAGES {
            self.i2c
                .write(
                    self.addr,
                    &[
                        CONTROL_CMD,
                        cmd::SET_PAGE_ADDR | page as u8,
                        cmd::SET_LOW_COLUMN,
                        cmd::SET_HIGH_COLUMN,
                    ],
                )
                .map_err(|_| DisplayError::Bus)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.addr, &data).map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    /// Whether the pixel at (`x`, `y`) is lit in the frame buffer.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1 << (y % 8);
            match color {
                BinaryColor::On => self.buffer[y / 8][x] |= bit,
                BinaryColor::Off => self.buffer[y / 8][x] &= !bit,
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> StatusDisplay for Ssd1306<I2C> {
    fn show_lines(&mut self, lines: &[&str]) -> Result<(), DisplayError> {
        self.clear();
        for (row, line) in lines.iter().enumerate() {
            self.draw_line(row, line);
        }
        self.flush()
    }
}
