//! 16-bit packed colors
//!
//! The protocol carries colors as raw RGB565 words (`#F800c` is red).

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;

/// RGB565 color as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color565(pub u16);

impl Color565 {
    pub const BLACK: Color565 = Color565(0x0000);
    pub const WHITE: Color565 = Color565(0xFFFF);
    pub const RED: Color565 = Color565(0xF800);
    pub const GREEN: Color565 = Color565(0x07E0);
    pub const BLUE: Color565 = Color565(0x001F);
    pub const ORANGE: Color565 = Color565(0xFD20);
    pub const PURPLE: Color565 = Color565(0x780F);

    /// Pack 8-bit channels
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Color565((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Build from an attribute value
    ///
    /// Only the low 16 bits are significant.
    pub const fn from_attribute(value: i32) -> Self {
        Color565(value as u16)
    }

    /// Raw packed word
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<Color565> for Rgb565 {
    fn from(color: Color565) -> Self {
        Rgb565::from(RawU16::new(color.0))
    }
}

impl From<Rgb565> for Color565 {
    fn from(color: Rgb565) -> Self {
        Color565(RawU16::from(color).into_inner())
    }
}
