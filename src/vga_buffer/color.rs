// src/vga_buffer/color.rs

//! VGA color definitions and color code management

use crate::errors::VgaError;

/// VGA color codes (4-bit color palette)
///
/// Discriminants match the hardware palette index-for-index.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    LightBrown = 14,
    White = 15,
}

impl Color {
    /// All palette entries in index order
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Brown,
        Color::LightGray,
        Color::DarkGray,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightCyan,
        Color::LightRed,
        Color::LightMagenta,
        Color::LightBrown,
        Color::White,
    ];

    /// Decode the low four bits of `value`, ignoring the rest
    pub const fn from_nibble(value: u8) -> Self {
        Self::ALL[(value & 0x0f) as usize]
    }

    /// Palette index of this color
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Color {
    type Error = VgaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 16 {
            Ok(Self::from_nibble(value))
        } else {
            Err(VgaError::InvalidColor(value))
        }
    }
}

/// Color code combining foreground and background colors
///
/// Layout: bits [3:0] foreground, bits [7:4] background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Create a new color code from foreground and background colors
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self((bg as u8) << 4 | (fg as u8))
    }

    /// Validate raw palette indices
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::InvalidColor`] carrying the first offending value.
    pub fn try_new(fg: u8, bg: u8) -> Result<Self, VgaError> {
        Ok(Self::new(Color::try_from(fg)?, Color::try_from(bg)?))
    }

    /// Pack raw palette indices, truncating each to four bits
    pub const fn masked(fg: u8, bg: u8) -> Self {
        Self::new(Color::from_nibble(fg), Color::from_nibble(bg))
    }

    /// Reinterpret an attribute byte. Every byte is a valid attribute.
    pub const fn from_u8(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> Color {
        Color::from_nibble(self.0)
    }

    pub const fn background(self) -> Color {
        Color::from_nibble(self.0 >> 4)
    }

    /// Default color scheme (light gray on black)
    pub const fn normal() -> Self {
        Self::new(Color::LightGray, Color::Black)
    }

    /// Error color scheme (light red on black)
    pub const fn error() -> Self {
        Self::new(Color::LightRed, Color::Black)
    }
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::normal()
    }
}
