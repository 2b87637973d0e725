// src/vga_buffer/cell.rs

//! Character cell value type and its 16-bit hardware encoding
//!
//! Wire layout of one cell (little endian `u16`):
//!
//! | bits    | field            |
//! |---------|------------------|
//! | 0..=7   | code page 437 byte |
//! | 8..=11  | foreground index |
//! | 12..=15 | background index |

use super::color::ColorCode;
use super::constants::BLANK_CHAR;

/// One character position: glyph byte plus color attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii_character: u8,
    pub color_code: ColorCode,
}

impl ScreenChar {
    pub const fn new(ascii_character: u8, color_code: ColorCode) -> Self {
        Self {
            ascii_character,
            color_code,
        }
    }

    /// A space in the given color
    pub const fn blank(color_code: ColorCode) -> Self {
        Self::new(BLANK_CHAR, color_code)
    }

    /// Pack into the hardware representation
    pub const fn encode(self) -> u16 {
        (self.color_code.as_u8() as u16) << 8 | self.ascii_character as u16
    }

    /// Unpack a hardware cell value
    pub const fn decode(raw: u16) -> Self {
        Self {
            ascii_character: (raw & 0xff) as u8,
            color_code: ColorCode::from_u8((raw >> 8) as u8),
        }
    }
}

impl From<ScreenChar> for u16 {
    fn from(cell: ScreenChar) -> Self {
        cell.encode()
    }
}

impl From<u16> for ScreenChar {
    fn from(raw: u16) -> Self {
        ScreenChar::decode(raw)
    }
}
