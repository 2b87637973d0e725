// src/vga_buffer/constants.rs

//! Constants for VGA text buffer operations

/// VGA text buffer physical memory address
pub const VGA_BUFFER_ADDR: usize = 0xb8000;

/// Screen dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// Total number of character cells on the hardware screen
pub const CELL_COUNT: usize = VGA_WIDTH * VGA_HEIGHT;

/// Bytes per character (1 byte code point + 1 byte color attribute)
pub const BYTES_PER_CHAR: usize = 2;

/// Total hardware buffer size in bytes
pub const BUFFER_SIZE: usize = CELL_COUNT * BYTES_PER_CHAR;

/// Control byte that advances the cursor to the next line
pub const NEWLINE: u8 = b'\n';

/// Glyph used to blank cells
pub const BLANK_CHAR: u8 = b' ';

/// Replacement character for characters outside ASCII (■)
pub const REPLACEMENT_CHAR: u8 = 0xfe;
