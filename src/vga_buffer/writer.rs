// src/vga_buffer/writer.rs

//! Text display buffer: cursor, active color and wrap/scroll handling over a
//! [`TextBuffer`] backend.
//!
//! The terminal itself performs no locking. Callers that share one instance
//! (see the global writer in the parent module) serialize access.

use super::backend::TextBuffer;
use super::cell::ScreenChar;
use super::color::ColorCode;
use super::config::{ColorPolicy, ScrollMode, TerminalConfig};
use super::constants::{NEWLINE, REPLACEMENT_CHAR};
use super::position::Position;
use crate::diagnostics::{DiagnosticsSnapshot, DisplayDiagnostics};
use crate::errors::{VgaError, VgaResult};
use core::ffi::CStr;
use core::fmt;

/// A writer that appends bytes to a fixed grid, wrapping at the right edge
/// and scrolling at the bottom.
#[derive(Debug)]
pub struct Terminal<B: TextBuffer> {
    buffer: B,
    cursor: Position,
    color: ColorCode,
    config: TerminalConfig,
    diagnostics: DisplayDiagnostics,
}

impl<B: TextBuffer> Terminal<B> {
    /// Wrap `buffer` with the default configuration.
    ///
    /// The grid is left untouched until [`Terminal::initialize`] runs.
    pub const fn new(buffer: B) -> Self {
        Self::with_config(buffer, TerminalConfig::new())
    }

    pub const fn with_config(buffer: B, config: TerminalConfig) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            color: config.default_color,
            config,
            diagnostics: DisplayDiagnostics::new(),
        }
    }

    /// Reset the cursor and color, then blank every cell.
    pub fn initialize(&mut self) {
        self.cursor = Position::origin();
        self.color = self.config.default_color;

        let blank = ScreenChar::blank(self.color);
        for row in 0..B::HEIGHT {
            if self.buffer.fill_row(row, blank).is_err() {
                self.diagnostics.record_cell_write(false);
            }
        }
    }

    /// Replace the active color. Existing cells keep their colors.
    pub fn set_color(&mut self, color: ColorCode) {
        self.color = color;
        self.diagnostics.record_color_change();
    }

    /// Set the active color from raw palette indices.
    ///
    /// # Errors
    ///
    /// With [`ColorPolicy::Validate`], returns [`VgaError::InvalidColor`] for
    /// an index above 15 and leaves the active color unchanged.
    pub fn set_color_raw(&mut self, fg: u8, bg: u8) -> VgaResult<()> {
        let color = match self.config.color_policy {
            ColorPolicy::Validate => ColorCode::try_new(fg, bg).inspect_err(|_| {
                self.diagnostics.record_rejected_color();
            })?,
            ColorPolicy::Mask => ColorCode::masked(fg, bg),
        };
        self.set_color(color);
        Ok(())
    }

    /// Write one cell directly, bypassing the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when `col >= WIDTH` or
    /// `row >= HEIGHT`; nothing is written in that case.
    pub fn put_char_at(
        &mut self,
        byte: u8,
        color: ColorCode,
        col: usize,
        row: usize,
    ) -> VgaResult<()> {
        let result = match Position::new(row, col).cell_index(B::WIDTH, B::HEIGHT) {
            Some(index) => self.buffer.write_cell(index, ScreenChar::new(byte, color)),
            None => Err(VgaError::OutOfBounds { row, col }),
        };
        self.diagnostics.record_cell_write(result.is_ok());
        result
    }

    /// Append one byte at the cursor and advance.
    ///
    /// A newline writes nothing; it parks the cursor on the last column so the
    /// shared advance step below carries it to the start of the next line.
    pub fn put_char(&mut self, byte: u8) {
        if byte == NEWLINE {
            self.cursor.col = B::WIDTH - 1;
        } else {
            let Position { row, col } = self.cursor;
            // Failures are counted by put_char_at; output carries on.
            let _ = self.put_char_at(byte, self.color, col, row);
        }

        self.cursor.col += 1;
        if self.cursor.col == B::WIDTH {
            self.cursor.col = 0;
            self.cursor.row += 1;
            if self.cursor.row == B::HEIGHT {
                self.scroll_up();
                self.cursor.row = B::HEIGHT - 1;
            }
        }
    }

    /// Append every byte of `bytes`, control bytes included.
    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_char(byte);
        }
    }

    /// Append bytes up to the first NUL, or the whole slice if there is none.
    ///
    /// Returns the number of bytes written.
    pub fn write_nul_terminated(&mut self, bytes: &[u8]) -> usize {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.write(&bytes[..len]);
        len
    }

    /// Append the bytes of a C string, excluding the terminator.
    pub fn write_cstr(&mut self, text: &CStr) {
        self.write(text.to_bytes());
    }

    /// Append the UTF-8 bytes of `text` verbatim.
    pub fn write_string(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Append `text` in `color`, then restore the previous active color.
    pub fn write_colored(&mut self, text: &str, color: ColorCode) {
        let old_color = self.color;
        self.color = color;
        self.write_string(text);
        self.color = old_color;
    }

    /// Move every row up by one and blank the bottom row in the active color.
    pub fn scroll_up(&mut self) {
        let blank = ScreenChar::blank(self.color);
        let result = match self.config.scroll_mode {
            ScrollMode::ShiftRows => self.shift_rows(blank),
            ScrollMode::ReferenceParity => self.shift_cells_reference(blank),
        };
        if result.is_err() {
            self.diagnostics.record_cell_write(false);
        }
        self.diagnostics.record_scroll();
    }

    fn shift_rows(&mut self, blank: ScreenChar) -> VgaResult<()> {
        self.buffer
            .copy_cells(B::WIDTH, 0, B::CELL_COUNT - B::WIDTH)?;
        self.buffer.fill_row(B::HEIGHT - 1, blank)
    }

    fn shift_cells_reference(&mut self, blank: ScreenChar) -> VgaResult<()> {
        let last = B::CELL_COUNT - 1;
        for index in 0..B::CELL_COUNT {
            let source = index + B::WIDTH;
            let cell = if source < last {
                self.buffer.read_cell(source)?
            } else {
                blank
            };
            self.buffer.write_cell(index, cell)?;
        }
        Ok(())
    }

    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    pub const fn color(&self) -> ColorCode {
        self.color
    }

    pub const fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// `(width, height)` of the grid
    pub const fn dimensions(&self) -> (usize, usize) {
        (B::WIDTH, B::HEIGHT)
    }

    /// Read back the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> VgaResult<ScreenChar> {
        let index = Position::new(row, col)
            .cell_index(B::WIDTH, B::HEIGHT)
            .ok_or(VgaError::OutOfBounds { row, col })?;
        self.buffer.read_cell(index)
    }

    pub const fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }
}

impl<B: TextBuffer> fmt::Write for Terminal<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if ch.is_ascii() {
                self.put_char(ch as u8);
            } else {
                self.put_char(REPLACEMENT_CHAR);
            }
        }
        Ok(())
    }
}
