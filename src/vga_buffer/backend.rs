// src/vga_buffer/backend.rs

//! Low-level text buffer access abstractions.
//!
//! The [`TextBuffer`] trait lets the terminal target any backing store, from
//! the classic text-mode buffer at `0xB8000` to plain memory for tests. Grid
//! dimensions are associated constants of the backend, so the terminal logic
//! never hardcodes 80x25.
//!
//! The only raw address cast in the crate lives in [`TextModeBuffer`].

use super::cell::ScreenChar;
use super::constants::{VGA_BUFFER_ADDR, VGA_HEIGHT, VGA_WIDTH};
use super::position::Position;
use crate::errors::{VgaError, VgaResult};
use core::ptr::NonNull;

/// Abstraction over character cell memory.
pub trait TextBuffer {
    /// Columns per row
    const WIDTH: usize;
    /// Number of rows
    const HEIGHT: usize;
    /// Total number of addressable character cells
    const CELL_COUNT: usize = Self::WIDTH * Self::HEIGHT;

    /// Read the cell at linear `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when `index` is outside the buffer.
    fn read_cell(&self, index: usize) -> VgaResult<ScreenChar>;

    /// Write `cell` at linear `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when `index` is outside the buffer.
    fn write_cell(&mut self, index: usize, cell: ScreenChar) -> VgaResult<()>;

    /// Copy `count` cells starting at `src` into the region beginning at `dst`.
    ///
    /// Overlapping regions are handled in the direction that preserves the
    /// source contents.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] if either range lies outside the
    /// buffer.
    fn copy_cells(&mut self, src: usize, dst: usize, count: usize) -> VgaResult<()> {
        if count == 0 {
            return Ok(());
        }
        check_range::<Self>(src, count)?;
        check_range::<Self>(dst, count)?;

        if dst <= src {
            for offset in 0..count {
                let cell = self.read_cell(src + offset)?;
                self.write_cell(dst + offset, cell)?;
            }
        } else {
            for offset in (0..count).rev() {
                let cell = self.read_cell(src + offset)?;
                self.write_cell(dst + offset, cell)?;
            }
        }
        Ok(())
    }

    /// Fill an entire row with `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] if the row exceeds the display.
    fn fill_row(&mut self, row: usize, cell: ScreenChar) -> VgaResult<()> {
        if row >= Self::HEIGHT {
            return Err(VgaError::OutOfBounds { row, col: 0 });
        }
        let start = row * Self::WIDTH;
        for offset in 0..Self::WIDTH {
            self.write_cell(start + offset, cell)?;
        }
        Ok(())
    }
}

#[inline]
fn out_of_bounds<B: TextBuffer + ?Sized>(index: usize) -> VgaError {
    let pos = Position::from_index(index, B::WIDTH);
    VgaError::OutOfBounds {
        row: pos.row,
        col: pos.col,
    }
}

fn check_range<B: TextBuffer + ?Sized>(start: usize, count: usize) -> VgaResult<()> {
    match start.checked_add(count) {
        Some(end) if end <= B::CELL_COUNT => Ok(()),
        _ => Err(out_of_bounds::<B>(start.saturating_add(count))),
    }
}

/// Concrete backend that talks to the legacy text-mode buffer at 0xB8000.
///
/// All accesses are volatile so the compiler never elides or merges writes to
/// video memory.
#[derive(Debug)]
pub struct TextModeBuffer {
    ptr: NonNull<u16>,
}

// SAFETY: the buffer is a fixed MMIO region. The pointer is never aliased by
// another `TextModeBuffer` except through the caller contract of `new`, and
// the global terminal serializes access behind a mutex.
unsafe impl Send for TextModeBuffer {}

impl TextModeBuffer {
    /// Map the canonical VGA text buffer.
    ///
    /// # Safety
    ///
    /// `VGA_BUFFER_ADDR` must be identity mapped and writable, and no other
    /// live `TextModeBuffer` may exist for the same region.
    #[must_use]
    pub const unsafe fn new() -> Self {
        // SAFETY: 0xB8000 is non-null; the caller upholds the mapping contract.
        unsafe { Self::from_ptr(NonNull::new_unchecked(VGA_BUFFER_ADDR as *mut u16)) }
    }

    /// Map a text buffer at an arbitrary address (e.g. a higher-half alias).
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `VGA_WIDTH * VGA_HEIGHT` writable,
    /// `u16`-aligned cells that stay valid for the lifetime of the value.
    #[must_use]
    pub const unsafe fn from_ptr(ptr: NonNull<u16>) -> Self {
        Self { ptr }
    }

    #[inline]
    const fn is_valid_index(index: usize) -> bool {
        index < Self::CELL_COUNT
    }
}

impl TextBuffer for TextModeBuffer {
    const WIDTH: usize = VGA_WIDTH;
    const HEIGHT: usize = VGA_HEIGHT;

    fn read_cell(&self, index: usize) -> VgaResult<ScreenChar> {
        if !Self::is_valid_index(index) {
            return Err(out_of_bounds::<Self>(index));
        }

        // SAFETY: index checked above; region validity is the constructor contract.
        let raw = unsafe { core::ptr::read_volatile(self.ptr.as_ptr().add(index)) };
        Ok(ScreenChar::decode(raw))
    }

    fn write_cell(&mut self, index: usize, cell: ScreenChar) -> VgaResult<()> {
        if !Self::is_valid_index(index) {
            return Err(out_of_bounds::<Self>(index));
        }

        // SAFETY: index checked above; region validity is the constructor contract.
        unsafe {
            core::ptr::write_volatile(self.ptr.as_ptr().add(index), cell.encode());
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

/// Backend held in ordinary memory, `W` columns by `H` rows.
///
/// Cells are stored in their encoded `u16` form so tests observe exactly
/// what the hardware would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBuffer<const W: usize = VGA_WIDTH, const H: usize = VGA_HEIGHT> {
    cells: [[u16; W]; H],
}

impl<const W: usize, const H: usize> MemoryBuffer<W, H> {
    /// Zero-filled buffer, as video memory looks before initialization.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(W > 0 && H > 0, "grid dimensions must be non-zero") };
        Self { cells: [[0; W]; H] }
    }

    /// Raw encoded rows
    pub const fn raw_rows(&self) -> &[[u16; W]; H] {
        &self.cells
    }

    /// Decoded cell at `(row, col)`, `None` when outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<ScreenChar> {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|&raw| ScreenChar::decode(raw))
    }

    /// Glyph bytes of one row, handy for assertions
    pub fn row_bytes(&self, row: usize) -> Option<[u8; W]> {
        let cells = self.cells.get(row)?;
        let mut bytes = [0u8; W];
        for (byte, &raw) in bytes.iter_mut().zip(cells.iter()) {
            *byte = ScreenChar::decode(raw).ascii_character;
        }
        Some(bytes)
    }
}

impl<const W: usize, const H: usize> Default for MemoryBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> TextBuffer for MemoryBuffer<W, H> {
    const WIDTH: usize = W;
    const HEIGHT: usize = H;

    fn read_cell(&self, index: usize) -> VgaResult<ScreenChar> {
        let pos = Position::from_index(index, W);
        self.get(pos.row, pos.col)
            .ok_or(VgaError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
    }

    fn write_cell(&mut self, index: usize, cell: ScreenChar) -> VgaResult<()> {
        let pos = Position::from_index(index, W);
        self.cells
            .get_mut(pos.row)
            .and_then(|cells| cells.get_mut(pos.col))
            .map(|slot| {
                *slot = cell.encode();
            })
            .ok_or(VgaError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vga_buffer::color::{Color, ColorCode};

    fn cell(byte: u8) -> ScreenChar {
        ScreenChar::new(byte, ColorCode::normal())
    }

    #[test]
    fn test_memory_buffer_read_write() {
        let mut buffer = MemoryBuffer::<4, 3>::new();
        buffer.write_cell(5, cell(b'z')).unwrap();
        assert_eq!(buffer.get(1, 1), Some(cell(b'z')));
        assert_eq!(buffer.raw_rows()[1][1], 0x077a);
        assert_eq!(buffer.read_cell(5), Ok(cell(b'z')));
    }

    #[test]
    fn test_memory_buffer_rejects_out_of_range() {
        let mut buffer = MemoryBuffer::<4, 3>::new();
        assert_eq!(
            buffer.write_cell(12, cell(b'a')),
            Err(VgaError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            buffer.read_cell(13),
            Err(VgaError::OutOfBounds { row: 3, col: 1 })
        );
    }

    #[test]
    fn test_default_dimensions_match_hardware() {
        assert_eq!(<MemoryBuffer as TextBuffer>::WIDTH, VGA_WIDTH);
        assert_eq!(<MemoryBuffer as TextBuffer>::HEIGHT, VGA_HEIGHT);
        assert_eq!(<MemoryBuffer as TextBuffer>::CELL_COUNT, 2000);
        assert_eq!(<TextModeBuffer as TextBuffer>::CELL_COUNT, 2000);
    }

    #[test]
    fn test_copy_cells_forward_overlap() {
        let mut buffer = MemoryBuffer::<4, 2>::new();
        for (i, byte) in b"abcdefgh".iter().enumerate() {
            buffer.write_cell(i, cell(*byte)).unwrap();
        }
        buffer.copy_cells(4, 0, 4).unwrap();
        assert_eq!(&buffer.row_bytes(0).unwrap(), b"efgh");
        assert_eq!(&buffer.row_bytes(1).unwrap(), b"efgh");
    }

    #[test]
    fn test_copy_cells_backward_overlap() {
        let mut buffer = MemoryBuffer::<6, 1>::new();
        for (i, byte) in b"abcdef".iter().enumerate() {
            buffer.write_cell(i, cell(*byte)).unwrap();
        }
        buffer.copy_cells(0, 2, 4).unwrap();
        assert_eq!(&buffer.row_bytes(0).unwrap(), b"ababcd");
    }

    #[test]
    fn test_copy_cells_bounds() {
        let mut buffer = MemoryBuffer::<4, 2>::new();
        assert!(buffer.copy_cells(6, 0, 4).is_err());
        assert!(buffer.copy_cells(0, 6, 4).is_err());
        assert!(buffer.copy_cells(usize::MAX, 0, 2).is_err());
        assert_eq!(buffer.copy_cells(9, 9, 0), Ok(()));
    }

    #[test]
    fn test_fill_row() {
        let mut buffer = MemoryBuffer::<3, 2>::new();
        let red = ScreenChar::new(b'#', ColorCode::new(Color::Red, Color::Black));
        buffer.fill_row(1, red).unwrap();
        assert_eq!(buffer.get(1, 2), Some(red));
        assert_eq!(buffer.get(0, 0), Some(ScreenChar::decode(0)));
        assert_eq!(
            buffer.fill_row(2, red),
            Err(VgaError::OutOfBounds { row: 2, col: 0 })
        );
    }
}
