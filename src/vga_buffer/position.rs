// src/vga_buffer/position.rs

//! Cursor position and grid addressing

/// Position in a text grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Top-left corner
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Validate position is within a `width` x `height` grid
    pub const fn is_within(&self, width: usize, height: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Linear cell index (`row * width + col`) with bounds checking.
    /// Returns `None` if the position is outside the grid.
    pub const fn cell_index(&self, width: usize, height: usize) -> Option<usize> {
        if !self.is_within(width, height) {
            return None;
        }
        Some(self.row * width + self.col)
    }

    /// Inverse of [`Position::cell_index`]
    pub const fn from_index(index: usize, width: usize) -> Self {
        Self {
            row: index / width,
            col: index % width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vga_buffer::constants::{VGA_HEIGHT, VGA_WIDTH};

    #[test]
    fn test_position_new() {
        let pos = Position::origin();
        assert_eq!(pos.row, 0);
        assert_eq!(pos.col, 0);
    }

    #[test]
    fn test_position_bounds() {
        let mut pos = Position::origin();
        assert!(pos.is_within(VGA_WIDTH, VGA_HEIGHT));

        pos.col = VGA_WIDTH;
        assert!(!pos.is_within(VGA_WIDTH, VGA_HEIGHT));

        pos.col = 0;
        pos.row = VGA_HEIGHT;
        assert!(!pos.is_within(VGA_WIDTH, VGA_HEIGHT));
    }

    #[test]
    fn test_position_cell_index() {
        let pos = Position::new(1, 2);
        assert_eq!(pos.cell_index(VGA_WIDTH, VGA_HEIGHT), Some(82));
        assert_eq!(
            Position::new(VGA_HEIGHT - 1, VGA_WIDTH - 1).cell_index(VGA_WIDTH, VGA_HEIGHT),
            Some(VGA_WIDTH * VGA_HEIGHT - 1)
        );
        assert_eq!(
            Position::new(VGA_HEIGHT, 0).cell_index(VGA_WIDTH, VGA_HEIGHT),
            None
        );
    }

    #[test]
    fn test_from_index_round_trips() {
        assert_eq!(Position::from_index(82, VGA_WIDTH), Position::new(1, 2));
        assert_eq!(Position::from_index(79, VGA_WIDTH), Position::new(0, 79));
    }
}
