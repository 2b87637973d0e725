// src/errors/unified.rs

//! Error types for the display driver
//!
//! Every failure here is local and recoverable: callers get a value back and
//! decide whether to log, clamp or ignore it. Nothing in the driver panics on
//! bad input.

use core::fmt;

/// VGA subsystem errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaError {
    /// Coordinates or linear index outside the grid
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
    },
    /// Color value is not one of the 16 palette entries
    InvalidColor(u8),
}

impl VgaError {
    /// Convert the error into a human-readable static message.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            VgaError::OutOfBounds { .. } => "position out of bounds",
            VgaError::InvalidColor(_) => "invalid color",
        }
    }
}

impl fmt::Display for VgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VgaError::OutOfBounds { row, col } => {
                write!(f, "{} (row {}, col {})", self.as_str(), row, col)
            }
            VgaError::InvalidColor(value) => write!(f, "{} ({:#04x})", self.as_str(), value),
        }
    }
}

/// Result type alias for display operations
pub type VgaResult<T> = core::result::Result<T, VgaError>;

/// Helper trait for error context
pub trait ErrorContext {
    /// Get a detailed description of the error
    fn context(&self) -> &'static str;
}

impl ErrorContext for VgaError {
    fn context(&self) -> &'static str {
        match self {
            VgaError::OutOfBounds { .. } => "Attempted to write outside the visible text grid",
            VgaError::InvalidColor(_) => "Color index must be in the range 0..=15",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_coordinates() {
        let err = VgaError::OutOfBounds { row: 25, col: 3 };
        assert_eq!(err.to_string(), "position out of bounds (row 25, col 3)");
    }

    #[test]
    fn display_includes_color_value() {
        assert_eq!(VgaError::InvalidColor(16).to_string(), "invalid color (0x10)");
    }

    #[test]
    fn context_is_distinct_per_variant() {
        assert_ne!(
            VgaError::InvalidColor(0xff).context(),
            VgaError::OutOfBounds { row: 0, col: 0 }.context()
        );
    }
}
