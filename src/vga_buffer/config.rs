// src/vga_buffer/config.rs

//! Runtime configuration for a [`Terminal`](super::Terminal)

use super::color::ColorCode;

/// Scroll boundary behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Rows `0..HEIGHT-1` receive the row below; only the bottom row is blanked.
    ShiftRows,
    /// Legacy behaviour: a cell is copied from the row below only while the
    /// source index is strictly below `CELL_COUNT - 1`. The last column of the
    /// second-to-last row is therefore blanked instead of shifted.
    ReferenceParity,
}

impl ScrollMode {
    /// Mode selected by the `reference-scroll` feature
    pub const fn compiled_default() -> Self {
        if cfg!(feature = "reference-scroll") {
            Self::ReferenceParity
        } else {
            Self::ShiftRows
        }
    }
}

impl Default for ScrollMode {
    fn default() -> Self {
        Self::compiled_default()
    }
}

/// Handling of raw palette indices passed to `set_color_raw`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Reject values above 15 with `VgaError::InvalidColor`
    #[default]
    Validate,
    /// Keep the low four bits of each value
    Mask,
}

/// Terminal configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Color restored by `initialize`
    pub default_color: ColorCode,
    pub scroll_mode: ScrollMode,
    pub color_policy: ColorPolicy,
}

impl TerminalConfig {
    pub const fn new() -> Self {
        Self {
            default_color: ColorCode::normal(),
            scroll_mode: ScrollMode::compiled_default(),
            color_policy: ColorPolicy::Validate,
        }
    }

    #[must_use]
    pub const fn with_default_color(mut self, color: ColorCode) -> Self {
        self.default_color = color;
        self
    }

    #[must_use]
    pub const fn with_scroll_mode(mut self, mode: ScrollMode) -> Self {
        self.scroll_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_color_policy(mut self, policy: ColorPolicy) -> Self {
        self.color_policy = policy;
        self
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self::new()
    }
}
