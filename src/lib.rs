// src/lib.rs
//! vga_terminal - freestanding VGA text-mode terminal
//!
//! A fixed 80x25 grid of colored character cells with append-only output,
//! automatic wrap and scroll. The state machine ([`vga_buffer::Terminal`]) is
//! generic over its backing store so the same code drives video memory at
//! `0xB8000` and in-memory grids under test.
//!
//! ```
//! use vga_terminal::vga_buffer::{MemoryBuffer, Position, Terminal};
//!
//! let mut term = Terminal::new(MemoryBuffer::<80, 25>::new());
//! term.initialize();
//! term.write_string("hi\n");
//! assert_eq!(term.cursor(), Position::new(1, 0));
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod serial;
pub mod vga_buffer;

pub use errors::{VgaError, VgaResult};
pub use vga_buffer::{Color, ColorCode, Position, ScreenChar, Terminal};
