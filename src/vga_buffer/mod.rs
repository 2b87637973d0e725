// src/vga_buffer/mod.rs

//! VGA text mode driver
//!
//! The core is [`Terminal`], a single-owner writer over any [`TextBuffer`]
//! backend. It keeps the cursor inside the grid after every call, wraps at
//! the right edge and scrolls at the bottom.
//!
//! On x86_64 this module also owns the one hardware terminal mapped at
//! `0xB8000`, guarded by an interrupt-safe mutex and reachable through
//! [`print!`](crate::print) / [`println!`](crate::println).

mod backend;
mod cell;
mod color;
mod config;
pub mod constants;
mod position;
mod writer;

pub use backend::{MemoryBuffer, TextBuffer, TextModeBuffer};
pub use cell::ScreenChar;
pub use color::{Color, ColorCode};
pub use config::{ColorPolicy, ScrollMode, TerminalConfig};
pub use position::Position;
pub use writer::Terminal;

#[cfg(target_arch = "x86_64")]
pub use global::*;

#[cfg(target_arch = "x86_64")]
mod global {
    use super::{ColorCode, Terminal, TextModeBuffer};
    use crate::diagnostics::DiagnosticsSnapshot;
    use crate::errors::{ErrorContext, VgaResult};
    use crate::serial_println;
    use core::fmt;
    use lazy_static::lazy_static;
    use spin::Mutex;
    use x86_64::instructions::interrupts;

    lazy_static! {
        /// Global VGA writer protected by Mutex
        ///
        /// The screen is blanked the first time the writer is touched.
        ///
        /// # Locking Order
        ///
        /// Always acquire the serial lock before this one if both are needed.
        static ref VGA_WRITER: Mutex<Terminal<TextModeBuffer>> = {
            // SAFETY: this is the only TextModeBuffer constructed for 0xB8000,
            // and the bootloader identity maps the legacy VGA window.
            let mut terminal = Terminal::new(unsafe { TextModeBuffer::new() });
            terminal.initialize();
            Mutex::new(terminal)
        };
    }

    /// Execute a function with the VGA writer, protected from interrupts
    ///
    /// An interrupt handler that prints can never spin on a lock held by the
    /// code it interrupted.
    fn with_writer<F, R>(f: F) -> R
    where
        F: FnOnce(&mut Terminal<TextModeBuffer>) -> R,
    {
        interrupts::without_interrupts(|| f(&mut VGA_WRITER.lock()))
    }

    /// Global print! macro
    #[macro_export]
    macro_rules! print {
        ($($arg:tt)*) => ({
            $crate::vga_buffer::_print(format_args!($($arg)*))
        });
    }

    /// Global println! macro
    #[macro_export]
    macro_rules! println {
        () => ($crate::print!("\n"));
        ($fmt:expr) => ($crate::print!(concat!($fmt, "\n")));
        ($fmt:expr, $($arg:tt)*) => ($crate::print!(concat!($fmt, "\n"), $($arg)*));
    }

    /// Print function called by macros
    #[doc(hidden)]
    pub fn _print(args: fmt::Arguments) {
        with_writer(|writer| {
            use core::fmt::Write;
            let _ = writer.write_fmt(args);
        });
    }

    /// Blank the screen and reset cursor and color
    ///
    /// Safe to call more than once; each call re-blanks the grid.
    pub fn init() {
        with_writer(|writer| writer.initialize());
        serial_println!("[VGA] text buffer initialized");
    }

    /// Clear the screen
    pub fn clear() {
        with_writer(|writer| writer.initialize());
    }

    /// Set the text color
    pub fn set_color(color: ColorCode) {
        with_writer(|writer| writer.set_color(color));
    }

    /// Write one cell at `(col, row)` without moving the cursor
    ///
    /// # Errors
    ///
    /// Propagates [`VgaError::OutOfBounds`](crate::errors::VgaError) after
    /// logging it to the serial console.
    pub fn put_char_at(byte: u8, color: ColorCode, col: usize, row: usize) -> VgaResult<()> {
        with_writer(|writer| writer.put_char_at(byte, color, col, row)).inspect_err(|err| {
            serial_println!("[VGA] put_char_at rejected: {} ({})", err, err.context());
        })
    }

    /// Write raw bytes through the cursor, control bytes included
    pub fn write_bytes(bytes: &[u8]) {
        with_writer(|writer| writer.write(bytes));
    }

    /// Print colored text
    pub fn print_colored(s: &str, color: ColorCode) {
        with_writer(|writer| writer.write_colored(s, color));
    }

    /// Counters of the hardware terminal
    pub fn diagnostics() -> DiagnosticsSnapshot {
        with_writer(|writer| writer.diagnostics())
    }
}
