// src/serial.rs

//! Serial port driver (COM1) for log output
//!
//! Provides UART communication on COM1 (0x3F8) with:
//! - 38400 baud rate
//! - 8 data bits, no parity, 1 stop bit (8N1)
//! - FIFO buffer support
//! - Hardware transmit buffer checking with a bounded wait
//!
//! The port is probed and configured on first use. When no UART answers the
//! scratch register probe, log output is dropped.

use crate::constants::UART_BASE_BAUD;
use core::fmt;

/// Divisor latch value for `baud`, `None` if the rate cannot be produced
/// exactly by the 115200 Hz base clock.
pub const fn baud_divisor(baud: u32) -> Option<u16> {
    if baud == 0 || baud > UART_BASE_BAUD || UART_BASE_BAUD % baud != 0 {
        return None;
    }
    let divisor = UART_BASE_BAUD / baud;
    if divisor > u16::MAX as u32 {
        None
    } else {
        Some(divisor as u16)
    }
}

#[cfg(target_arch = "x86_64")]
pub use uart::{init, is_available, write_str, InitError};

#[cfg(target_arch = "x86_64")]
mod uart {
    use super::baud_divisor;
    use crate::constants::*;
    use core::sync::atomic::{AtomicBool, Ordering};
    use spin::Mutex;
    use x86_64::instructions::port::Port;

    /// Register offsets from base port
    mod register_offset {
        pub const DATA: u16 = 0;
        pub const INTERRUPT_ENABLE: u16 = 1;
        pub const FIFO_CONTROL: u16 = 2;
        pub const LINE_CONTROL: u16 = 3;
        pub const MODEM_CONTROL: u16 = 4;
        pub const LINE_STATUS: u16 = 5;
        pub const SCRATCH: u16 = 7;
    }

    static SERIAL_INITIALIZED: AtomicBool = AtomicBool::new(false);
    static SERIAL_PORT_AVAILABLE: AtomicBool = AtomicBool::new(false);

    struct SerialPorts {
        data: Port<u8>,
        interrupt_enable: Port<u8>,
        fifo: Port<u8>,
        line_control: Port<u8>,
        modem_control: Port<u8>,
        line_status: Port<u8>,
        scratch: Port<u8>,
    }

    impl SerialPorts {
        const fn new() -> Self {
            Self {
                data: Port::new(SERIAL_IO_PORT + register_offset::DATA),
                interrupt_enable: Port::new(SERIAL_IO_PORT + register_offset::INTERRUPT_ENABLE),
                fifo: Port::new(SERIAL_IO_PORT + register_offset::FIFO_CONTROL),
                line_control: Port::new(SERIAL_IO_PORT + register_offset::LINE_CONTROL),
                modem_control: Port::new(SERIAL_IO_PORT + register_offset::MODEM_CONTROL),
                line_status: Port::new(SERIAL_IO_PORT + register_offset::LINE_STATUS),
                scratch: Port::new(SERIAL_IO_PORT + register_offset::SCRATCH),
            }
        }

        /// Program divisor, framing, FIFO and modem control
        fn configure(&mut self, divisor: u16) {
            // SAFETY: fixed COM1 registers; callers hold the SERIAL_PORTS lock.
            unsafe {
                self.interrupt_enable.write(0x00);
                self.line_control.write(DLAB_ENABLE);
                self.data.write((divisor & 0xFF) as u8);
                self.interrupt_enable.write((divisor >> 8) as u8);
                self.line_control.write(CONFIG_8N1);
                self.fifo.write(FIFO_ENABLE_CLEAR);
                self.modem_control.write(MODEM_CTRL_ENABLE_IRQ_RTS_DSR);
            }
        }

        fn scratch_round_trip(&mut self, value: u8) -> bool {
            // SAFETY: the scratch register has no side effects.
            unsafe {
                self.scratch.write(value);
                wait_short();
                self.scratch.read() == value
            }
        }

        /// Returns false if the transmitter never became ready
        fn poll_and_write(&mut self, byte: u8) -> bool {
            for _ in 0..TIMEOUT_ITERATIONS {
                // SAFETY: reading LSR and writing THR are plain UART accesses.
                unsafe {
                    if self.line_status.read() & LSR_TRANSMIT_EMPTY != 0 {
                        self.data.write(byte);
                        return true;
                    }
                }
                core::hint::spin_loop();
            }
            false
        }
    }

    static SERIAL_PORTS: Mutex<SerialPorts> = Mutex::new(SerialPorts::new());

    /// Serial port initialization result
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InitError {
        AlreadyInitialized,
        PortNotPresent,
        UnsupportedBaudRate,
    }

    impl core::fmt::Display for InitError {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            match self {
                InitError::AlreadyInitialized => write!(f, "Serial port already initialized"),
                InitError::PortNotPresent => write!(f, "Serial port hardware not present"),
                InitError::UnsupportedBaudRate => write!(f, "Unsupported baud rate"),
            }
        }
    }

    /// Probe and configure COM1
    ///
    /// # Errors
    ///
    /// Fails if called twice or if no UART responds.
    pub fn init() -> Result<(), InitError> {
        if SERIAL_INITIALIZED.swap(true, Ordering::AcqRel) {
            return Err(InitError::AlreadyInitialized);
        }

        let divisor = baud_divisor(SERIAL_BAUD_RATE).ok_or(InitError::UnsupportedBaudRate)?;
        let mut ports = SERIAL_PORTS.lock();
        let present = ports.scratch_round_trip(SCRATCH_TEST_PRIMARY)
            && ports.scratch_round_trip(SCRATCH_TEST_SECONDARY)
            && ports.scratch_round_trip(0x00);
        if !present {
            return Err(InitError::PortNotPresent);
        }

        ports.configure(divisor);
        SERIAL_PORT_AVAILABLE.store(true, Ordering::Release);
        Ok(())
    }

    #[inline(always)]
    fn wait_short() {
        for _ in 0..100 {
            core::hint::spin_loop();
        }
    }

    /// Return whether the serial port hardware is available
    #[inline]
    pub fn is_available() -> bool {
        SERIAL_PORT_AVAILABLE.load(Ordering::Acquire)
    }

    /// Write a string to the serial port, configuring it on first use
    pub fn write_str(s: &str) {
        if !SERIAL_INITIALIZED.load(Ordering::Acquire) {
            let _ = init();
        }
        if !is_available() {
            return;
        }

        let mut ports = SERIAL_PORTS.lock();
        for byte in s.bytes() {
            if !ports.poll_and_write(byte) {
                break;
            }
        }
    }
}

/// Serial writer implementing `core::fmt::Write`
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialWriter;

impl fmt::Write for SerialWriter {
    #[cfg(target_arch = "x86_64")]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_str(s);
        Ok(())
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn write_str(&mut self, _s: &str) -> fmt::Result {
        Ok(())
    }
}

/// Write formatted data to the serial port
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    let _ = SerialWriter.write_fmt(args);
}

/// Serial print macro
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => ({
        $crate::serial::_print(format_args!($($arg)*));
    });
}

/// Serial println macro
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($fmt:expr) => ($crate::serial_print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => ($crate::serial_print!(
        concat!($fmt, "\n"), $($arg)*
    ));
}
