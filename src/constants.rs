// src/constants.rs

//! Hardware constants for the serial log console

/// COM1 base I/O port address
pub const SERIAL_IO_PORT: u16 = 0x3F8;

/// UART input clock divided by 16 (the divisor for divisor == 1)
pub const UART_BASE_BAUD: u32 = 115_200;

/// Line speed used for log output
pub const SERIAL_BAUD_RATE: u32 = 38_400;

/// Line control: divisor latch access bit
pub const DLAB_ENABLE: u8 = 0x80;

/// Line control: 8 data bits, no parity, one stop bit
pub const CONFIG_8N1: u8 = 0x03;

/// FIFO control: enable, clear both FIFOs, 14-byte threshold
pub const FIFO_ENABLE_CLEAR: u8 = 0xC7;

/// Modem control: DTR, RTS, OUT2
pub const MODEM_CTRL_ENABLE_IRQ_RTS_DSR: u8 = 0x0B;

/// Line status: transmit holding register empty
pub const LSR_TRANSMIT_EMPTY: u8 = 0x20;

/// Spin limit while waiting for the transmitter
pub const TIMEOUT_ITERATIONS: u32 = 100_000;

/// Scratch register probe patterns
pub const SCRATCH_TEST_PRIMARY: u8 = 0xAA;
pub const SCRATCH_TEST_SECONDARY: u8 = 0x55;
