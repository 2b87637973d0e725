//! End-to-end behaviour of the terminal on a hardware-sized grid.

use vga_terminal::vga_buffer::{
    Color, ColorCode, MemoryBuffer, Position, ScreenChar, ScrollMode, Terminal, TerminalConfig,
};
use vga_terminal::VgaError;

const WIDTH: usize = 80;
const HEIGHT: usize = 25;

type Screen = Terminal<MemoryBuffer<WIDTH, HEIGHT>>;

fn screen() -> Screen {
    let mut term = Terminal::new(MemoryBuffer::new());
    term.initialize();
    term
}

fn glyph(term: &Screen, row: usize, col: usize) -> u8 {
    term.cell_at(row, col).unwrap().ascii_character
}

#[test]
fn writes_two_characters() {
    let mut term = screen();
    term.write_string("AB");

    assert_eq!(term.cell_at(0, 0), Ok(ScreenChar::new(b'A', ColorCode::normal())));
    assert_eq!(term.cell_at(0, 1), Ok(ScreenChar::new(b'B', ColorCode::normal())));
    assert_eq!(term.cursor(), Position::new(0, 2));
}

#[test]
fn full_row_wraps_to_next_line() {
    let mut term = screen();
    term.write(&[b'X'; WIDTH]);

    assert_eq!(&term.buffer().row_bytes(0).unwrap(), &[b'X'; WIDTH]);
    assert_eq!(term.cursor(), Position::new(1, 0));
    assert_eq!(term.diagnostics().scrolls, 0);
}

#[test]
fn newline_moves_without_glyph() {
    let mut term = screen();
    term.write_string("hi\n");

    assert_eq!(glyph(&term, 0, 0), b'h');
    assert_eq!(glyph(&term, 0, 1), b'i');
    assert_eq!(glyph(&term, 0, 2), b' ');
    assert_eq!(term.cursor(), Position::new(1, 0));
}

#[test]
fn height_newlines_scroll_exactly_once() {
    let mut term = screen();
    for _ in 0..HEIGHT - 1 {
        term.put_char(b'\n');
    }
    assert_eq!(term.diagnostics().scrolls, 0);
    assert_eq!(term.cursor(), Position::new(HEIGHT - 1, 0));

    term.put_char(b'\n');
    assert_eq!(term.diagnostics().scrolls, 1);
    assert_eq!(term.cursor(), Position::new(HEIGHT - 1, 0));
}

#[test]
fn boot_banner_scrolls_oldest_lines_away() {
    let mut term = screen();
    for line in 0..40 {
        let text = format!("{:02}: Hello again, kernel World!\n", line);
        term.write_string(&text);
    }

    // 40 lines into 25 rows: the last line's newline leaves row 24 empty.
    assert_eq!(term.diagnostics().scrolls, 16);
    assert_eq!(term.cursor(), Position::new(HEIGHT - 1, 0));
    assert_eq!(&term.buffer().row_bytes(0).unwrap()[..2], b"16");
    assert_eq!(&term.buffer().row_bytes(23).unwrap()[..2], b"39");
    assert!(term.buffer().row_bytes(24).unwrap().iter().all(|&b| b == b' '));
}

#[test]
fn write_nul_terminated_is_bounded() {
    let mut term = screen();
    assert_eq!(term.write_nul_terminated(b"no terminator"), 13);
    assert_eq!(term.cursor(), Position::new(0, 13));
    assert_eq!(term.write_nul_terminated(b"\0ignored"), 0);
    assert_eq!(term.cursor(), Position::new(0, 13));
}

#[test]
fn control_bytes_other_than_newline_are_written() {
    let mut term = screen();
    term.write(b"\t\r\0");
    assert_eq!(glyph(&term, 0, 0), b'\t');
    assert_eq!(glyph(&term, 0, 1), b'\r');
    assert_eq!(glyph(&term, 0, 2), 0);
    assert_eq!(term.cursor(), Position::new(0, 3));
}

#[test]
fn out_of_bounds_write_is_reported_and_harmless() {
    let mut term = screen();
    let before = term.buffer().clone();
    assert_eq!(
        term.put_char_at(b'!', ColorCode::normal(), WIDTH, 0),
        Err(VgaError::OutOfBounds { row: 0, col: WIDTH })
    );
    assert_eq!(term.buffer(), &before);

    term.write_string("still ok");
    assert_eq!(term.cursor(), Position::new(0, 8));
}

#[test]
fn color_changes_only_affect_new_cells() {
    let mut term = screen();
    term.write_string("a");
    let warn = ColorCode::new(Color::LightBrown, Color::Blue);
    term.set_color(warn);
    term.write_string("b\n");

    assert_eq!(term.cell_at(0, 0).unwrap().color_code, ColorCode::normal());
    assert_eq!(term.cell_at(0, 1).unwrap().color_code, warn);
    // untouched cells keep the initialization color
    assert_eq!(term.cell_at(0, 2).unwrap().color_code, ColorCode::normal());
    assert_eq!(term.buffer().raw_rows()[0][1], 0x1e62);
}

#[test]
fn reference_scroll_loses_one_cell() {
    let config = TerminalConfig::new().with_scroll_mode(ScrollMode::ReferenceParity);
    let mut term: Screen = Terminal::with_config(MemoryBuffer::new(), config);
    term.initialize();
    let color = term.color();
    term.put_char_at(b'Y', color, WIDTH - 1, HEIGHT - 1).unwrap();
    term.put_char_at(b'Z', color, WIDTH - 2, HEIGHT - 1).unwrap();

    term.scroll_up();

    assert_eq!(glyph(&term, HEIGHT - 2, WIDTH - 2), b'Z');
    assert_eq!(glyph(&term, HEIGHT - 2, WIDTH - 1), b' ');
}

#[test]
fn shift_rows_scroll_keeps_corner() {
    let config = TerminalConfig::new().with_scroll_mode(ScrollMode::ShiftRows);
    let mut term: Screen = Terminal::with_config(MemoryBuffer::new(), config);
    term.initialize();
    let color = term.color();
    term.put_char_at(b'Y', color, WIDTH - 1, HEIGHT - 1).unwrap();

    term.scroll_up();

    assert_eq!(glyph(&term, HEIGHT - 2, WIDTH - 1), b'Y');
    assert_eq!(glyph(&term, HEIGHT - 1, WIDTH - 1), b' ');
}

#[test]
fn formatted_output_goes_through_cursor() {
    use core::fmt::Write;

    let mut term = screen();
    writeln!(term, "{} + {} = {}", 2, 2, 4).unwrap();
    assert_eq!(&term.buffer().row_bytes(0).unwrap()[..9], b"2 + 2 = 4");
    assert_eq!(term.cursor(), Position::new(1, 0));
}
