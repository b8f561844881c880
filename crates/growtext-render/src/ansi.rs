//! ANSI escape sequence writers.
//!
//! Plain functions over `io::Write`; the presenter decides when to call them.

use std::io::{self, Write};

use crate::style::{Color, Style, StyleFlags};

/// Move the cursor to 0-indexed `(col, row)`.
#[inline]
pub fn cup<W: Write>(w: &mut W, col: u16, row: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

#[inline]
pub fn erase_display<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Emit a full SGR sequence for `style`, starting from a reset.
pub fn sgr<W: Write>(w: &mut W, style: &Style) -> io::Result<()> {
    let mut params: Vec<String> = vec!["0".into()];
    let attrs = style.attrs.unwrap_or_default();
    for (flag, code) in [
        (StyleFlags::BOLD, "1"),
        (StyleFlags::DIM, "2"),
        (StyleFlags::ITALIC, "3"),
        (StyleFlags::UNDERLINE, "4"),
        (StyleFlags::REVERSE, "7"),
    ] {
        if attrs.contains(flag) {
            params.push(code.into());
        }
    }
    if let Some(fg) = style.fg {
        params.push(color_param(fg, 38));
    }
    if let Some(bg) = style.bg {
        params.push(color_param(bg, 48));
    }
    write!(w, "\x1b[{}m", params.join(";"))
}

fn color_param(color: Color, base: u8) -> String {
    match color {
        Color::Indexed(i) => format!("{base};5;{i}"),
        Color::Rgb(r, g, b) => format!("{base};2;{r};{g};{b}"),
    }
}
