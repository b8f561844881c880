//! Presenter: writes a frame to a terminal as ANSI.
//!
//! Every present repaints the full buffer. Style changes are emitted only
//! when the next cell's style differs from the last one written.

use std::io::{self, Write};

#[cfg(feature = "tracing")]
use tracing::debug_span;

use crate::ansi;
use crate::frame::Frame;
use crate::style::Style;

/// Stateful ANSI writer.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
    first_frame: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            first_frame: true,
        }
    }

    /// Force the next present to erase the screen first (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.first_frame = true;
    }

    /// Paint `frame` and position the cursor.
    pub fn present(&mut self, frame: &Frame) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = debug_span!("frame_present", width = frame.width(), height = frame.height())
            .entered();

        let w = &mut self.writer;
        ansi::cursor_hide(w)?;
        if self.first_frame {
            ansi::erase_display(w)?;
            self.first_frame = false;
        }

        let buffer = &frame.buffer;
        let mut current: Option<Style> = None;
        let mut text = String::new();
        for y in 0..buffer.height() {
            ansi::cup(w, 0, y)?;
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.content.is_continuation() {
                    continue;
                }
                let style = cell.style();
                if current != Some(style) {
                    ansi::sgr(w, &style)?;
                    current = Some(style);
                }
                text.clear();
                cell.content.push_to(&mut text);
                w.write_all(text.as_bytes())?;
            }
        }
        ansi::sgr_reset(w)?;

        if frame.cursor_visible
            && let Some((x, y)) = frame.cursor_position
        {
            ansi::cup(w, x, y)?;
            ansi::cursor_show(w)?;
        }
        w.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    #[test]
    fn first_present_erases_and_paints() {
        let mut frame = Frame::new(3, 1);
        frame.buffer.set_string(0, 0, "ab", Style::new(), 3);
        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&frame).expect("present");
        let out = String::from_utf8(presenter.into_inner()).expect("utf8");
        assert!(out.starts_with("\x1b[?25l\x1b[2J"));
        assert!(out.contains("\x1b[1;1H\x1b[0mab "));
        assert!(!out.ends_with("\x1b[?25h"));
    }

    #[test]
    fn cursor_is_shown_at_position() {
        let mut frame = Frame::new(3, 2);
        frame.set_cursor(Some((2, 1)));
        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&frame).expect("present");
        let out = String::from_utf8(presenter.into_inner()).expect("utf8");
        assert!(out.ends_with("\x1b[2;3H\x1b[?25h"));
    }

    #[test]
    fn style_changes_emit_sgr_once_per_run() {
        let mut frame = Frame::new(4, 1);
        frame.buffer.set_string(0, 0, "ab", Style::new().dim(), 4);
        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&frame).expect("present");
        let out = String::from_utf8(presenter.into_inner()).expect("utf8");
        assert_eq!(out.matches("\x1b[0;2m").count(), 1);
        assert!(out.contains("\x1b[0;2mab\x1b[0m  "));
    }
}
