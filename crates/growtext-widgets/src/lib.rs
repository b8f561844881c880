#![forbid(unsafe_code)]

//! Widgets: the self-sizing [`AutoTextArea`](textarea::AutoTextArea) and the
//! small pieces it is composed from.
//!
//! # Role in growtext
//! Widgets draw into a [`Frame`] through the [`Widget`] trait. The text area
//! owns its [`TextBuffer`](growtext_text::TextBuffer), rebuilds its wrap
//! layout after every edit, and resolves its own height from that layout, so
//! a host only has to reserve [`outer_size`](textarea::AutoTextArea::outer_size)
//! and call `render`.

pub mod blink;
pub mod block;
pub mod borders;
pub mod error;
pub mod prompt;
pub mod textarea;
pub mod viewport;

pub use error::ConfigError;

use growtext_core::geometry::Rect;
use growtext_render::cell::Cell;
use growtext_render::frame::Frame;
use growtext_render::style::Style;

/// Something that can draw itself into a rectangle of a frame.
///
/// Rendering takes `&self`: a widget's state is settled by the time it is
/// drawn, so drawing twice produces the same cells.
pub trait Widget {
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Draw `text` at `(x, y)` clipped at `max_x`. Returns the column after the
/// last glyph written.
pub fn draw_text_span(frame: &mut Frame, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
    frame.buffer.set_string(x, y, text, style, max_x)
}

/// Apply `style` to every cell of `area`.
pub fn set_style_area(frame: &mut Frame, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    frame.buffer.set_style(area, style);
}

pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    cell.apply_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_text_span_clips_at_max_x() {
        let mut frame = Frame::new(10, 1);
        let end = draw_text_span(&mut frame, 2, 0, "hello", Style::new(), 5);
        assert_eq!(end, 5);
        assert_eq!(frame.trimmed_lines(), vec!["  hel"]);
    }

    #[test]
    fn set_style_area_skips_empty_style() {
        let mut frame = Frame::new(3, 1);
        set_style_area(&mut frame, Rect::new(0, 0, 3, 1), Style::new());
        assert_eq!(frame.buffer.get(0, 0), Some(&Cell::default()));
        set_style_area(&mut frame, Rect::new(0, 0, 3, 1), Style::new().bold());
        assert!(frame.buffer.get(1, 0).is_some_and(|c| !c.style().is_empty()));
    }
}
