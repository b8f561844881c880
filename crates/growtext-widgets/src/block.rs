#![forbid(unsafe_code)]

//! A bordered frame around another widget's area.

use growtext_core::geometry::{Rect, Sides};
use growtext_render::cell::Cell;
use growtext_render::frame::Frame;
use growtext_render::style::Style;

use crate::borders::{BorderSet, BorderType, Borders};
use crate::{Widget, apply_style, set_style_area};

/// A widget that draws borders and reserves the space inside them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    style: Style,
}

impl Block {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A block with all borders enabled.
    #[must_use]
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Style applied to border characters.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Background style for the entire block area.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn sides(&self) -> Sides {
        let has = |side| u16::from(self.borders.contains(side));
        Sides {
            top: has(Borders::TOP),
            right: has(Borders::RIGHT),
            bottom: has(Borders::BOTTOM),
            left: has(Borders::LEFT),
        }
    }

    /// The area inside the block's borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(self.sides())
    }

    /// Cells consumed by borders as `(horizontal, vertical)`.
    #[must_use]
    pub fn chrome_size(&self) -> (u16, u16) {
        let sides = self.sides();
        (sides.horizontal_sum(), sides.vertical_sum())
    }

    fn border_cell(&self, c: char) -> Cell {
        let mut cell = Cell::from_char(c);
        apply_style(&mut cell, self.border_style);
        cell
    }

    fn render_borders(&self, area: Rect, frame: &mut Frame) {
        let set: BorderSet = self.border_type.to_border_set();
        let buf = &mut frame.buffer;
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);

        if self.borders.contains(Borders::LEFT) {
            for y in area.y..area.bottom() {
                buf.set(area.x, y, self.border_cell(set.vertical));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in area.y..area.bottom() {
                buf.set(right, y, self.border_cell(set.vertical));
            }
        }
        if self.borders.contains(Borders::TOP) {
            for x in area.x..area.right() {
                buf.set(x, area.y, self.border_cell(set.horizontal));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in area.x..area.right() {
                buf.set(x, bottom, self.border_cell(set.horizontal));
            }
        }

        // Corners go last so they overwrite the edges.
        if self.borders.contains(Borders::LEFT | Borders::TOP) {
            buf.set(area.x, area.y, self.border_cell(set.top_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::TOP) {
            buf.set(right, area.y, self.border_cell(set.top_right));
        }
        if self.borders.contains(Borders::LEFT | Borders::BOTTOM) {
            buf.set(area.x, bottom, self.border_cell(set.bottom_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::BOTTOM) {
            buf.set(right, bottom, self.border_cell(set.bottom_right));
        }
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Block",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }
        set_style_area(frame, area, self.style);
        self.render_borders(area, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_with_all_borders() {
        let block = Block::bordered();
        assert_eq!(block.inner(Rect::new(0, 0, 10, 10)), Rect::new(1, 1, 8, 8));
        assert_eq!(block.chrome_size(), (2, 2));
    }

    #[test]
    fn inner_with_no_borders() {
        let block = Block::new();
        let area = Rect::new(3, 4, 10, 10);
        assert_eq!(block.inner(area), area);
        assert_eq!(block.chrome_size(), (0, 0));
    }

    #[test]
    fn inner_with_partial_borders() {
        let block = Block::new().borders(Borders::TOP | Borders::LEFT);
        assert_eq!(block.inner(Rect::new(0, 0, 10, 10)), Rect::new(1, 1, 9, 9));
    }

    #[test]
    fn render_empty_area_is_noop() {
        let mut frame = Frame::new(1, 1);
        Block::bordered().render(Rect::new(0, 0, 0, 0), &mut frame);
        assert_eq!(frame.trimmed_lines(), vec![""]);
    }

    #[test]
    fn render_rounded_box() {
        let mut frame = Frame::new(5, 3);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .render(Rect::new(0, 0, 5, 3), &mut frame);
        assert_eq!(frame.trimmed_lines(), vec!["╭───╮", "│   │", "╰───╯"]);
    }

    #[test]
    fn border_style_is_applied() {
        let mut frame = Frame::new(3, 3);
        Block::bordered()
            .border_style(Style::new().dim())
            .render(Rect::new(0, 0, 3, 3), &mut frame);
        let corner = frame.buffer.get(0, 0).map(Cell::style).unwrap_or_default();
        assert!(corner.has_attr(growtext_render::style::StyleFlags::DIM));
        let inside = frame.buffer.get(1, 1).map(Cell::style).unwrap_or_default();
        assert!(inside.is_empty());
    }

    #[test]
    fn render_clips_to_frame() {
        let mut frame = Frame::new(4, 2);
        Block::bordered().render(Rect::new(0, 0, 10, 10), &mut frame);
        assert_eq!(frame.trimmed_lines(), vec!["┌──┐", "└──┘"]);
    }
}
