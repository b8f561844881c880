//! Fixed-size cell grid.

use std::fmt;

use growtext_core::geometry::Rect;
use growtext_core::text_width::grapheme_width;
use unicode_segmentation::UnicodeSegmentation;

use crate::cell::{Cell, CellContent};
use crate::style::Style;

/// A row-major grid of cells.
///
/// Wide glyphs occupy a head cell plus [`CellContent::Continuation`] cells.
/// Writes that would split a wide glyph clear the whole glyph first, so the
/// grid never holds an orphaned half.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer. Zero dimensions are bumped to 1.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Fill `area` (clipped to the buffer) with `cell`.
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        let area = area.intersection(&self.bounds());
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.set(x, y, cell.clone());
            }
        }
    }

    /// Apply `style` to every cell in `area`.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.bounds());
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.apply_style(style);
                }
            }
        }
    }

    /// Write a single-width cell at `(x, y)`, clearing any wide glyph it overlaps.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if self.index(x, y).is_none() {
            return;
        }
        self.clear_wide_at(x, y);
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Write a grapheme at `(x, y)` with the given style.
    ///
    /// Returns the number of columns consumed. A glyph that would cross
    /// `max_x` (exclusive) or the right edge is not written and returns 0.
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, style: Style, max_x: u16) -> u16 {
        let width = grapheme_width(grapheme);
        let Ok(width) = u16::try_from(width) else {
            return 0;
        };
        let limit = max_x.min(self.width);
        if width == 0 || x.saturating_add(width) > limit || y >= self.height {
            return 0;
        }
        for dx in 0..width {
            self.clear_wide_at(x + dx, y);
        }
        let head = Cell {
            content: CellContent::from_grapheme(grapheme),
            ..Cell::default()
        }
        .with_style(style);
        if let Some(slot) = self.get_mut(x, y) {
            *slot = head;
        }
        for dx in 1..width {
            if let Some(slot) = self.get_mut(x + dx, y) {
                *slot = Cell {
                    content: CellContent::Continuation,
                    ..Cell::default()
                }
                .with_style(style);
            }
        }
        width
    }

    /// Write `text` left to right from `(x, y)`, stopping at `max_x`.
    /// Returns the column after the last written glyph.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            if grapheme_width(grapheme) == 0 {
                continue;
            }
            let used = self.set_grapheme(col, y, grapheme, style, max_x);
            if used == 0 {
                break;
            }
            col += used;
        }
        col
    }

    /// Blank out the whole wide glyph (head and continuations) covering `(x, y)`.
    fn clear_wide_at(&mut self, x: u16, y: u16) {
        let Some(cell) = self.get(x, y) else {
            return;
        };
        let mut head = x;
        if cell.content.is_continuation() {
            while head > 0 {
                head -= 1;
                match self.get(head, y) {
                    Some(c) if c.content.is_continuation() => continue,
                    _ => break,
                }
            }
        }
        let touches_wide = head != x
            || self
                .get(x + 1, y)
                .is_some_and(|next| next.content.is_continuation());
        if !touches_wide {
            return;
        }
        let mut col = head;
        loop {
            let Some(slot) = self.get_mut(col, y) else {
                break;
            };
            let was_head = col == head;
            if !was_head && !slot.content.is_continuation() {
                break;
            }
            slot.content = CellContent::Empty;
            col += 1;
        }
    }

    /// Text of row `y`, one char per column (wide glyphs count once).
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::with_capacity(usize::from(self.width));
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                cell.content.push_to(&mut out);
            }
        }
        out
    }

    /// All rows as text, full width.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.to_lines().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}
