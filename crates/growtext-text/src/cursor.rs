#![forbid(unsafe_code)]

//! Grapheme-aware cursor positions and navigation over a [`Rope`].
//!
//! Columns are grapheme indices within a logical line, so a cursor can never
//! sit inside a cluster. `visual_col` caches the cell offset from the line
//! start and is what vertical movement tries to preserve.

use std::borrow::Cow;

use growtext_core::text_width::grapheme_width;
use unicode_segmentation::UnicodeSegmentation;

use crate::rope::Rope;

/// A logical cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorPosition {
    /// Logical line index.
    pub line: usize,
    /// Grapheme index within the line, in `0..=graphemes(line)`.
    pub grapheme: usize,
    /// Cells from the line start to the cursor.
    pub visual_col: usize,
}

impl CursorPosition {
    #[must_use]
    pub const fn new(line: usize, grapheme: usize, visual_col: usize) -> Self {
        Self {
            line,
            grapheme,
            visual_col,
        }
    }
}

/// True if every scalar in the grapheme is whitespace.
#[inline]
pub(crate) fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Read-only navigation helper borrowed from a rope.
#[derive(Debug, Clone, Copy)]
pub struct CursorNavigator<'a> {
    rope: &'a Rope,
}

impl<'a> CursorNavigator<'a> {
    #[must_use]
    pub fn new(rope: &'a Rope) -> Self {
        Self { rope }
    }

    fn line_text(&self, line: usize) -> Cow<'a, str> {
        self.rope.line(line).unwrap_or(Cow::Borrowed(""))
    }

    fn last_line(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }

    #[must_use]
    pub fn line_grapheme_count(&self, line: usize) -> usize {
        self.line_text(line).graphemes(true).count()
    }

    /// Cells occupied by the first `grapheme` graphemes of `line`.
    #[must_use]
    pub fn visual_col(&self, line: usize, grapheme: usize) -> usize {
        self.line_text(line)
            .graphemes(true)
            .take(grapheme)
            .map(grapheme_width)
            .sum()
    }

    /// Grapheme index whose start is the last boundary at or before cell `col`.
    #[must_use]
    pub fn grapheme_at_visual_col(&self, line: usize, col: usize) -> usize {
        let mut cells = 0;
        for (idx, g) in self.line_text(line).graphemes(true).enumerate() {
            let w = grapheme_width(g);
            if cells + w > col {
                return idx;
            }
            cells += w;
        }
        self.line_grapheme_count(line)
    }

    /// Build a position with a fresh `visual_col`, clamped into bounds.
    #[must_use]
    pub fn position(&self, line: usize, grapheme: usize) -> CursorPosition {
        let line = line.min(self.last_line());
        let grapheme = grapheme.min(self.line_grapheme_count(line));
        CursorPosition::new(line, grapheme, self.visual_col(line, grapheme))
    }

    /// Clamp a position into the document and recompute its `visual_col`.
    #[must_use]
    pub fn clamp(&self, pos: CursorPosition) -> CursorPosition {
        self.position(pos.line, pos.grapheme)
    }

    #[must_use]
    pub fn is_valid(&self, pos: CursorPosition) -> bool {
        pos.line <= self.last_line() && pos.grapheme <= self.line_grapheme_count(pos.line)
    }

    #[must_use]
    pub fn move_left(&self, pos: CursorPosition) -> CursorPosition {
        if pos.grapheme > 0 {
            self.position(pos.line, pos.grapheme - 1)
        } else if pos.line > 0 {
            self.line_end_of(pos.line - 1)
        } else {
            pos
        }
    }

    #[must_use]
    pub fn move_right(&self, pos: CursorPosition) -> CursorPosition {
        if pos.grapheme < self.line_grapheme_count(pos.line) {
            self.position(pos.line, pos.grapheme + 1)
        } else if pos.line < self.last_line() {
            self.position(pos.line + 1, 0)
        } else {
            pos
        }
    }

    /// Up one logical line, keeping the visual column where possible.
    #[must_use]
    pub fn move_up(&self, pos: CursorPosition) -> CursorPosition {
        if pos.line == 0 {
            return self.document_start();
        }
        let g = self.grapheme_at_visual_col(pos.line - 1, pos.visual_col);
        self.position(pos.line - 1, g)
    }

    /// Down one logical line, keeping the visual column where possible.
    #[must_use]
    pub fn move_down(&self, pos: CursorPosition) -> CursorPosition {
        if pos.line >= self.last_line() {
            return self.document_end();
        }
        let g = self.grapheme_at_visual_col(pos.line + 1, pos.visual_col);
        self.position(pos.line + 1, g)
    }

    /// Back over whitespace, then over the word before it.
    #[must_use]
    pub fn move_word_left(&self, pos: CursorPosition) -> CursorPosition {
        if pos.grapheme == 0 {
            return self.move_left(pos);
        }
        let text = self.line_text(pos.line);
        let graphemes: Vec<&str> = text.graphemes(true).take(pos.grapheme).collect();
        let mut idx = graphemes.len();
        while idx > 0 && is_whitespace(graphemes[idx - 1]) {
            idx -= 1;
        }
        while idx > 0 && !is_whitespace(graphemes[idx - 1]) {
            idx -= 1;
        }
        self.position(pos.line, idx)
    }

    /// Forward over whitespace, then over the next word.
    #[must_use]
    pub fn move_word_right(&self, pos: CursorPosition) -> CursorPosition {
        let count = self.line_grapheme_count(pos.line);
        if pos.grapheme >= count {
            return self.move_right(pos);
        }
        let text = self.line_text(pos.line);
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        let mut idx = pos.grapheme;
        while idx < graphemes.len() && is_whitespace(graphemes[idx]) {
            idx += 1;
        }
        while idx < graphemes.len() && !is_whitespace(graphemes[idx]) {
            idx += 1;
        }
        self.position(pos.line, idx)
    }

    #[must_use]
    pub fn line_start(&self, pos: CursorPosition) -> CursorPosition {
        self.position(pos.line, 0)
    }

    #[must_use]
    pub fn line_end(&self, pos: CursorPosition) -> CursorPosition {
        self.line_end_of(pos.line)
    }

    fn line_end_of(&self, line: usize) -> CursorPosition {
        self.position(line, usize::MAX)
    }

    #[must_use]
    pub fn document_start(&self) -> CursorPosition {
        CursorPosition::default()
    }

    #[must_use]
    pub fn document_end(&self) -> CursorPosition {
        self.line_end_of(self.last_line())
    }

    /// Absolute byte offset of a position in the rope.
    #[must_use]
    pub fn to_byte_index(&self, pos: CursorPosition) -> usize {
        let pos = self.clamp(pos);
        let text = self.line_text(pos.line);
        let within = text
            .grapheme_indices(true)
            .nth(pos.grapheme)
            .map_or(text.len(), |(offset, _)| offset);
        self.rope.line_to_byte(pos.line) + within
    }

    /// Position for an absolute byte offset. Offsets inside a cluster round up.
    #[must_use]
    pub fn from_byte_index(&self, byte_idx: usize) -> CursorPosition {
        let byte_idx = byte_idx.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(byte_idx);
        let within = byte_idx - self.rope.line_to_byte(line);
        let grapheme = self
            .line_text(line)
            .grapheme_indices(true)
            .take_while(|(offset, _)| *offset < within)
            .count();
        self.position(line, grapheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nav_for(text: &str) -> Rope {
        Rope::from(text)
    }

    #[test]
    fn clamp_recomputes_visual_col() {
        let rope = nav_for("ab\n中文x");
        let nav = CursorNavigator::new(&rope);
        let pos = nav.clamp(CursorPosition::new(9, 9, 0));
        assert_eq!(pos, CursorPosition::new(1, 3, 5));
    }

    #[test]
    fn left_right_cross_lines() {
        let rope = nav_for("ab\ncd");
        let nav = CursorNavigator::new(&rope);
        let end_of_first = nav.position(0, 2);
        assert_eq!(nav.move_right(end_of_first), nav.position(1, 0));
        assert_eq!(nav.move_left(nav.position(1, 0)), end_of_first);
        assert_eq!(nav.move_left(nav.document_start()), nav.document_start());
        assert_eq!(nav.move_right(nav.document_end()), nav.document_end());
    }

    #[test]
    fn vertical_moves_keep_visual_column() {
        let rope = nav_for("abcdef\n中文\nxy");
        let nav = CursorNavigator::new(&rope);
        let down = nav.move_down(nav.position(0, 3));
        // col 3 falls inside the second wide glyph; land on its start.
        assert_eq!(down, CursorPosition::new(1, 1, 2));
        let down = nav.move_down(nav.position(0, 5));
        assert_eq!(nav.move_down(down), nav.position(2, 2));
        assert_eq!(nav.move_up(nav.position(0, 4)), nav.document_start());
        assert_eq!(nav.move_down(nav.position(2, 0)), nav.document_end());
    }

    #[test]
    fn word_moves() {
        let rope = nav_for("hello  big world");
        let nav = CursorNavigator::new(&rope);
        let end = nav.document_end();
        let p = nav.move_word_left(end);
        assert_eq!(p.grapheme, 11);
        let p = nav.move_word_left(p);
        assert_eq!(p.grapheme, 7);
        let p = nav.move_word_right(nav.position(0, 5));
        assert_eq!(p.grapheme, 10);
    }

    #[test]
    fn byte_index_roundtrip_with_clusters() {
        let rope = nav_for("e\u{301}x\nyz");
        let nav = CursorNavigator::new(&rope);
        let pos = nav.position(0, 1);
        assert_eq!(nav.to_byte_index(pos), 3);
        assert_eq!(nav.from_byte_index(3), pos);
        // Inside the cluster rounds up.
        assert_eq!(nav.from_byte_index(1), pos);
        assert_eq!(nav.from_byte_index(5), nav.position(1, 0));
        assert_eq!(nav.from_byte_index(999), nav.document_end());
    }

    proptest! {
        #[test]
        fn moves_stay_valid(text in "[a-c \n中]{0,30}", line in 0usize..6, g in 0usize..12, op in 0u8..8) {
            let rope = Rope::from(text.as_str());
            let nav = CursorNavigator::new(&rope);
            let pos = nav.clamp(CursorPosition::new(line, g, 0));
            let next = match op {
                0 => nav.move_left(pos),
                1 => nav.move_right(pos),
                2 => nav.move_up(pos),
                3 => nav.move_down(pos),
                4 => nav.move_word_left(pos),
                5 => nav.move_word_right(pos),
                6 => nav.line_start(pos),
                _ => nav.line_end(pos),
            };
            prop_assert!(nav.is_valid(next));
            prop_assert_eq!(nav.from_byte_index(nav.to_byte_index(next)), next);
        }
    }
}
