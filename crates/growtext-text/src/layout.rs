#![forbid(unsafe_code)]

//! The wrap layout: every visual row of a document at one width.
//!
//! [`WrapLayout`] is derived from a [`TextBuffer`] snapshot and a width and
//! is the only place row counts come from. It also maps the logical cursor
//! to a [`VisualCursor`] and back, which is what the viewport and vertical
//! movement are built on.

use growtext_core::text_width::grapheme_width;
use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::TextBuffer;
use crate::cursor::{CursorNavigator, CursorPosition};
use crate::wrap::{WrapMode, WrapSegment, wrap_with_mode};
use crate::wrap_cache::WrapCache;

/// One drawn row, tagged with the logical line it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualRow {
    /// Owning logical line.
    pub line: usize,
    /// Grapheme range within the line.
    pub start: usize,
    pub end: usize,
    /// Byte range within the line.
    pub start_byte: usize,
    pub end_byte: usize,
    /// Drawn width in cells.
    pub width: usize,
    /// `true` for soft-wrapped rows, `false` for the first row of a line.
    pub continuation: bool,
}

impl VisualRow {
    fn from_segment(line: usize, seg: WrapSegment, continuation: bool) -> Self {
        Self {
            line,
            start: seg.start,
            end: seg.end,
            start_byte: seg.start_byte,
            end_byte: seg.end_byte,
            width: seg.width,
            continuation,
        }
    }

    /// This row's slice of its line's text.
    #[must_use]
    pub fn text<'a>(&self, line_text: &'a str) -> &'a str {
        line_text.get(self.start_byte..self.end_byte).unwrap_or("")
    }
}

/// Cursor location in visual terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualCursor {
    /// Absolute index into [`WrapLayout::rows`].
    pub row: usize,
    /// Cells from the row start; may equal the width at the end of a full row.
    pub col: usize,
}

/// All visual rows of a document at one width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapLayout {
    width: usize,
    mode: WrapMode,
    rows: Vec<VisualRow>,
    /// Index of the first row of each logical line.
    line_first_row: Vec<usize>,
}

impl Default for WrapLayout {
    fn default() -> Self {
        Self::from_lines(std::iter::once(""), 1)
    }
}

impl WrapLayout {
    /// Lay out `buffer` at `width` with word wrapping.
    #[must_use]
    pub fn build(buffer: &TextBuffer, width: usize) -> Self {
        Self::build_with(buffer, width, WrapMode::Word, None)
    }

    /// Lay out `buffer`, optionally going through a memo cache.
    #[must_use]
    pub fn build_with(
        buffer: &TextBuffer,
        width: usize,
        mode: WrapMode,
        cache: Option<&mut WrapCache>,
    ) -> Self {
        let lines = buffer.lines();
        match cache {
            Some(cache) => Self::collect(width, mode, lines.map(|l| cache.wrap(&l, width, mode))),
            None => Self::collect(width, mode, lines.map(|l| wrap_with_mode(&l, width, mode))),
        }
    }

    /// Lay out plain lines (each without a trailing break).
    #[must_use]
    pub fn from_lines<'a, I>(lines: I, width: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::collect(
            width,
            WrapMode::Word,
            lines
                .into_iter()
                .map(|l| wrap_with_mode(l, width, WrapMode::Word)),
        )
    }

    fn collect<I, S>(width: usize, mode: WrapMode, per_line: I) -> Self
    where
        I: Iterator<Item = S>,
        S: AsRef<[WrapSegment]>,
    {
        let mut rows = Vec::new();
        let mut line_first_row = Vec::new();
        for (line, segments) in per_line.enumerate() {
            line_first_row.push(rows.len());
            for (i, seg) in segments.as_ref().iter().enumerate() {
                rows.push(VisualRow::from_segment(line, *seg, i > 0));
            }
        }
        if line_first_row.is_empty() {
            line_first_row.push(0);
            rows.push(VisualRow::from_segment(
                0,
                WrapSegment {
                    start: 0,
                    end: 0,
                    start_byte: 0,
                    end_byte: 0,
                    width: 0,
                },
                false,
            ));
        }
        Self {
            width: width.max(1),
            mode,
            rows,
            line_first_row,
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> WrapMode {
        self.mode
    }

    /// Total visual rows; at least 1.
    #[inline]
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[VisualRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, idx: usize) -> Option<&VisualRow> {
        self.rows.get(idx)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_first_row.len()
    }

    /// Absolute index of the first row of `line` (clamped to the last line).
    #[must_use]
    pub fn first_row_of(&self, line: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.line_first_row[line]
    }

    /// Rows belonging to `line`.
    #[must_use]
    pub fn rows_for_line(&self, line: usize) -> &[VisualRow] {
        let Some(&first) = self.line_first_row.get(line) else {
            return &[];
        };
        let end = self
            .line_first_row
            .get(line + 1)
            .copied()
            .unwrap_or(self.rows.len());
        &self.rows[first..end]
    }

    /// Absolute row index holding `cursor`: the last row of its line that
    /// starts at or before the cursor column. At line end this is the row
    /// ending there.
    #[must_use]
    pub fn cursor_row(&self, cursor: CursorPosition) -> usize {
        let line = cursor.line.min(self.line_count().saturating_sub(1));
        let first = self.first_row_of(line);
        let within = self
            .rows_for_line(line)
            .iter()
            .rposition(|row| row.start <= cursor.grapheme)
            .unwrap_or(0);
        first + within
    }

    /// Visual position of `cursor`, given the text of its line.
    #[must_use]
    pub fn visual_cursor_in(&self, cursor: CursorPosition, line_text: &str) -> VisualCursor {
        let row_idx = self.cursor_row(cursor);
        let Some(row) = self.rows.get(row_idx) else {
            return VisualCursor::default();
        };
        let span = cursor.grapheme.saturating_sub(row.start);
        let col: usize = row
            .text(line_text)
            .graphemes(true)
            .take(span)
            .map(grapheme_width)
            .sum();
        VisualCursor {
            row: row_idx,
            col: col.min(self.width),
        }
    }

    /// Visual position of the buffer's cursor.
    #[must_use]
    pub fn visual_cursor(&self, buffer: &TextBuffer) -> VisualCursor {
        let cursor = buffer.cursor();
        let text = buffer.line(cursor.line).unwrap_or_default();
        self.visual_cursor_in(cursor, &text)
    }

    /// Logical position at cell `col` of visual row `row`: the last grapheme
    /// boundary not past `col`. A continuation row never resolves to its own
    /// end, so moving onto it does not jump to the next row.
    #[must_use]
    pub fn position_at(&self, buffer: &TextBuffer, row: usize, col: usize) -> CursorPosition {
        let row_idx = row.min(self.total_rows().saturating_sub(1));
        let nav = CursorNavigator::new(buffer.rope());
        let Some(row) = self.rows.get(row_idx) else {
            return nav.document_start();
        };
        let text = buffer.line(row.line).unwrap_or_default();
        let mut cells = 0;
        let mut grapheme = row.start;
        for g in row.text(&text).graphemes(true) {
            let w = grapheme_width(g);
            if cells + w > col {
                break;
            }
            cells += w;
            grapheme += 1;
        }
        let is_last_of_line = self
            .rows
            .get(row_idx + 1)
            .is_none_or(|next| next.line != row.line);
        if !is_last_of_line && grapheme >= row.end && row.end > row.start {
            grapheme = row.end - 1;
        }
        nav.position(row.line, grapheme)
    }
}
