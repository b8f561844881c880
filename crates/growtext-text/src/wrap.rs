#![forbid(unsafe_code)]

//! Soft wrapping of a single logical line.
//!
//! [`wrap`] splits a line into visual rows no wider than `width` cells:
//! - Rows break after a whitespace run (before the next word) when one fits.
//! - A run with no break point is cut at the last grapheme that fits.
//! - Whitespace stays on the row it ends, so the rows concatenate back to the
//!   original line exactly. Whitespace that does not fit wraps like any other
//!   grapheme, so every grapheme of a row is drawn inside the width.
//! - An empty line is one empty row.
//!
//! # Example
//! ```
//! use growtext_text::wrap::wrap_str;
//!
//! assert_eq!(wrap_str("hello world foo bar", 10), vec!["hello ", "world foo ", "bar"]);
//! assert_eq!(wrap_str("aaaaaaaaaa", 5), vec!["aaaaa", "aaaaa"]);
//! ```

use growtext_core::text_width::grapheme_width;
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::cursor::is_whitespace;

/// How rows are allowed to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Break after whitespace; cut unbreakable runs at the width.
    #[default]
    Word,
    /// Break at any grapheme boundary.
    Char,
}

/// One visual row of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WrapSegment {
    /// First grapheme index (inclusive).
    pub start: usize,
    /// Last grapheme index (exclusive).
    pub end: usize,
    pub start_byte: usize,
    pub end_byte: usize,
    /// Drawn width in cells; never more than the wrap width.
    pub width: usize,
}

impl WrapSegment {
    /// This row's slice of `line`.
    #[must_use]
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start_byte..self.end_byte]
    }

    #[inline]
    #[must_use]
    pub fn grapheme_len(&self) -> usize {
        self.end - self.start
    }
}

/// Rows for one line. Most lines need only a few.
pub type Segments = SmallVec<[WrapSegment; 4]>;

struct Unit {
    byte: usize,
    width: usize,
    space: bool,
}

fn segment(
    units: &[Unit],
    line_len: usize,
    start: usize,
    end: usize,
    cells: usize,
    width: usize,
) -> WrapSegment {
    let byte_at = |idx: usize| units.get(idx).map_or(line_len, |u| u.byte);
    WrapSegment {
        start,
        end,
        start_byte: byte_at(start),
        end_byte: byte_at(end),
        width: cells.min(width),
    }
}

/// Wrap `line` to `width` cells in [`WrapMode::Word`]. A width of 0 is treated as 1.
#[must_use]
pub fn wrap(line: &str, width: usize) -> Segments {
    wrap_with_mode(line, width, WrapMode::Word)
}

/// Wrap `line` to `width` cells. A width of 0 is treated as 1.
#[must_use]
pub fn wrap_with_mode(line: &str, width: usize, mode: WrapMode) -> Segments {
    let width = width.max(1);
    let units: Vec<Unit> = line
        .grapheme_indices(true)
        .map(|(byte, text)| Unit {
            byte,
            width: grapheme_width(text),
            space: is_whitespace(text),
        })
        .collect();
    let n = units.len();
    let mut rows = Segments::new();

    let mut row_start = 0;
    let mut row_width = 0;
    // Last break point inside the current row: (grapheme index, cells before it).
    let mut break_at: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < n {
        let unit = &units[i];
        if row_width + unit.width <= width {
            row_width += unit.width;
            i += 1;
            let ends_space_run = unit.space && units.get(i).is_none_or(|next| !next.space);
            if mode == WrapMode::Word && ends_space_run {
                break_at = Some((i, row_width));
            }
            continue;
        }

        if row_width == 0 {
            // A single glyph wider than the whole row gets a row to itself.
            rows.push(segment(&units, line.len(), i, i + 1, unit.width, width));
            (row_start, break_at, i) = (i + 1, None, i + 1);
            continue;
        }

        match break_at {
            Some((at, cells)) if at > row_start => {
                rows.push(segment(&units, line.len(), row_start, at, cells, width));
                row_start = at;
                row_width -= cells;
            }
            _ => {
                rows.push(segment(&units, line.len(), row_start, i, row_width, width));
                row_start = i;
                row_width = 0;
            }
        }
        break_at = None;
    }

    if row_start < n || n == 0 {
        rows.push(segment(&units, line.len(), row_start, n, row_width, width));
    }
    rows
}

/// Convenience: the rows of `line` as string slices.
#[must_use]
pub fn wrap_str(line: &str, width: usize) -> Vec<&str> {
    wrap(line, width).iter().map(|seg| seg.text(line)).collect()
}

/// Concatenate the rows back into the line.
#[must_use]
pub fn unwrap(line: &str, segments: &[WrapSegment]) -> String {
    segments.iter().map(|seg| seg.text(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use growtext_core::text_width::display_width;
    use proptest::prelude::*;

    #[test]
    fn empty_line_is_one_empty_row() {
        let rows = wrap("", 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            WrapSegment {
                start: 0,
                end: 0,
                start_byte: 0,
                end_byte: 0,
                width: 0
            }
        );
    }

    #[test]
    fn short_line_is_one_row() {
        assert_eq!(wrap_str("hello", 10), vec!["hello"]);
        assert_eq!(wrap_str("exactly10!", 10), vec!["exactly10!"]);
    }

    #[test]
    fn breaks_after_whitespace() {
        assert_eq!(
            wrap_str("hello world foo bar", 10),
            vec!["hello ", "world foo ", "bar"]
        );
        assert_eq!(wrap_str("hello world", 10), vec!["hello ", "world"]);
    }

    #[test]
    fn unbreakable_run_is_cut_at_width() {
        assert_eq!(wrap_str("aaaaaaaaaa", 5), vec!["aaaaa", "aaaaa"]);
        assert_eq!(wrap_str("aaaaaaaaaaa", 5), vec!["aaaaa", "aaaaa", "a"]);
    }

    #[test]
    fn long_word_after_short_word() {
        assert_eq!(wrap_str("ab cdefghij", 5), vec!["ab ", "cdefg", "hij"]);
    }

    #[test]
    fn overflowing_space_starts_the_next_row() {
        assert_eq!(wrap_str("hello world", 5), vec!["hello", " ", "world"]);
        assert_eq!(wrap_str("abc    def", 5), vec!["abc  ", "  def"]);
    }

    #[test]
    fn trailing_space_run_wraps() {
        assert_eq!(wrap_str("abcde   ", 5), vec!["abcde", "   "]);
    }

    #[test]
    fn long_space_run_is_cut_at_width() {
        let line = format!("a{}b", " ".repeat(40));
        let rows = wrap(&line, 3);
        assert!(rows.iter().all(|r| r.grapheme_len() <= 3));
        assert_eq!(rows.len(), 14);
        assert_eq!(unwrap(&line, &rows), line);
    }

    #[test]
    fn leading_spaces_are_kept() {
        assert_eq!(wrap_str("   abc", 4), vec!["   ", "abc"]);
    }

    #[test]
    fn wide_glyphs_count_two_cells() {
        assert_eq!(wrap_str("中文字符", 5), vec!["中文", "字符"]);
        let rows = wrap("中文字符", 5);
        assert!(rows.iter().all(|r| r.width == 4));
    }

    #[test]
    fn glyph_wider_than_width_gets_own_row() {
        let rows = wrap("中a", 1);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].start, rows[0].end), (0, 1));
        assert_eq!(rows[0].width, 1);
        assert_eq!(rows[1].text("中a"), "a");
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        assert_eq!(wrap_str("abc", 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn combining_marks_stay_with_base() {
        assert_eq!(wrap_str("e\u{301}e\u{301}e\u{301}", 2), vec!["e\u{301}e\u{301}", "e\u{301}"]);
    }

    #[test]
    fn char_mode_ignores_word_boundaries() {
        let rows = wrap_with_mode("ab cdef", 4, WrapMode::Char);
        assert_eq!(
            rows.iter().map(|s| s.text("ab cdef")).collect::<Vec<_>>(),
            vec!["ab c", "def"]
        );
    }

    #[test]
    fn grapheme_and_byte_offsets_agree() {
        let line = "añb c";
        for seg in wrap(line, 2) {
            let text = seg.text(line);
            assert_eq!(text.graphemes(true).count(), seg.grapheme_len());
        }
    }

    proptest! {
        #[test]
        fn rows_concatenate_to_line(line in "[a-z 中é]{0,60}", width in 1usize..20) {
            let rows = wrap(&line, width);
            prop_assert_eq!(unwrap(&line, &rows), line.clone());
            for pair in rows.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert_eq!(pair[0].end_byte, pair[1].start_byte);
            }
        }

        #[test]
        fn rows_fit_the_width(line in "[a-z 中]{0,60}", width in 2usize..20) {
            for seg in wrap(&line, width) {
                prop_assert!(seg.width <= width);
                prop_assert_eq!(display_width(seg.text(&line)), seg.width);
            }
        }

        #[test]
        fn unbreakable_runs_terminate(len in 0usize..200, width in 1usize..12) {
            let line = "x".repeat(len);
            let rows = wrap(&line, width);
            prop_assert_eq!(rows.len(), len.div_ceil(width).max(1));
            prop_assert!(rows.iter().all(|r| r.grapheme_len() <= width));
        }

        #[test]
        fn every_row_but_empty_lines_is_non_empty(line in "[a-z ]{1,40}", width in 1usize..10) {
            for seg in wrap(&line, width) {
                prop_assert!(seg.end > seg.start);
            }
        }
    }
}
