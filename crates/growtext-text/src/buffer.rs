#![forbid(unsafe_code)]

//! The text buffer: logical lines plus a cursor, mutated by edit operations.
//!
//! [`TextBuffer`] keeps a [`Rope`] and a [`CursorPosition`] in step. Every
//! operation leaves the cursor inside the document, and every content change
//! bumps [`TextBuffer::revision`] so the layers above know to re-wrap.
//!
//! # Example
//! ```
//! use growtext_text::buffer::{Direction, TextBuffer};
//!
//! let mut buf = TextBuffer::new();
//! buf.insert("hello");
//! buf.break_line();
//! buf.insert("world");
//! assert_eq!(buf.value(), "hello\nworld");
//!
//! buf.move_cursor(Direction::LineStart);
//! buf.delete_backward(); // joins the two lines
//! assert_eq!(buf.value(), "helloworld");
//! assert_eq!(buf.cursor().grapheme, 5);
//! ```

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use crate::cursor::{CursorNavigator, CursorPosition, is_whitespace};
use crate::rope::Rope;

/// Spaces a tab expands to on input.
pub const TAB_SPACES: &str = "    ";

/// Cursor movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    /// Previous logical line, same visual column.
    Up,
    /// Next logical line, same visual column.
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Normalize input text.
///
/// `\r\n` and lone `\r` become `\n`, tabs expand to [`TAB_SPACES`], and any
/// other control character is dropped. Borrows when nothing changes.
#[must_use]
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| c.is_control() && c != '\n') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\n' => out.push('\n'),
            '\t' => out.push_str(TAB_SPACES),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Logical document plus cursor.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    cursor: CursorPosition,
    revision: u64,
    char_limit: Option<usize>,
}

impl TextBuffer {
    /// An empty buffer: one empty line, cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` (sanitized), cursor at the end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.set_value(text);
        buf
    }

    /// Limit the total grapheme count (line breaks excluded). `None` is unlimited.
    ///
    /// Existing content over the limit is kept; only further inserts are cut.
    pub fn set_char_limit(&mut self, limit: Option<usize>) {
        self.char_limit = limit;
    }

    #[must_use]
    pub fn char_limit(&self) -> Option<usize> {
        self.char_limit
    }

    // ====================================================================
    // Queries
    // ====================================================================

    /// The raw content with hard breaks preserved.
    #[must_use]
    pub fn value(&self) -> String {
        self.rope.to_string()
    }

    #[must_use]
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    #[must_use]
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Content revision; bumps on every change to the text.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// A single empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Number of logical lines; at least 1.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of a logical line, without the break.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        self.rope.line(idx)
    }

    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.rope.lines()
    }

    /// Graphemes in the document, excluding line breaks.
    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.lines().map(|line| line.graphemes(true).count()).sum()
    }

    fn nav(&self) -> CursorNavigator<'_> {
        CursorNavigator::new(&self.rope)
    }

    /// Move the cursor to `pos`, clamped into the document.
    pub fn set_cursor(&mut self, pos: CursorPosition) {
        let nav = self.nav();
        if !nav.is_valid(pos) {
            tracing::debug!(
                line = pos.line,
                grapheme = pos.grapheme,
                "cursor out of bounds; clamped"
            );
        }
        self.cursor = nav.clamp(pos);
    }

    // ====================================================================
    // Insert operations
    // ====================================================================

    /// Insert text at the cursor and move the cursor past it.
    ///
    /// Input is [`sanitize`]d; embedded `\n` split the line like
    /// [`break_line`](Self::break_line). With a char limit set, the text is
    /// cut at the remaining allowance.
    pub fn insert(&mut self, text: &str) {
        let sanitized = sanitize(text);
        let text = self.clip_to_limit(&sanitized);
        if text.is_empty() {
            return;
        }
        let byte_idx = self.nav().to_byte_index(self.cursor);
        let char_idx = self.rope.byte_to_char(byte_idx);
        self.rope.insert(char_idx, text);
        self.cursor = self.nav().from_byte_index(byte_idx + text.len());
        self.revision += 1;
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert(ch.encode_utf8(&mut buf));
    }

    /// Split the current line at the cursor (hard newline).
    pub fn break_line(&mut self) {
        self.insert("\n");
    }

    fn clip_to_limit<'t>(&self, text: &'t str) -> &'t str {
        let Some(limit) = self.char_limit else {
            return text;
        };
        let mut allowance = limit.saturating_sub(self.grapheme_count());
        let mut end = 0;
        for (offset, g) in text.grapheme_indices(true) {
            if g != "\n" {
                if allowance == 0 {
                    break;
                }
                allowance -= 1;
            }
            end = offset + g.len();
        }
        if end < text.len() {
            tracing::debug!(limit, dropped = text.len() - end, "insert clipped by char limit");
        }
        &text[..end]
    }

    // ====================================================================
    // Delete operations
    // ====================================================================

    /// Remove the text between two positions and leave the cursor at the start.
    fn remove_between(&mut self, from: CursorPosition, to: CursorPosition) -> bool {
        let nav = self.nav();
        let (a, b) = (nav.to_byte_index(from), nav.to_byte_index(to));
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        if start == end {
            return false;
        }
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        self.rope.remove(start_char..end_char);
        self.cursor = self.nav().from_byte_index(start);
        self.revision += 1;
        true
    }

    /// Backspace. At column 0 this joins with the previous line, leaving the
    /// cursor where that line used to end. Returns `true` if anything changed.
    pub fn delete_backward(&mut self) -> bool {
        let target = self.nav().move_left(self.cursor);
        self.remove_between(target, self.cursor)
    }

    /// Delete. At line end this pulls the next line up.
    pub fn delete_forward(&mut self) -> bool {
        let target = self.nav().move_right(self.cursor);
        self.remove_between(self.cursor, target)
    }

    /// Delete back to the start of the previous word.
    pub fn delete_word_backward(&mut self) -> bool {
        let target = self.nav().move_word_left(self.cursor);
        self.remove_between(target, self.cursor)
    }

    /// Delete forward to the end of the next word.
    pub fn delete_word_forward(&mut self) -> bool {
        let target = self.nav().move_word_right(self.cursor);
        self.remove_between(self.cursor, target)
    }

    /// Delete to line end; at line end, join the next line instead.
    pub fn delete_to_line_end(&mut self) -> bool {
        let end = self.nav().line_end(self.cursor);
        if end == self.cursor {
            return self.delete_forward();
        }
        self.remove_between(self.cursor, end)
    }

    /// Delete from line start to the cursor.
    pub fn delete_to_line_start(&mut self) -> bool {
        let start = self.nav().line_start(self.cursor);
        self.remove_between(start, self.cursor)
    }

    // ====================================================================
    // Rewrites
    // ====================================================================

    /// Replace graphemes `start..end` of the cursor line with `replacement`
    /// and put the cursor right after it.
    fn rewrite_line(&mut self, start: usize, end: usize, replacement: &str) {
        let line = self.cursor.line;
        let nav = self.nav();
        let from = nav.to_byte_index(nav.position(line, start));
        let to = nav.to_byte_index(nav.position(line, end));
        let (from_char, to_char) = (self.rope.byte_to_char(from), self.rope.byte_to_char(to));
        self.rope.remove(from_char..to_char);
        self.rope.insert(from_char, replacement);
        self.cursor = self.nav().from_byte_index(from + replacement.len());
        self.revision += 1;
    }

    /// Swap the graphemes on either side of the cursor (at line end, the
    /// last two) and advance.
    pub fn transpose(&mut self) -> bool {
        let Some(text) = self.line(self.cursor.line) else {
            return false;
        };
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        if self.cursor.grapheme == 0 || graphemes.len() < 2 {
            return false;
        }
        let col = self.cursor.grapheme.min(graphemes.len() - 1);
        let swapped = format!("{}{}", graphemes[col], graphemes[col - 1]);
        self.rewrite_line(col - 1, col + 1, &swapped);
        true
    }

    /// Apply `f` to the next word (skipping whitespace) and move past it.
    fn rewrite_next_word<F>(&mut self, f: F) -> bool
    where
        F: Fn(&str) -> String,
    {
        let Some(text) = self.line(self.cursor.line) else {
            return false;
        };
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        let mut start = self.cursor.grapheme.min(graphemes.len());
        while start < graphemes.len() && is_whitespace(graphemes[start]) {
            start += 1;
        }
        let mut end = start;
        while end < graphemes.len() && !is_whitespace(graphemes[end]) {
            end += 1;
        }
        if start == end {
            return false;
        }
        let replacement = f(&graphemes[start..end].concat());
        self.rewrite_line(start, end, &replacement);
        true
    }

    pub fn uppercase_word(&mut self) -> bool {
        self.rewrite_next_word(str::to_uppercase)
    }

    pub fn lowercase_word(&mut self) -> bool {
        self.rewrite_next_word(str::to_lowercase)
    }

    /// First grapheme upper-cased, the rest lower-cased.
    pub fn capitalize_word(&mut self) -> bool {
        self.rewrite_next_word(|word| {
            let mut graphemes = word.graphemes(true);
            let first = graphemes.next().map(str::to_uppercase).unwrap_or_default();
            first + &graphemes.as_str().to_lowercase()
        })
    }

    // ====================================================================
    // Cursor movement
    // ====================================================================

    /// Move the cursor. Never changes content.
    pub fn move_cursor(&mut self, direction: Direction) {
        let nav = self.nav();
        let pos = self.cursor;
        self.cursor = match direction {
            Direction::Left => nav.move_left(pos),
            Direction::Right => nav.move_right(pos),
            Direction::Up => nav.move_up(pos),
            Direction::Down => nav.move_down(pos),
            Direction::WordLeft => nav.move_word_left(pos),
            Direction::WordRight => nav.move_word_right(pos),
            Direction::LineStart => nav.line_start(pos),
            Direction::LineEnd => nav.line_end(pos),
            Direction::DocumentStart => nav.document_start(),
            Direction::DocumentEnd => nav.document_end(),
        };
    }

    // ====================================================================
    // Content replacement
    // ====================================================================

    /// Replace everything; lines split only at hard breaks, cursor to the end.
    pub fn set_value(&mut self, text: &str) {
        let sanitized = sanitize(text);
        self.rope.clear();
        self.cursor = CursorPosition::default();
        let text = self.clip_to_limit(&sanitized);
        self.rope.replace(text);
        self.cursor = self.nav().document_end();
        self.revision += 1;
    }

    /// Empty the buffer.
    pub fn reset(&mut self) {
        self.rope.clear();
        self.cursor = CursorPosition::default();
        self.revision += 1;
    }
}
