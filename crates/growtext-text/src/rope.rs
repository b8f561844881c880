#![forbid(unsafe_code)]

//! Rope-backed document storage.
//!
//! A thin wrapper over `ropey::Rope` built without CR/Unicode line
//! separators, so `\n` is the only hard break. Line accessors return content
//! without the trailing `\n`.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use ropey::{Rope as InnerRope, RopeSlice};

/// Rope-backed text storage.
#[derive(Clone, Debug, Default)]
pub struct Rope {
    rope: InnerRope,
}

impl Rope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: InnerRope::new(),
        }
    }

    #[must_use]
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: InnerRope::from_str(s),
        }
    }

    #[inline]
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of logical lines (`\n` count + 1). Never zero.
    #[inline]
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Line `idx` without its trailing `\n`.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        (idx < self.len_lines()).then(|| strip_break(cow_from_slice(self.rope.line(idx))))
    }

    /// All lines, without trailing `\n`.
    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (0..self.len_lines()).filter_map(|idx| self.line(idx))
    }

    /// Text in a character range; out-of-range bounds are clamped.
    #[must_use]
    pub fn slice<R>(&self, range: R) -> Cow<'_, str>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = normalize_range(range, self.len_chars());
        cow_from_slice(self.rope.slice(start..end))
    }

    /// Insert text at a character index (clamped to the end).
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.len() >= 10_000 {
            tracing::debug!(len = text.len(), "rope insert large text");
        }
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Remove a character range (clamped).
    pub fn remove<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = normalize_range(range, self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        if text.len() >= 10_000 {
            tracing::debug!(len = text.len(), "rope replace large text");
        }
        self.rope = InnerRope::from_str(text);
    }

    pub fn clear(&mut self) {
        self.rope = InnerRope::new();
    }

    #[inline]
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.rope.char_to_byte(char_idx.min(self.len_chars()))
    }

    #[inline]
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        self.rope.byte_to_char(byte_idx.min(self.len_bytes()))
    }

    #[inline]
    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    #[inline]
    #[must_use]
    pub fn byte_to_line(&self, byte_idx: usize) -> usize {
        self.rope.byte_to_line(byte_idx.min(self.len_bytes()))
    }

    /// Character index of the start of a line; past-the-end lines map to the end.
    #[inline]
    #[must_use]
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line_idx)
        }
    }

    /// Byte index of the start of a line; past-the-end lines map to the end.
    #[inline]
    #[must_use]
    pub fn line_to_byte(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_bytes()
        } else {
            self.rope.line_to_byte(line_idx)
        }
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl From<&str> for Rope {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}

impl From<String> for Rope {
    fn from(s: String) -> Self {
        Self::from_text(&s)
    }
}

fn cow_from_slice(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

fn strip_break(line: Cow<'_, str>) -> Cow<'_, str> {
    match line {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_suffix('\n').unwrap_or(s)),
        Cow::Owned(mut s) => {
            if s.ends_with('\n') {
                s.pop();
            }
            Cow::Owned(s)
        }
    }
}

fn normalize_range<R>(range: R, max: usize) -> (usize, usize)
where
    R: RangeBounds<usize>,
{
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => max,
    };
    let start = start.min(max);
    let end = end.min(max);
    (start, end.max(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lines_have_no_break() {
        let rope = Rope::from("Line 1\nLine 2\n");
        assert_eq!(rope.len_lines(), 3);
        assert_eq!(rope.line(0).as_deref(), Some("Line 1"));
        assert_eq!(rope.line(1).as_deref(), Some("Line 2"));
        assert_eq!(rope.line(2).as_deref(), Some(""));
        assert!(rope.line(3).is_none());
    }

    #[test]
    fn carriage_return_is_not_a_break() {
        let rope = Rope::from("a\rb\u{2028}c");
        assert_eq!(rope.len_lines(), 1);
    }

    #[test]
    fn empty_rope_is_one_empty_line() {
        let rope = Rope::new();
        assert!(rope.is_empty());
        assert_eq!(rope.len_lines(), 1);
        assert_eq!(rope.lines().collect::<Vec<_>>(), vec![""]);
        assert_eq!(rope.line_to_char(0), 0);
        assert_eq!(rope.line_to_byte(5), 0);
    }

    #[test]
    fn insert_remove_replace() {
        let mut rope = Rope::from("Hello!");
        rope.insert(5, ", world");
        assert_eq!(rope.to_string(), "Hello, world!");
        rope.remove(5..12);
        assert_eq!(rope.to_string(), "Hello!");
        rope.replace("Replaced");
        assert_eq!(rope.to_string(), "Replaced");
        rope.clear();
        assert!(rope.is_empty());
    }

    #[test]
    fn conversions_clamp() {
        let rope = Rope::from("a\u{1F600}b\ncd");
        assert_eq!(rope.char_to_byte(2), 5);
        assert_eq!(rope.byte_to_char(999), rope.len_chars());
        assert_eq!(rope.char_to_line(4), 1);
        assert_eq!(rope.byte_to_line(7), 1);
        assert_eq!(rope.line_to_byte(1), 7);
        assert_eq!(rope.slice(4..), "cd");
        assert_eq!(rope.slice(10..2), "");
    }

    proptest! {
        #[test]
        fn insert_remove_roundtrip(s in any::<String>(), insert in any::<String>(), idx in 0usize..200) {
            let mut rope = Rope::from(s.as_str());
            let insert_len = insert.chars().count();
            let pos = idx.min(rope.len_chars());
            rope.insert(pos, &insert);
            rope.remove(pos..pos.saturating_add(insert_len));
            prop_assert_eq!(rope.to_string(), s);
        }

        #[test]
        fn line_count_matches_newlines(s in any::<String>()) {
            let rope = Rope::from(s.as_str());
            let newlines = s.bytes().filter(|&b| b == b'\n').count();
            prop_assert_eq!(rope.len_lines(), newlines + 1);
            let joined = rope.lines().collect::<Vec<_>>().join("\n");
            prop_assert_eq!(joined, s);
        }
    }
}
