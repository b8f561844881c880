//! Display width helpers shared by wrapping and rendering.
//!
//! Wrapping (`growtext-text`) and drawing (`growtext-render`) must agree on
//! how many cells a grapheme occupies, otherwise a wrapped row could spill
//! past its width once drawn. Everything goes through this module.

use std::sync::OnceLock;

use unicode_display_width::width as unicode_display_width;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[inline]
fn is_cjk_locale(locale: &str) -> bool {
    let lower = locale.trim().to_ascii_lowercase();
    lower.starts_with("ja") || lower.starts_with("zh") || lower.starts_with("ko")
}

/// Resolve the ambiguous-width policy from an environment lookup.
///
/// `GROWTEXT_TEXT_CJK_WIDTH` / `GROWTEXT_CJK_WIDTH` win; otherwise a CJK
/// `LC_CTYPE` or `LANG` enables wide ambiguous glyphs.
#[inline]
pub fn cjk_width_from_env<F>(get_env: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) =
        get_env("GROWTEXT_TEXT_CJK_WIDTH").or_else(|| get_env("GROWTEXT_CJK_WIDTH"))
    {
        return env_flag(&value);
    }
    if let Some(locale) = get_env("LC_CTYPE").or_else(|| get_env("LANG")) {
        return is_cjk_locale(&locale);
    }
    false
}

/// Cached ambiguous-width policy for this process.
#[inline]
pub fn cjk_width_enabled() -> bool {
    static CJK_WIDTH: OnceLock<bool> = OnceLock::new();
    *CJK_WIDTH.get_or_init(|| cjk_width_from_env(|key| std::env::var(key).ok()))
}

/// Fast path for pure printable ASCII.
#[inline]
#[must_use]
pub fn ascii_width(text: &str) -> Option<usize> {
    if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        Some(text.len())
    } else {
        None
    }
}

#[inline]
fn is_zero_width_codepoint(c: char) -> bool {
    let u = c as u32;
    matches!(u, 0x0000..=0x001F | 0x007F..=0x009F)
        || matches!(u, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF)
        || matches!(u, 0xFE00..=0xFE0F | 0xFE20..=0xFE2F | 0xE0100..=0xE01EF)
        || matches!(
            u,
            0x00AD | 0x034F | 0x180E | 0x200B | 0x200C | 0x200D | 0x200E | 0x200F | 0x2060 | 0xFEFF
        )
        || matches!(u, 0x202A..=0x202E | 0x2066..=0x2069 | 0x206A..=0x206F)
}

/// Width of a single grapheme cluster in cells.
///
/// Control characters are zero width; the buffer never stores them, but a
/// stray one must not push a row past its width.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_ascii() {
        return grapheme
            .bytes()
            .filter(|b| (0x20..=0x7E).contains(b))
            .count();
    }
    if grapheme.chars().all(is_zero_width_codepoint) {
        return 0;
    }
    if cjk_width_enabled() {
        return grapheme.width_cjk();
    }
    unicode_display_width(grapheme) as usize
}

/// Width of a single scalar in cells.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    if ch.is_ascii() {
        return usize::from((' '..='~').contains(&ch));
    }
    if is_zero_width_codepoint(ch) {
        return 0;
    }
    if cjk_width_enabled() {
        ch.width_cjk().unwrap_or(0)
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Width of a string in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if let Some(width) = ascii_width(text) {
        return width;
    }
    if text.is_ascii() || text.chars().any(is_zero_width_codepoint) {
        return text.graphemes(true).map(grapheme_width).sum();
    }
    if cjk_width_enabled() {
        text.width_cjk()
    } else {
        unicode_display_width(text) as usize
    }
}

/// Longest prefix of `text` that fits in `max_width` cells, cut on a
/// grapheme boundary. Returns the prefix and its width.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = grapheme_width(grapheme);
        if width + w > max_width {
            return (&text[..end], width);
        }
        width += w;
        end = offset + grapheme.len();
    }
    (text, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ascii_is_one_cell_per_byte() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(ascii_width("hello"), Some(5));
        assert_eq!(ascii_width("héllo"), None);
    }

    #[test]
    fn controls_are_zero_width() {
        assert_eq!(grapheme_width("\u{7}"), 0);
        assert_eq!(char_width('\u{1b}'), 0);
        assert_eq!(display_width("a\u{7}b"), 2);
    }

    #[test]
    fn wide_and_combining_glyphs() {
        assert_eq!(grapheme_width("中"), 2);
        assert_eq!(display_width("中文"), 4);
        assert_eq!(grapheme_width("e\u{301}"), 1);
        assert_eq!(grapheme_width("\u{200D}"), 0);
    }

    #[test]
    fn cjk_policy_from_env() {
        assert!(cjk_width_from_env(|k| (k == "GROWTEXT_CJK_WIDTH").then(|| "1".into())));
        assert!(!cjk_width_from_env(|k| (k == "GROWTEXT_TEXT_CJK_WIDTH").then(|| "off".into())));
        assert!(cjk_width_from_env(|k| (k == "LANG").then(|| "ja_JP.UTF-8".into())));
        assert!(!cjk_width_from_env(|k| (k == "LANG").then(|| "en_US.UTF-8".into())));
        assert!(!cjk_width_from_env(|_| None));
    }

    #[test]
    fn truncate_respects_wide_glyphs() {
        assert_eq!(truncate_to_width("hello", 3), ("hel", 3));
        assert_eq!(truncate_to_width("中文", 3), ("中", 2));
        assert_eq!(truncate_to_width("ab", 10), ("ab", 2));
        assert_eq!(truncate_to_width("abc", 0), ("", 0));
    }

    proptest! {
        #[test]
        fn truncate_never_exceeds(s in "\\PC{0,40}", max in 0usize..20) {
            let (prefix, width) = truncate_to_width(&s, max);
            prop_assert!(width <= max);
            prop_assert!(s.starts_with(prefix));
            let summed: usize = prefix.graphemes(true).map(grapheme_width).sum();
            prop_assert_eq!(summed, width);
        }
    }
}
