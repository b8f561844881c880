//! Minimal text styling: colors and attribute flags.
//!
//! Styles cascade: a `None` field inherits from whatever is beneath it.

use bitflags::bitflags;

/// A terminal color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 256 indexed palette entries.
    Indexed(u8),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

bitflags! {
    /// Text attribute flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
    }
}

/// A cascading style.
///
/// ```
/// use growtext_render::style::{Color, Style, StyleFlags};
///
/// let style = Style::new().fg(Color::Indexed(240)).dim();
/// assert!(style.has_attr(StyleFlags::DIM));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style (everything inherits).
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[inline]
    #[must_use]
    pub fn bold(self) -> Self {
        self.add_attr(StyleFlags::BOLD)
    }

    #[inline]
    #[must_use]
    pub fn dim(self) -> Self {
        self.add_attr(StyleFlags::DIM)
    }

    #[inline]
    #[must_use]
    pub fn italic(self) -> Self {
        self.add_attr(StyleFlags::ITALIC)
    }

    #[inline]
    #[must_use]
    pub fn underline(self) -> Self {
        self.add_attr(StyleFlags::UNDERLINE)
    }

    #[inline]
    #[must_use]
    pub fn reverse(self) -> Self {
        self.add_attr(StyleFlags::REVERSE)
    }

    fn add_attr(mut self, flag: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flag);
        self
    }

    /// Fill this style's unset fields from `parent`. Attributes union.
    #[must_use]
    pub fn merge(&self, parent: &Style) -> Style {
        Style {
            fg: self.fg.or(parent.fg),
            bg: self.bg.or(parent.bg),
            attrs: match (self.attrs, parent.attrs) {
                (Some(c), Some(p)) => Some(c | p),
                (c, p) => c.or(p),
            },
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    #[inline]
    pub fn has_attr(&self, flag: StyleFlags) -> bool {
        self.attrs.is_some_and(|a| a.contains(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_attrs() {
        let style = Style::new().bold().reverse();
        assert!(style.has_attr(StyleFlags::BOLD));
        assert!(style.has_attr(StyleFlags::REVERSE));
        assert!(!style.has_attr(StyleFlags::DIM));
    }

    #[test]
    fn merge_prefers_child_and_unions_attrs() {
        let parent = Style::new().fg(Color::Indexed(1)).bold();
        let child = Style::new().bg(Color::Rgb(0, 0, 255)).dim();
        let merged = child.merge(&parent);
        assert_eq!(merged.fg, Some(Color::Indexed(1)));
        assert_eq!(merged.bg, Some(Color::Rgb(0, 0, 255)));
        assert_eq!(merged.attrs, Some(StyleFlags::BOLD | StyleFlags::DIM));
    }

    #[test]
    fn empty_style() {
        assert!(Style::new().is_empty());
        assert!(!Style::new().dim().is_empty());
    }
}
