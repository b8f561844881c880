//! Grid cells.

use crate::style::{Color, Style, StyleFlags};

/// What a cell displays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellContent {
    /// Nothing drawn; presented as a space.
    #[default]
    Empty,
    /// A single-scalar grapheme.
    Char(char),
    /// A multi-scalar grapheme cluster.
    Grapheme(Box<str>),
    /// Trailing half of a wide glyph that starts in the cell to the left.
    Continuation,
}

impl CellContent {
    /// Build the content for a grapheme cluster.
    #[must_use]
    pub fn from_grapheme(grapheme: &str) -> Self {
        let mut chars = grapheme.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::Empty,
            (Some(c), None) => Self::Char(c),
            _ => Self::Grapheme(grapheme.into()),
        }
    }

    #[inline]
    pub fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation)
    }

    /// Push this cell's visible text onto `out`. Continuations add nothing.
    pub fn push_to(&self, out: &mut String) {
        match self {
            Self::Empty => out.push(' '),
            Self::Char(c) => out.push(*c),
            Self::Grapheme(g) => out.push_str(g),
            Self::Continuation => {}
        }
    }
}

/// One terminal cell: content plus resolved colors and attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub content: CellContent,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: StyleFlags,
}

impl Cell {
    #[must_use]
    pub fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            ..Self::default()
        }
    }

    /// Apply a style on top of this cell; unset style fields keep the cell's values.
    pub fn apply_style(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = style.bg {
            self.bg = Some(bg);
        }
        if let Some(attrs) = style.attrs {
            self.attrs |= attrs;
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.apply_style(style);
        self
    }

    /// The style this cell presents with.
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            attrs: (!self.attrs.is_empty()).then_some(self.attrs),
        }
    }
}
