#![forbid(unsafe_code)]

//! Border primitives: which sides to draw and with which glyphs.

use bitflags::bitflags;

bitflags! {
    /// Sides of a [`Block`](crate::block::Block) that get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Borders: u8 {
        const NONE = 0;
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Border characters for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub vertical: char,
    pub horizontal: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderSet {
    /// ASCII fallback border (+, -, |).
    pub const ASCII: Self = Self {
        vertical: '|',
        horizontal: '-',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };

    /// Rounded corners (╭, ╮, ╯, ╰).
    pub const ROUNDED: Self = Self {
        vertical: '│',
        horizontal: '─',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
    };

    /// Square single-line border.
    pub const SQUARE: Self = Self {
        vertical: '│',
        horizontal: '─',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    /// Double lines (║, ═).
    pub const DOUBLE: Self = Self {
        vertical: '║',
        horizontal: '═',
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
    };
}

/// Border style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Square,
    Ascii,
    Rounded,
    Double,
}

impl BorderType {
    #[must_use]
    pub fn to_border_set(&self) -> BorderSet {
        match self {
            BorderType::Square => BorderSet::SQUARE,
            BorderType::Ascii => BorderSet::ASCII,
            BorderType::Rounded => BorderSet::ROUNDED,
            BorderType::Double => BorderSet::DOUBLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_ascii_only() {
        let set = BorderSet::ASCII;
        let chars = [
            set.vertical,
            set.horizontal,
            set.top_left,
            set.top_right,
            set.bottom_left,
            set.bottom_right,
        ];
        assert!(chars.iter().all(|c| c.is_ascii()));
    }

    #[test]
    fn rounded_has_round_corners() {
        let set = BorderType::Rounded.to_border_set();
        assert_eq!(
            [set.top_left, set.top_right, set.bottom_left, set.bottom_right],
            ['╭', '╮', '╰', '╯']
        );
    }

    #[test]
    fn all_is_every_side() {
        assert_eq!(
            Borders::ALL,
            Borders::TOP | Borders::RIGHT | Borders::BOTTOM | Borders::LEFT
        );
        assert!(Borders::default().is_empty());
    }
}
