//! Canonical input events.
//!
//! Everything the widget or the runtime reacts to arrives as an [`Event`].
//! With the `crossterm` feature, [`Event::from_crossterm`] normalizes the
//! backend's events into this shape.

use bitflags::bitflags;

/// An input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press, repeat, or release.
    Key(KeyEvent),
    /// Text pasted in one piece (bracketed paste).
    Paste(PasteEvent),
    /// The terminal was resized to the given size in cells.
    Resize { width: u16, height: u16 },
    /// Terminal focus gained (`true`) or lost (`false`).
    Focus(bool),
    /// A scheduled timer tick.
    Tick,
}

impl Event {
    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Shorthand for a key press with modifiers.
    #[must_use]
    pub const fn key_with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::Key(KeyEvent::new(code).with_modifiers(modifiers))
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// True if this is the character `c` with no Ctrl/Alt held.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c) && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
    }

    #[inline]
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[inline]
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    #[inline]
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Press or auto-repeat; releases are not actionable for text input.
    #[inline]
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key identity, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F(u8),
    Null,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Pasted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
    /// Whether the terminal delivered this inside bracketed-paste markers.
    pub bracketed: bool,
}

impl PasteEvent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bracketed: true,
        }
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod crossterm_compat {
    use super::*;
    use crossterm::event as ct;

    impl Event {
        /// Convert a crossterm event. Mouse events and unknown keys map to `None`.
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => map_key(key).map(Event::Key),
                ct::Event::Paste(text) => Some(Event::Paste(PasteEvent::new(text))),
                ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
                ct::Event::FocusGained => Some(Event::Focus(true)),
                ct::Event::FocusLost => Some(Event::Focus(false)),
                _ => None,
            }
        }
    }

    fn map_key(key: ct::KeyEvent) -> Option<KeyEvent> {
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Insert => KeyCode::Insert,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            ct::KeyCode::Null => KeyCode::Null,
            _ => return None,
        };
        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };
        Some(KeyEvent {
            code,
            modifiers: map_modifiers(key.modifiers),
            kind,
        })
    }

    fn map_modifiers(modifiers: ct::KeyModifiers) -> Modifiers {
        let mut out = Modifiers::NONE;
        if modifiers.contains(ct::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if modifiers.intersects(ct::KeyModifiers::ALT | ct::KeyModifiers::META) {
            out |= Modifiers::ALT;
        }
        if modifiers.contains(ct::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        if modifiers.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::HYPER) {
            out |= Modifiers::SUPER;
        }
        out
    }

}
