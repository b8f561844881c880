#![forbid(unsafe_code)]

//! Cursor blink state.
//!
//! The blink phase is the only state a timer tick touches. It never affects
//! the buffer, the layout, or the viewport.

use std::time::Duration;

/// Default blink half-period.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// How the cursor glyph is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorMode {
    /// Toggle on every tick.
    #[default]
    Blink,
    /// Always drawn.
    Static,
    /// Never drawn.
    Hide,
}

/// Blink phase for the cursor glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBlink {
    mode: CursorMode,
    interval: Duration,
    on: bool,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new(CursorMode::Blink, DEFAULT_BLINK_INTERVAL)
    }
}

impl CursorBlink {
    #[must_use]
    pub fn new(mode: CursorMode, interval: Duration) -> Self {
        Self {
            mode,
            interval,
            on: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CursorMode) {
        self.mode = mode;
        self.on = true;
    }

    /// Time between toggles.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Whether the glyph is drawn right now.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self.mode {
            CursorMode::Blink => self.on,
            CursorMode::Static => true,
            CursorMode::Hide => false,
        }
    }

    /// Advance one tick. Returns `true` if visibility changed.
    pub fn on_tick(&mut self) -> bool {
        if self.mode != CursorMode::Blink {
            return false;
        }
        self.on = !self.on;
        true
    }

    /// Back to the visible phase (after a key press). Returns `true` if
    /// visibility changed.
    pub fn reset(&mut self) -> bool {
        let was = self.is_visible();
        self.on = true;
        was != self.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink_toggles_each_tick() {
        let mut blink = CursorBlink::default();
        assert!(blink.is_visible());
        assert!(blink.on_tick());
        assert!(!blink.is_visible());
        assert!(blink.on_tick());
        assert!(blink.is_visible());
    }

    #[test]
    fn static_and_hide_ignore_ticks() {
        let mut blink = CursorBlink::new(CursorMode::Static, DEFAULT_BLINK_INTERVAL);
        assert!(!blink.on_tick());
        assert!(blink.is_visible());
        blink.set_mode(CursorMode::Hide);
        assert!(!blink.on_tick());
        assert!(!blink.is_visible());
    }

    #[test]
    fn reset_restores_visible_phase() {
        let mut blink = CursorBlink::default();
        blink.on_tick();
        assert!(blink.reset());
        assert!(blink.is_visible());
        assert!(!blink.reset());
    }

    #[test]
    fn default_interval() {
        assert_eq!(CursorBlink::default().interval(), Duration::from_millis(530));
    }
}
