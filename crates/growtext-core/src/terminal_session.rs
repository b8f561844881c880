//! RAII terminal lifecycle on top of crossterm.
//!
//! [`TerminalSession::new`] enters raw mode (and optionally the alternate
//! screen, bracketed paste, and focus reporting); dropping the session undoes
//! every step that succeeded, including on panic unwinds.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{cursor, event as ct, execute, terminal};

use crate::event::Event;

/// Which terminal features the session turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub bracketed_paste: bool,
    pub focus_events: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
            focus_events: false,
        }
    }
}

/// An active raw-mode terminal session.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    raw_mode: bool,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, Drop restores whatever was enabled.
        let session = Self {
            options,
            raw_mode: true,
        };
        let mut out = io::stdout();
        if options.alternate_screen {
            execute!(out, terminal::EnterAlternateScreen)?;
        }
        if options.bracketed_paste {
            execute!(out, ct::EnableBracketedPaste)?;
        }
        if options.focus_events {
            execute!(out, ct::EnableFocusChange)?;
        }
        execute!(out, cursor::Hide)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(?options, "terminal session started");
        Ok(session)
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for an event to become available.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        ct::poll(timeout)
    }

    /// Read one event. Events with no canonical mapping yield `None`.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(ct::read()?))
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.raw_mode {
            return Ok(());
        }
        self.raw_mode = false;
        let mut out = io::stdout();
        execute!(out, cursor::Show)?;
        if self.options.focus_events {
            execute!(out, ct::DisableFocusChange)?;
        }
        if self.options.bracketed_paste {
            execute!(out, ct::DisableBracketedPaste)?;
        }
        if self.options.alternate_screen {
            execute!(out, terminal::LeaveAlternateScreen)?;
        }
        out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(_err) = self.restore() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "failed to restore terminal state");
        }
    }
}
