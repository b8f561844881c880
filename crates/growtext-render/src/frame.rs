//! Frame: the render target for a single pass.
//!
//! A frame is a [`Buffer`] plus cursor metadata. Widgets draw into the
//! buffer and may request a terminal cursor position; the presenter (or a
//! test) reads both afterwards.

use growtext_core::geometry::Rect;

use crate::buffer::Buffer;

/// Render target for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Cursor position requested by a widget, relative to the buffer.
    pub cursor_position: Option<(u16, u16)>,

    /// Whether the terminal cursor should be shown.
    pub cursor_visible: bool,
}

impl Frame {
    /// Create a blank frame with no cursor position.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor_position: None,
            cursor_visible: true,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Clear the buffer and forget the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor_position = None;
    }

    /// Set the cursor position; `None` means no cursor.
    #[inline]
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position;
    }

    #[inline]
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Rows as text with trailing blanks trimmed; handy in assertions.
    pub fn trimmed_lines(&self) -> Vec<String> {
        self.buffer
            .to_lines()
            .into_iter()
            .map(|line| line.trim_end().to_string())
            .collect()
    }
}
