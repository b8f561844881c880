#![forbid(unsafe_code)]

//! Height resolution and the scroll window.
//!
//! The height is a pure function of the row count and the limits; the
//! viewport then only has to keep the cursor row inside a window of that
//! height. Neither step looks at rendered output.

/// Rows to show for `total_rows` of content.
///
/// `min(total, max)` floored at 1, then raised to `min_height`. A
/// `min_height` above `max_height` is capped at `max_height`.
#[must_use]
pub fn resolve_height(total_rows: usize, max_height: Option<usize>, min_height: usize) -> usize {
    let fitted = match max_height {
        Some(max) => total_rows.min(max.max(1)),
        None => total_rows,
    }
    .max(1);
    let floor = match max_height {
        Some(max) => min_height.min(max.max(1)),
        None => min_height,
    };
    fitted.max(floor)
}

/// The window of visual rows currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: 0,
            height: 1,
        }
    }
}

impl Viewport {
    /// Index of the first visible row.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rows shown; at least 1.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Visible row indices.
    #[must_use]
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.height
    }

    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.rows().contains(&row)
    }

    /// Adopt `height` and scroll the least amount that brings `cursor_row`
    /// into view, then clamp so the window never starts past the last full
    /// page.
    pub fn follow(&mut self, cursor_row: usize, total_rows: usize, height: usize) {
        self.height = height.max(1);
        if cursor_row < self.offset {
            self.offset = cursor_row;
        } else if cursor_row >= self.offset + self.height {
            self.offset = cursor_row + 1 - self.height;
        }
        self.offset = self.offset.min(total_rows.saturating_sub(self.height));
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
