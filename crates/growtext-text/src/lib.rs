#![forbid(unsafe_code)]

//! Text layer: the edit buffer, soft wrapping, and the visual row layout.
//!
//! # Role in growtext
//! [`TextBuffer`] holds the logical document (a [`Rope`] of hard-broken
//! lines) and the cursor. [`wrap`] splits one line into visual rows;
//! [`WrapLayout`] does it for the whole document and maps the cursor between
//! logical and visual coordinates. The widget layer builds a layout after
//! every edit and sizes itself from [`WrapLayout::total_rows`].

pub mod buffer;
pub mod cursor;
pub mod layout;
pub mod rope;
pub mod wrap;
pub mod wrap_cache;

pub use buffer::{Direction, TextBuffer, sanitize};
pub use cursor::{CursorNavigator, CursorPosition};
pub use layout::{VisualCursor, VisualRow, WrapLayout};
pub use rope::Rope;
pub use wrap::{Segments, WrapMode, WrapSegment, wrap, wrap_with_mode};
pub use wrap_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, WrapCache};
