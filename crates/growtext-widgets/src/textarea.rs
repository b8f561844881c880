#![forbid(unsafe_code)]

//! Self-sizing multi-line text area.
//!
//! [`AutoTextArea`] grows and shrinks to exactly the number of visual rows
//! its content needs, up to an optional maximum, and scrolls only once that
//! maximum is reached. The row count comes from the wrap layout, which is
//! rebuilt after every mutation; height and scroll offset are resolved from
//! it right away. Rendering only reads that state.
//!
//! # Example
//! ```
//! use growtext_widgets::textarea::AutoTextArea;
//!
//! let mut ta = AutoTextArea::new()
//!     .with_width(10)
//!     .with_max_height(Some(3))
//!     .with_focus(true);
//! ta.insert("hello world foo bar");
//! assert_eq!(ta.total_rows(), 3);
//! assert_eq!(ta.height(), 3);
//!
//! ta.insert(" baz qux");
//! assert_eq!(ta.total_rows(), 4);
//! assert_eq!(ta.height(), 3);
//! assert_eq!(ta.scroll_offset(), 1);
//! ```

use std::time::Duration;

use growtext_core::event::{Event, KeyCode, KeyEvent};
use growtext_core::geometry::{Rect, Size};
use growtext_core::text_width::display_width;
use growtext_render::frame::Frame;
use growtext_render::style::Style;
use growtext_text::{
    CursorPosition, Direction, TextBuffer, VisualCursor, WrapCache, WrapLayout, WrapMode,
};

use crate::blink::{CursorBlink, CursorMode, DEFAULT_BLINK_INTERVAL};
use crate::block::Block;
use crate::error::ConfigError;
use crate::prompt::{PromptContext, PromptRule};
use crate::viewport::{Viewport, resolve_height};
use crate::{Widget, draw_text_span, set_style_area};

/// Text columns when no width is configured.
pub const DEFAULT_WIDTH: usize = 40;

/// When the placeholder replaces the (empty) content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderMode {
    /// Only while the buffer is empty and the widget is unfocused.
    #[default]
    WhenEmptyUnfocused,
    /// Whenever the buffer is empty.
    WhenEmpty,
}

/// Plain-data configuration, validated as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaConfig {
    /// Text columns, excluding prompt, gutter, and border.
    pub width: usize,
    /// Content rows; `None` is unbounded.
    pub max_height: Option<usize>,
    pub min_height: usize,
    pub placeholder: String,
    pub placeholder_mode: PlaceholderMode,
    pub show_line_numbers: bool,
    /// Maximum graphemes, line breaks excluded.
    pub char_limit: Option<usize>,
    pub cursor_mode: CursorMode,
    pub blink_interval: Duration,
    pub wrap_mode: WrapMode,
    pub focused: bool,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            max_height: None,
            min_height: 1,
            placeholder: String::new(),
            placeholder_mode: PlaceholderMode::default(),
            show_line_numbers: false,
            char_limit: None,
            cursor_mode: CursorMode::default(),
            blink_interval: DEFAULT_BLINK_INTERVAL,
            wrap_mode: WrapMode::default(),
            focused: false,
        }
    }
}

impl TextAreaConfig {
    /// Reject widths and heights that would have to be clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if let Some(max) = self.max_height {
            if max == 0 {
                return Err(ConfigError::InvalidMaxHeight(max));
            }
            if self.min_height > max {
                return Err(ConfigError::MinHeightAboveMax {
                    min: self.min_height,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Where the cursor sits within its logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineInfo {
    /// Cells in the cursor's visual row.
    pub width: usize,
    /// Cells in the whole logical line.
    pub char_width: usize,
    /// Visual rows of the logical line.
    pub height: usize,
    /// Grapheme index where the cursor's row starts.
    pub start_column: usize,
    /// Cursor cells from the row start.
    pub column_offset: usize,
    /// Cursor's row within the logical line.
    pub row_offset: usize,
    /// Cursor grapheme index within the logical line.
    pub char_offset: usize,
}

/// A rendered snapshot of the widget at its own outer size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// Every row of the grid, full width.
    pub lines: Vec<String>,
    /// Rows including the border.
    pub height: usize,
    /// Content rows only.
    pub content_height: usize,
    /// Cursor cell, if the widget is focused.
    pub cursor: Option<(u16, u16)>,
}

impl RenderedView {
    /// Rows with trailing blanks trimmed, joined by `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One edit or movement, as decoded from a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    BreakLine,
    Move(Direction),
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteToLineEnd,
    DeleteToLineStart,
    Transpose,
    UppercaseWord,
    LowercaseWord,
    CapitalizeWord,
}

impl Action {
    /// Decode a key press. Keys the text area leaves to its host (Esc,
    /// Ctrl+C, Tab, function keys) map to `None`.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let (ctrl, alt) = (key.ctrl(), key.alt());
        let action = match key.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'h' => Self::DeleteBackward,
                'w' => Self::DeleteWordBackward,
                'd' => Self::DeleteForward,
                'b' => Self::Move(Direction::Left),
                'f' => Self::Move(Direction::Right),
                'p' => Self::Move(Direction::Up),
                'n' => Self::Move(Direction::Down),
                'a' => Self::Move(Direction::LineStart),
                'e' => Self::Move(Direction::LineEnd),
                'k' => Self::DeleteToLineEnd,
                'u' => Self::DeleteToLineStart,
                't' => Self::Transpose,
                _ => return None,
            },
            KeyCode::Char(c) if alt => match c {
                'd' => Self::DeleteWordForward,
                'b' => Self::Move(Direction::WordLeft),
                'f' => Self::Move(Direction::WordRight),
                '<' => Self::Move(Direction::DocumentStart),
                '>' => Self::Move(Direction::DocumentEnd),
                'u' => Self::UppercaseWord,
                'l' => Self::LowercaseWord,
                'c' => Self::CapitalizeWord,
                _ => return None,
            },
            KeyCode::Char(c) => Self::Insert(c),
            KeyCode::Enter => Self::BreakLine,
            KeyCode::Backspace if alt => Self::DeleteWordBackward,
            KeyCode::Backspace => Self::DeleteBackward,
            KeyCode::Delete if alt => Self::DeleteWordForward,
            KeyCode::Delete => Self::DeleteForward,
            KeyCode::Left if ctrl || alt => Self::Move(Direction::WordLeft),
            KeyCode::Left => Self::Move(Direction::Left),
            KeyCode::Right if ctrl || alt => Self::Move(Direction::WordRight),
            KeyCode::Right => Self::Move(Direction::Right),
            KeyCode::Up => Self::Move(Direction::Up),
            KeyCode::Down => Self::Move(Direction::Down),
            KeyCode::Home if ctrl => Self::Move(Direction::DocumentStart),
            KeyCode::Home => Self::Move(Direction::LineStart),
            KeyCode::End if ctrl => Self::Move(Direction::DocumentEnd),
            KeyCode::End => Self::Move(Direction::LineEnd),
            _ => return None,
        };
        Some(action)
    }
}

/// A multi-line text input whose height follows its content.
#[derive(Debug)]
pub struct AutoTextArea {
    buffer: TextBuffer,

    width: usize,
    max_height: Option<usize>,
    min_height: usize,
    /// Room reported by the host; caps width and height when set.
    available: Option<Size>,

    placeholder: String,
    placeholder_mode: PlaceholderMode,
    show_line_numbers: bool,
    prompt: PromptRule,
    block: Option<Block>,
    wrap_mode: WrapMode,
    focused: bool,
    blink: CursorBlink,

    style: Style,
    placeholder_style: Style,
    cursor_style: Style,
    line_number_style: Style,
    prompt_style: Style,

    // Derived; refreshed by `resolve` after every mutation.
    layout: WrapLayout,
    layout_key: Option<(u64, usize, WrapMode)>,
    cache: WrapCache,
    viewport: Viewport,
    /// Target cell column for consecutive vertical moves.
    sticky_col: Option<usize>,
}

impl Default for AutoTextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoTextArea {
    /// An empty, unfocused text area with default settings.
    #[must_use]
    pub fn new() -> Self {
        let config = TextAreaConfig::default();
        let mut ta = Self {
            buffer: TextBuffer::new(),
            width: config.width,
            max_height: config.max_height,
            min_height: config.min_height,
            available: None,
            placeholder: config.placeholder,
            placeholder_mode: config.placeholder_mode,
            show_line_numbers: config.show_line_numbers,
            prompt: PromptRule::default(),
            block: None,
            wrap_mode: config.wrap_mode,
            focused: config.focused,
            blink: CursorBlink::new(config.cursor_mode, config.blink_interval),
            style: Style::default(),
            placeholder_style: Style::new().dim(),
            cursor_style: Style::new().reverse(),
            line_number_style: Style::new().dim(),
            prompt_style: Style::default(),
            layout: WrapLayout::default(),
            layout_key: None,
            cache: WrapCache::default(),
            viewport: Viewport::default(),
            sticky_col: None,
        };
        ta.resolve();
        ta
    }

    /// Build from a validated config.
    pub fn from_config(config: TextAreaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut ta = Self::new();
        ta.width = config.width;
        ta.max_height = config.max_height;
        ta.min_height = config.min_height;
        ta.placeholder = config.placeholder;
        ta.placeholder_mode = config.placeholder_mode;
        ta.show_line_numbers = config.show_line_numbers;
        ta.buffer.set_char_limit(config.char_limit);
        ta.blink = CursorBlink::new(config.cursor_mode, config.blink_interval);
        ta.wrap_mode = config.wrap_mode;
        ta.focused = config.focused;
        ta.resolve();
        Ok(ta)
    }

    fn resolved(mut self) -> Self {
        self.resolve();
        self
    }

    // ====================================================================
    // Builders
    // ====================================================================

    /// Text columns (builder). 0 is clamped to 1.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        if width == 0 {
            tracing::warn!(width, "text area width must be at least 1; using 1");
        }
        self.width = width.max(1);
        self.resolved()
    }

    /// Text columns (builder), rejecting 0.
    pub fn try_with_width(self, width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::InvalidWidth(width));
        }
        Ok(self.with_width(width))
    }

    /// Maximum content rows (builder); `None` is unbounded. `Some(0)` is
    /// clamped to 1.
    #[must_use]
    pub fn with_max_height(mut self, max_height: Option<usize>) -> Self {
        if max_height == Some(0) {
            tracing::warn!(max_height = 0, "text area max height must be at least 1; using 1");
        }
        self.max_height = max_height.map(|h| h.max(1));
        self.resolved()
    }

    /// Maximum content rows (builder), rejecting `Some(0)`.
    pub fn try_with_max_height(self, max_height: Option<usize>) -> Result<Self, ConfigError> {
        if max_height == Some(0) {
            return Err(ConfigError::InvalidMaxHeight(0));
        }
        Ok(self.with_max_height(max_height))
    }

    /// Minimum content rows (builder). Never exceeds the maximum.
    #[must_use]
    pub fn with_min_height(mut self, min_height: usize) -> Self {
        if let Some(max) = self.max_height
            && min_height > max
        {
            tracing::warn!(min_height, max, "text area min height above max; capped at max");
        }
        self.min_height = min_height.max(1);
        self.resolved()
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_placeholder_mode(mut self, mode: PlaceholderMode) -> Self {
        self.placeholder_mode = mode;
        self
    }

    #[must_use]
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self.resolved()
    }

    /// Limit the number of graphemes (builder).
    #[must_use]
    pub fn with_char_limit(mut self, limit: Option<usize>) -> Self {
        self.buffer.set_char_limit(limit);
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptRule) -> Self {
        self.prompt = prompt;
        self.resolved()
    }

    /// Border decoration around the whole widget (builder).
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self.resolved()
    }

    #[must_use]
    pub fn with_wrap_mode(mut self, mode: WrapMode) -> Self {
        self.wrap_mode = mode;
        self.resolved()
    }

    #[must_use]
    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn with_cursor_mode(mut self, mode: CursorMode) -> Self {
        self.blink.set_mode(mode);
        self
    }

    #[must_use]
    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink.set_interval(interval);
        self
    }

    /// Initial content (builder); the cursor goes to the end.
    #[must_use]
    pub fn with_value(mut self, text: &str) -> Self {
        self.buffer.set_value(text);
        self.resolved()
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    #[must_use]
    pub fn with_cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    #[must_use]
    pub fn with_line_number_style(mut self, style: Style) -> Self {
        self.line_number_style = style;
        self
    }

    #[must_use]
    pub fn with_prompt_style(mut self, style: Style) -> Self {
        self.prompt_style = style;
        self
    }

    // ====================================================================
    // State access
    // ====================================================================

    /// Raw content, hard breaks preserved.
    #[must_use]
    pub fn value(&self) -> String {
        self.buffer.value()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn layout(&self) -> &WrapLayout {
        &self.layout
    }

    #[must_use]
    pub fn cursor(&self) -> CursorPosition {
        self.buffer.cursor()
    }

    #[must_use]
    pub fn visual_cursor(&self) -> VisualCursor {
        self.layout.visual_cursor(&self.buffer)
    }

    /// Content rows currently shown.
    #[must_use]
    pub fn height(&self) -> usize {
        self.viewport.height()
    }

    /// First visible visual row.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.viewport.offset()
    }

    /// Visual rows of the whole document.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.layout.total_rows()
    }

    /// Text columns in effect (configured width, capped by available room).
    #[must_use]
    pub fn text_width(&self) -> usize {
        let width = self.width.max(1);
        match self.available {
            Some(size) => {
                let room = usize::from(size.width).saturating_sub(self.chrome_width());
                width.min(room).max(1)
            }
            None => width,
        }
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.focused && self.blink.is_visible()
    }

    #[must_use]
    pub fn blink_interval(&self) -> Duration {
        self.blink.interval()
    }

    #[must_use]
    pub fn cursor_mode(&self) -> CursorMode {
        self.blink.mode()
    }

    /// Cursor details relative to its logical line.
    #[must_use]
    pub fn line_info(&self) -> LineInfo {
        let cursor = self.buffer.cursor();
        let vc = self.visual_cursor();
        let row = self.layout.row(vc.row);
        let line_text = self.buffer.line(cursor.line).unwrap_or_default();
        LineInfo {
            width: row.map_or(0, |r| r.width),
            char_width: display_width(&line_text),
            height: self.layout.rows_for_line(cursor.line).len().max(1),
            start_column: row.map_or(0, |r| r.start),
            column_offset: vc.col,
            row_offset: vc.row.saturating_sub(self.layout.first_row_of(cursor.line)),
            char_offset: cursor.grapheme,
        }
    }

    fn gutter_width(&self) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = self.buffer.line_count().max(1).ilog10() as usize + 1;
        digits + 1
    }

    fn border_chrome(&self) -> (usize, usize) {
        self.block.as_ref().map_or((0, 0), |block| {
            let (h, v) = block.chrome_size();
            (usize::from(h), usize::from(v))
        })
    }

    /// Columns taken by border, gutter, and prompt.
    fn chrome_width(&self) -> usize {
        self.border_chrome().0 + self.gutter_width() + self.prompt.width()
    }

    fn effective_max_height(&self) -> Option<usize> {
        let room = self
            .available
            .map(|size| usize::from(size.height).saturating_sub(self.border_chrome().1).max(1));
        match (self.max_height, room) {
            (Some(max), Some(room)) => Some(max.min(room)),
            (max, room) => max.or(room),
        }
    }

    /// The cells the widget occupies, border included.
    #[must_use]
    pub fn outer_size(&self) -> Size {
        let border_h = self.border_chrome().1;
        let width = self.chrome_width() + self.text_width();
        let height = self.height() + border_h;
        Size::new(saturating_u16(width), saturating_u16(height))
    }

    fn placeholder_visible(&self) -> bool {
        !self.placeholder.is_empty()
            && self.buffer.is_empty()
            && (self.placeholder_mode == PlaceholderMode::WhenEmpty || !self.focused)
    }

    // ====================================================================
    // Resolution
    // ====================================================================

    /// Re-derive layout, height, and scroll offset from the buffer.
    fn resolve(&mut self) {
        let width = self.text_width();
        let key = (self.buffer.revision(), width, self.wrap_mode);
        if self.layout_key != Some(key) {
            self.layout =
                WrapLayout::build_with(&self.buffer, width, self.wrap_mode, Some(&mut self.cache));
            self.layout_key = Some(key);
            tracing::debug!(
                rows = self.layout.total_rows(),
                width,
                revision = key.0,
                "wrap layout rebuilt"
            );
        }
        let total = self.layout.total_rows();
        let height = resolve_height(total, self.effective_max_height(), self.min_height);
        let cursor_row = self.layout.cursor_row(self.buffer.cursor());
        self.viewport.follow(cursor_row, total, height);
    }

    // ====================================================================
    // Events
    // ====================================================================

    /// Feed one event. Returns `true` if it was consumed.
    ///
    /// Esc and Ctrl+C are never consumed, so a host can use them to quit or
    /// blur. While unfocused only resize, focus, and tick events count.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize { width, height } => {
                self.on_resize(*width, *height);
                true
            }
            Event::Focus(focused) => {
                self.set_focused(*focused);
                true
            }
            Event::Tick => self.on_blink_tick(),
            _ if !self.focused => false,
            Event::Key(key) if key.is_actionable() => match Action::from_key(key) {
                Some(action) => {
                    self.apply(action);
                    true
                }
                None => false,
            },
            Event::Paste(paste) => {
                self.insert(&paste.text);
                true
            }
            Event::Key(_) => false,
        }
    }

    /// Record the room the host can give the widget (border included).
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.available = Some(Size::new(width, height));
        self.resolve();
    }

    /// Advance the blink phase. Returns `true` if a redraw is needed.
    pub fn on_blink_tick(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.blink.on_tick()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.blink.reset();
    }

    /// Run one decoded action. Returns `false` if it had no effect on the
    /// content (movement always counts).
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Insert(c) => {
                self.insert_char(c);
                true
            }
            Action::BreakLine => {
                self.break_line();
                true
            }
            Action::Move(direction) => {
                self.move_cursor(direction);
                true
            }
            Action::DeleteBackward => self.edit(TextBuffer::delete_backward),
            Action::DeleteForward => self.edit(TextBuffer::delete_forward),
            Action::DeleteWordBackward => self.edit(TextBuffer::delete_word_backward),
            Action::DeleteWordForward => self.edit(TextBuffer::delete_word_forward),
            Action::DeleteToLineEnd => self.edit(TextBuffer::delete_to_line_end),
            Action::DeleteToLineStart => self.edit(TextBuffer::delete_to_line_start),
            Action::Transpose => self.edit(TextBuffer::transpose),
            Action::UppercaseWord => self.edit(TextBuffer::uppercase_word),
            Action::LowercaseWord => self.edit(TextBuffer::lowercase_word),
            Action::CapitalizeWord => self.edit(TextBuffer::capitalize_word),
        }
    }

    // ====================================================================
    // Editing
    // ====================================================================

    fn edit<R>(&mut self, op: impl FnOnce(&mut TextBuffer) -> R) -> R {
        let out = op(&mut self.buffer);
        self.sticky_col = None;
        self.blink.reset();
        self.resolve();
        out
    }

    pub fn insert(&mut self, text: &str) {
        self.edit(|buf| buf.insert(text));
    }

    pub fn insert_char(&mut self, ch: char) {
        self.edit(|buf| buf.insert_char(ch));
    }

    /// Hard line break at the cursor.
    pub fn break_line(&mut self) {
        self.edit(TextBuffer::break_line);
    }

    pub fn delete_backward(&mut self) -> bool {
        self.edit(TextBuffer::delete_backward)
    }

    pub fn delete_forward(&mut self) -> bool {
        self.edit(TextBuffer::delete_forward)
    }

    /// Replace the whole content; the cursor goes to the end.
    pub fn set_value(&mut self, text: &str) {
        self.edit(|buf| buf.set_value(text));
    }

    /// Empty the buffer and scroll back to the top.
    pub fn reset(&mut self) {
        self.viewport.reset();
        self.edit(TextBuffer::reset);
    }

    /// Move the cursor to `pos`, clamped into the document.
    pub fn set_cursor(&mut self, pos: CursorPosition) {
        self.edit(|buf| buf.set_cursor(pos));
    }

    /// Move the cursor. Up and Down step by visual row and keep a sticky
    /// target column across consecutive vertical moves.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Up | Direction::Down => {
                self.move_visual(direction == Direction::Down);
                self.blink.reset();
                self.resolve();
            }
            _ => self.edit(|buf| buf.move_cursor(direction)),
        }
    }

    fn move_visual(&mut self, down: bool) {
        let vc = self.visual_cursor();
        let col = *self.sticky_col.get_or_insert(vc.col);
        let last_row = self.layout.total_rows().saturating_sub(1);
        match (down, vc.row) {
            (false, 0) => self.buffer.move_cursor(Direction::DocumentStart),
            (true, row) if row >= last_row => self.buffer.move_cursor(Direction::DocumentEnd),
            (down, row) => {
                let target = if down { row + 1 } else { row - 1 };
                let pos = self.layout.position_at(&self.buffer, target, col);
                self.buffer.set_cursor(pos);
            }
        }
    }

    // ====================================================================
    // Rendering
    // ====================================================================

    /// Render at [`outer_size`](Self::outer_size) into a fresh frame.
    #[must_use]
    pub fn view(&self) -> RenderedView {
        let size = self.outer_size();
        let mut frame = Frame::new(size.width, size.height);
        self.render(frame.bounds(), &mut frame);
        RenderedView {
            lines: frame.buffer.to_lines(),
            height: usize::from(size.height),
            content_height: self.height(),
            cursor: frame.cursor_position,
        }
    }

    fn draw_prompt(&self, frame: &mut Frame, x: u16, y: u16, max_x: u16, ctx: &PromptContext) {
        if self.prompt.width() == 0 {
            return;
        }
        let prompt = self.prompt.prompt_for(ctx);
        draw_text_span(frame, x, y, &prompt, self.prompt_style, max_x);
    }

    fn draw_line_number(&self, frame: &mut Frame, x: u16, y: u16, max_x: u16, line: usize) {
        let digits = self.gutter_width().saturating_sub(1);
        let label = format!("{:>digits$} ", line + 1);
        draw_text_span(frame, x, y, &label, self.line_number_style, max_x);
    }

    /// Overlay the cursor glyph at cell column `col` of row `y`.
    fn draw_cursor(&self, frame: &mut Frame, text_x: u16, text_w: u16, y: u16, col: usize) {
        if text_w == 0 {
            return;
        }
        let mut x = text_x.saturating_add(saturating_u16(col).min(text_w - 1));
        // Land on the head of a wide glyph.
        while x > text_x
            && frame
                .buffer
                .get(x, y)
                .is_some_and(|cell| cell.content.is_continuation())
        {
            x -= 1;
        }
        // The glyph lives in the grid; the terminal cursor is parked on it
        // but kept hidden.
        frame.set_cursor(Some((x, y)));
        frame.set_cursor_visible(false);
        if self.blink.is_visible()
            && let Some(cell) = frame.buffer.get_mut(x, y)
        {
            cell.apply_style(self.cursor_style);
        }
    }
}

fn saturating_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl Widget for AutoTextArea {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "AutoTextArea",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            rows = self.layout.total_rows(),
            offset = self.viewport.offset()
        )
        .entered();

        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }
        set_style_area(frame, area, self.style);
        let inner = match &self.block {
            Some(block) => {
                block.render(area, frame);
                block.inner(area)
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        let gutter_x = inner.x;
        let prompt_x = gutter_x
            .saturating_add(saturating_u16(self.gutter_width()))
            .min(inner.right());
        let text_x = prompt_x
            .saturating_add(saturating_u16(self.prompt.width()))
            .min(inner.right());
        let text_w = (inner.right() - text_x).min(saturating_u16(self.layout.width()));
        let text_max_x = text_x + text_w;
        let rows = usize::from(inner.height).min(self.viewport.height());
        let offset = self.viewport.offset();

        if self.placeholder_visible() {
            for screen_row in 0..rows {
                let y = inner.y + saturating_u16(screen_row);
                let first = screen_row == 0;
                let ctx = PromptContext {
                    visual_row: screen_row,
                    line: 0,
                    continuation: !first,
                    first_in_document: first,
                };
                if first && self.show_line_numbers {
                    self.draw_line_number(frame, gutter_x, y, prompt_x, 0);
                }
                self.draw_prompt(frame, prompt_x, y, text_x, &ctx);
            }
            // Only the first line of the placeholder is ever shown.
            let text = self.placeholder.lines().next().unwrap_or_default();
            draw_text_span(frame, text_x, inner.y, text, self.placeholder_style, text_max_x);
            if self.focused {
                self.draw_cursor(frame, text_x, text_w, inner.y, 0);
            }
            return;
        }

        for screen_row in 0..rows {
            let y = inner.y + saturating_u16(screen_row);
            let row_idx = offset + screen_row;
            let Some(row) = self.layout.row(row_idx) else {
                // Filler below the content when a minimum height applies.
                let ctx = PromptContext {
                    visual_row: row_idx,
                    line: self.layout.line_count(),
                    continuation: true,
                    first_in_document: false,
                };
                self.draw_prompt(frame, prompt_x, y, text_x, &ctx);
                continue;
            };
            if self.show_line_numbers && !row.continuation {
                self.draw_line_number(frame, gutter_x, y, prompt_x, row.line);
            }
            let ctx = PromptContext {
                visual_row: row_idx,
                line: row.line,
                continuation: row.continuation,
                first_in_document: row_idx == 0,
            };
            self.draw_prompt(frame, prompt_x, y, text_x, &ctx);
            let line = self.buffer.line(row.line).unwrap_or_default();
            draw_text_span(frame, text_x, y, row.text(&line), self.style, text_max_x);
        }

        let vc = self.visual_cursor();
        if self.focused && vc.row >= offset && vc.row < offset + rows {
            let y = inner.y + saturating_u16(vc.row - offset);
            self.draw_cursor(frame, text_x, text_w, y, vc.col);
        }
    }
}
