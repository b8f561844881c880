#![forbid(unsafe_code)]

//! The demo model: two status lines above a centered text area.

use growtext_core::event::{Event, KeyCode, KeyEvent};
use growtext_core::text_width::truncate_to_width;
use growtext_render::frame::Frame;
use growtext_render::style::Style;
use growtext_runtime::{Cmd, Model};
use growtext_widgets::blink::CursorMode;
use growtext_widgets::block::Block;
use growtext_widgets::borders::BorderType;
use growtext_widgets::prompt::PromptRule;
use growtext_widgets::textarea::{AutoTextArea, PlaceholderMode};
use growtext_widgets::{Widget, draw_text_span};
use std::time::Duration;

use crate::cli::Opts;

/// Rows above the text area.
pub const HEADER_ROWS: u16 = 2;

#[derive(Debug)]
pub struct DemoModel {
    textarea: AutoTextArea,
    width: u16,
    height: u16,
}

impl DemoModel {
    pub fn new(opts: &Opts) -> Self {
        let cursor_mode = if opts.blink_ms == 0 {
            CursorMode::Static
        } else {
            CursorMode::Blink
        };
        let mut textarea = AutoTextArea::new()
            .with_width(opts.width)
            .with_max_height(opts.max_height)
            .with_min_height(opts.min_height)
            .with_placeholder(opts.placeholder.as_str())
            .with_placeholder_mode(PlaceholderMode::WhenEmpty)
            .with_line_numbers(opts.line_numbers)
            .with_prompt(PromptRule::lead("> ", "  "))
            .with_cursor_mode(cursor_mode)
            .with_blink_interval(Duration::from_millis(opts.blink_ms))
            .with_focus(true);
        if opts.border {
            textarea = textarea.with_block(Block::bordered().border_type(BorderType::Rounded));
        }
        Self {
            textarea,
            width: 0,
            height: 0,
        }
    }

    #[must_use]
    pub fn textarea(&self) -> &AutoTextArea {
        &self.textarea
    }

    fn is_quit(key: &KeyEvent) -> bool {
        key.is_actionable()
            && (key.code == KeyCode::Escape
                || (key.ctrl() && matches!(key.code, KeyCode::Char('c' | 'C'))))
    }

    fn debug_line(&self) -> String {
        let outer = self.textarea.outer_size();
        let info = self.textarea.line_info();
        format!(
            "width: {}, height: {}, textarea height: {}, outer: {}x{}, line height: {}, row: {}/{}, lines: {}",
            self.width,
            self.height,
            self.textarea.height(),
            outer.width,
            outer.height,
            info.height,
            info.row_offset + 1,
            info.height,
            self.textarea.line_count(),
        )
    }
}

fn draw_centered(frame: &mut Frame, y: u16, text: &str, style: Style) {
    let width = frame.width();
    let (text, text_width) = truncate_to_width(text, usize::from(width));
    let x = (width - u16::try_from(text_width).unwrap_or(width)) / 2;
    draw_text_span(frame, x, y, text, style, width);
}

impl Model for DemoModel {
    type Message = Event;

    fn init(&mut self) -> Cmd {
        if self.textarea.cursor_mode() == CursorMode::Blink {
            Cmd::tick(self.textarea.blink_interval())
        } else {
            Cmd::none()
        }
    }

    fn update(&mut self, event: Event) -> Cmd {
        match event {
            Event::Key(key) if Self::is_quit(&key) => {
                tracing::info!(value_len = self.textarea.value().len(), "quit");
                return Cmd::quit();
            }
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.textarea.handle_event(&Event::Resize {
                    width,
                    height: height.saturating_sub(HEADER_ROWS),
                });
            }
            event => {
                self.textarea.handle_event(&event);
            }
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        draw_centered(frame, 0, &self.debug_line(), Style::new().dim());
        let value = format!("Input value: {:?}", self.textarea.value());
        draw_centered(frame, 1, &value, Style::default());

        let size = self.textarea.outer_size();
        let area = frame
            .bounds()
            .centered_row(HEADER_ROWS, size.width, size.height);
        self.textarea.render(area, frame);
    }
}
