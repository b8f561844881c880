#![forbid(unsafe_code)]

//! Event-driven scenarios for the auto-growing text area.
//!
//! Each test feeds a sequence of [`Event`]s the way a host loop would and
//! checks height, scroll offset, and the rendered grid after each step.
//! Set `RUST_LOG=growtext_widgets=debug` to see layout rebuilds.

use std::sync::OnceLock;

use growtext_core::event::{Event, KeyCode, Modifiers, PasteEvent};
use growtext_widgets::block::Block;
use growtext_widgets::borders::BorderType;
use growtext_widgets::textarea::{AutoTextArea, PlaceholderMode};

fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn feed(ta: &mut AutoTextArea, events: impl IntoIterator<Item = Event>) {
    for event in events {
        ta.handle_event(&event);
    }
}

fn typed(text: &str) -> Vec<Event> {
    text.chars()
        .map(|c| match c {
            '\n' => Event::key(KeyCode::Enter),
            c => Event::key(KeyCode::Char(c)),
        })
        .collect()
}

fn demo_area() -> AutoTextArea {
    AutoTextArea::new()
        .with_width(30)
        .with_max_height(Some(3))
        .with_placeholder("Placeholder...")
        .with_placeholder_mode(PlaceholderMode::WhenEmpty)
        .with_block(Block::bordered().border_type(BorderType::Rounded))
        .with_focus(true)
}

#[test]
fn grows_then_scrolls_while_typing() {
    init_tracing();
    let mut ta = AutoTextArea::new()
        .with_width(10)
        .with_max_height(Some(3))
        .with_focus(true);

    feed(&mut ta, typed("hello world foo bar"));
    assert_eq!(ta.height(), 3);
    assert_eq!(ta.scroll_offset(), 0);
    assert_eq!(ta.view().text(), "> hello\n  world foo\n  bar");

    feed(&mut ta, typed(" baz qux"));
    assert_eq!(ta.total_rows(), 4);
    assert_eq!(ta.height(), 3);
    assert_eq!(ta.scroll_offset(), 1);
    assert_eq!(ta.view().text(), "  world foo\n  bar baz\n  qux");
}

#[test]
fn jumping_to_start_scrolls_back_up() {
    init_tracing();
    let mut ta = AutoTextArea::new()
        .with_width(10)
        .with_max_height(Some(2))
        .with_focus(true);
    feed(&mut ta, typed("one\ntwo\nthree\nfour"));
    assert_eq!(ta.scroll_offset(), 2);

    feed(
        &mut ta,
        [Event::key_with(KeyCode::Char('<'), Modifiers::ALT)],
    );
    assert_eq!(ta.scroll_offset(), 0);
    assert_eq!(ta.view().text(), "> one\n  two");

    feed(
        &mut ta,
        [Event::key_with(KeyCode::Char('>'), Modifiers::ALT)],
    );
    assert_eq!(ta.scroll_offset(), 2);
}

#[test]
fn clearing_content_shrinks_to_one_row() {
    init_tracing();
    let mut ta = demo_area();
    feed(&mut ta, typed("a\nb\nc\nd"));
    assert_eq!(ta.height(), 3);
    assert_eq!(ta.outer_size().height, 5);

    ta.reset();
    assert_eq!(ta.height(), 1);
    assert_eq!(ta.scroll_offset(), 0);
    assert_eq!(ta.outer_size().height, 3);
}

#[test]
fn placeholder_shows_until_first_key() {
    init_tracing();
    let mut ta = demo_area();
    let view = ta.view();
    assert_eq!(view.lines.len(), 3);
    assert!(view.lines[1].contains("Placeholder..."));

    feed(&mut ta, typed("x"));
    let view = ta.view();
    assert!(!view.text().contains("Placeholder"));
    assert!(view.lines[1].starts_with("│> x"));
}

#[test]
fn paste_grows_in_one_step() {
    init_tracing();
    let mut ta = demo_area();
    ta.handle_event(&Event::Paste(PasteEvent::new("first\nsecond")));
    assert_eq!(ta.value(), "first\nsecond");
    assert_eq!(ta.height(), 2);
    assert_eq!(ta.view().height, 4);
}

#[test]
fn narrow_terminal_rewraps_content() {
    init_tracing();
    let mut ta = demo_area();
    feed(&mut ta, typed("the quick brown fox"));
    assert_eq!(ta.total_rows(), 1);

    // 14 columns leave 10 for text after the border and prompt.
    ta.handle_event(&Event::Resize {
        width: 14,
        height: 20,
    });
    assert_eq!(ta.text_width(), 10);
    assert_eq!(ta.total_rows(), 2);
    assert_eq!(ta.height(), 2);

    // Back to a wide terminal: the configured width applies again.
    ta.handle_event(&Event::Resize {
        width: 80,
        height: 20,
    });
    assert_eq!(ta.text_width(), 30);
    assert_eq!(ta.total_rows(), 1);
}

#[test]
fn blur_ignores_typing_and_keeps_value() {
    init_tracing();
    let mut ta = demo_area();
    feed(&mut ta, typed("kept"));
    ta.handle_event(&Event::Focus(false));
    feed(&mut ta, typed("lost"));
    assert_eq!(ta.value(), "kept");
    assert_eq!(ta.view().cursor, None);
}

#[test]
fn host_keys_pass_through() {
    init_tracing();
    let mut ta = demo_area();
    assert!(!ta.handle_event(&Event::key(KeyCode::Escape)));
    assert!(!ta.handle_event(&Event::key_with(KeyCode::Char('c'), Modifiers::CTRL)));
    assert!(ta.handle_event(&Event::key(KeyCode::Char('c'))));
}
