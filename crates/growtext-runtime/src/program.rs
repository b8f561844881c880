#![forbid(unsafe_code)]

//! Bubbletea/Elm-style runtime.
//!
//! The model holds state; `update` reacts to one message and returns a
//! command; `view` draws into a frame sized to the terminal. The loop polls
//! input with a timeout equal to the time left until the next scheduled
//! tick, drains every pending event, and repaints only when something was
//! dispatched.
//!
//! # Example
//!
//! ```
//! use growtext_core::event::{Event, KeyCode};
//! use growtext_render::frame::Frame;
//! use growtext_runtime::{Cmd, Model, ProgramConfig, Runtime};
//!
//! struct Counter(u32);
//!
//! impl Model for Counter {
//!     type Message = Event;
//!
//!     fn update(&mut self, msg: Event) -> Cmd {
//!         match msg {
//!             Event::Key(k) if k.is_char('q') => Cmd::quit(),
//!             Event::Key(_) => {
//!                 self.0 += 1;
//!                 Cmd::none()
//!             }
//!             _ => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.buffer.set_string(0, 0, &self.0.to_string(), Default::default(), frame.width());
//!     }
//! }
//!
//! let mut rt = Runtime::new(Counter(0), 10, 1, &ProgramConfig::default());
//! rt.dispatch(Event::key(KeyCode::Char('a')));
//! assert_eq!(rt.render().trimmed_lines(), vec!["1"]);
//! rt.dispatch(Event::key(KeyCode::Char('q')));
//! assert!(!rt.is_running());
//! ```

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use growtext_core::event::Event;
use growtext_core::terminal_session::{SessionOptions, TerminalSession};
use growtext_render::frame::Frame;
use growtext_render::presenter::Presenter;
use tracing::{debug, debug_span, info};

use crate::tick::TickTimer;

/// Application state and behavior.
pub trait Model {
    /// Messages the model reacts to. Terminal events convert into it.
    type Message: From<Event>;

    /// Startup commands, run once before the first frame.
    fn init(&mut self) -> Cmd {
        Cmd::none()
    }

    /// React to one message.
    fn update(&mut self, msg: Self::Message) -> Cmd;

    /// Draw the current state. The frame covers the whole terminal.
    fn view(&self, frame: &mut Frame);
}

/// Side effects requested by the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cmd {
    #[default]
    None,
    /// Stop the loop after the current batch of events.
    Quit,
    /// Deliver `Event::Tick` every `duration` from now on. Zero cancels.
    Tick(Duration),
}

impl Cmd {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Terminal and loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Draw on the alternate screen.
    pub alternate_screen: bool,
    pub bracketed_paste: bool,
    /// Report focus gained/lost as `Event::Focus`.
    pub focus_reporting: bool,
    /// How long to block on input when no tick is scheduled.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
            focus_reporting: false,
            poll_timeout: Duration::from_millis(100),
        }
    }
}

impl ProgramConfig {
    #[must_use]
    pub fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    #[must_use]
    pub fn with_focus_reporting(mut self, enabled: bool) -> Self {
        self.focus_reporting = enabled;
        self
    }

    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            alternate_screen: self.alternate_screen,
            bracketed_paste: self.bracketed_paste,
            focus_events: self.focus_reporting,
        }
    }
}

/// The loop's state machine, independent of any terminal.
#[derive(Debug)]
pub struct Runtime<M: Model> {
    model: M,
    running: bool,
    dirty: bool,
    /// Set by a resize; the presenter must repaint from scratch.
    resized: bool,
    width: u16,
    height: u16,
    ticker: TickTimer,
    poll_timeout: Duration,
}

impl<M: Model> Runtime<M> {
    /// Wrap `model` for a `width` x `height` terminal. Runs `init`.
    pub fn new(model: M, width: u16, height: u16, config: &ProgramConfig) -> Self {
        let mut rt = Self {
            model,
            running: true,
            dirty: true,
            resized: false,
            width: width.max(1),
            height: height.max(1),
            ticker: TickTimer::new(),
            poll_timeout: config.poll_timeout,
        };
        let cmd = rt.model.init();
        rt.execute(cmd);
        rt
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn into_model(self) -> M {
        self.model
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn tick_rate(&self) -> Option<Duration> {
        self.ticker.rate()
    }

    /// How long the loop may block on input right now.
    #[must_use]
    pub fn poll_timeout_at(&self, now: Instant) -> Duration {
        self.ticker.timeout_at(self.poll_timeout, now)
    }

    /// Feed one terminal event to the model.
    pub fn dispatch(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            debug!(width, height, "terminal resized");
            self.width = width.max(1);
            self.height = height.max(1);
            self.resized = true;
        }
        let cmd = self.model.update(M::Message::from(event));
        self.dirty = true;
        self.execute(cmd);
    }

    /// Deliver `Event::Tick` if one is due. Returns `true` if it was.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.ticker.poll_at(now) {
            return false;
        }
        self.dispatch(Event::Tick);
        true
    }

    fn execute(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                debug!("quit requested");
                self.running = false;
            }
            Cmd::Tick(rate) => {
                debug!(rate_ms = rate.as_millis() as u64, "tick scheduled");
                self.ticker.schedule(rate);
            }
        }
    }

    /// Draw the model into a terminal-sized frame and clear the dirty flag.
    pub fn render(&mut self) -> Frame {
        let _span = debug_span!("model_view", width = self.width, height = self.height).entered();
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        self.dirty = false;
        frame
    }

    /// Whether a resize happened since the last call.
    fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}

/// A [`Runtime`] attached to a real terminal.
pub struct Program<M: Model, W: Write = Stdout> {
    runtime: Runtime<M>,
    presenter: Presenter<W>,
    /// Restores the terminal when dropped.
    session: TerminalSession,
}

impl<M: Model> Program<M, Stdout> {
    pub fn new(model: M) -> io::Result<Self> {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Enter raw mode per `config` and size the first frame to the terminal.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(config.session_options())?;
        let (width, height) = session.size().unwrap_or((80, 24));
        info!(width, height, ?config, "program starting");
        Ok(Self {
            runtime: Runtime::new(model, width, height, &config),
            presenter: Presenter::new(io::stdout()),
            session,
        })
    }
}

impl<M: Model, W: Write> Program<M, W> {
    #[must_use]
    pub fn model(&self) -> &M {
        self.runtime.model()
    }

    /// Give back the model, restoring the terminal.
    pub fn into_model(self) -> M {
        let Self {
            runtime, session, ..
        } = self;
        drop(session);
        runtime.into_model()
    }

    /// Run until the model quits.
    pub fn run(&mut self) -> io::Result<()> {
        // The session may have reported a size before the model could see it.
        let (width, height) = self.runtime.size();
        self.runtime.dispatch(Event::Resize { width, height });
        self.present()?;

        while self.runtime.is_running() {
            let timeout = self.runtime.poll_timeout_at(Instant::now());
            if self.session.poll_event(timeout)? {
                loop {
                    if let Some(event) = self.session.read_event()? {
                        self.runtime.dispatch(event);
                    }
                    if !self.runtime.is_running()
                        || !self.session.poll_event(Duration::ZERO)?
                    {
                        break;
                    }
                }
            }
            self.runtime.tick_at(Instant::now());
            if self.runtime.is_running() && self.runtime.is_dirty() {
                self.present()?;
            }
        }
        info!("program finished");
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        if self.runtime.take_resized() {
            self.presenter.invalidate();
        }
        let frame = self.runtime.render();
        self.presenter.present(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growtext_core::event::KeyCode;

    #[derive(Debug, PartialEq)]
    enum TestMsg {
        Key(char),
        Ticked,
        Resized(u16, u16),
        Other,
    }

    impl From<Event> for TestMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) => match k.code {
                    KeyCode::Char(c) => Self::Key(c),
                    _ => Self::Other,
                },
                Event::Tick => Self::Ticked,
                Event::Resize { width, height } => Self::Resized(width, height),
                _ => Self::Other,
            }
        }
    }

    #[derive(Default)]
    struct TestModel {
        keys: u32,
        ticks: u32,
        size: (u16, u16),
        tick_on_init: Option<Duration>,
    }

    impl Model for TestModel {
        type Message = TestMsg;

        fn init(&mut self) -> Cmd {
            self.tick_on_init.map_or(Cmd::none(), Cmd::tick)
        }

        fn update(&mut self, msg: TestMsg) -> Cmd {
            match msg {
                TestMsg::Key('q') => Cmd::quit(),
                TestMsg::Key('0') => Cmd::tick(Duration::ZERO),
                TestMsg::Key(_) => {
                    self.keys += 1;
                    Cmd::none()
                }
                TestMsg::Other => Cmd::none(),
                TestMsg::Ticked => {
                    self.ticks += 1;
                    Cmd::none()
                }
                TestMsg::Resized(w, h) => {
                    self.size = (w, h);
                    Cmd::none()
                }
            }
        }

        fn view(&self, frame: &mut Frame) {
            let text = format!("{} {}", self.keys, self.ticks);
            frame
                .buffer
                .set_string(0, 0, &text, Default::default(), frame.width());
        }
    }

    fn runtime(model: TestModel) -> Runtime<TestModel> {
        Runtime::new(model, 20, 2, &ProgramConfig::default())
    }

    #[test]
    fn cmd_constructors() {
        assert!(Cmd::none().is_none());
        assert_eq!(Cmd::quit(), Cmd::Quit);
        assert_eq!(Cmd::default(), Cmd::None);
        assert_eq!(
            format!("{:?}", Cmd::tick(Duration::from_millis(5))),
            "Tick(5ms)"
        );
    }

    #[test]
    fn keys_reach_model_until_quit() {
        let mut rt = runtime(TestModel::default());
        rt.dispatch(Event::key(KeyCode::Char('a')));
        rt.dispatch(Event::key(KeyCode::Char('b')));
        assert_eq!(rt.model().keys, 2);
        assert!(rt.is_running());
        rt.dispatch(Event::key(KeyCode::Char('q')));
        assert!(!rt.is_running());
    }

    #[test]
    fn zero_tick_cancels_schedule() {
        let mut rt = runtime(TestModel {
            tick_on_init: Some(Duration::from_millis(100)),
            ..TestModel::default()
        });
        assert!(rt.tick_rate().is_some());
        rt.dispatch(Event::key(KeyCode::Char('0')));
        assert_eq!(rt.tick_rate(), None);
    }

    #[test]
    fn resize_reaches_model_and_frame() {
        let mut rt = runtime(TestModel::default());
        rt.dispatch(Event::Resize {
            width: 7,
            height: 3,
        });
        assert_eq!(rt.model().size, (7, 3));
        let frame = rt.render();
        assert_eq!((frame.width(), frame.height()), (7, 3));
        assert!(rt.take_resized());
        assert!(!rt.take_resized());
    }

    #[test]
    fn zero_size_is_bumped() {
        let mut rt = runtime(TestModel::default());
        rt.dispatch(Event::Resize {
            width: 0,
            height: 0,
        });
        assert_eq!(rt.size(), (1, 1));
    }

    #[test]
    fn render_clears_dirty() {
        let mut rt = runtime(TestModel::default());
        assert!(rt.is_dirty());
        assert_eq!(rt.render().trimmed_lines()[0], "0 0");
        assert!(!rt.is_dirty());
        rt.dispatch(Event::key(KeyCode::Char('x')));
        assert!(rt.is_dirty());
    }

    #[test]
    fn ticks_follow_schedule_from_init() {
        let rate = Duration::from_millis(530);
        let mut rt = runtime(TestModel {
            tick_on_init: Some(rate),
            ..TestModel::default()
        });
        assert_eq!(rt.tick_rate(), Some(rate));
        let start = Instant::now();
        assert!(rt.poll_timeout_at(start) <= rate);
        assert!(!rt.tick_at(start));
        assert!(rt.tick_at(start + rate * 2));
        assert_eq!(rt.model().ticks, 1);
    }

    #[test]
    fn idle_timeout_without_ticks() {
        let rt = runtime(TestModel::default());
        assert_eq!(rt.tick_rate(), None);
        assert_eq!(
            rt.poll_timeout_at(Instant::now()),
            ProgramConfig::default().poll_timeout
        );
    }

    #[test]
    fn config_builders() {
        let config = ProgramConfig::default()
            .with_alternate_screen(false)
            .with_focus_reporting(true)
            .with_poll_timeout(Duration::from_millis(7));
        let opts = config.session_options();
        assert!(!opts.alternate_screen);
        assert!(opts.focus_events);
        assert!(opts.bracketed_paste);
        assert_eq!(config.poll_timeout, Duration::from_millis(7));
    }
}
