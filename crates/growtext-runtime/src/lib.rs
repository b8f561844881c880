#![forbid(unsafe_code)]

//! Event loop for growtext applications.
//!
//! A [`Model`](program::Model) owns all state, turns each [`Event`] into a
//! [`Cmd`](program::Cmd), and draws itself into a fresh frame. The
//! [`Program`](program::Program) drives it against a real terminal; the
//! [`Runtime`](program::Runtime) core underneath it has no terminal at all,
//! which is what the tests use.
//!
//! [`Event`]: growtext_core::event::Event

pub mod program;
pub mod tick;

pub use program::{Cmd, Model, Program, ProgramConfig, Runtime};
pub use tick::TickTimer;
