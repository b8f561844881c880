#![forbid(unsafe_code)]

//! Core: geometry, input events, display width, and the terminal session.
//!
//! # Role in growtext
//! `growtext-core` is the input layer. It owns the normalized event types the
//! widget and runtime consume, the cell-width rules shared by wrapping and
//! rendering, and (with the `crossterm` feature) the RAII terminal session.
//!
//! # How it fits in the system
//! The text layer (`growtext-text`) measures graphemes with [`text_width`],
//! the widget layer (`growtext-widgets`) reacts to [`event::Event`] values,
//! and the runtime (`growtext-runtime`) pulls those events out of a
//! [`terminal_session::TerminalSession`].

pub mod event;
pub mod geometry;
pub mod text_width;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub mod terminal_session;
