#![forbid(unsafe_code)]

//! The growtext demo application.
//!
//! A single bordered [`AutoTextArea`](growtext_widgets::textarea::AutoTextArea)
//! centered under two status lines. The library half exists so the model and
//! the CLI can be tested without a terminal.

pub mod app;
pub mod cli;
pub mod logging;
