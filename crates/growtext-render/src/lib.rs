#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, and ANSI presentation.
//!
//! # Role in growtext
//! Widgets draw into a [`frame::Frame`], whose [`buffer::Buffer`] is a
//! fixed-size grid of [`cell::Cell`]s. The [`presenter::Presenter`] turns a
//! buffer into ANSI output for the terminal; tests read the grid back as
//! plain text instead.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
pub mod style;
