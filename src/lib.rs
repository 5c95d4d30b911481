//! # Walkr Library
//!
//! Internal library for the walkr binary.
//!
//! Walkr nags you to take a walk once per interval, but only while the clock
//! is inside your configured work window, including windows that wrap past
//! midnight (22:00–06:00). The library exists so the scheduling internals can
//! be tested without a running process.
//!
//! ## Architecture
//!
//! - **Entry Point**: the `Walkr` struct wires the surfaces together and runs them
//! - **Core Logic**: `core` holds the window resolver, delay calculator,
//!   trigger evaluator, and the Idle/Presenting state machine
//! - **Settings**: `settings` is the persisted TOML snapshot every scheduling
//!   decision is re-derived from
//! - **I/O**: `io` carries the message bus, the recurring timer facility, and
//!   the notification sink
//! - **Surfaces**: `surface` holds the presentation and control surfaces;
//!   the scheduler surface lives in `core::scheduler`
//! - **Infrastructure**: logging, time source abstraction, CLI parsing

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod core;
pub mod io;
pub mod settings;
pub mod surface;
pub mod time_source;

mod walkr;

// Re-export for binary
pub use walkr::Walkr;
