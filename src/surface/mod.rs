//! The control and presentation surfaces.
//!
//! Each surface runs on its own lifecycle and talks to the scheduler only
//! through the bus and the persisted settings snapshot. The scheduler
//! surface itself lives in `core::scheduler`.

pub mod control;
pub mod presentation;
