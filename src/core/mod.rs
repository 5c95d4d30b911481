//! Core scheduling logic and state management.
//!
//! This module holds the pure time arithmetic and the reminder state machine:
//!
//! - `window`: resolving the daily work window into concrete instants,
//!   including windows that wrap past midnight
//! - `schedule`: the delay until the next reminder and the fire/reschedule
//!   decision for a trigger that has gone off
//! - `state`: the Idle/Presenting state machine and its side effects
//! - `scheduler`: the scheduler surface that ties the above to the timer
//!   facility, settings store, and message bus
//!
//! Everything except `scheduler` is pure: callers pass in "now" explicitly,
//! and nothing here is cached between scheduling decisions. A resolved window
//! is recomputed fresh on every decision because the correct resolution
//! depends on where "now" falls.

pub mod schedule;
pub mod scheduler;
pub mod state;
pub mod window;
