//! Delay calculation and the fire/reschedule decision.
//!
//! Given a freshly resolved window, `minutes_until_next_reminder` computes
//! the delay to hand the timer facility, and `should_fire_now` decides
//! whether a firing that has just arrived lands inside the window. Both take
//! "now" explicitly so the arithmetic stays pure and testable.

use chrono::{Duration, NaiveDateTime};

use crate::common::constants::MINIMUM_DELAY_MINUTES;
use crate::core::window::ResolvedWindow;

/// Minutes until the next reminder should fire, always at least 1.
///
/// Three cases, in order:
///
/// 1. Before the window: minutes until the window start.
/// 2. Inside the window: minutes until the next interval boundary strictly
///    after `now` (a boundary exactly at `now` is skipped, never returned
///    as a zero delay).
/// 3. At or past the window end: minutes until tomorrow's window start.
///
/// The floor of 1 exists because platform timers reject or misbehave on
/// zero and negative delays; rounding up plus the floor guarantees forward
/// progress no matter how late a firing arrived.
pub fn minutes_until_next_reminder(
    resolved: &ResolvedWindow,
    now: NaiveDateTime,
    interval: Duration,
) -> i64 {
    // A non-positive interval would spin the cursor loop forever
    let interval = if interval > Duration::zero() {
        interval
    } else {
        Duration::minutes(crate::common::constants::DEFAULT_INTERVAL_MINUTES)
    };

    if now < resolved.start {
        return minutes_ceil(resolved.start - now);
    }

    if now < resolved.end {
        let mut cursor = resolved.start;
        while cursor <= now {
            cursor += interval;
        }
        return minutes_ceil(cursor - now);
    }

    // Window for today is over; wait for tomorrow's start
    minutes_ceil(resolved.start + Duration::days(1) - now)
}

/// Whether a trigger that fired at `firing_instant` lands inside the window,
/// inclusive of both bounds.
///
/// The caller must pass a window resolved against the firing instant itself,
/// not the one computed at arm time: the timer facility only promises "at or
/// after" the requested delay, and lateness can push a firing past a stale
/// window's end. When this returns false the correct action is to cancel the
/// recurring trigger and re-arm against the freshly resolved next window,
/// which is what keeps a stale trigger from firing all night.
pub fn should_fire_now(resolved: &ResolvedWindow, firing_instant: NaiveDateTime) -> bool {
    resolved.contains(firing_instant)
}

fn minutes_ceil(delta: Duration) -> i64 {
    let seconds = delta.num_seconds();
    let minutes = if seconds % 60 == 0 {
        seconds / 60
    } else {
        seconds / 60 + 1
    };
    minutes.max(MINIMUM_DELAY_MINUTES)
}
