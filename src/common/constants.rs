//! Application-wide defaults and identifiers.
//!
//! Settings fields left unset in `walkr.toml` fall back to the defaults
//! defined here. The trigger and notification names are stable identifiers:
//! the timer facility serializes arm/cancel against the trigger name, and
//! dismissal callbacks are matched against the notification id.

/// Default work window start, "HH:MM".
pub const DEFAULT_START_TIME: &str = "09:00";

/// Default work window end, "HH:MM".
pub const DEFAULT_END_TIME: &str = "17:00";

/// Reminders are off until the user opts in.
pub const DEFAULT_REMINDER_ACTIVE: bool = false;

/// Minutes between reminders while inside the work window.
pub const DEFAULT_INTERVAL_MINUTES: i64 = 60;

/// Platform timers reject or misbehave on zero/negative delays, so every
/// computed delay is floored at this value to guarantee forward progress.
pub const MINIMUM_DELAY_MINUTES: i64 = 1;

/// Name of the single recurring trigger. At most one live trigger exists;
/// arming always cancels any prior trigger with this name first.
pub const REMINDER_TRIGGER: &str = "schedule-reminder";

/// Notification id for the break nudge.
pub const BREAK_NOTICE_ID: &str = "nudge-user-to-take-break";

/// Notification title shown when a reminder fires.
pub const BREAK_NOTICE_TITLE: &str = "Time for a walk!";

/// Process exit code for fatal startup failures.
pub const EXIT_FAILURE: i32 = 1;

/// Real-time ceiling for a single timer sleep slice, so cancellation is
/// picked up promptly even during long delays.
pub const TIMER_SLICE_SECS: u64 = 30;

/// How long a state query waits for the scheduler surface before degrading
/// to the safe default answer.
pub const QUERY_TIMEOUT_MS: u64 = 500;
