//! Time source abstraction for real and simulated time.
//!
//! Every scheduling decision reads the clock through this module so that the
//! whole scheduler can be driven by simulated time: the `simulate` command
//! compresses a full day of work-window decisions into seconds, and tests can
//! pin "now" to an exact instant.
//!
//! All scheduling arithmetic operates on local wall-clock time as
//! `NaiveDateTime`; the work window is defined in the user's local time and
//! day boundaries are plain calendar-day shifts.

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Sleep for the specified duration (or simulate it).
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a simulated time source.
    fn is_simulated(&self) -> bool;

    /// Check if simulation has ended (always false for real time).
    fn is_ended(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses the actual system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated time source for the `simulate` command and tests.
///
/// Time advances only when someone sleeps: each `sleep` call moves the
/// simulated clock forward by the requested duration and optionally burns a
/// scaled slice of real time (`multiplier` simulated seconds per real
/// second). A multiplier of `0.0` selects fast-forward mode where sleeps
/// complete almost instantly.
pub struct SimulatedTimeSource {
    end_time: NaiveDateTime,
    multiplier: f64,
    current: Mutex<NaiveDateTime>,
}

impl SimulatedTimeSource {
    /// Create a simulated clock covering `[start_time, end_time]`.
    ///
    /// Non-positive multipliers select fast-forward mode.
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime, multiplier: f64) -> Self {
        Self {
            end_time,
            multiplier: if multiplier > 0.0 { multiplier } else { 0.0 },
            current: Mutex::new(start_time),
        }
    }

    fn advance(&self, duration: StdDuration) {
        let mut current = self.current.lock().unwrap();
        let step = ChronoDuration::milliseconds(duration.as_millis() as i64);
        *current = (*current + step).min(self.end_time);
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> NaiveDateTime {
        *self.current.lock().unwrap()
    }

    fn sleep(&self, duration: StdDuration) {
        if self.multiplier > 0.0 {
            let real_secs = duration.as_secs_f64() / self.multiplier;
            if real_secs > 0.0 {
                std::thread::sleep(StdDuration::from_secs_f64(real_secs));
            }
        } else {
            // Fast-forward: minimal real sleep so other threads and log
            // output keep up with the jumping clock
            std::thread::sleep(StdDuration::from_millis(1));
        }
        self.advance(duration);
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        *self.current.lock().unwrap() >= self.end_time
    }
}

/// Manually steered clock for tests.
///
/// Unlike [`SimulatedTimeSource`], sleeps do not advance the clock; tests
/// move time explicitly with [`TestClock::set`] so scheduling decisions can
/// be asserted at exact instants.
#[cfg(any(test, feature = "testing-support"))]
pub struct TestClock {
    current: Mutex<NaiveDateTime>,
}

#[cfg(any(test, feature = "testing-support"))]
impl TestClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Pin the clock to an exact instant.
    pub fn set(&self, instant: NaiveDateTime) {
        *self.current.lock().unwrap() = instant;
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for TestClock {
    fn now(&self) -> NaiveDateTime {
        *self.current.lock().unwrap()
    }

    fn sleep(&self, _duration: StdDuration) {
        // Tests steer time explicitly; sleeping yields without advancing
        std::thread::sleep(StdDuration::from_millis(1));
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup).
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized.
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current local time from the global time source.
pub fn now() -> NaiveDateTime {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Sleep for the specified duration using the global time source.
pub fn sleep(duration: StdDuration) {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .sleep(duration)
}

/// Check if we're running against simulated time.
pub fn is_simulated() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_simulated()
}

/// Check if simulation has reached its end time (always false for real time).
pub fn simulation_ended() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_ended()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM".
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM"))
}
