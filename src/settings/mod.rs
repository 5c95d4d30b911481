//! Persisted reminder settings.
//!
//! Settings live in `walkr.toml` under the user's config directory:
//!
//! ```toml
//! start_time = "09:00"     # Work window start (HH:MM)
//! end_time = "17:00"       # Work window end (HH:MM), may be earlier than
//!                          # start_time for overnight windows
//! active = false           # Whether reminders fire at all
//! interval_minutes = 60    # Minutes between reminders inside the window
//! ```
//!
//! Every field is optional and falls back to the defaults in
//! `common::constants`. The store never fails a read: a missing or garbled
//! file degrades to defaults with a warning, because losing one reminder
//! cycle is recoverable while crashing the scheduler is not.
//!
//! The scheduler treats a loaded [`Settings`] value as an immutable snapshot
//! read at the start of each scheduling decision. It is mutated only by
//! explicit user action through the control surface, never by the scheduler.

mod store;

pub use store::{FileStore, MemoryStore, SettingsStore, settings_path};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::common::constants::*;
use crate::core::window::WorkWindow;

/// Reminder settings as persisted on disk. All fields optional; accessors
/// apply defaults so callers never see a partial snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Work window start, "HH:MM".
    pub start_time: Option<String>,
    /// Work window end, "HH:MM".
    pub end_time: Option<String>,
    /// Whether reminders are enabled.
    pub active: Option<bool>,
    /// Minutes between reminders while inside the work window.
    pub interval_minutes: Option<i64>,
}

impl Settings {
    /// Work window with malformed time strings degraded per field.
    pub fn window(&self) -> WorkWindow {
        WorkWindow::parse(
            self.start_time.as_deref().unwrap_or(DEFAULT_START_TIME),
            self.end_time.as_deref().unwrap_or(DEFAULT_END_TIME),
        )
    }

    /// Whether the reminder cycle is enabled.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(DEFAULT_REMINDER_ACTIVE)
    }

    /// Reminder cadence. Non-positive configured values degrade to the
    /// default so delay calculation always makes forward progress.
    pub fn interval(&self) -> Duration {
        let minutes = match self.interval_minutes {
            Some(m) if m >= 1 => m,
            Some(m) => {
                log_warning!("Ignoring non-positive interval_minutes = {m}, using default");
                DEFAULT_INTERVAL_MINUTES
            }
            None => DEFAULT_INTERVAL_MINUTES,
        };
        Duration::minutes(minutes)
    }

    /// Log the effective settings as an indented block.
    pub fn log_settings(&self) {
        log_block_start!("Loaded settings");
        log_indented!(
            "Work window: {} – {}",
            self.start_time.as_deref().unwrap_or(DEFAULT_START_TIME),
            self.end_time.as_deref().unwrap_or(DEFAULT_END_TIME)
        );
        log_indented!(
            "Reminders: {}",
            if self.is_active() { "active" } else { "inactive" }
        );
        log_indented!("Interval: {} minutes", self.interval().num_minutes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_documented_defaults() {
        let settings = Settings::default();
        assert!(!settings.is_active());
        assert_eq!(settings.interval(), Duration::minutes(60));
        let window = settings.window();
        assert_eq!(window.start().format("%H:%M").to_string(), "09:00");
        assert_eq!(window.end().format("%H:%M").to_string(), "17:00");
    }

    #[test]
    fn non_positive_interval_degrades_to_default() {
        let settings = Settings {
            interval_minutes: Some(0),
            ..Default::default()
        };
        assert_eq!(settings.interval(), Duration::minutes(60));

        let settings = Settings {
            interval_minutes: Some(-15),
            ..Default::default()
        };
        assert_eq!(settings.interval(), Duration::minutes(60));
    }

    #[test]
    fn configured_fields_override_defaults() {
        let settings = Settings {
            start_time: Some("22:00".into()),
            end_time: Some("06:00".into()),
            active: Some(true),
            interval_minutes: Some(30),
        };
        assert!(settings.is_active());
        assert_eq!(settings.interval(), Duration::minutes(30));
        assert_eq!(settings.window().start().format("%H:%M").to_string(), "22:00");
    }
}
