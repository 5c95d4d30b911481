//! The `set` command: update settings fields and notify the scheduler.
//!
//! Unlike the scheduler's degrade-to-midnight handling of malformed stored
//! times, direct user input is validated and rejected with a message before
//! anything is written.

use anyhow::{Result, anyhow};
use chrono::NaiveTime;
use std::sync::Arc;

use crate::io::bus::Bus;
use crate::settings::{FileStore, SettingsStore};
use crate::surface::control::Control;

/// Apply `key=value` pairs to the persisted settings.
pub fn run(fields: &[(String, String)]) -> Result<()> {
    let store = Arc::new(FileStore::new()?);
    let mut settings = store.load();

    for (key, value) in fields {
        match key.as_str() {
            "start" | "start_time" => {
                validate_time(value)?;
                settings.start_time = Some(value.clone());
            }
            "end" | "end_time" => {
                validate_time(value)?;
                settings.end_time = Some(value.clone());
            }
            "active" => {
                settings.active = Some(parse_bool(value)?);
            }
            "interval" | "interval_minutes" => {
                let minutes: i64 = value
                    .parse()
                    .map_err(|_| anyhow!("Interval must be a whole number of minutes: '{value}'"))?;
                if minutes < 1 {
                    return Err(anyhow!("Interval must be at least 1 minute"));
                }
                settings.interval_minutes = Some(minutes);
            }
            _ => return Err(anyhow!("Unknown settings key '{key}'")),
        }
    }

    // The bus in this process has no scheduler registered; the saved
    // notification is dropped silently and a running scheduler picks the
    // change up at its next firing, which re-reads settings
    let control = Control::new(Bus::new(), store);
    control.save_settings(&settings)?;

    settings.log_settings();
    log_end!();
    Ok(())
}

fn validate_time(value: &str) -> Result<()> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| anyhow!("Times must be HH:MM, got '{value}'"))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(anyhow!("Expected true or false, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_validation_accepts_hh_mm_only() {
        assert!(validate_time("09:00").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("9am").is_err());
        assert!(validate_time("24:00").is_err());
    }

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("1").is_err());
    }
}
