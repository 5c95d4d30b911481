//! Recurring timer facility.
//!
//! Models a platform alarm API: arm a named trigger to fire once after a
//! delay and then every period thereafter, with an "at or after" guarantee
//! only; firings may be arbitrarily late and the scheduler recomputes
//! rather than trusting them. There is exactly one logical trigger per name;
//! arming serializes against cancellation through the generation table, so
//! cancel-then-create from concurrent handlers is safe without further
//! coordination.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use crate::common::constants::TIMER_SLICE_SECS;
use crate::time_source;

/// Seam between the scheduler and the platform alarm facility.
pub trait TimerFacility: Send + Sync {
    /// Cancel any live trigger with this name, then arm a fresh one that
    /// fires after `delay_minutes` and every `period_minutes` thereafter.
    fn arm(&self, name: &str, delay_minutes: i64, period_minutes: i64);

    /// Cancel the named trigger if one is live.
    fn cancel(&self, name: &str);
}

/// Callback invoked with the trigger name when a trigger fires.
pub type FiredCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Thread-backed timer used by the real application and the simulator.
///
/// Each arm spawns a sleeper thread stamped with a generation number;
/// cancelling (or re-arming) bumps the generation, and a sleeper that wakes
/// up stale exits without firing. Sleeps go through the global time source
/// in bounded slices so cancellation is noticed promptly and simulated time
/// advances the clock.
pub struct ThreadTimer {
    on_fired: FiredCallback,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl ThreadTimer {
    pub fn new(on_fired: FiredCallback) -> Self {
        Self {
            on_fired,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn bump(&self, name: &str) -> u64 {
        let mut generations = self.generations.lock().unwrap();
        let entry = generations.entry(name.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    fn is_current(generations: &Mutex<HashMap<String, u64>>, name: &str, generation: u64) -> bool {
        generations.lock().unwrap().get(name) == Some(&generation)
    }

    /// Sleep the requested minutes in bounded slices, returning false if the
    /// trigger was cancelled or the simulation ended mid-sleep.
    fn sliced_sleep(
        generations: &Mutex<HashMap<String, u64>>,
        name: &str,
        generation: u64,
        minutes: i64,
    ) -> bool {
        let mut remaining = minutes.max(0) as u64 * 60;
        while remaining > 0 {
            let slice = remaining.min(TIMER_SLICE_SECS);
            time_source::sleep(StdDuration::from_secs(slice));
            remaining -= slice;
            if !Self::is_current(generations, name, generation) {
                return false;
            }
            if time_source::simulation_ended() {
                return false;
            }
        }
        true
    }
}

impl TimerFacility for ThreadTimer {
    fn arm(&self, name: &str, delay_minutes: i64, period_minutes: i64) {
        let generation = self.bump(name);
        let generations = Arc::clone(&self.generations);
        let on_fired = Arc::clone(&self.on_fired);
        let name = name.to_string();

        let spawned = std::thread::Builder::new()
            .name(format!("trigger-{name}"))
            .spawn(move || {
                let mut wait = delay_minutes;
                loop {
                    if !ThreadTimer::sliced_sleep(&generations, &name, generation, wait) {
                        return;
                    }
                    on_fired(name.clone());
                    wait = period_minutes;
                }
            });

        if let Err(e) = spawned {
            log_pipe!();
            log_error!("Failed to spawn trigger thread: {e}");
        }
    }

    fn cancel(&self, name: &str) {
        self.bump(name);
    }
}

/// Recording timer for tests: captures the arm/cancel sequence and tracks
/// which logical trigger is live, without spawning threads.
#[cfg(any(test, feature = "testing-support"))]
pub struct ManualTimer {
    commands: Mutex<Vec<TimerCommand>>,
}

#[cfg(any(test, feature = "testing-support"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Arm {
        name: String,
        delay_minutes: i64,
        period_minutes: i64,
    },
    Cancel {
        name: String,
    },
}

#[cfg(any(test, feature = "testing-support"))]
impl ManualTimer {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Full arm/cancel history.
    pub fn commands(&self) -> Vec<TimerCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Replay the history to determine the single live trigger, if any.
    pub fn live_trigger(&self) -> Option<(String, i64, i64)> {
        let mut live = None;
        for command in self.commands.lock().unwrap().iter() {
            match command {
                TimerCommand::Arm {
                    name,
                    delay_minutes,
                    period_minutes,
                } => live = Some((name.clone(), *delay_minutes, *period_minutes)),
                TimerCommand::Cancel { name } => {
                    if matches!(&live, Some((live_name, _, _)) if live_name == name) {
                        live = None;
                    }
                }
            }
        }
        live
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimerFacility for ManualTimer {
    fn arm(&self, name: &str, delay_minutes: i64, period_minutes: i64) {
        self.commands.lock().unwrap().push(TimerCommand::Arm {
            name: name.to_string(),
            delay_minutes,
            period_minutes,
        });
    }

    fn cancel(&self, name: &str) {
        self.commands.lock().unwrap().push(TimerCommand::Cancel {
            name: name.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timer_tracks_single_live_trigger() {
        let timer = ManualTimer::new();
        timer.cancel("walk");
        timer.arm("walk", 60, 60);
        timer.cancel("walk");
        timer.arm("walk", 30, 60);

        // Cancel-then-create twice leaves exactly one live trigger, the
        // most recently armed one
        assert_eq!(timer.live_trigger(), Some(("walk".to_string(), 30, 60)));
    }

    #[test]
    fn manual_timer_cancel_clears_live_trigger() {
        let timer = ManualTimer::new();
        timer.arm("walk", 10, 60);
        timer.cancel("walk");
        assert_eq!(timer.live_trigger(), None);
    }

    #[test]
    fn stale_generation_is_detected_after_rearm() {
        let timer = ThreadTimer::new(Arc::new(|_| {}));
        let first = timer.bump("walk");
        let second = timer.bump("walk");
        assert!(!ThreadTimer::is_current(&timer.generations, "walk", first));
        assert!(ThreadTimer::is_current(&timer.generations, "walk", second));
    }
}
