//! The control surface.
//!
//! The user-facing side: saves settings and queries the scheduler's state.
//! It never acts on cached scheduler state: the scheduler's process may be
//! restarted at any time, so the only honest read is an explicit query over
//! the bus, degrading to "not active" when the scheduler is not loaded.

use anyhow::Result;
use std::sync::Arc;

use crate::core::state::ReminderState;
use crate::io::bus::{Bus, Message, Surface};
use crate::settings::{Settings, SettingsStore};

pub struct Control {
    bus: Bus,
    store: Arc<dyn SettingsStore>,
}

impl Control {
    pub fn new(bus: Bus, store: Arc<dyn SettingsStore>) -> Self {
        Self { bus, store }
    }

    /// Persist a full settings snapshot and notify the scheduler.
    ///
    /// The notification carries no settings payload; the scheduler re-reads
    /// the store on receipt. If no scheduler surface is loaded the message
    /// is dropped silently, and the next trigger firing (which also
    /// re-reads settings) picks up the change.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.store.save(settings)?;
        self.bus.send(Surface::Scheduler, Message::SettingsSaved);
        Ok(())
    }

    /// Ask the scheduler to stop presenting the current reminder.
    pub fn stop_reminder(&self) {
        self.bus.send(Surface::Scheduler, Message::StopReminder);
    }

    /// Query the current reminder state, degrading to `Idle` when the
    /// scheduler is unreachable.
    pub fn reminder_state(&self) -> ReminderState {
        self.bus.query_reminder_state()
    }
}
