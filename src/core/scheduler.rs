//! The scheduler surface.
//!
//! Owns the reminder state machine and the single recurring trigger. Every
//! input (a bus message, a trigger firing, a notice dismissal) is handled
//! by re-reading persisted settings and re-resolving the work window against
//! the current instant, never by trusting state captured at arm time. That
//! makes duplicate, reordered, and late inputs self-correcting instead of
//! erroneous, and lets the host tear this surface down and restart it at any
//! point: re-arming from settings reconstructs everything.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration as StdDuration;

use crate::common::constants::{BREAK_NOTICE_ID, REMINDER_TRIGGER};
use crate::core::schedule::{minutes_until_next_reminder, should_fire_now};
use crate::core::state::{Effect, ReminderEvent, ReminderState};
use crate::core::window::ResolvedWindow;
use crate::io::bus::{Bus, Envelope, Message, Surface};
use crate::io::notify::{NotificationSink, break_notice};
use crate::io::timer::TimerFacility;
use crate::settings::SettingsStore;
use crate::time_source;

/// Everything that can land in the scheduler's inbox.
pub enum SchedulerInput {
    /// A message routed over the bus.
    Bus(Envelope),
    /// The timer facility's fired-callback, carrying the trigger name.
    TriggerFired(String),
    /// The notification facility's dismissed-callback.
    NoticeClosed { id: String, by_user: bool },
}

pub struct Scheduler {
    store: Arc<dyn SettingsStore>,
    timer: Arc<dyn TimerFacility>,
    notifier: Arc<dyn NotificationSink>,
    bus: Bus,
    state: ReminderState,
    debug_enabled: bool,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        timer: Arc<dyn TimerFacility>,
        notifier: Arc<dyn NotificationSink>,
        bus: Bus,
    ) -> Self {
        Self {
            store,
            timer,
            notifier,
            bus,
            state: ReminderState::Idle,
            debug_enabled: false,
        }
    }

    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    /// Main loop. Re-arms on startup (a previously armed trigger is not
    /// guaranteed to have survived the host restarting this surface), then
    /// processes inputs until the channel closes or the simulation ends.
    pub fn run(mut self, inbox: Receiver<SchedulerInput>) {
        self.handle_settings_saved();
        loop {
            match inbox.recv_timeout(StdDuration::from_millis(250)) {
                Ok(input) => self.handle(input),
                Err(RecvTimeoutError::Timeout) => {
                    if time_source::simulation_ended() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    /// Dispatch one input. Public so tests can drive the scheduler without
    /// threads.
    pub fn handle(&mut self, input: SchedulerInput) {
        match input {
            SchedulerInput::Bus(envelope) => self.handle_message(envelope),
            SchedulerInput::TriggerFired(name) => self.on_trigger_fired(&name),
            SchedulerInput::NoticeClosed { id, by_user } => self.on_notice_closed(&id, by_user),
        }
    }

    fn handle_message(&mut self, envelope: Envelope) {
        match envelope.message {
            Message::SettingsSaved => self.handle_settings_saved(),
            Message::StopReminder => self.apply_event(ReminderEvent::UserStop),
            Message::QueryReminderState => {
                if let Some(reply) = envelope.reply {
                    let _ = reply.send(self.state);
                }
            }
            // Start is scheduler-originated; nothing to do on receipt
            Message::StartReminder { .. } => {}
        }
    }

    /// Settings changed (or the surface just started): re-derive the trigger
    /// from a fresh snapshot. Idempotent: re-arming an already-correctly-
    /// armed trigger cancels and re-creates the same logical trigger.
    pub fn handle_settings_saved(&mut self) {
        let settings = self.store.load();
        let event = if settings.is_active() {
            ReminderEvent::ToggledActive
        } else {
            ReminderEvent::ToggledInactive
        };
        self.apply_event(event);
    }

    /// The timer facility's fired-callback.
    ///
    /// The firing may be arbitrarily late, so the window is resolved fresh
    /// against "now" rather than reusing the resolution from arm time; a
    /// legitimate last-reminder-of-the-day would otherwise be dropped, and a
    /// stale trigger would otherwise keep firing overnight.
    fn on_trigger_fired(&mut self, name: &str) {
        if name != REMINDER_TRIGGER {
            return;
        }

        let settings = self.store.load();
        if !settings.is_active() {
            return;
        }

        let now = time_source::now();
        let resolved = ResolvedWindow::resolve(&settings.window(), now);
        let inside_window = should_fire_now(&resolved, now);
        if !inside_window {
            log_block_start!("Trigger fired outside work hours, rescheduling");
        }
        self.apply_event(ReminderEvent::TriggerFired { inside_window });
    }

    /// The notification facility's dismissed-callback.
    fn on_notice_closed(&mut self, id: &str, by_user: bool) {
        if id != BREAK_NOTICE_ID {
            return;
        }
        self.apply_event(ReminderEvent::NoticeDismissed { by_user });
    }

    fn apply_event(&mut self, event: ReminderEvent) {
        let (next, effects) = self.state.apply(event);
        self.state = next;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartPresentation => self.start_presentation(),
            Effect::StopPresentation => self.stop_presentation(),
            Effect::CancelTrigger => self.timer.cancel(REMINDER_TRIGGER),
            Effect::Rearm => self.rearm(),
        }
    }

    /// Cancel-then-create the recurring trigger from a fresh settings
    /// snapshot. Settings may have changed since the event that requested
    /// the re-arm, so an inactive snapshot leaves the trigger cancelled.
    fn rearm(&mut self) {
        self.timer.cancel(REMINDER_TRIGGER);

        let settings = self.store.load();
        if !settings.is_active() {
            return;
        }

        let now = time_source::now();
        let resolved = ResolvedWindow::resolve(&settings.window(), now);
        let interval = settings.interval();
        let delay = minutes_until_next_reminder(&resolved, now, interval);

        self.timer
            .arm(REMINDER_TRIGGER, delay, interval.num_minutes());
        log_block_start!("Reminder armed");
        log_indented!("Next reminder in {delay} minutes");
        if self.debug_enabled {
            log_debug!(
                "Window resolved as {} – {}",
                resolved.start.format("%Y-%m-%d %H:%M"),
                resolved.end.format("%Y-%m-%d %H:%M")
            );
        }
    }

    fn start_presentation(&mut self) {
        let settings = self.store.load();
        self.notifier
            .present(&break_notice(settings.interval().num_minutes()));
        self.bus.send(
            Surface::Presentation,
            Message::StartReminder {
                originator: Surface::Scheduler,
            },
        );
    }

    fn stop_presentation(&mut self) {
        self.notifier.clear(BREAK_NOTICE_ID);
        self.bus.send(Surface::Presentation, Message::StopReminder);
    }
}
