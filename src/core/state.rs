//! The Idle/Presenting reminder state machine.
//!
//! The scheduler surface is the sole writer of this state, and its process
//! may be torn down by the host at any time, so nothing here is assumed to
//! survive a restart: other surfaces query the current state over the bus
//! instead of caching a copy, and the scheduler re-derives everything else
//! from persisted settings.
//!
//! Transitions are pure: `apply` maps a state and an event to the next state
//! plus the side effects the caller must carry out. Handlers can therefore
//! be replayed safely, which is what makes at-least-once message delivery
//! tolerable.

use serde::{Deserialize, Serialize};

/// Whether a reminder is currently being presented to the user.
///
/// Serialized as the literal tags `active` / `notActive`, which is also the
/// response format for state queries over the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderState {
    /// No reminder is being presented. Initial and terminal-per-cycle.
    #[serde(rename = "notActive")]
    Idle,
    /// The user is actively being nudged to take a break.
    #[serde(rename = "active")]
    Presenting,
}

/// Events that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderEvent {
    /// The recurring trigger fired; `inside_window` is the trigger
    /// evaluator's verdict against a freshly resolved window.
    TriggerFired { inside_window: bool },
    /// The user asked for the reminder to stop.
    UserStop,
    /// The notice was dismissed externally; only user-initiated dismissals
    /// stop the reminder.
    NoticeDismissed { by_user: bool },
    /// Settings were toggled off.
    ToggledInactive,
    /// Settings were toggled on (or saved while on).
    ToggledActive,
}

/// Side effects the caller must execute after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Notify the presentation surface to start alerting.
    StartPresentation,
    /// Notify the presentation surface to stop alerting.
    StopPresentation,
    /// Cancel the recurring trigger.
    CancelTrigger,
    /// Cancel and re-create the recurring trigger from fresh settings.
    Rearm,
}

impl ReminderState {
    pub fn is_presenting(&self) -> bool {
        matches!(self, Self::Presenting)
    }

    /// Literal state tag used as the query response over the bus.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "notActive",
            Self::Presenting => "active",
        }
    }

    /// Apply one event, returning the next state and the effects to run.
    pub fn apply(self, event: ReminderEvent) -> (Self, Vec<Effect>) {
        use Effect::*;
        use ReminderEvent::*;
        use ReminderState::*;

        match (self, event) {
            // A firing inside the window always (re)presents; re-presenting
            // while already presenting keeps duplicate firings idempotent
            // in effect
            (_, TriggerFired { inside_window: true }) => (Presenting, vec![StartPresentation]),
            // An out-of-window firing means the armed schedule went stale;
            // re-arm against the freshly resolved next window instead
            (state, TriggerFired { inside_window: false }) => (state, vec![Rearm]),

            (Presenting, UserStop) => (Idle, vec![StopPresentation]),
            (Idle, UserStop) => (Idle, vec![]),

            (Presenting, NoticeDismissed { by_user: true }) => (Idle, vec![StopPresentation]),
            (state, NoticeDismissed { .. }) => (state, vec![]),

            (Presenting, ToggledInactive) => (Idle, vec![StopPresentation, CancelTrigger]),
            (Idle, ToggledInactive) => (Idle, vec![CancelTrigger]),

            (Presenting, ToggledActive) => (Idle, vec![StopPresentation, Rearm]),
            (Idle, ToggledActive) => (Idle, vec![Rearm]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Effect::*;
    use ReminderEvent::*;
    use ReminderState::*;

    #[test]
    fn trigger_inside_window_starts_presenting() {
        let (next, effects) = Idle.apply(TriggerFired { inside_window: true });
        assert_eq!(next, Presenting);
        assert_eq!(effects, vec![StartPresentation]);
    }

    #[test]
    fn trigger_outside_window_rearms_without_presenting() {
        let (next, effects) = Idle.apply(TriggerFired {
            inside_window: false,
        });
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![Rearm]);
    }

    #[test]
    fn user_stop_while_presenting_stops_exactly_once() {
        let (next, effects) = Presenting.apply(UserStop);
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![StopPresentation]);

        // Replaying the same event is a no-op, so at-least-once delivery
        // cannot produce a second stop notification
        let (next, effects) = next.apply(UserStop);
        assert_eq!(next, Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn only_user_initiated_dismissal_stops_the_reminder() {
        let (next, effects) = Presenting.apply(NoticeDismissed { by_user: false });
        assert_eq!(next, Presenting);
        assert!(effects.is_empty());

        let (next, effects) = Presenting.apply(NoticeDismissed { by_user: true });
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![StopPresentation]);
    }

    #[test]
    fn toggling_inactive_cancels_the_trigger() {
        let (next, effects) = Idle.apply(ToggledInactive);
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![CancelTrigger]);

        let (next, effects) = Presenting.apply(ToggledInactive);
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![StopPresentation, CancelTrigger]);
    }

    #[test]
    fn toggling_active_rearms_from_any_state() {
        let (next, effects) = Idle.apply(ToggledActive);
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![Rearm]);

        let (next, effects) = Presenting.apply(ToggledActive);
        assert_eq!(next, Idle);
        assert_eq!(effects, vec![StopPresentation, Rearm]);
    }

    #[test]
    fn duplicate_in_window_firings_re_present_idempotently() {
        let (next, effects) = Presenting.apply(TriggerFired { inside_window: true });
        assert_eq!(next, Presenting);
        assert_eq!(effects, vec![StartPresentation]);
    }

    #[test]
    fn state_tags_match_the_wire_literals() {
        assert_eq!(Idle.tag(), "notActive");
        assert_eq!(Presenting.tag(), "active");
        assert_eq!(serde_json::to_string(&Presenting).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&Idle).unwrap(), "\"notActive\"");
    }
}
