//! Typed message passing between the three surfaces.
//!
//! Delivery semantics are deliberately weak: at-least-once, unordered
//! relative to other message kinds, and a send to a surface that is not
//! currently registered fails silently. Nothing may depend on delivery
//! succeeding for correctness: every handler re-reads persisted settings
//! instead of trusting a payload, and all state is re-derivable from the
//! settings snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use crate::common::constants::QUERY_TIMEOUT_MS;
use crate::core::state::ReminderState;

/// The three independently-lifecycled execution surfaces.
///
/// Doubles as the originator tag on messages so a receiving surface can
/// filter out messages not meant for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Control,
    Scheduler,
    Presentation,
}

/// The four message kinds routed between surfaces.
///
/// Payloads carry no settings data on purpose: settings may have changed
/// between send and receipt, so handlers always re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Settings were persisted; the scheduler re-derives its trigger.
    SettingsSaved,
    /// Stop presenting the current reminder.
    StopReminder,
    /// Start presenting; tagged so the presentation surface only reacts to
    /// scheduler-originated starts.
    StartReminder { originator: Surface },
    /// Ask the scheduler for the current reminder state.
    QueryReminderState,
}

/// A message plus an optional reply channel for request/response kinds.
pub struct Envelope {
    pub message: Message,
    pub reply: Option<mpsc::Sender<ReminderState>>,
}

impl Envelope {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            reply: None,
        }
    }
}

type Handler = Box<dyn Fn(Envelope) + Send + Sync>;

/// In-process message router.
///
/// Cloning yields another handle onto the same registry, so each surface can
/// hold its own copy. Surfaces register a handler (typically forwarding into
/// their own inbox channel) and may be unregistered at any time by the host
/// tearing them down.
#[derive(Clone)]
pub struct Bus {
    handlers: Arc<Mutex<HashMap<Surface, Handler>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register (or replace) the handler for a surface.
    pub fn register(&self, surface: Surface, handler: Handler) {
        self.handlers.lock().unwrap().insert(surface, handler);
    }

    /// Remove a surface's handler, simulating the host unloading it.
    pub fn unregister(&self, surface: Surface) {
        self.handlers.lock().unwrap().remove(&surface);
    }

    /// Deliver a message to a surface. Returns whether a handler was
    /// registered; an undelivered message is dropped silently by design.
    pub fn send(&self, to: Surface, message: Message) -> bool {
        self.deliver(to, Envelope::new(message))
    }

    /// Ask the scheduler surface for the current reminder state.
    ///
    /// Degrades to `Idle` when the scheduler is not loaded or does not
    /// answer within the timeout. That is the safe default, never an error.
    pub fn query_reminder_state(&self) -> ReminderState {
        let (reply_tx, reply_rx) = mpsc::channel();
        let envelope = Envelope {
            message: Message::QueryReminderState,
            reply: Some(reply_tx),
        };
        if !self.deliver(Surface::Scheduler, envelope) {
            return ReminderState::Idle;
        }
        reply_rx
            .recv_timeout(Duration::from_millis(QUERY_TIMEOUT_MS))
            .unwrap_or(ReminderState::Idle)
    }

    fn deliver(&self, to: Surface, envelope: Envelope) -> bool {
        let handlers = self.handlers.lock().unwrap();
        match handlers.get(&to) {
            Some(handler) => {
                handler(envelope);
                true
            }
            None => false,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience used in tests and the presentation surface: a handler that
/// forwards envelopes into an mpsc channel.
pub fn channel_handler(tx: mpsc::Sender<Envelope>) -> Handler {
    Box::new(move |envelope| {
        let _ = tx.send(envelope);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    static DELIVERY_PROBE: AtomicBool = AtomicBool::new(false);

    #[test]
    fn send_to_unregistered_surface_fails_silently() {
        let bus = Bus::new();
        assert!(!bus.send(Surface::Scheduler, Message::SettingsSaved));
    }

    #[test]
    fn send_reaches_registered_handler() {
        let bus = Bus::new();
        DELIVERY_PROBE.store(false, Ordering::SeqCst);
        bus.register(
            Surface::Presentation,
            Box::new(|envelope| {
                assert_eq!(envelope.message, Message::StopReminder);
                DELIVERY_PROBE.store(true, Ordering::SeqCst);
            }),
        );
        assert!(bus.send(Surface::Presentation, Message::StopReminder));
        assert!(DELIVERY_PROBE.load(Ordering::SeqCst));
    }

    #[test]
    fn unregistered_surface_drops_subsequent_sends() {
        let bus = Bus::new();
        bus.register(Surface::Presentation, Box::new(|_| {}));
        bus.unregister(Surface::Presentation);
        assert!(!bus.send(Surface::Presentation, Message::StopReminder));
    }

    #[test]
    fn query_with_no_scheduler_degrades_to_idle() {
        let bus = Bus::new();
        assert_eq!(bus.query_reminder_state(), ReminderState::Idle);
    }

    #[test]
    fn query_round_trips_through_reply_channel() {
        let bus = Bus::new();
        bus.register(
            Surface::Scheduler,
            Box::new(|envelope| {
                assert_eq!(envelope.message, Message::QueryReminderState);
                if let Some(reply) = envelope.reply {
                    let _ = reply.send(ReminderState::Presenting);
                }
            }),
        );
        assert_eq!(bus.query_reminder_state(), ReminderState::Presenting);
    }

    #[test]
    fn unanswered_query_times_out_to_idle() {
        let bus = Bus::new();
        // Handler drops the reply channel without answering
        bus.register(Surface::Scheduler, Box::new(|_| {}));
        assert_eq!(bus.query_reminder_state(), ReminderState::Idle);
    }

    #[test]
    fn message_wire_shape_uses_action_tag() {
        let json = serde_json::to_string(&Message::StartReminder {
            originator: Surface::Scheduler,
        })
        .unwrap();
        assert!(json.contains("\"action\":\"startReminder\""));
        assert!(json.contains("\"originator\":\"scheduler\""));

        let json = serde_json::to_string(&Message::SettingsSaved).unwrap();
        assert_eq!(json, "{\"action\":\"settingsSaved\"}");
    }
}
