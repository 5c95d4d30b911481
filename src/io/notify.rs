//! Notification sink.
//!
//! The notification-display facility is an external collaborator; the core
//! only needs to hand it a notice and to be told when one was dismissed and
//! whether the user did it. The console sink is the default presentation on
//! a terminal; tests swap in the recording sink.

use crate::common::constants::{BREAK_NOTICE_ID, BREAK_NOTICE_TITLE};

/// A notice to present to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// Build the break nudge for the configured cadence.
pub fn break_notice(interval_minutes: i64) -> Notice {
    let elapsed = if interval_minutes % 60 == 0 {
        let hours = interval_minutes / 60;
        format!("{hours} hour{}", if hours == 1 { "" } else { "s" })
    } else {
        format!("{interval_minutes} minutes")
    };
    Notice {
        id: BREAK_NOTICE_ID.to_string(),
        title: BREAK_NOTICE_TITLE.to_string(),
        body: format!(
            "It's been {elapsed}. Go for a 20-minute walk to stretch your legs and clear your mind!"
        ),
    }
}

/// Seam between the scheduler and the notification-display facility.
pub trait NotificationSink: Send + Sync {
    fn present(&self, notice: &Notice);
    fn clear(&self, id: &str);
}

/// Terminal presentation of notices via the structured logger.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn present(&self, notice: &Notice) {
        log_block_start!("{}", notice.title);
        log_indented!("{}", notice.body);
    }

    fn clear(&self, _id: &str) {
        log_decorated!("Reminder cleared");
    }
}

/// Recording sink for tests.
#[cfg(any(test, feature = "testing-support"))]
pub struct RecordingNotifier {
    events: std::sync::Mutex<Vec<NoticeEvent>>,
}

#[cfg(any(test, feature = "testing-support"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeEvent {
    Presented(Notice),
    Cleared(String),
}

#[cfg(any(test, feature = "testing-support"))]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<NoticeEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn presented_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NoticeEvent::Presented(_)))
            .count()
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl NotificationSink for RecordingNotifier {
    fn present(&self, notice: &Notice) {
        self.events
            .lock()
            .unwrap()
            .push(NoticeEvent::Presented(notice.clone()));
    }

    fn clear(&self, id: &str) {
        self.events
            .lock()
            .unwrap()
            .push(NoticeEvent::Cleared(id.to_string()));
    }
}
