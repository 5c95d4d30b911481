//! The presentation surface.
//!
//! Plays the reminder sound while a reminder is being presented. It keeps no
//! authoritative state: it starts on scheduler-originated `StartReminder`
//! messages and stops on `StopReminder`, and both handlers are idempotent so
//! at-least-once delivery cannot double-start the audio.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration as StdDuration;

use crate::io::bus::{Bus, Envelope, Message, Surface, channel_handler};
use crate::time_source;

/// Seam to the audio-playback facility.
pub trait AudioSink: Send + Sync {
    fn start(&self);
    fn stop(&self);
}

/// Terminal stand-in for audio playback.
pub struct ConsoleAudio;

impl AudioSink for ConsoleAudio {
    fn start(&self) {
        log_decorated!("Playing reminder chime");
    }

    fn stop(&self) {
        log_decorated!("Stopping reminder chime");
    }
}

/// Recording sink for tests.
#[cfg(any(test, feature = "testing-support"))]
pub struct RecordingAudio {
    transitions: std::sync::Mutex<Vec<bool>>,
}

#[cfg(any(test, feature = "testing-support"))]
impl RecordingAudio {
    pub fn new() -> Self {
        Self {
            transitions: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Sequence of start (true) / stop (false) calls that reached the sink.
    pub fn transitions(&self) -> Vec<bool> {
        self.transitions.lock().unwrap().clone()
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl Default for RecordingAudio {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl AudioSink for RecordingAudio {
    fn start(&self) {
        self.transitions.lock().unwrap().push(true);
    }

    fn stop(&self) {
        self.transitions.lock().unwrap().push(false);
    }
}

/// The presentation surface's message handling.
pub struct Presentation {
    audio: Arc<dyn AudioSink>,
    playing: bool,
}

impl Presentation {
    pub fn new(audio: Arc<dyn AudioSink>) -> Self {
        Self {
            audio,
            playing: false,
        }
    }

    /// Handle one bus message. Messages not meant for this surface, such as
    /// starts originated by anyone but the scheduler, are ignored.
    pub fn handle(&mut self, envelope: Envelope) {
        match envelope.message {
            Message::StartReminder {
                originator: Surface::Scheduler,
            } => {
                if !self.playing {
                    self.audio.start();
                    self.playing = true;
                }
            }
            Message::StopReminder => {
                if self.playing {
                    self.audio.stop();
                    self.playing = false;
                }
            }
            _ => {}
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Register on the bus and run in a background thread until the bus
    /// handle is dropped or the simulation ends.
    pub fn spawn(audio: Arc<dyn AudioSink>, bus: &Bus) -> std::io::Result<JoinHandle<()>> {
        let (tx, rx) = mpsc::channel();
        bus.register(Surface::Presentation, channel_handler(tx));

        std::thread::Builder::new()
            .name("presentation".to_string())
            .spawn(move || {
                let mut presentation = Presentation::new(audio);
                loop {
                    match rx.recv_timeout(StdDuration::from_millis(250)) {
                        Ok(envelope) => presentation.handle(envelope),
                        Err(RecvTimeoutError::Timeout) => {
                            if time_source::simulation_ended() {
                                break;
                            }
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_from(originator: Surface) -> Envelope {
        Envelope::new(Message::StartReminder { originator })
    }

    #[test]
    fn scheduler_originated_start_begins_playback() {
        let audio = Arc::new(RecordingAudio::new());
        let mut presentation = Presentation::new(audio.clone());

        presentation.handle(start_from(Surface::Scheduler));
        assert!(presentation.is_playing());
        assert_eq!(audio.transitions(), vec![true]);
    }

    #[test]
    fn starts_from_other_originators_are_filtered_out() {
        let audio = Arc::new(RecordingAudio::new());
        let mut presentation = Presentation::new(audio.clone());

        presentation.handle(start_from(Surface::Control));
        presentation.handle(start_from(Surface::Presentation));
        assert!(!presentation.is_playing());
        assert!(audio.transitions().is_empty());
    }

    #[test]
    fn duplicate_starts_and_stops_are_idempotent() {
        let audio = Arc::new(RecordingAudio::new());
        let mut presentation = Presentation::new(audio.clone());

        presentation.handle(start_from(Surface::Scheduler));
        presentation.handle(start_from(Surface::Scheduler));
        presentation.handle(Envelope::new(Message::StopReminder));
        presentation.handle(Envelope::new(Message::StopReminder));

        // One start, one stop, regardless of duplicate delivery
        assert_eq!(audio.transitions(), vec![true, false]);
    }

    #[test]
    fn stop_without_prior_start_is_a_no_op() {
        let audio = Arc::new(RecordingAudio::new());
        let mut presentation = Presentation::new(audio.clone());

        presentation.handle(Envelope::new(Message::StopReminder));
        assert!(audio.transitions().is_empty());
    }
}
