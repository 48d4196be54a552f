//! Narration capability used by the radio player

use crate::model::Speaker;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Voice parameters handed to the speech backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceHint {
    pub pitch: f32,
    pub rate: f32,
    pub volume: f32,
}

impl VoiceHint {
    pub fn for_speaker(speaker: Speaker) -> Self {
        match speaker {
            // Lower pitch and quicker delivery for the engineer
            Speaker::Engineer => Self {
                pitch: 0.9,
                rate: 1.3,
                volume: 0.8,
            },
            Speaker::Driver => Self {
                pitch: 1.0,
                rate: 1.25,
                volume: 0.8,
            },
        }
    }
}

/// Something that can read radio lines out loud
///
/// `speak` is fire-and-forget: failures are absorbed by the implementation
/// and nothing is returned to the caller.
pub trait Announcer: Send + Sync {
    fn speak(&self, text: &str, hint: VoiceHint);

    /// Whether an utterance is currently in flight
    fn is_busy(&self) -> bool;

    /// Abort any in-flight utterance
    fn cancel(&self);
}

/// Announcer that never makes a sound
#[derive(Debug, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn speak(&self, _text: &str, _hint: VoiceHint) {}

    fn is_busy(&self) -> bool {
        false
    }

    fn cancel(&self) {}
}

/// Announcer that records every call, for asserting narration sequences
///
/// With `hold_busy` set, each `speak` leaves the announcer busy until
/// `finish` or `cancel` is called, emulating a long utterance.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    spoken: Mutex<Vec<(String, VoiceHint)>>,
    busy: AtomicBool,
    hold_busy: bool,
    cancels: AtomicUsize,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that stays busy after every `speak`
    pub fn holding_busy() -> Self {
        Self {
            hold_busy: true,
            ..Self::default()
        }
    }

    /// Lines spoken so far, in call order
    pub fn spoken(&self) -> Vec<(String, VoiceHint)> {
        self.spoken
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Mark the in-flight utterance as finished
    pub fn finish(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl Announcer for RecordingAnnouncer {
    fn speak(&self, text: &str, hint: VoiceHint) {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push((text.to_string(), hint));
        }
        if self.hold_busy {
            self.busy.store(true, Ordering::SeqCst);
        }
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.busy.store(false, Ordering::SeqCst);
    }
}
