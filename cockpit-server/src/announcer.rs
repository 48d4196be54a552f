//! Browser narration
//!
//! The server has no audio device. Instead each spoken line is published as a
//! cue on a broadcast channel; the dashboard subscribes over SSE and feeds the
//! cues to the browser's speech synthesis. The announcer reports itself busy
//! for the estimated time the line takes to read out.

use cockpit_core::announcer::{Announcer, VoiceHint};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrationCue {
    Speak { text: String, hint: VoiceHint },
    Cancel,
}

pub struct NarrationAnnouncer {
    cues: broadcast::Sender<NarrationCue>,
    words_per_minute: u32,
    busy_until: Mutex<Option<Instant>>,
}

impl NarrationAnnouncer {
    pub fn new(cues: broadcast::Sender<NarrationCue>, words_per_minute: u32) -> Self {
        Self {
            cues,
            words_per_minute: words_per_minute.max(1),
            busy_until: Mutex::new(None),
        }
    }

    /// How long `text` takes to read out at the given rate multiplier
    pub fn estimate_duration(&self, text: &str, rate: f32) -> Duration {
        let words = text.split_whitespace().count().max(1) as f64;
        let minutes = words / (self.words_per_minute as f64 * rate.max(0.1) as f64);
        Duration::from_secs_f64(minutes * 60.0)
    }

    fn set_busy_until(&self, deadline: Option<Instant>) {
        if let Ok(mut busy) = self.busy_until.lock() {
            *busy = deadline;
        }
    }
}

impl Announcer for NarrationAnnouncer {
    fn speak(&self, text: &str, hint: VoiceHint) {
        self.set_busy_until(Some(Instant::now() + self.estimate_duration(text, hint.rate)));
        // No listeners just means nobody hears it
        let _ = self.cues.send(NarrationCue::Speak {
            text: text.to_string(),
            hint,
        });
    }

    fn is_busy(&self) -> bool {
        self.busy_until
            .lock()
            .map(|busy| busy.is_some_and(|deadline| Instant::now() < deadline))
            .unwrap_or(false)
    }

    fn cancel(&self) {
        self.set_busy_until(None);
        let _ = self.cues.send(NarrationCue::Cancel);
    }
}
