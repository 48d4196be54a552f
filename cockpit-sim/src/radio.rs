//! Team radio script player
//!
//! A one-second race clock walks a fixed script. Each line goes out once
//! per session when the clock reaches its second; narration is attempted
//! only when the announcer is idle and is never queued.

use cockpit_core::{
    announcer::{Announcer, VoiceHint},
    model::{
        EmittedMessage, RadioEvent,
        Speaker::{self, Driver, Engineer},
    },
    ticker::Ticker,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub const RADIO_PERIOD: Duration = Duration::from_secs(1);

const fn line(scheduled_second: u32, speaker: Speaker, text: &'static str) -> RadioEvent {
    RadioEvent {
        scheduled_second,
        speaker,
        text,
    }
}

/// The race script, ordered by second
pub static RADIO_SCRIPT: [RadioEvent; 44] = [
    // Formation lap and start
    line(2, Engineer, "Okay Sherry, formation lap. Box, box, box at the end of the lap. Remember procedure."),
    line(10, Driver, "Copy, box at the end. Starting procedure."),
    line(17, Engineer, "Lights out and away we go! Good start, good start!"),
    // Early race
    line(22, Driver, "Tires are not ready yet. I'm just sliding around."),
    line(27, Engineer, "Copy Sherry. Push now, push now. We need to build gap."),
    line(34, Driver, "Understood. Pushing. Car feels better now."),
    // First pit window
    line(45, Engineer, "So Sherry, box this lap, box this lap. Confirm."),
    line(50, Driver, "Are we sure? Tires still feel okay."),
    line(55, Driver, "Stop inventing!"),
    line(58, Engineer, "Yes, positive. Undercut is strong. Box, box."),
    line(62, Driver, "Okay, coming in."),
    // Pit stop
    line(65, Engineer, "2.1 second stop! Good job guys. Out in P2, 3.2 seconds behind Leclerc."),
    line(70, Driver, "Copy. Push now to catch him?"),
    line(74, Engineer, "Affirmative. Push hard. He's on older tires."),
    // Chase
    line(78, Driver, "How's the gap? I'm pushing like hell here."),
    line(83, Engineer, "Gap is 1.8 seconds. You're gaining three tenths per lap."),
    line(88, Driver, "Copy. Car is on rails now. Feeling good."),
    line(93, Driver, "This is unbelievable driving."),
    // DRS battle
    line(97, Engineer, "DRS available next lap. You're within one second."),
    line(103, Driver, "I see him. Going for the move into turn 1."),
    line(109, Engineer, "Clean overtake! P1! P1 Sherry! Great job!"),
    line(114, Driver, "Copy. What's the gap behind?"),
    // Managing the race
    line(120, Engineer, "Gap to P2 is 2.8 seconds. Managing pace. Your tires need to last 25 more laps."),
    line(128, Driver, "Understood. These tires are holding on well."),
    line(140, Engineer, "Watch for Hamilton behind. He's on newer tires and pushing."),
    line(145, Driver, "Copy. I can see him in the mirrors. No issues."),
    // Strategy update
    line(160, Engineer, "Okay Sherry, slight change of plan. We're going to two-stop. Box in 5 laps."),
    line(165, Driver, "Two-stop? Are you sure? I can manage these to the end."),
    line(170, Driver, "We know what we're doing."),
    line(174, Engineer, "Positive. Safety car window. Fresh tires will give us safety margin."),
    line(180, Driver, "Okay, understood. Preparing for box."),
    // Final stint
    line(186, Engineer, "Out in P1! 15 laps to go. Push to build gap, then we manage."),
    line(195, Driver, "Gap is 5 seconds. Conserving tires now."),
    line(199, Driver, "We need to box, these tires are dead."),
    line(205, Engineer, "Copy. Managing pace is good. Keep 2.5 second gap."),
    // Final laps
    line(220, Engineer, "5 laps to go Shahryar. You're doing great job."),
    line(230, Driver, "How's everything looking? Fuel, tires?"),
    line(235, Driver, "I can't keep the car on track."),
    line(239, Engineer, "All good. Fuel is positive, tires have margin. Just bring it home."),
    line(246, Driver, "What a joke!"),
    line(249, Engineer, "Final lap Shahryar! Great drive."),
    line(255, Driver, "Copy. Thank you guys. Great strategy."),
    // Cool down
    line(262, Engineer, "P1 Sherry! P1! Incredible drive. Box for parc ferme. Yayyy"),
    line(270, Driver, "Yesss! Great job everyone! Amazing work."),
];

pub struct RadioPlayer {
    script: &'static [RadioEvent],
    announcer: Arc<dyn Announcer>,
    elapsed: u32,
    emitted: HashSet<u32>,
    log: Vec<EmittedMessage>,
    next_id: u64,
    running: bool,
}

impl RadioPlayer {
    pub fn new(announcer: Arc<dyn Announcer>) -> Self {
        Self::with_script(&RADIO_SCRIPT, announcer)
    }

    pub fn with_script(script: &'static [RadioEvent], announcer: Arc<dyn Announcer>) -> Self {
        Self {
            script,
            announcer,
            elapsed: 0,
            emitted: HashSet::new(),
            log: Vec::new(),
            next_id: 1,
            running: false,
        }
    }

    /// Whole seconds on the race clock
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Messages emitted this session, oldest first
    pub fn log(&self) -> &[EmittedMessage] {
        &self.log
    }

    /// Handle the race clock reaching `elapsed` seconds
    ///
    /// Returns the line scheduled for that second if it has not gone out yet
    /// this session.
    pub fn on_second(&mut self, elapsed: u32) -> Option<EmittedMessage> {
        let script = self.script;
        let event = script
            .iter()
            .find(|event| event.scheduled_second == elapsed)?;
        if !self.emitted.insert(event.scheduled_second) {
            return None;
        }

        let narrated = !self.announcer.is_busy();
        if narrated {
            self.announcer
                .speak(event.text, VoiceHint::for_speaker(event.speaker));
        } else {
            tracing::warn!(
                second = event.scheduled_second,
                "Announcer busy, radio line shown without narration"
            );
        }

        let message = EmittedMessage::from_event(self.next_id, event, narrated);
        self.next_id += 1;
        tracing::debug!(
            second = message.scheduled_second,
            speaker = message.speaker.call_sign(),
            "Radio message"
        );
        self.log.push(message.clone());
        Some(message)
    }

    fn reset(&mut self) {
        self.elapsed = 0;
        self.emitted.clear();
        self.log.clear();
        self.next_id = 1;
        self.announcer.cancel();
    }
}

impl Ticker for RadioPlayer {
    fn name(&self) -> &str {
        "radio"
    }

    fn period(&self) -> Duration {
        RADIO_PERIOD
    }

    fn start(&mut self) {
        self.reset();
        self.running = true;
    }

    fn stop(&mut self) {
        self.reset();
        self.running = false;
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.elapsed += 1;
        self.on_second(self.elapsed);
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cockpit_core::announcer::RecordingAnnouncer;

    #[test]
    fn test_script_is_strictly_ordered() {
        assert!(RADIO_SCRIPT
            .windows(2)
            .all(|w| w[0].scheduled_second < w[1].scheduled_second));
        assert_eq!(RADIO_SCRIPT.len(), 44);
        assert_eq!(RADIO_SCRIPT[0].scheduled_second, 2);
        assert_eq!(RADIO_SCRIPT[RADIO_SCRIPT.len() - 1].scheduled_second, 270);
    }

    #[test]
    fn test_on_second_without_script_entry() {
        let mut player = RadioPlayer::new(Arc::new(RecordingAnnouncer::new()));
        assert!(player.on_second(1).is_none());
        assert!(player.log().is_empty());
    }

    #[test]
    fn test_same_second_emits_once() {
        let announcer = Arc::new(RecordingAnnouncer::new());
        let mut player = RadioPlayer::new(announcer.clone());

        let first = player.on_second(2).expect("line at 2s");
        assert_eq!(first.speaker, Speaker::Engineer);
        assert!(first.narrated);
        assert!(player.on_second(2).is_none());
        assert_eq!(player.log().len(), 1);
        assert_eq!(announcer.spoken().len(), 1);
    }

    #[test]
    fn test_busy_announcer_drops_narration() {
        let announcer = Arc::new(RecordingAnnouncer::holding_busy());
        let mut player = RadioPlayer::new(announcer.clone());

        assert!(player.on_second(2).unwrap().narrated);
        let second = player.on_second(10).unwrap();
        assert!(!second.narrated);
        assert_eq!(player.log().len(), 2);
        assert_eq!(announcer.spoken().len(), 1);

        announcer.finish();
        assert!(player.on_second(17).unwrap().narrated);
        assert_eq!(announcer.spoken().len(), 2);
    }

    #[test]
    fn test_voice_hint_follows_speaker() {
        let announcer = Arc::new(RecordingAnnouncer::new());
        let mut player = RadioPlayer::new(announcer.clone());
        player.on_second(2);
        player.on_second(10);

        let spoken = announcer.spoken();
        assert_eq!(spoken[0].1, VoiceHint::for_speaker(Speaker::Engineer));
        assert_eq!(spoken[1].1, VoiceHint::for_speaker(Speaker::Driver));
    }

    #[test]
    fn test_ids_are_unique_within_session() {
        let mut player = RadioPlayer::new(Arc::new(RecordingAnnouncer::new()));
        player.start();
        for _ in 0..60 {
            player.tick();
        }
        let ids: HashSet<u64> = player.log().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), player.log().len());
    }

    #[test]
    fn test_stop_clears_log_and_cancels_narration() {
        let announcer = Arc::new(RecordingAnnouncer::holding_busy());
        let mut player = RadioPlayer::new(announcer.clone());
        player.start();
        for _ in 0..12 {
            player.tick();
        }
        assert_eq!(player.log().len(), 2);

        player.stop();
        assert!(player.log().is_empty());
        assert_eq!(player.elapsed(), 0);
        assert!(!announcer.is_busy());
        assert!(announcer.cancel_count() >= 1);
    }
}
