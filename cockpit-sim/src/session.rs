//! A complete race session
//!
//! `RaceSession` owns one of each ticking component and fans `start`/`stop`
//! out to all of them. The host drives each component on its own clock via
//! [`RaceSession::tick`] and reads the combined state with
//! [`RaceSession::snapshot`].

use crate::{
    aero,
    circuit::{self, Circuit},
    engine::TelemetryEngine,
    indicators::{PitExitLight, StartLights},
    leaderboard::Leaderboard,
    radio::RadioPlayer,
    tracker::LapTracker,
    tyres,
};
use chrono::Utc;
use cockpit_core::{
    announcer::{Announcer, SilentAnnouncer},
    format::{format_race_clock, format_tyre_delta},
    model::{EmittedMessage, RaceIndicators, RaceSnapshot, TyreReadout},
    random::{RngSource, TargetSource},
    ticker::Ticker,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Identifies one of the session's independently clocked components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerKind {
    Engine,
    Tracker,
    Leaderboard,
    Radio,
    StartLights,
    PitExit,
}

impl TickerKind {
    pub const ALL: [TickerKind; 6] = [
        TickerKind::Engine,
        TickerKind::Tracker,
        TickerKind::Leaderboard,
        TickerKind::Radio,
        TickerKind::StartLights,
        TickerKind::PitExit,
    ];
}

pub struct RaceSession {
    engine: TelemetryEngine,
    tracker: LapTracker,
    leaderboard: Leaderboard,
    radio: RadioPlayer,
    start_lights: StartLights,
    pit_exit: PitExitLight,
    circuit: &'static Circuit,
    tyre_jitter: Box<dyn TargetSource>,
    tyres: [TyreReadout; 4],
    track_temp: i32,
}

impl RaceSession {
    /// Session on the default circuit with entropy-seeded randomness
    pub fn new(announcer: Arc<dyn Announcer>) -> Self {
        Self::builder().announcer(announcer).build()
    }

    pub fn builder() -> RaceSessionBuilder {
        RaceSessionBuilder::default()
    }

    /// Whether every component is running
    pub fn is_running(&self) -> bool {
        TickerKind::ALL
            .iter()
            .all(|&kind| self.ticker(kind).is_running())
    }

    pub fn start(&mut self) {
        info!(circuit = self.circuit.id, "Starting race session");
        for kind in TickerKind::ALL {
            self.ticker_mut(kind).start();
        }
        self.refresh_tyres();
    }

    pub fn stop(&mut self) {
        info!(
            circuit = self.circuit.id,
            race_clock = %format_race_clock(self.radio.elapsed()),
            "Stopping race session"
        );
        for kind in TickerKind::ALL {
            self.ticker_mut(kind).stop();
        }
        self.refresh_tyres();
        debug!(
            deltas = ?self.tyres.map(|t| format_tyre_delta(t.delta.0)),
            "Tyre deltas"
        );
    }

    /// Advance one component by a single period
    pub fn tick(&mut self, kind: TickerKind) {
        self.ticker_mut(kind).tick();
        if kind == TickerKind::Engine && self.engine.is_running() {
            self.refresh_tyres();
        }
    }

    pub fn period(&self, kind: TickerKind) -> Duration {
        self.ticker(kind).period()
    }

    pub fn ticker_name(&self, kind: TickerKind) -> &str {
        self.ticker(kind).name()
    }

    fn ticker(&self, kind: TickerKind) -> &dyn Ticker {
        match kind {
            TickerKind::Engine => &self.engine,
            TickerKind::Tracker => &self.tracker,
            TickerKind::Leaderboard => &self.leaderboard,
            TickerKind::Radio => &self.radio,
            TickerKind::StartLights => &self.start_lights,
            TickerKind::PitExit => &self.pit_exit,
        }
    }

    fn ticker_mut(&mut self, kind: TickerKind) -> &mut dyn Ticker {
        match kind {
            TickerKind::Engine => &mut self.engine,
            TickerKind::Tracker => &mut self.tracker,
            TickerKind::Leaderboard => &mut self.leaderboard,
            TickerKind::Radio => &mut self.radio,
            TickerKind::StartLights => &mut self.start_lights,
            TickerKind::PitExit => &mut self.pit_exit,
        }
    }

    fn refresh_tyres(&mut self) {
        self.tyres = tyres::readouts(&self.engine.state().tire_wear, self.tyre_jitter.as_mut());
    }

    pub fn circuit(&self) -> &'static Circuit {
        self.circuit
    }

    /// Switch the track map. Returns `None` and keeps the current circuit
    /// when `id` is unknown.
    pub fn select_circuit(&mut self, id: &str) -> Option<&'static Circuit> {
        let selected = circuit::find(id)?;
        debug!(from = self.circuit.id, to = selected.id, "Circuit selected");
        self.circuit = selected;
        Some(selected)
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn radio(&self) -> &RadioPlayer {
        &self.radio
    }

    /// Radio messages emitted after the first `seen` ones
    pub fn radio_since(&self, seen: usize) -> &[EmittedMessage] {
        self.radio.log().get(seen..).unwrap_or(&[])
    }

    pub fn snapshot(&self) -> RaceSnapshot {
        let telemetry = *self.engine.state();
        let lap = *self.tracker.state();
        RaceSnapshot {
            timestamp: Utc::now(),
            running: self.is_running(),
            race_seconds: self.radio.elapsed(),
            circuit: self.circuit.id.to_string(),
            car_marker: circuit::car_marker(self.circuit, lap.angular_position),
            telemetry,
            lap,
            leaderboard: self.leaderboard.roster().to_vec(),
            race_distance: self.leaderboard.race_distance(),
            live_indicator: self.leaderboard.live_indicator(),
            track_temp: self.track_temp,
            radio: self.radio.log().to_vec(),
            indicators: RaceIndicators {
                start_lights: self.start_lights.lit(),
                pit_exit_open: self.pit_exit.is_open(),
            },
            aero: aero::readout(telemetry.speed, telemetry.drs_open),
            tyres: self.tyres,
        }
    }
}

/// Assembles a [`RaceSession`], letting tests swap in fixed random sources
#[derive(Default)]
pub struct RaceSessionBuilder {
    announcer: Option<Arc<dyn Announcer>>,
    circuit: Option<&'static Circuit>,
    seed: Option<u64>,
    tracker_period: Option<Duration>,
    engine_targets: Option<Box<dyn TargetSource>>,
    leaderboard_draws: Option<Box<dyn TargetSource>>,
    tyre_jitter: Option<Box<dyn TargetSource>>,
}

impl RaceSessionBuilder {
    pub fn announcer(mut self, announcer: Arc<dyn Announcer>) -> Self {
        self.announcer = Some(announcer);
        self
    }

    /// Unknown ids fall back to the default circuit
    pub fn circuit(mut self, id: &str) -> Self {
        self.circuit = Some(circuit::lookup(id));
        self
    }

    /// Seed every random source deterministically
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Period the host ticks the lap tracker at, which is also its lap timer step
    pub fn tracker_period(mut self, period: Duration) -> Self {
        self.tracker_period = Some(period);
        self
    }

    pub fn engine_targets(mut self, source: Box<dyn TargetSource>) -> Self {
        self.engine_targets = Some(source);
        self
    }

    pub fn leaderboard_draws(mut self, source: Box<dyn TargetSource>) -> Self {
        self.leaderboard_draws = Some(source);
        self
    }

    pub fn tyre_jitter(mut self, source: Box<dyn TargetSource>) -> Self {
        self.tyre_jitter = Some(source);
        self
    }

    pub fn build(self) -> RaceSession {
        let seed = self.seed;
        let source = |offset: u64| -> Box<dyn TargetSource> {
            match seed {
                Some(seed) => Box::new(RngSource::seeded(seed.wrapping_add(offset))),
                None => Box::new(RngSource::from_entropy()),
            }
        };

        let engine = TelemetryEngine::new(self.engine_targets.unwrap_or_else(|| source(0)));
        let leaderboard = Leaderboard::new(self.leaderboard_draws.unwrap_or_else(|| source(1)));
        let mut tyre_jitter = self.tyre_jitter.unwrap_or_else(|| source(2));
        let announcer = self
            .announcer
            .unwrap_or_else(|| Arc::new(SilentAnnouncer));

        let track_temp = tyres::track_temp(tyre_jitter.as_mut());
        let tyres = tyres::readouts(&engine.state().tire_wear, tyre_jitter.as_mut());

        RaceSession {
            engine,
            tracker: self
                .tracker_period
                .map(LapTracker::with_period)
                .unwrap_or_default(),
            leaderboard,
            radio: RadioPlayer::new(announcer),
            start_lights: StartLights::new(),
            pit_exit: PitExitLight::new(),
            circuit: self.circuit.unwrap_or_else(|| circuit::lookup(circuit::DEFAULT_CIRCUIT)),
            tyre_jitter,
            tyres,
            track_temp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cockpit_core::random::SequenceSource;

    fn fixed_session() -> RaceSession {
        RaceSession::builder()
            .engine_targets(Box::new(SequenceSource::constant(0.5)))
            .leaderboard_draws(Box::new(SequenceSource::constant(0.5)))
            .tyre_jitter(Box::new(SequenceSource::constant(0.0)))
            .build()
    }

    #[test]
    fn test_idle_session_snapshot() {
        assert!(!RaceSession::new(Arc::new(SilentAnnouncer)).is_running());

        let session = fixed_session();
        let snap = session.snapshot();
        assert!(!snap.running);
        assert_eq!(snap.race_seconds, 0);
        assert_eq!(snap.circuit, "monaco");
        assert_eq!(snap.leaderboard.len(), 7);
        assert_eq!(snap.race_distance, 15);
        assert!(!snap.live_indicator);
        assert_eq!(snap.track_temp, 80);
        assert_eq!(snap.tyres[0].surface_temp, 85);
        assert_eq!(snap.tyres[0].delta.0, -0.25);
        assert!(snap.radio.is_empty());
    }

    #[test]
    fn test_ticks_ignored_until_started() {
        let mut session = fixed_session();
        for kind in TickerKind::ALL {
            session.tick(kind);
        }
        let snap = session.snapshot();
        assert_eq!(snap.telemetry, cockpit_core::model::TelemetryState::initial());
        assert_eq!(snap.lap.angular_position.0, 0.0);
        assert_eq!(snap.indicators, RaceIndicators::default());
    }

    #[test]
    fn test_start_fans_out() {
        let mut session = fixed_session();
        session.start();
        assert!(session.is_running());
        for kind in TickerKind::ALL {
            session.tick(kind);
        }
        let snap = session.snapshot();
        assert!(snap.telemetry.speed.0 > 0.0);
        assert_eq!(snap.lap.angular_position.0, 2.0);
        assert_eq!(snap.indicators.start_lights, 1);
        assert!(snap.indicators.pit_exit_open);
        assert_eq!(snap.race_seconds, 1);
        assert!(snap.leaderboard.iter().all(|e| e.lap_time.is_some()));
    }

    #[test]
    fn test_select_circuit() {
        let mut session = fixed_session();
        assert_eq!(session.select_circuit("spa").map(|c| c.id), Some("spa"));
        assert!(session.select_circuit("nowhere").is_none());
        assert_eq!(session.circuit().id, "spa");
        assert_eq!(session.snapshot().car_marker.y, 25.0);
    }

    #[test]
    fn test_periods() {
        let session = fixed_session();
        assert_eq!(session.period(TickerKind::Engine), Duration::from_millis(100));
        assert_eq!(session.period(TickerKind::Leaderboard), Duration::from_secs(2));
        assert_eq!(session.period(TickerKind::PitExit), Duration::from_secs(3));
        assert_eq!(session.ticker_name(TickerKind::Radio), "radio");
        assert_eq!(session.period(TickerKind::Tracker), Duration::from_millis(100));

        let session = RaceSession::builder()
            .tracker_period(Duration::from_millis(40))
            .seed(4)
            .build();
        assert_eq!(session.period(TickerKind::Tracker), Duration::from_millis(40));
    }

    #[test]
    fn test_lap_timer_uses_tracker_period() {
        let mut session = RaceSession::builder()
            .tracker_period(Duration::from_millis(250))
            .seed(4)
            .build();
        session.start();
        for _ in 0..4 {
            session.tick(TickerKind::Tracker);
        }
        let lap = session.snapshot().lap;
        assert!((lap.current_lap_time.0 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_radio_since() {
        let mut session = fixed_session();
        session.start();
        for _ in 0..5 {
            session.tick(TickerKind::Radio);
        }
        let all = session.radio().log().len();
        assert!(all >= 1);
        assert_eq!(session.radio_since(0).len(), all);
        assert!(session.radio_since(all).is_empty());
        assert!(session.radio_since(all + 10).is_empty());
    }
}
