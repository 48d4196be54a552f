//! Integration tests for RaceSession

use cockpit_core::{
    announcer::RecordingAnnouncer,
    model::{LapState, TelemetryState, MAX_GEAR},
    random::SequenceSource,
};
use cockpit_sim::{radio::RADIO_SCRIPT, RaceSession, TickerKind};
use std::sync::Arc;

fn seeded_session() -> RaceSession {
    RaceSession::builder().seed(7).build()
}

#[test]
fn test_session_initially_stopped() {
    let session = seeded_session();
    assert!(!session.is_running(), "Session should be idle before start()");
    let snap = session.snapshot();
    assert_eq!(snap.telemetry, TelemetryState::initial());
    assert_eq!(snap.lap, LapState::initial());
}

#[test]
fn test_fuel_after_58_engine_ticks() {
    let mut session = seeded_session();
    session.start();
    for _ in 0..58 {
        session.tick(TickerKind::Engine);
    }
    let fuel = session.snapshot().telemetry.fuel.0;
    assert!((fuel - 98.84).abs() < 1e-9, "fuel was {}", fuel);
}

#[test]
fn test_engine_invariants_hold_over_long_run() {
    let mut session = seeded_session();
    session.start();

    let mut previous = session.snapshot().telemetry;
    for _ in 0..2_000 {
        session.tick(TickerKind::Engine);
        let current = session.snapshot().telemetry;

        assert!((1..=MAX_GEAR).contains(&current.gear));
        assert!(current.fuel.0 <= previous.fuel.0);
        assert!(current.fuel.0 >= 0.0);
        for (now, before) in current
            .tire_wear
            .as_array()
            .iter()
            .zip(previous.tire_wear.as_array())
        {
            assert!(now.0 <= before.0);
            assert!(now.0 >= 0.0);
        }
        assert!((0.0..=100.0).contains(&current.ers.0));
        assert!(current.speed.0 >= 0.0 && current.speed.0 <= 350.0);

        previous = current;
    }
}

#[test]
fn test_best_lap_never_increases() {
    let mut session = seeded_session();
    session.start();

    let mut best: Option<f64> = None;
    for _ in 0..1_000 {
        session.tick(TickerKind::Tracker);
        let lap = session.snapshot().lap;
        assert!((0.0..360.0).contains(&lap.angular_position.0));
        if let (Some(before), Some(now)) = (best, lap.best_lap_time) {
            assert!(now.0 <= before);
        }
        best = lap.best_lap_time.map(|s| s.0);
    }
    let lap = session.snapshot().lap;
    assert_eq!(lap.lap_number, 6, "1000 ticks of 2 degrees is five full laps");
    assert!(lap.best_lap_time.is_some());
}

#[test]
fn test_full_radio_script_plays_once_in_order() {
    let announcer = Arc::new(RecordingAnnouncer::new());
    let mut session = RaceSession::builder()
        .announcer(announcer.clone())
        .seed(1)
        .build();
    session.start();

    for _ in 1..=270 {
        session.tick(TickerKind::Radio);
    }

    let log = session.radio().log();
    assert_eq!(RADIO_SCRIPT.len(), 44);
    assert_eq!(log.len(), 44);
    for (message, event) in log.iter().zip(RADIO_SCRIPT.iter()) {
        assert_eq!(message.scheduled_second, event.scheduled_second);
        assert_eq!(message.text, event.text);
        assert!(message.narrated);
    }
    assert!(log.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(announcer.spoken().len(), RADIO_SCRIPT.len());

    // past the end of the script nothing more is emitted
    for _ in 0..30 {
        session.tick(TickerKind::Radio);
    }
    assert_eq!(session.radio().log().len(), RADIO_SCRIPT.len());
}

#[test]
fn test_busy_announcer_still_shows_messages() {
    let announcer = Arc::new(RecordingAnnouncer::holding_busy());
    let mut session = RaceSession::builder()
        .announcer(announcer.clone())
        .seed(1)
        .build();
    session.start();

    for _ in 1..=10 {
        session.tick(TickerKind::Radio);
    }

    let log = session.radio().log();
    assert!(log.len() > 1);
    assert!(log[0].narrated);
    assert!(log[1..].iter().all(|m| !m.narrated));
    assert_eq!(announcer.spoken().len(), 1);
}

#[test]
fn test_stop_and_restart_resets_session() {
    let announcer = Arc::new(RecordingAnnouncer::new());
    let mut session = RaceSession::builder()
        .announcer(announcer.clone())
        .engine_targets(Box::new(SequenceSource::constant(0.9)))
        .leaderboard_draws(Box::new(SequenceSource::constant(0.5)))
        .build();
    session.start();

    for _ in 0..200 {
        for kind in TickerKind::ALL {
            session.tick(kind);
        }
    }
    let before = session.snapshot();
    assert!(before.telemetry.fuel.0 < 100.0);
    assert!(before.lap.lap_number > 1);
    assert!(!before.radio.is_empty());

    session.stop();
    let stopped = session.snapshot();
    assert!(!stopped.running);
    assert_eq!(stopped.telemetry, TelemetryState::initial());
    // lap progress is kept while stopped
    assert_eq!(stopped.lap, before.lap);
    assert!(stopped.radio.is_empty());
    assert_eq!(stopped.indicators.start_lights, 0);

    session.start();
    let restarted = session.snapshot();
    assert!(restarted.running);
    assert_eq!(restarted.telemetry, TelemetryState::initial());
    assert_eq!(restarted.lap, LapState::initial());
    assert_eq!(restarted.race_seconds, 0);
    assert!(restarted.leaderboard.iter().all(|e| e.lap_time.is_none()));
    assert!(announcer.cancel_count() >= 2);
}

#[test]
fn test_snapshot_serializes_with_mask() {
    let mut session = seeded_session();
    session.start();
    session.tick(TickerKind::Engine);

    let mask = cockpit_core::FieldMask::parse("telemetry,aero");
    let json = session.snapshot().to_json_filtered(Some(&mask)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("telemetry").is_some());
    assert!(value.get("aero").is_some());
    assert!(value.get("leaderboard").is_none());
    assert_eq!(value["circuit"], "monaco");
}
