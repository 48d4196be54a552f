//! Telemetry engine
//!
//! Drives speed and RPM toward freshly drawn random targets every tick and
//! depletes fuel and tyres at fixed rates while ERS recharges.

use cockpit_core::{
    model::{TelemetryState, TireWear, MAX_GEAR},
    random::TargetSource,
    ticker::Ticker,
    units::*,
};
use std::time::Duration;

pub const ENGINE_PERIOD: Duration = Duration::from_millis(100);

const SPEED_TARGET: (f64, f64) = (200.0, 350.0);
const SPEED_SMOOTHING: f64 = 0.1;
const RPM_TARGET: (f64, f64) = (8000.0, 15000.0);
const RPM_SMOOTHING: f64 = 0.15;

const FUEL_PER_TICK: f64 = 0.02;
const FRONT_WEAR_PER_TICK: f64 = 0.015;
const REAR_WEAR_PER_TICK: f64 = 0.02;
const ERS_PER_TICK: f64 = 0.5;

/// A draw above this opens DRS for the tick
const DRS_THRESHOLD: f64 = 0.7;

/// Move `current` toward `target` by `fraction` of the remaining gap
pub fn approach(current: f64, target: f64, fraction: f64) -> f64 {
    current + (target - current) * fraction
}

/// Gear for a given speed: one gear per 50 km/h, clamped to 1..=8
pub fn gear_for_speed(speed: Kph) -> u8 {
    let raw = (speed.0 / 50.0).floor() + 1.0;
    raw.clamp(1.0, MAX_GEAR as f64) as u8
}

/// Compute the state one tick after `state`
///
/// Draw order is speed target, RPM target, DRS.
pub fn advance(state: &TelemetryState, targets: &mut dyn TargetSource) -> TelemetryState {
    let speed_target = targets.uniform(SPEED_TARGET.0, SPEED_TARGET.1);
    let rpm_target = targets.uniform(RPM_TARGET.0, RPM_TARGET.1);
    let drs_draw = targets.next_unit();

    let speed = Kph(approach(state.speed.0, speed_target, SPEED_SMOOTHING).max(0.0));
    let rpm = Rpm(approach(state.rpm.0, rpm_target, RPM_SMOOTHING).max(0.0));

    let wear = state.tire_wear;
    TelemetryState {
        speed,
        rpm,
        gear: gear_for_speed(speed),
        fuel: state.fuel.drain(FUEL_PER_TICK),
        tire_wear: TireWear {
            front_left: wear.front_left.drain(FRONT_WEAR_PER_TICK),
            front_right: wear.front_right.drain(FRONT_WEAR_PER_TICK),
            rear_left: wear.rear_left.drain(REAR_WEAR_PER_TICK),
            rear_right: wear.rear_right.drain(REAR_WEAR_PER_TICK),
        },
        ers: state.ers.charge(ERS_PER_TICK),
        drs_open: drs_draw > DRS_THRESHOLD,
    }
}

pub struct TelemetryEngine {
    state: TelemetryState,
    running: bool,
    targets: Box<dyn TargetSource>,
}

impl TelemetryEngine {
    pub fn new(targets: Box<dyn TargetSource>) -> Self {
        Self {
            state: TelemetryState::initial(),
            running: false,
            targets,
        }
    }

    pub fn state(&self) -> &TelemetryState {
        &self.state
    }
}

impl Ticker for TelemetryEngine {
    fn name(&self) -> &str {
        "engine"
    }

    fn period(&self) -> Duration {
        ENGINE_PERIOD
    }

    fn start(&mut self) {
        self.state = TelemetryState::initial();
        self.running = true;
    }

    fn stop(&mut self) {
        self.state = TelemetryState::initial();
        self.running = false;
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.state = advance(&self.state, self.targets.as_mut());
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cockpit_core::random::SequenceSource;

    #[test]
    fn test_approach() {
        assert_eq!(approach(0.0, 100.0, 0.1), 10.0);
        assert_eq!(approach(100.0, 100.0, 0.5), 100.0);
        assert_eq!(approach(300.0, 200.0, 0.1), 290.0);
    }

    #[test]
    fn test_gear_bounds() {
        assert_eq!(gear_for_speed(Kph(0.0)), 1);
        assert_eq!(gear_for_speed(Kph(49.9)), 1);
        assert_eq!(gear_for_speed(Kph(50.0)), 2);
        assert_eq!(gear_for_speed(Kph(275.0)), 6);
        assert_eq!(gear_for_speed(Kph(350.0)), 8);
        assert_eq!(gear_for_speed(Kph(10_000.0)), 8);
    }

    #[test]
    fn test_advance_from_initial_state() {
        // speed target 275, rpm target 11500, DRS draw 0.5 (closed)
        let mut source = SequenceSource::constant(0.5);
        let next = advance(&TelemetryState::initial(), &mut source);

        assert!((next.speed.0 - 27.5).abs() < 1e-9);
        assert!((next.rpm.0 - 1725.0).abs() < 1e-9);
        assert_eq!(next.gear, 1);
        assert!((next.fuel.0 - 99.98).abs() < 1e-9);
        assert!((next.tire_wear.front_left.0 - 99.985).abs() < 1e-9);
        assert!((next.tire_wear.rear_right.0 - 99.98).abs() < 1e-9);
        assert_eq!(next.ers, Percent::FULL);
        assert!(!next.drs_open);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    fn test_drs_opens_above_threshold() {
        let mut source = SequenceSource::new(vec![0.0, 0.0, 0.71]);
        let next = advance(&TelemetryState::initial(), &mut source);
        assert!(next.drs_open);

        let mut source = SequenceSource::new(vec![0.0, 0.0, 0.7]);
        let next = advance(&TelemetryState::initial(), &mut source);
        assert!(!next.drs_open);
    }

    #[test]
    fn test_depletion_floors_at_zero() {
        let mut state = TelemetryState::initial();
        state.fuel = Percent(0.01);
        state.tire_wear.front_left = Percent(0.001);
        state.tire_wear.rear_left = Percent(0.0);
        state.ers = Percent(0.0);

        let next = advance(&state, &mut SequenceSource::constant(0.2));
        assert_eq!(next.fuel, Percent::EMPTY);
        assert_eq!(next.tire_wear.front_left, Percent::EMPTY);
        assert_eq!(next.tire_wear.rear_left, Percent::EMPTY);
        assert_eq!(next.ers.0, 0.5);
    }

    #[test]
    fn test_tick_is_noop_when_stopped() {
        let mut engine = TelemetryEngine::new(Box::new(SequenceSource::constant(0.9)));
        engine.tick();
        assert_eq!(*engine.state(), TelemetryState::initial());
    }

    #[test]
    fn test_stop_resets_state() {
        let mut engine = TelemetryEngine::new(Box::new(SequenceSource::constant(0.9)));
        engine.start();
        for _ in 0..20 {
            engine.tick();
        }
        assert!(engine.state().speed.0 > 0.0);

        engine.stop();
        assert!(!engine.is_running());
        assert_eq!(*engine.state(), TelemetryState::initial());
    }
}
