//! Lap and track position tracker

use cockpit_core::{format::format_lap_time, model::LapState, ticker::Ticker, units::*};
use std::time::Duration;

pub const TRACKER_PERIOD: Duration = Duration::from_millis(100);

/// Degrees travelled around the map per tick
const STEP_DEGREES: f64 = 2.0;

/// Compute the lap state one tick after `state`, `dt` seconds later
///
/// The lap timer accumulates before a wrap is evaluated, so the completed
/// lap includes the tick that crossed the line.
pub fn advance(state: &LapState, dt: f64) -> LapState {
    let previous = state.angular_position;
    let angular_position = previous.advance(STEP_DEGREES);
    let lap_time = state.current_lap_time.0 + dt;

    if angular_position.0 < previous.0 {
        let best_lap_time = match state.best_lap_time {
            Some(best) if best.0 <= lap_time => Some(best),
            _ => Some(Seconds(lap_time)),
        };
        LapState {
            angular_position,
            lap_number: state.lap_number + 1,
            current_lap_time: Seconds(0.0),
            best_lap_time,
        }
    } else {
        LapState {
            angular_position,
            current_lap_time: Seconds(lap_time),
            ..*state
        }
    }
}

pub struct LapTracker {
    state: LapState,
    running: bool,
    period: Duration,
}

impl LapTracker {
    pub fn new() -> Self {
        Self::with_period(TRACKER_PERIOD)
    }

    /// Tracker ticked every `period`; each tick adds `period` to the lap timer
    pub fn with_period(period: Duration) -> Self {
        Self {
            state: LapState::initial(),
            running: false,
            period,
        }
    }

    pub fn state(&self) -> &LapState {
        &self.state
    }
}

impl Default for LapTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for LapTracker {
    fn name(&self) -> &str {
        "tracker"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn start(&mut self) {
        self.state = LapState::initial();
        self.running = true;
    }

    /// Values are kept for display until the next start
    fn stop(&mut self) {
        self.running = false;
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        let lap_before = self.state.lap_number;
        self.state = advance(&self.state, self.period.as_secs_f64());
        if self.state.lap_number != lap_before {
            tracing::debug!(
                lap = self.state.lap_number,
                best = %self
                    .state
                    .best_lap_time
                    .map(|s| format_lap_time(s.0))
                    .unwrap_or_default(),
                "Lap completed"
            );
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
