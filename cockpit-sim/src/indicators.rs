//! Start gantry and pit exit lights

use cockpit_core::{model::START_LIGHTS, ticker::Ticker};
use std::time::Duration;

pub const START_LIGHTS_PERIOD: Duration = Duration::from_secs(1);
pub const PIT_EXIT_PERIOD: Duration = Duration::from_secs(3);

/// Lights one more lamp per second until all five are lit
#[derive(Debug, Default)]
pub struct StartLights {
    lit: u8,
    running: bool,
}

impl StartLights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lit(&self) -> u8 {
        self.lit
    }
}

impl Ticker for StartLights {
    fn name(&self) -> &str {
        "start_lights"
    }

    fn period(&self) -> Duration {
        START_LIGHTS_PERIOD
    }

    fn start(&mut self) {
        self.lit = 0;
        self.running = true;
    }

    fn stop(&mut self) {
        self.lit = 0;
        self.running = false;
    }

    fn tick(&mut self) {
        if self.running {
            self.lit = (self.lit + 1).min(START_LIGHTS);
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Pit exit light alternating between closed and open
#[derive(Debug, Default)]
pub struct PitExitLight {
    open: bool,
    running: bool,
}

impl PitExitLight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Ticker for PitExitLight {
    fn name(&self) -> &str {
        "pit_exit"
    }

    fn period(&self) -> Duration {
        PIT_EXIT_PERIOD
    }

    fn start(&mut self) {
        self.open = false;
        self.running = true;
    }

    fn stop(&mut self) {
        self.open = false;
        self.running = false;
    }

    fn tick(&mut self) {
        if self.running {
            self.open = !self.open;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
