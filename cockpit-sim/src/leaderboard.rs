//! Synthetic live classification
//!
//! Lap times are seeded once and then drift a little each tick. Positions
//! and gaps follow roster order rather than lap time, so the car in the
//! first slot is always P1 with a zero gap.

use cockpit_core::{model::CompetitorEntry, random::TargetSource, ticker::Ticker, units::*};
use std::time::Duration;

pub const LEADERBOARD_PERIOD: Duration = Duration::from_millis(2000);

const BASE_LAP_TIME: (f64, f64) = (80.0, 100.0);
const LAP_TIME_VARIATION: (f64, f64) = (-0.25, 0.25);

/// Laps in the full race distance
pub const RACE_LAPS: u32 = 58;

/// Default grid: (name, team), player first
const DEFAULT_GRID: [(&str, &str); 7] = [
    ("VERSTAPPEN", "Red Bull"),
    ("HAMILTON", "Ferrari"),
    ("NORRIS", "McLaren"),
    ("LECLERC", "Ferrari"),
    ("RUSSELL", "Mercedes"),
    ("PIASTRI", "McLaren"),
    ("HULKENBERG", "Sauber"),
];

/// The default roster with the player in the first slot
pub fn default_roster() -> Vec<CompetitorEntry> {
    DEFAULT_GRID
        .iter()
        .enumerate()
        .map(|(i, (name, team))| CompetitorEntry::new(i as u32 + 1, name, team, i == 0))
        .collect()
}

/// Compute the roster one tick after `roster`
pub fn advance(roster: &[CompetitorEntry], draws: &mut dyn TargetSource) -> Vec<CompetitorEntry> {
    let lap_times: Vec<f64> = roster
        .iter()
        .map(|entry| match entry.lap_time {
            Some(previous) => {
                previous.0 + draws.uniform(LAP_TIME_VARIATION.0, LAP_TIME_VARIATION.1)
            }
            None => draws.uniform(BASE_LAP_TIME.0, BASE_LAP_TIME.1),
        })
        .collect();

    let reference = lap_times.first().copied().unwrap_or(0.0);

    roster
        .iter()
        .zip(lap_times)
        .enumerate()
        .map(|(index, (entry, lap_time))| CompetitorEntry {
            position: index as u32 + 1,
            lap_time: Some(Seconds(lap_time)),
            gap_to_leader: Seconds(lap_time - reference),
            ..entry.clone()
        })
        .collect()
}

pub struct Leaderboard {
    roster: Vec<CompetitorEntry>,
    initial: Vec<CompetitorEntry>,
    running: bool,
    draws: Box<dyn TargetSource>,
    race_distance: u32,
    live_indicator: bool,
}

impl Leaderboard {
    pub fn new(mut draws: Box<dyn TargetSource>) -> Self {
        let race_distance = (draws.next_unit() * 30.0).floor() as u32;
        let live_indicator = draws.next_unit() > 0.8;
        Self {
            roster: default_roster(),
            initial: default_roster(),
            running: false,
            draws,
            race_distance,
            live_indicator,
        }
    }

    pub fn roster(&self) -> &[CompetitorEntry] {
        &self.roster
    }

    /// Laps shown as completed in the race distance counter
    pub fn race_distance(&self) -> u32 {
        self.race_distance
    }

    /// Whether the live marker is shown, drawn once like the race distance
    pub fn live_indicator(&self) -> bool {
        self.live_indicator
    }
}

impl Ticker for Leaderboard {
    fn name(&self) -> &str {
        "leaderboard"
    }

    fn period(&self) -> Duration {
        LEADERBOARD_PERIOD
    }

    /// Same drivers every session, lap times start unseeded
    fn start(&mut self) {
        self.roster = self.initial.clone();
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.roster = advance(&self.roster, self.draws.as_mut());
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
