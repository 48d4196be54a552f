//! PitWall Cockpit race simulation
//!
//! Independently clocked components that together produce the state shown
//! on the cockpit display:
//!
//! - `engine`: speed, RPM, gear, fuel, tyre wear, ERS and DRS
//! - `tracker`: position around the lap and lap timing
//! - `leaderboard`: the competitor field and gaps to the leader
//! - `radio`: the scripted team radio conversation
//! - `indicators`: start gantry and pit exit lights
//!
//! `session::RaceSession` bundles one of each behind a single start/stop
//! switch.

pub mod aero;
pub mod circuit;
pub mod engine;
pub mod indicators;
pub mod leaderboard;
pub mod radio;
pub mod session;
pub mod tracker;
pub mod tyres;

pub use circuit::Circuit;
pub use engine::TelemetryEngine;
pub use leaderboard::Leaderboard;
pub use radio::RadioPlayer;
pub use session::{RaceSession, TickerKind};
pub use tracker::LapTracker;
