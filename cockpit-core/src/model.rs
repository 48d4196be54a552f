//! Race state data model
//!
//! Defines the per-component state structs owned by the simulation and the
//! `RaceSnapshot` the view layer reads between ticks.

use crate::units::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Highest forward gear of the simulated car
pub const MAX_GEAR: u8 = 8;

// =============================================================================
// Telemetry
// =============================================================================

/// Remaining tyre life per corner (100 = new)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireWear {
    pub front_left: Percent,
    pub front_right: Percent,
    pub rear_left: Percent,
    pub rear_right: Percent,
}

impl TireWear {
    /// A fresh set of tyres
    pub fn new_set() -> Self {
        Self {
            front_left: Percent::FULL,
            front_right: Percent::FULL,
            rear_left: Percent::FULL,
            rear_right: Percent::FULL,
        }
    }

    /// Corners in FL, FR, RL, RR order
    pub fn as_array(&self) -> [Percent; 4] {
        [
            self.front_left,
            self.front_right,
            self.rear_left,
            self.rear_right,
        ]
    }
}

impl Default for TireWear {
    fn default() -> Self {
        Self::new_set()
    }
}

/// Car telemetry advanced by the telemetry engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryState {
    pub speed: Kph,
    pub rpm: Rpm,
    /// Derived from speed, always within 1..=MAX_GEAR
    pub gear: u8,
    pub fuel: Percent,
    pub tire_wear: TireWear,
    pub ers: Percent,
    pub drs_open: bool,
}

impl TelemetryState {
    /// State of a car sitting on the grid
    pub fn initial() -> Self {
        Self {
            speed: Kph(0.0),
            rpm: Rpm(0.0),
            gear: 1,
            fuel: Percent::FULL,
            tire_wear: TireWear::new_set(),
            ers: Percent::FULL,
            drs_open: false,
        }
    }
}

impl Default for TelemetryState {
    fn default() -> Self {
        Self::initial()
    }
}

// =============================================================================
// Lap tracking
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapState {
    /// Angular position around the map, in [0, 360)
    pub angular_position: Degrees,
    /// Starts at 1
    pub lap_number: u32,
    pub current_lap_time: Seconds,
    /// Only ever decreases once set
    pub best_lap_time: Option<Seconds>,
}

impl LapState {
    pub fn initial() -> Self {
        Self {
            angular_position: Degrees(0.0),
            lap_number: 1,
            current_lap_time: Seconds(0.0),
            best_lap_time: None,
        }
    }
}

impl Default for LapState {
    fn default() -> Self {
        Self::initial()
    }
}

// =============================================================================
// Leaderboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorEntry {
    /// 1-based slot in the roster
    pub position: u32,
    pub name: String,
    pub team: String,
    /// None until the first leaderboard tick seeds it
    pub lap_time: Option<Seconds>,
    /// Difference to the entry in the first roster slot
    pub gap_to_leader: Seconds,
    pub is_player: bool,
}

impl CompetitorEntry {
    pub fn new(position: u32, name: &str, team: &str, is_player: bool) -> Self {
        Self {
            position,
            name: name.to_string(),
            team: team.to_string(),
            lap_time: None,
            gap_to_leader: Seconds(0.0),
            is_player,
        }
    }
}

// =============================================================================
// Team radio
// =============================================================================

/// Who is talking on the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Engineer,
    Driver,
}

impl Speaker {
    /// Badge shown next to a message
    pub fn call_sign(&self) -> &'static str {
        match self {
            Speaker::Engineer => "Gianpiero L.",
            Speaker::Driver => "MAX",
        }
    }
}

/// One scripted radio line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadioEvent {
    pub scheduled_second: u32,
    pub speaker: Speaker,
    pub text: &'static str,
}

/// A radio line that has gone out during the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedMessage {
    /// Display identifier, unique within a session
    pub id: u64,
    pub scheduled_second: u32,
    pub speaker: Speaker,
    pub text: String,
    /// Whether the line was handed to the announcer
    pub narrated: bool,
}

impl EmittedMessage {
    pub fn from_event(id: u64, event: &RadioEvent, narrated: bool) -> Self {
        Self {
            id,
            scheduled_second: event.scheduled_second,
            speaker: event.speaker,
            text: event.text.to_string(),
            narrated,
        }
    }
}

// =============================================================================
// Indicators and readouts
// =============================================================================

/// Number of lights on the start gantry
pub const START_LIGHTS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceIndicators {
    /// Lit start lights, 0..=5
    pub start_lights: u8,
    pub pit_exit_open: bool,
}

impl RaceIndicators {
    /// All five lights lit means the race is go
    pub fn lights_out(&self) -> bool {
        self.start_lights >= START_LIGHTS
    }
}

/// Aerodynamic load figures shown next to the airflow view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AeroReadout {
    pub drag: i64,
    pub downforce: i64,
}

/// Colour band derived from remaining tyre life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WearBand {
    Good,
    Fair,
    Worn,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TyreReadout {
    pub wear: Percent,
    pub band: WearBand,
    /// Surface temperature in degrees Celsius
    pub surface_temp: i32,
    /// Lap time cost of this tyre's wear, positive when slower
    pub delta: Seconds,
}

/// Point in the 200x200 track map coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the view layer needs, captured between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub running: bool,
    /// Whole seconds on the race clock
    pub race_seconds: u32,
    pub circuit: String,
    pub car_marker: MapPoint,
    pub telemetry: TelemetryState,
    pub lap: LapState,
    pub leaderboard: Vec<CompetitorEntry>,
    /// Completed laps shown on the race distance counter
    pub race_distance: u32,
    /// Whether the timing tower shows its live marker
    pub live_indicator: bool,
    /// Ambient track temperature in degrees Celsius
    pub track_temp: i32,
    pub radio: Vec<EmittedMessage>,
    pub indicators: RaceIndicators,
    pub aero: AeroReadout,
    pub tyres: [TyreReadout; 4],
}

/// Selects which snapshot sections to serialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMask {
    fields: HashSet<String>,
    include_all: bool,
}

impl FieldMask {
    /// Create a mask that includes all sections
    pub fn all() -> Self {
        Self {
            fields: HashSet::new(),
            include_all: true,
        }
    }

    /// Create a mask from a comma-separated list of section names
    pub fn parse(fields: &str) -> Self {
        let fields: HashSet<String> = fields
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            fields,
            include_all: false,
        }
    }

    pub fn builder() -> FieldMaskBuilder {
        FieldMaskBuilder::default()
    }

    pub fn includes(&self, field: &str) -> bool {
        self.include_all || self.fields.contains(&field.to_lowercase())
    }

    pub fn is_all(&self) -> bool {
        self.include_all
    }
}

impl FromStr for FieldMask {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[derive(Debug, Default)]
pub struct FieldMaskBuilder {
    fields: HashSet<String>,
}

impl FieldMaskBuilder {
    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.insert(field.to_lowercase());
        self
    }

    pub fn telemetry(self) -> Self {
        self.with_field("telemetry")
    }

    pub fn lap(self) -> Self {
        self.with_field("lap")
    }

    pub fn leaderboard(self) -> Self {
        self.with_field("leaderboard")
    }

    pub fn radio(self) -> Self {
        self.with_field("radio")
    }

    pub fn build(self) -> FieldMask {
        FieldMask {
            fields: self.fields,
            include_all: false,
        }
    }
}

impl RaceSnapshot {
    /// Serialize this snapshot respecting the given field mask
    ///
    /// `timestamp`, `running`, `race_seconds` and `circuit` are always present.
    pub fn to_json_filtered(&self, mask: Option<&FieldMask>) -> serde_json::Result<String> {
        let mask = match mask {
            Some(m) if !m.is_all() => m,
            _ => return serde_json::to_string(self),
        };

        let mut map = serde_json::Map::new();
        map.insert("timestamp".to_string(), serde_json::to_value(self.timestamp)?);
        map.insert("running".to_string(), serde_json::to_value(self.running)?);
        map.insert(
            "race_seconds".to_string(),
            serde_json::to_value(self.race_seconds)?,
        );
        map.insert("circuit".to_string(), serde_json::to_value(&self.circuit)?);

        let sections: [(&str, serde_json::Value); 11] = [
            ("car_marker", serde_json::to_value(self.car_marker)?),
            ("telemetry", serde_json::to_value(self.telemetry)?),
            ("lap", serde_json::to_value(self.lap)?),
            ("leaderboard", serde_json::to_value(&self.leaderboard)?),
            ("race_distance", serde_json::to_value(self.race_distance)?),
            ("live_indicator", serde_json::to_value(self.live_indicator)?),
            ("track_temp", serde_json::to_value(self.track_temp)?),
            ("radio", serde_json::to_value(&self.radio)?),
            ("indicators", serde_json::to_value(self.indicators)?),
            ("aero", serde_json::to_value(self.aero)?),
            ("tyres", serde_json::to_value(self.tyres)?),
        ];
        for (name, value) in sections {
            if mask.includes(name) {
                map.insert(name.to_string(), value);
            }
        }

        serde_json::to_string(&serde_json::Value::Object(map))
    }
}
