//! Display formatting for timing values

use crate::model::CompetitorEntry;
use serde::{Deserialize, Serialize};

/// Format a lap time as `m:ss.mmm`
///
/// Seconds are zero-padded to six characters including the decimal point,
/// so 65.5 becomes `1:05.500`.
pub fn format_lap_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = seconds % 60.0;
    format!("{}:{:06.3}", mins, secs)
}

/// Format a gap to the leader
///
/// `---` for exactly zero, three decimals under one second, one decimal
/// otherwise.
pub fn format_gap(gap: f64) -> String {
    if gap == 0.0 {
        return "---".to_string();
    }
    let sign = if gap < 0.0 { '-' } else { '+' };
    let magnitude = gap.abs();
    if magnitude < 1.0 {
        format!("{}{:.3}", sign, magnitude)
    } else {
        format!("{}{:.1}", sign, magnitude)
    }
}

/// Format whole race seconds as `m:ss` for the radio log
pub fn format_race_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a tyre's lap time delta with an explicit sign and two decimals
pub fn format_tyre_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{:.2}", delta)
    } else {
        format!("{:.2}", delta)
    }
}

/// A leaderboard entry as shown on the timing tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    pub position: String,
    pub name: String,
    pub team: String,
    pub lap_time: String,
    pub gap: String,
    pub is_player: bool,
}

impl From<&CompetitorEntry> for BoardRow {
    fn from(entry: &CompetitorEntry) -> Self {
        Self {
            position: format!("P{}", entry.position),
            name: entry.name.clone(),
            team: entry.team.clone(),
            lap_time: entry
                .lap_time
                .map(|t| format_lap_time(t.0))
                .unwrap_or_else(|| "--".to_string()),
            gap: format_gap(entry.gap_to_leader.0),
            is_player: entry.is_player,
        }
    }
}
