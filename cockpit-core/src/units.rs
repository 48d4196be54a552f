//! Type-safe wrappers for the dashboard's units
//!
//! Newtype wrappers around f64 so speed, engine speed, charge levels and
//! angles cannot be mixed up inside the simulation.
//!
//! All unit types serialize with 4 decimal places to reduce JSON payload size.

use serde::{Deserialize, Serialize};

/// Round f64 to 4 decimal places for compact JSON serialization
fn round4<S: serde::Serializer>(val: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((*val * 10000.0).round() / 10000.0)
}

/// Kilometres per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Kph(#[serde(serialize_with = "round4")] pub f64);

/// Revolutions per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Rpm(#[serde(serialize_with = "round4")] pub f64);

/// Percentage on a 0 to 100 scale (fuel, tyre life, ERS charge)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(#[serde(serialize_with = "round4")] pub f64);

impl Percent {
    pub const FULL: Percent = Percent(100.0);
    pub const EMPTY: Percent = Percent(0.0);

    /// Create a new percentage, clamping to [0.0, 100.0]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Remove `amount`, flooring at zero
    pub fn drain(self, amount: f64) -> Self {
        Self((self.0 - amount).max(0.0))
    }

    /// Add `amount`, capping at one hundred
    pub fn charge(self, amount: f64) -> Self {
        Self((self.0 + amount).min(100.0))
    }

    /// Get as a fraction (0.0 to 1.0)
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::FULL
    }
}

/// Seconds (lap times, gaps, elapsed race time)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(#[serde(serialize_with = "round4")] pub f64);

/// Degrees around the track map
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Degrees(#[serde(serialize_with = "round4")] pub f64);

impl Degrees {
    /// Advance by `step`, wrapping into [0, 360)
    pub fn advance(self, step: f64) -> Self {
        Self((self.0 + step).rem_euclid(360.0))
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}
