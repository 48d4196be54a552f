//! Tyre readouts derived from wear

use cockpit_core::{
    model::{TireWear, TyreReadout, WearBand},
    random::TargetSource,
    units::{Percent, Seconds},
};

const BASE_SURFACE_TEMP: f64 = 85.0;
const TEMP_JITTER: f64 = 10.0;

pub fn wear_band(wear: Percent) -> WearBand {
    match wear.0 {
        w if w > 70.0 => WearBand::Good,
        w if w > 40.0 => WearBand::Fair,
        w if w > 20.0 => WearBand::Worn,
        _ => WearBand::Critical,
    }
}

/// Surface temperature rises as the tyre wears, plus up to 10 degrees of noise
pub fn surface_temp(wear: Percent, jitter: &mut dyn TargetSource) -> i32 {
    let temp = BASE_SURFACE_TEMP + (100.0 - wear.0) * 0.3 + jitter.uniform(0.0, TEMP_JITTER);
    temp.round() as i32
}

/// Lap time lost to wear, two hundredths per percent, plus up to a quarter
/// second of noise either way
pub fn lap_delta(wear: Percent, jitter: &mut dyn TargetSource) -> Seconds {
    Seconds((100.0 - wear.0) * 0.02 + jitter.uniform(-0.25, 0.25))
}

/// Readouts in FL, FR, RL, RR order
///
/// All four temperatures are drawn before any delta.
pub fn readouts(wear: &TireWear, jitter: &mut dyn TargetSource) -> [TyreReadout; 4] {
    let wear = wear.as_array();
    let temps = wear.map(|w| surface_temp(w, jitter));
    let deltas = wear.map(|w| lap_delta(w, jitter));
    std::array::from_fn(|i| TyreReadout {
        wear: wear[i],
        band: wear_band(wear[i]),
        surface_temp: temps[i],
        delta: deltas[i],
    })
}

/// Ambient track temperature between 80 and 100 degrees
pub fn track_temp(source: &mut dyn TargetSource) -> i32 {
    (80.0 + source.next_unit() * 20.0).round() as i32
}
