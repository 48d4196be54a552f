//! Aerodynamic readouts and airflow streamlines
//!
//! Cosmetic figures for the airflow panel. None of this feeds back into the
//! telemetry engine.

use cockpit_core::{model::AeroReadout, units::Kph};
use std::f64::consts::PI;

const DRS_DRAG_FACTOR: f64 = 0.7;

// Car body in the 100x100 airflow view
const CAR_START_X: f64 = 35.0;
const CAR_END_X: f64 = 65.0;
const SAMPLE_STEP: usize = 2;

pub fn readout(speed: Kph, drs_open: bool) -> AeroReadout {
    let v2 = speed.0 * speed.0;
    let drag_multiplier = if drs_open { DRS_DRAG_FACTOR } else { 1.0 };
    AeroReadout {
        drag: (v2 * drag_multiplier * 0.01).round() as i64,
        downforce: (v2 * 1.2).round() as i64,
    }
}

/// Deflection of a streamline at height `y` crossing the car body
fn body_deflection(y: f64, progress: f64, drs_open: bool) -> f64 {
    let bump = (progress * PI).sin();
    if y < 35.0 {
        // over the car
        -bump * if drs_open { 15.0 } else { 22.0 }
    } else if y < 50.0 {
        -bump * if drs_open { 8.0 } else { 12.0 }
    } else if y < 65.0 {
        // through the sidepods
        bump * 3.0
    } else {
        // under the floor
        bump * 18.0
    }
}

/// Points of streamline `index` out of `total` at animation time `time`
///
/// Returns 51 points at x = 0, 2, .., 100.
pub fn streamline(
    index: usize,
    total: usize,
    time: f64,
    speed: Kph,
    drs_open: bool,
) -> Vec<(f64, f64)> {
    let total = total.max(1) as f64;
    let base_y = 15.0 + (index as f64 / total) * 70.0;
    let flow = time * (speed.0 / 300.0) * 150.0;

    (0..=100)
        .step_by(SAMPLE_STEP)
        .map(|x| {
            let x = x as f64;
            let mut y = base_y;
            if (CAR_START_X..=CAR_END_X).contains(&x) {
                let progress = (x - CAR_START_X) / (CAR_END_X - CAR_START_X);
                y += body_deflection(base_y, progress, drs_open);
            }
            if x > CAR_END_X {
                let wake = (x - CAR_END_X) / (100.0 - CAR_END_X);
                let amplitude = if drs_open { 2.0 } else { 4.0 };
                y += (flow + index as f64 * 0.5).sin() * amplitude * (1.0 - wake);
            }
            (x, y)
        })
        .collect()
}

/// SVG path data (`M x,y L x,y ...`) for a streamline
pub fn streamline_path(points: &[(f64, f64)]) -> String {
    let joined: Vec<String> = points.iter().map(|(x, y)| format!("{},{}", x, y)).collect();
    format!("M {}", joined.join(" L "))
}
