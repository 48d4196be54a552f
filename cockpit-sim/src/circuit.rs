//! Circuit catalogue and track map geometry

use cockpit_core::{model::MapPoint, units::Degrees};
use serde::Serialize;

/// Centre of the 200x200 map the car marker rotates around
pub const MAP_CENTRE: MapPoint = MapPoint { x: 100.0, y: 100.0 };

pub const DEFAULT_CIRCUIT: &str = "monaco";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circuit {
    pub id: &'static str,
    pub name: &'static str,
    /// ISO 3166 country code
    pub country: &'static str,
    pub length_km: f64,
    pub turns: u32,
    pub lap_record: &'static str,
    /// SVG path data for the outline
    pub track_path: &'static str,
    pub view_box: &'static str,
    pub start_position: MapPoint,
}

const fn at(x: f64, y: f64) -> MapPoint {
    MapPoint { x, y }
}

pub static CIRCUITS: [Circuit; 6] = [
    Circuit {
        id: "monaco",
        name: "Monaco",
        country: "MC",
        length_km: 3.337,
        turns: 19,
        lap_record: "1:12.909",
        track_path: "M 150 30 L 170 30 Q 180 30 180 40 L 180 70 Q 180 90 160 100 L 140 110 L 120 120 L 110 140 L 100 160 L 85 180 L 65 185 L 45 180 L 25 170 L 15 150 L 20 130 L 30 110 L 50 100 L 70 90 L 90 80 L 110 70 L 120 60 L 130 50 L 145 35 L 150 30",
        view_box: "0 0 200 200",
        start_position: at(150.0, 30.0),
    },
    Circuit {
        id: "silverstone",
        name: "Silverstone",
        country: "GB",
        length_km: 5.891,
        turns: 18,
        lap_record: "1:27.097",
        track_path: "M 60 50 L 80 45 Q 100 40 120 45 L 140 50 Q 155 60 155 80 Q 150 100 130 110 Q 110 120 90 115 Q 70 110 60 130 Q 55 150 65 170 Q 75 180 50 175 Q 30 170 25 150 Q 30 130 45 110 Q 60 90 70 75 Q 55 60 60 50",
        view_box: "0 0 200 200",
        start_position: at(60.0, 50.0),
    },
    Circuit {
        id: "spa",
        name: "Spa-Francorchamps",
        country: "BE",
        length_km: 7.004,
        turns: 19,
        lap_record: "1:46.286",
        track_path: "M 100 25 L 140 50 L 165 85 L 165 120 L 145 155 L 95 170 L 55 165 L 35 140 L 25 115 L 40 85 L 60 65 L 80 50 L 95 35 L 100 25",
        view_box: "0 0 200 200",
        start_position: at(100.0, 25.0),
    },
    Circuit {
        id: "monza",
        name: "Monza",
        country: "IT",
        length_km: 5.793,
        turns: 11,
        lap_record: "1:21.046",
        track_path: "M 60 60 L 140 55 L 155 70 L 155 100 L 140 130 L 100 140 L 60 130 L 45 100 L 50 70 L 65 62 L 60 60",
        view_box: "0 0 200 200",
        start_position: at(60.0, 60.0),
    },
    Circuit {
        id: "suzuka",
        name: "Suzuka",
        country: "JP",
        length_km: 5.807,
        turns: 18,
        lap_record: "1:30.983",
        track_path: "M 90 50 C 110 45 140 50 155 70 C 165 90 160 115 140 130 C 115 145 85 140 70 115 C 60 95 70 75 90 65 C 105 55 90 55 90 50 M 100 100 Q 80 100 70 100 Q 60 105 60 115 Q 65 125 75 135 Q 95 140 110 135 Q 125 130 125 115 Q 120 105 110 105 Q 100 100 100 100",
        view_box: "0 0 200 200",
        start_position: at(90.0, 50.0),
    },
    Circuit {
        id: "interlagos",
        name: "Interlagos",
        country: "BR",
        length_km: 4.309,
        turns: 15,
        lap_record: "1:10.540",
        track_path: "M 80 60 Q 100 55 125 65 Q 150 80 145 105 Q 135 130 110 140 Q 85 145 60 130 Q 45 110 55 85 Q 70 65 80 60 M 90 110 Q 85 115 75 115 Q 70 115 70 120 Q 75 125 85 125 Q 95 120 90 110",
        view_box: "0 0 200 200",
        start_position: at(80.0, 60.0),
    },
];

/// Look up a circuit by id
pub fn find(id: &str) -> Option<&'static Circuit> {
    CIRCUITS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// Look up a circuit by id, falling back to Monaco for unknown ids
pub fn lookup(id: &str) -> &'static Circuit {
    find(id).unwrap_or(&CIRCUITS[0])
}

/// Where the car marker sits after rotating `angle` around the map centre
///
/// Matches an SVG `rotate(angle 100 100)` applied to the start position:
/// positive angles turn clockwise on screen.
pub fn car_marker(circuit: &Circuit, angle: Degrees) -> MapPoint {
    let (sin, cos) = angle.to_radians().sin_cos();
    let dx = circuit.start_position.x - MAP_CENTRE.x;
    let dy = circuit.start_position.y - MAP_CENTRE.y;
    MapPoint {
        x: MAP_CENTRE.x + dx * cos - dy * sin,
        y: MAP_CENTRE.y + dx * sin + dy * cos,
    }
}
