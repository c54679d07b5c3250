//! Wireframe cube drawn straight onto the egui painter, oriented by the
//! animator-driven vantage.

use egui::{Color32, Pos2, Rect, Stroke};
use viewer::Quat;

const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Perspective distance of the virtual camera, in cube half-widths.
const CAMERA_DISTANCE: f32 = 4.0;

/// Project a rotated corner into the target rect.
fn project(rect: Rect, v: [f32; 3]) -> Pos2 {
    let scale = rect.width().min(rect.height()) * 0.25;
    let depth = CAMERA_DISTANCE - v[2];
    let f = CAMERA_DISTANCE / depth.max(0.5);
    Pos2::new(
        rect.center().x + v[0] * f * scale,
        rect.center().y - v[1] * f * scale,
    )
}

pub fn draw(painter: &egui::Painter, rect: Rect, orientation: Quat) {
    let projected: Vec<Pos2> = CORNERS
        .iter()
        .map(|&corner| project(rect, orientation.rotate(corner)))
        .collect();

    let stroke = Stroke::new(2.0, Color32::from_rgb(220, 220, 230));
    for (a, b) in EDGES {
        painter.line_segment([projected[a], projected[b]], stroke);
    }
}
