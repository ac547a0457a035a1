//! Decoded perspectives projected to screen space.

use crate::core::{Perspective, Plate};
use crate::render::basis::ScreenBasis;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// One decoded perspective, ready for plotting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Light and camera this frame was decoded for
    pub perspective: Perspective,

    /// Plate bounding box in screen space, closed (first point repeated)
    pub outline: Vec<Vector2<f64>>,

    /// Visible cells in world space
    pub cells: Vec<Vector3<i64>>,

    /// Visible cells in screen space, parallel to `cells`
    pub points: Vec<Vector2<f64>>,
}

impl Frame {
    pub fn visible_count(&self) -> usize {
        self.cells.len()
    }
}

/// Closed plate outline through its corner cells.
pub fn plate_outline(plate: &Plate) -> [Vector3<f64>; 5] {
    let [a, b, c, d] = plate.corners().map(|corner| corner.map(|v| v as f64));
    [a, b, c, d, a]
}

/// Decode `perspective` and project the visible cells onto the camera's screen.
pub fn render_frame(plate: &Plate, perspective: &Perspective, angle_tolerance: f64) -> Frame {
    let cells = plate.decode(&perspective.source, &perspective.camera, angle_tolerance);
    project_frame(plate, perspective, cells)
}

/// Project already-decoded cells onto the camera's screen.
pub fn project_frame(plate: &Plate, perspective: &Perspective, cells: Vec<Vector3<i64>>) -> Frame {
    let basis = ScreenBasis::facing_origin(&perspective.camera);

    let points = cells
        .iter()
        .map(|cell| basis.project(&cell.map(|v| v as f64)))
        .collect();
    let outline = plate_outline(plate)
        .iter()
        .map(|corner| basis.project(corner))
        .collect();

    Frame {
        perspective: *perspective,
        outline,
        cells,
        points,
    }
}
