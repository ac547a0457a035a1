//! Screen-space basis for a camera looking at the plate centre.

use crate::core::normalize;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Orthonormal screen axes for a camera aimed at the world origin.
///
/// Points are projected orthographically (dot product onto each axis), which
/// is all the decode preview needs: the plate is flat and small relative to
/// the camera distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenBasis {
    /// Screen right
    pub x: Vector3<f64>,

    /// Screen up
    pub y: Vector3<f64>,
}

impl ScreenBasis {
    /// Build the basis for a camera at `camera` looking at `(0, 0, 0)`.
    ///
    /// Screen up is the steepest +y direction on the view plane:
    /// x = normalize(up × n), y = normalize(n × x), with n the view normal.
    /// When looking straight along y there is no such direction, so x is the
    /// world x-axis and y follows the world z-axis.
    pub fn facing_origin(camera: &Vector3<f64>) -> Self {
        let view_normal = normalize(&(-camera));

        if view_normal.x == 0.0 && view_normal.z == 0.0 {
            return Self {
                x: Vector3::new(1.0, 0.0, 0.0),
                y: Vector3::new(0.0, 0.0, -view_normal.y),
            };
        }

        let x = Vector3::y().cross(&view_normal);
        let y = view_normal.cross(&x);
        Self {
            x: normalize(&x),
            y: normalize(&y),
        }
    }

    /// Project a world point onto the screen axes.
    pub fn project(&self, point: &Vector3<f64>) -> Vector2<f64> {
        Vector2::new(point.dot(&self.x), point.dot(&self.y))
    }
}
