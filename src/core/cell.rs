//! A single mirror cell on the plate.
//!
//! A cell has a fixed integer position on the plate plane and an append-only
//! list of engraved gradients (unit mirror normals). Gradients are never
//! removed or rewritten; encoding only ever adds to them.

use crate::core::math::{angle_between, is_degenerate};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One grid position of the plate with its engraved mirror gradients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Integer world position, always on z = 0
    coords: Vector3<i64>,

    /// Engraved unit mirror normals, in encode order.
    /// Order carries no meaning for decoding.
    gradients: Vec<Vector3<f64>>,
}

impl Cell {
    pub(crate) fn new(x: i64, y: i64) -> Self {
        Self {
            coords: Vector3::new(x, y, 0),
            gradients: Vec::new(),
        }
    }

    /// Integer grid position in world space.
    pub fn coords(&self) -> Vector3<i64> {
        self.coords
    }

    /// The cell's position as a floating-point world point.
    pub fn position(&self) -> Vector3<f64> {
        self.coords.map(|c| c as f64)
    }

    /// All gradients engraved so far.
    pub fn gradients(&self) -> &[Vector3<f64>] {
        &self.gradients
    }

    pub fn gradient_count(&self) -> usize {
        self.gradients.len()
    }

    pub(crate) fn push_gradient(&mut self, gradient: Vector3<f64>) {
        self.gradients.push(gradient);
    }

    pub(crate) fn extend_gradients(&mut self, gradients: impl IntoIterator<Item = Vector3<f64>>) {
        self.gradients.extend(gradients);
    }

    /// Does any engraved gradient lie within `tolerance` radians of `expected`?
    ///
    /// An empty cell never reflects, and neither does a degenerate `expected`
    /// (no mirror orientation exists for that perspective at this cell).
    /// Degenerate stored gradients are skipped.
    pub fn reflects(&self, expected: &Vector3<f64>, tolerance: f64) -> bool {
        if is_degenerate(expected) {
            return false;
        }

        self.gradients
            .iter()
            .filter(|g| !is_degenerate(g))
            .any(|g| angle_between(expected, g) <= tolerance)
    }
}
