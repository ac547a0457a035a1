//! Vector utilities (normalization, mirror normals, angles).
//!
//! Every function here is total: degenerate geometry produces the zero
//! vector or `None`, never NaN and never a panic.

use nalgebra::Vector3;

/// Normalize a vector to unit length.
///
/// Returns the exact zero vector when `|v| == 0` instead of dividing by zero,
/// so the output is always either a unit vector or `(0, 0, 0)`.
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let magnitude = v.norm();
    if magnitude > 0.0 {
        v / magnitude
    } else {
        Vector3::zeros()
    }
}

/// True for vectors that cannot represent a mirror orientation: the zero
/// vector, or anything with a non-finite component.
pub fn is_degenerate(v: &Vector3<f64>) -> bool {
    !v.iter().all(|c| c.is_finite()) || v.iter().all(|&c| c == 0.0)
}

/// Unit normal a flat mirror at `mirror_point` needs to reflect `a` toward `b`.
///
/// This is the bisector of the two incidence directions:
///
/// n = normalize(normalize(a - m) + normalize(b - m))
///
/// Symmetric in `a` and `b`. Returns the zero vector when the directions are
/// antiparallel (the sum cancels) or when `a` or `b` coincides with the
/// mirror point.
pub fn mirror_normal(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    mirror_point: &Vector3<f64>,
) -> Vector3<f64> {
    let rel_a = a - mirror_point;
    let rel_b = b - mirror_point;

    // A point sitting on the mirror has no incidence direction
    if is_degenerate(&rel_a) || is_degenerate(&rel_b) {
        return Vector3::zeros();
    }

    normalize(&(normalize(&rel_a) + normalize(&rel_b)))
}

/// Angle in radians between two unit vectors.
///
/// The dot product is clamped to [-1, 1] first: rounding can push it
/// marginally outside, where `acos` is undefined.
pub fn angle_between(query: &Vector3<f64>, datum: &Vector3<f64>) -> f64 {
    datum.dot(query).clamp(-1.0, 1.0).acos()
}

/// Per-element angle between `query` and each vector in `data`.
pub fn angle_between_batch(query: &Vector3<f64>, data: &[Vector3<f64>]) -> Vec<f64> {
    data.iter().map(|datum| angle_between(query, datum)).collect()
}

/// Inverse of [`mirror_normal`]: where on a plane would `a` reflect into `b`?
///
/// `a` and `b` are expressed relative to a plane through the origin with the
/// given normal. `b` is flipped across the plane, and the segment from `a` to
/// the flipped point is intersected with the plane:
///
/// b' = b - 2 n (n·b) / (n·n)
/// t  = -(n·a) / (n·(b' - a))
/// p  = a + t (b' - a)
///
/// Returns `None` when the segment is parallel to the plane (zero or infinitely
/// many solutions) or when the normal is degenerate.
pub fn reflection_point(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    plane_normal: &Vector3<f64>,
) -> Option<Vector3<f64>> {
    if is_degenerate(plane_normal) {
        return None;
    }

    let normal_sq = plane_normal.dot(plane_normal);
    let flipped_b = b - plane_normal * (2.0 * plane_normal.dot(b) / normal_sq);

    let direction = flipped_b - a;
    let t_side = plane_normal.dot(&direction);
    if t_side == 0.0 {
        return None;
    }
    let t = -plane_normal.dot(a) / t_side;

    Some(a + direction * t)
}
