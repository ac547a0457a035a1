//! Core data structures and geometry.
//!
//! This module contains the encode/decode engine:
//! - `Plate`: the grid of mirror cells, with encode and decode
//! - `Cell`: one grid position and its engraved gradients
//! - `SceneRecord` / `Perspective`: what scene sources feed in
//! - Math utilities: normalization, mirror normals, angles
//!
//! Nothing here performs I/O.

mod cell;
pub mod math;
mod plate;
mod scene;
pub mod scenarios;

// Re-export public types
pub use cell::Cell;
pub use math::{angle_between, angle_between_batch, mirror_normal, normalize, reflection_point};
pub use plate::{EncodeStats, Plate, PlateError, DEFAULT_ANGLE_TOLERANCE, SIGHTLINE_MAX_OFFSET};
pub use scenarios::{sine_scenario, spiral_scenario, Scenario};
pub use scene::{Perspective, SceneRecord};
