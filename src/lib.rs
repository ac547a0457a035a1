//! # mirror-plate: Reflective plate encoding in Rust
//!
//! This crate simulates a flat plate of tiny mirrors that can be engraved
//! with directional information from many 3D scenes, then queried from any
//! viewpoint to find which cells would glint toward that viewer. It works
//! like a lenticular or holographic surface, built entirely from vector
//! geometry and single-bounce specular reflection.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - `core`: The plate, its cells, the encode/decode engine, and vector math
//! - `render`: Screen-space projection of decoded perspectives
//! - `io`: Export of decoded frames (JSON) and engraved cells (PLY)
//! - `config`: Demo configuration (JSON with defaults)
//! - `util`: Timing helpers
//!
//! ## Encode / decode
//!
//! 1. A scene source yields `(light, camera, keypoints)` records
//! 2. `Plate::encode` traces each keypoint's sightline to a cell and stores
//!    the mirror normal that cell needs to bounce the light into the camera
//! 3. `Plate::decode` scans every cell for a stored normal matching a new
//!    `(light, camera)` pair within an angular tolerance
//!
//! Occlusion is not modelled: a cell may hold contradictory gradients.

// Core data structures and geometry
pub mod core;

// Screen-space preview of decode output
pub mod render;

// Export of frames and engraved cells
pub mod io;

// Demo configuration
pub mod config;

// Timing helpers
pub mod util;

// Re-export commonly used types at crate root for convenience
pub use crate::core::{Cell, EncodeStats, Perspective, Plate, PlateError, SceneRecord};
pub use crate::io::ExportError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
