//! I/O operations for exporting plate output.
//!
//! This module handles all file export:
//! - Decoded frames as JSON (for plotting)
//! - Engraved cells as PLY (for point-cloud viewers)
//!
//! Persisting plate gradients for later decoding is not supported.

mod frames;
mod ply;

// Re-export public types and functions
pub use frames::{load_frames, save_frames, ExportError};
pub use ply::save_engraved_ply;
