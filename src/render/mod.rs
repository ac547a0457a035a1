//! Screen-space preview of decoded perspectives.
//!
//! This module turns decode output into plottable data:
//! - Build a screen basis for a camera aimed at the plate centre
//! - Project visible cells and the plate outline onto it
//!
//! No rasterization happens here; consumers plot the points themselves.

pub mod basis;
pub mod frame;

// Re-export
pub use basis::ScreenBasis;
pub use frame::{plate_outline, project_frame, render_frame, Frame};
