//! Demonstration scene sources.
//!
//! Both scenarios orbit a "following light" (source co-located with the
//! camera) around the y-axis at radius 50, sweeping 1° to 177° in 4° steps
//! with a slight vertical swing. Frames are produced lazily.

use crate::core::scene::SceneRecord;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Orbit radius of the camera around the plate
const ORBIT_RADIUS: f64 = 50.0;

/// Vertical swing amplitude, breaks orthographic ambiguity
const ORBIT_SWING: f64 = 10.0;

/// Frame indices in degrees: 0, 4, ..., 176
const FRAME_STEP: usize = 4;
const FRAME_END: usize = 179;

/// Number of frames every scenario yields.
pub const SCENARIO_FRAMES: usize = (FRAME_END + FRAME_STEP - 1) / FRAME_STEP;

/// Built-in scene sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Spiral drilling from depth 10 up to the plate surface
    #[default]
    Spiral,

    /// Animated sine wave deep behind the plate, plus four surface markers
    Sine,
}

impl Scenario {
    /// Lazily generate this scenario's frames.
    pub fn records(self) -> Box<dyn Iterator<Item = SceneRecord> + Send> {
        match self {
            Scenario::Spiral => Box::new(spiral_scenario()),
            Scenario::Sine => Box::new(sine_scenario()),
        }
    }
}

/// Camera (and light) position for a frame index in degrees.
fn orbit_position(frame_i: usize) -> Vector3<f64> {
    let angle = (frame_i + 1) as f64 * PI / 180.0;
    Vector3::new(
        ORBIT_RADIUS * angle.cos(),
        ORBIT_SWING * angle.sin(),
        -ORBIT_RADIUS * angle.sin(),
    )
}

fn frames() -> impl Iterator<Item = usize> {
    (0..FRAME_END).step_by(FRAME_STEP)
}

/// A spiral that rotates as the camera orbits.
///
/// 91 keypoints per frame, from radius 10 at the plate surface (depth 0)
/// down to the axis at depth 90, three turns per 90 depth.
pub fn spiral_scenario() -> impl Iterator<Item = SceneRecord> {
    frames().map(|frame_i| {
        let camera = orbit_position(frame_i);
        let t = (frame_i + 1) as f64 / 45.0;

        let keypoints = (0..=90)
            .map(|depth| {
                let depth = depth as f64;
                let depth_t = t - depth / 30.0;
                let radius = 10.0 - depth / 9.0;
                let phase = 2.0 * PI * depth_t;
                Vector3::new(radius * phase.cos(), radius * phase.sin(), depth)
            })
            .collect();

        SceneRecord::new(camera, camera, keypoints)
    })
}

/// A travelling sine wave at depth 100 with corner markers on the surface.
pub fn sine_scenario() -> impl Iterator<Item = SceneRecord> {
    frames().map(|frame_i| {
        let camera = orbit_position(frame_i);
        let t = (frame_i + 1) as f64 / 4.0;

        let markers = [(-15.0, -15.0), (15.0, 15.0), (-15.0, 15.0), (15.0, -15.0)]
            .into_iter()
            .map(|(x, y)| Vector3::new(x, y, 0.0));
        let wave = (-20..=20).map(move |i| {
            let i = i as f64;
            Vector3::new(i * 2.0, 10.0 * (t - i / 4.0).sin(), 100.0)
        });

        SceneRecord::new(camera, camera, markers.chain(wave).collect())
    })
}
