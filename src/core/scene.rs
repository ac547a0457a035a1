//! Encode/decode protocol types.
//!
//! A scene source yields [`SceneRecord`]s for encoding; decoding is driven by
//! a bare [`Perspective`] (no keypoints).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A light/camera pair viewing the plate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    /// Point light position
    pub source: Vector3<f64>,

    /// Camera position
    pub camera: Vector3<f64>,
}

impl Perspective {
    pub fn new(source: Vector3<f64>, camera: Vector3<f64>) -> Self {
        Self { source, camera }
    }

    /// Light co-located with the viewer.
    pub fn following_light(camera: Vector3<f64>) -> Self {
        Self {
            source: camera,
            camera,
        }
    }
}

/// One frame of encode input: a perspective plus the keypoints visible from it.
///
/// Source and camera should sit on the viewing side of the plate (negative z)
/// for keypoints to land on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Point light position
    pub source: Vector3<f64>,

    /// Camera position
    pub camera: Vector3<f64>,

    /// World-space keypoints seen from this perspective (may be empty)
    pub keypoints: Vec<Vector3<f64>>,
}

impl SceneRecord {
    pub fn new(source: Vector3<f64>, camera: Vector3<f64>, keypoints: Vec<Vector3<f64>>) -> Self {
        Self {
            source,
            camera,
            keypoints,
        }
    }

    pub fn perspective(&self) -> Perspective {
        Perspective::new(self.source, self.camera)
    }
}

impl From<(Vector3<f64>, Vector3<f64>, Vec<Vector3<f64>>)> for SceneRecord {
    fn from((source, camera, keypoints): (Vector3<f64>, Vector3<f64>, Vec<Vector3<f64>>)) -> Self {
        Self::new(source, camera, keypoints)
    }
}
