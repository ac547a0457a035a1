//! Demo configuration.
//!
//! Loaded from an optional JSON file; any missing field falls back to the
//! default demo setup (a 41x41 plate spanning -20..=20, spiral scenario).

use crate::core::{Plate, PlateError, Scenario, DEFAULT_ANGLE_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Angle tolerance must be a finite, non-negative number of radians, got {0}")]
    InvalidTolerance(f64),
}

/// Plate placement and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    pub start_x: i64,
    pub start_y: i64,
    pub size_x: i64,
    pub size_y: i64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            start_x: -20,
            start_y: -20,
            size_x: 41,
            size_y: 41,
        }
    }
}

impl PlateConfig {
    pub fn build(&self) -> Result<Plate, PlateError> {
        Plate::new(self.start_x, self.start_y, self.size_x, self.size_y)
    }
}

/// Everything the demo binary needs to run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub plate: PlateConfig,

    /// Scene source to encode and replay
    pub scenario: Scenario,

    /// Decode tolerance in radians
    pub angle_tolerance: f64,

    /// Use the rayon encode/decode paths
    pub parallel: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            plate: PlateConfig::default(),
            scenario: Scenario::default(),
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            parallel: false,
        }
    }
}

impl DemoConfig {
    /// Load a config file, filling unspecified fields with defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.angle_tolerance.is_finite() || self.angle_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.angle_tolerance));
        }
        Ok(())
    }
}
