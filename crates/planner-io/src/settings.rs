use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("grid_size must be positive, got {0}")]
    InvalidGridSize(f64),

    #[error("collision_epsilon must be in (0, 0.5), got {0}")]
    InvalidCollisionEpsilon(f64),
}

/// Editor tuning, stored as JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Scene pixels per grid unit.
    pub grid_size: f64,
    /// Grid offset applied to pasted buildings.
    pub paste_offset: [i64; 2],
    /// Inward adjustment of footprints before overlap tests, in grid units.
    pub collision_epsilon: f64,
    /// Opacity of the placement preview.
    pub preview_opacity: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: 16.0,
            paste_offset: [4, 4],
            collision_epsilon: 0.01,
            preview_opacity: 0.4,
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(SettingsError::InvalidGridSize(self.grid_size));
        }
        // Below half the thinnest possible footprint (one grid unit).
        if !(self.collision_epsilon > 0.0 && self.collision_epsilon < 0.5) {
            return Err(SettingsError::InvalidCollisionEpsilon(self.collision_epsilon));
        }
        Ok(())
    }
}
