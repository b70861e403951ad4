//! Editor configuration loaded from JSON

use crate::camera::ViewCameraConfig;
use crate::display::DisplaySettings;
use serde::{Deserialize, Serialize};
use sparsedit_core::{Error, Result};
use sparsedit_io::TextReadOptions;
use std::path::Path;

/// Settings for an [`EditorSession`](crate::EditorSession).
///
/// Every section is optional in the JSON document; missing values take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub display: DisplaySettings,
    pub camera: ViewCameraConfig,
    pub import: TextReadOptions,
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading editor config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject values the viewer cannot work with
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(Error::Config(format!(
                "field of view must be within (0, 180) degrees, got {}",
                camera.fov_y_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(Error::Config(format!(
                "clip planes must satisfy 0 < near < far, got near {} far {}",
                camera.near, camera.far
            )));
        }
        if !(self.display.point_size > 0.0) {
            return Err(Error::Config(format!(
                "point size must be positive, got {}",
                self.display.point_size
            )));
        }
        if !(self.display.camera_scale > 0.0) {
            return Err(Error::Config(format!(
                "camera scale must be positive, got {}",
                self.display.camera_scale
            )));
        }
        Ok(())
    }
}
