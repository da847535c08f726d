//! Viewer configuration (JSON file, every field optional)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position; the orbit target is the origin
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 4000.0],
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 50_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Base URL of the star query service
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub camera: CameraConfig,
    /// Cursor distance (pixels) within which a star counts as hovered
    pub pick_radius_px: f32,
    /// Base sprite size, scaled per star
    pub point_size: f32,
    pub point_opacity: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 60,
            camera: CameraConfig::default(),
            pick_radius_px: 8.0,
            point_size: 5.0,
            point_opacity: 0.9,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read viewer config: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse viewer config JSON: {}", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
