//! Orbit camera around a target point
//!
//! Left drag rotates, right drag pans, the wheel zooms. Scene units are light
//! years, so f32 is enough precision everywhere.

use crate::config::CameraConfig;

use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Radians per pixel of drag
const ROTATE_SENSITIVITY: f32 = 0.005;
/// Distance factor per wheel notch
const ZOOM_STEP: f32 = 0.9;
const MIN_DISTANCE: f32 = 1.0;

pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    yaw: f32,
    pitch: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let eye = Vec3::from(config.position);
        let distance = eye.length().max(MIN_DISTANCE);
        let dir = if eye.length_squared() > 0.0 { eye / eye.length() } else { Vec3::Z };

        Self {
            target: Vec3::ZERO,
            distance,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            yaw: dir.x.atan2(dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
        }
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Orbit by a mouse delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ROTATE_SENSITIVITY;
        self.pitch += dy * ROTATE_SENSITIVITY;

        // Stay off the poles so `look_at` keeps a valid up vector
        self.pitch = self.pitch.clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }

    /// Move the target in the view plane; the point under the cursor follows it
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let world_per_pixel = 2.0 * self.distance * (self.fov_y / 2.0).tan() / viewport_height;
        self.target += (self.up() * dy - self.right() * dx) * world_per_pixel;
    }

    /// Positive `notches` move closer
    pub fn zoom(&mut self, notches: f32) {
        let max_distance = self.far.max(MIN_DISTANCE);
        self.distance = (self.distance * ZOOM_STEP.powf(notches))
            .max(MIN_DISTANCE)
            .min(max_distance);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Perspective projection, depth mapped to [0, 1]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-6), self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}
