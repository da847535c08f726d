//! Screen-space hover resolution
//!
//! Projects star positions the way the point pipeline does and finds the
//! rendered point under the cursor. Screen coordinates are pixels with the
//! origin at the top-left corner, matching winit cursor positions.

use crate::camera::OrbitCamera;

use glam::{Mat4, Vec2, Vec3, Vec4};

/// World to screen projection for one frame
#[derive(Clone, Copy, Debug)]
pub struct ScreenProjector {
    view_proj: Mat4,
    viewport: Vec2,
}

/// A point projected onto the screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub position: Vec2,
    /// Distance along the view axis (clip w)
    pub depth: f32,
}

impl ScreenProjector {
    pub fn new(view_proj: Mat4, viewport: Vec2) -> Self {
        Self { view_proj, viewport }
    }

    pub fn from_camera(camera: &OrbitCamera, width: f32, height: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self::new(camera.view_proj(aspect), Vec2::new(width, height))
    }

    /// `None` for points behind the camera or outside the depth range
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
        if !(clip.w > 0.0) {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x * 0.5 + 0.5) * self.viewport.x;
        let screen_y = (1.0 - (ndc.y * 0.5 + 0.5)) * self.viewport.y;
        Some(ScreenPoint {
            position: Vec2::new(screen_x, screen_y),
            depth: clip.w,
        })
    }
}

/// Index of the star under `cursor`, if any.
///
/// `positions` is the flat xyz array of `StarBuffers`. Among points whose
/// projected centre lies within `radius` pixels, the one nearest the camera
/// wins; equal depths keep the lower index.
pub fn pick_nearest(
    positions: &[f32],
    projector: &ScreenProjector,
    cursor: Vec2,
    radius: f32,
) -> Option<usize> {
    let radius_sq = radius * radius;
    let mut best: Option<(usize, f32)> = None;

    for (i, p) in positions.chunks_exact(3).enumerate() {
        let Some(point) = projector.project(Vec3::new(p[0], p[1], p[2])) else {
            continue;
        };
        if point.position.distance_squared(cursor) > radius_sq {
            continue;
        }
        match best {
            Some((_, depth)) if depth <= point.depth => {}
            _ => best = Some((i, point.depth)),
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn projector() -> ScreenProjector {
        ScreenProjector::from_camera(&OrbitCamera::default(), 800.0, 600.0)
    }

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let point = projector().project(Vec3::ZERO).unwrap();
        assert_relative_eq!(point.position.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(point.position.y, 300.0, epsilon = 1e-3);
        assert_relative_eq!(point.depth, 4000.0, epsilon = 1e-1);
    }

    #[test]
    fn test_screen_y_points_down() {
        let above = projector().project(Vec3::new(0.0, 100.0, 0.0)).unwrap();
        assert!(above.position.y < 300.0);
    }

    #[test]
    fn test_behind_camera_is_culled() {
        assert!(projector().project(Vec3::new(0.0, 0.0, 5000.0)).is_none());
    }

    #[test]
    fn test_pick_within_radius() {
        let positions = [0.0, 0.0, 0.0, 1000.0, 0.0, 0.0];
        let projector = projector();
        assert_eq!(pick_nearest(&positions, &projector, Vec2::new(403.0, 298.0), 8.0), Some(0));
        assert_eq!(pick_nearest(&positions, &projector, Vec2::new(100.0, 100.0), 8.0), None);
    }

    #[test]
    fn test_pick_prefers_nearer_star() {
        // Same line of sight, second star closer to the camera
        let positions = [0.0, 0.0, 0.0, 0.0, 0.0, 2000.0];
        let hit = pick_nearest(&positions, &projector(), Vec2::new(400.0, 300.0), 8.0);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_pick_tie_keeps_lower_index() {
        let positions = [5.0, 0.0, 0.0, 5.0, 0.0, 0.0];
        let hit = pick_nearest(&positions, &projector(), Vec2::new(400.0, 300.0), 8.0);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_pick_empty() {
        assert_eq!(pick_nearest(&[], &projector(), Vec2::new(400.0, 300.0), 8.0), None);
    }
}
