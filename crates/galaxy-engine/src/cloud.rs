//! Star cloud: buffers for the current star set plus hover state

use crate::buffers::StarBuffers;
use crate::picking::{pick_nearest, ScreenProjector};
use crate::state::StarSet;

use galaxy_core::StarRecord;

use glam::Vec2;
use std::sync::Arc;

/// CPU side of the point cloud.
///
/// Buffers are rebuilt only when the star set is replaced, never per frame.
/// The records they were built from are kept alongside so a buffer index can
/// always be mapped back to its star.
#[derive(Default)]
pub struct StarCloud {
    built: Option<(u64, usize)>,
    records: Arc<[StarRecord]>,
    buffers: StarBuffers,
    hovered: Option<usize>,
}

impl StarCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild if `set` differs from what was last built. Returns true on rebuild.
    pub fn sync(&mut self, set: &StarSet) -> bool {
        let key = (set.revision(), set.len());
        if self.built == Some(key) {
            return false;
        }

        self.records = set.shared();
        self.buffers = StarBuffers::build(&self.records);
        self.built = Some(key);
        self.hovered = None;

        tracing::debug!(revision = key.0, stars = key.1, "Rebuilt star buffers");
        true
    }

    pub fn buffers(&self) -> &StarBuffers {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pointer moved; `index` is the point under it, if any.
    /// Returns true when the hovered star changed.
    pub fn pointer_move(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.records.len());
        let changed = self.hovered != index;
        self.hovered = index;
        changed
    }

    /// Pointer left the surface
    pub fn pointer_left(&mut self) -> bool {
        self.pointer_move(None)
    }

    /// Resolve the cursor against the current buffers and update hover
    pub fn hover_at(&mut self, projector: &ScreenProjector, cursor: Vec2, radius: f32) -> bool {
        let index = pick_nearest(&self.buffers.positions, projector, cursor, radius);
        self.pointer_move(index)
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered(&self) -> Option<&StarRecord> {
        self.hovered.and_then(|i| self.records.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use crate::state::AppState;

    fn loaded(stars: Vec<StarRecord>) -> AppState {
        let mut state = AppState::new();
        let count = stars.len();
        state.replace_stars(stars, count);
        state
    }

    fn sample() -> Vec<StarRecord> {
        vec![
            StarRecord::new("a", 0.0, 0.0, 0.0).with_magnitude(4.0),
            StarRecord::new("b", 500.0, 0.0, 0.0),
            StarRecord::new("c", 0.0, 500.0, 0.0).with_distance(500.0),
        ]
    }

    #[test]
    fn test_sync_rebuilds_once_per_set() {
        let state = loaded(sample());
        let mut cloud = StarCloud::new();

        assert!(cloud.sync(state.stars()));
        assert!(!cloud.sync(state.stars()));
        assert_eq!(cloud.buffers().len(), 3);
    }

    #[test]
    fn test_sync_after_replacement() {
        let mut state = loaded(sample());
        let mut cloud = StarCloud::new();
        cloud.sync(state.stars());
        cloud.pointer_move(Some(1));

        state.replace_stars(vec![StarRecord::new("z", 1.0, 1.0, 1.0)], 1);
        assert!(cloud.sync(state.stars()));
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud.hovered(), None);
    }

    #[test]
    fn test_empty_set_builds_empty_buffers() {
        let state = loaded(Vec::new());
        let mut cloud = StarCloud::new();
        assert!(cloud.sync(state.stars()));
        assert!(cloud.buffers().is_empty());
        assert!(!cloud.pointer_move(Some(0)));
        assert_eq!(cloud.hovered(), None);
    }

    #[test]
    fn test_hover_maps_index_to_record() {
        let state = loaded(sample());
        let mut cloud = StarCloud::new();
        cloud.sync(state.stars());

        for (i, record) in sample().iter().enumerate() {
            cloud.pointer_move(Some(i));
            assert_eq!(cloud.hovered(), Some(record));
            let p = cloud.buffers().position(i).unwrap();
            assert_eq!(p, [record.x as f32, record.y as f32, record.z as f32]);
        }

        assert!(cloud.pointer_left());
        assert_eq!(cloud.hovered(), None);
        assert!(!cloud.pointer_left());
    }

    #[test]
    fn test_hover_last_write_wins() {
        let state = loaded(sample());
        let mut cloud = StarCloud::new();
        cloud.sync(state.stars());

        assert!(cloud.pointer_move(Some(0)));
        assert!(cloud.pointer_move(Some(2)));
        assert!(!cloud.pointer_move(Some(2)));
        assert_eq!(cloud.hovered().map(|s| s.source_id.as_str()), Some("c"));
        // Out of range index clears hover
        assert!(cloud.pointer_move(Some(7)));
        assert_eq!(cloud.hovered_index(), None);
    }

    #[test]
    fn test_hover_at_cursor() {
        let state = loaded(sample());
        let mut cloud = StarCloud::new();
        cloud.sync(state.stars());

        let projector = ScreenProjector::from_camera(&OrbitCamera::default(), 800.0, 600.0);
        cloud.hover_at(&projector, Vec2::new(400.0, 300.0), 8.0);
        assert_eq!(cloud.hovered().map(|s| s.source_id.as_str()), Some("a"));

        cloud.hover_at(&projector, Vec2::new(10.0, 10.0), 8.0);
        assert_eq!(cloud.hovered(), None);
    }
}
