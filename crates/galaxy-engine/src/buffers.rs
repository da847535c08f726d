//! Star records to GPU vertex arrays
//!
//! Three parallel arrays, one entry per star in input order: positions (xyz),
//! colors (rgb) and sprite sizes. Index `i` of every array belongs to star `i`;
//! hover picking relies on that, so nothing here reorders or drops records.
//!
//! Color and size encode apparent magnitude through a brightness factor
//! `t = clamp((20 - mag) / 15, 0, 1)`: violet for dim stars, white for bright
//! ones, sprites from 1.5 to 4.5.

use galaxy_core::StarRecord;

/// Color of the dimmest stars (0x8A2BE2, blue violet)
pub const DIM_COLOR: [f32; 3] = [138.0 / 255.0, 43.0 / 255.0, 226.0 / 255.0];
/// Color of the brightest stars
pub const BRIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Magnitude at which `t` reaches 0
const FAINT_LIMIT: f64 = 20.0;
/// Magnitude span over which `t` goes from 0 to 1
const MAGNITUDE_SPAN: f64 = 15.0;

pub const MIN_SPRITE_SIZE: f32 = 1.5;
pub const SPRITE_SIZE_RANGE: f32 = 3.0;

/// Brightness factor in [0, 1] for an apparent magnitude
pub fn brightness(mag: f64) -> f32 {
    ((FAINT_LIMIT - mag) / MAGNITUDE_SPAN).clamp(0.0, 1.0) as f32
}

/// `DIM_COLOR + t * (BRIGHT_COLOR - DIM_COLOR)`
pub fn star_color(t: f32) -> [f32; 3] {
    let mut color = [0.0; 3];
    for (c, (dim, bright)) in color.iter_mut().zip(DIM_COLOR.iter().zip(BRIGHT_COLOR.iter())) {
        *c = dim + t * (bright - dim);
    }
    color
}

pub fn star_size(t: f32) -> f32 {
    t * SPRITE_SIZE_RANGE + MIN_SPRITE_SIZE
}

/// Vertex arrays for one star set
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StarBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
}

impl StarBuffers {
    pub fn build(stars: &[StarRecord]) -> Self {
        let count = stars.len();
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);

        for star in stars {
            positions.extend_from_slice(&[star.x as f32, star.y as f32, star.z as f32]);

            // Missing magnitude counts as 15
            let t = brightness(star.magnitude_or_default());
            colors.extend_from_slice(&star_color(t));
            sizes.push(star_size(t));
        }

        Self { positions, colors, sizes }
    }

    /// Number of stars
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let start = index.checked_mul(3)?;
        let p = self.positions.get(start..start.checked_add(3)?)?;
        Some([p[0], p[1], p[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn star(mag: Option<f64>) -> StarRecord {
        let s = StarRecord::new("s", 1.0, 2.0, 3.0);
        match mag {
            Some(m) => s.with_magnitude(m),
            None => s,
        }
    }

    #[test]
    fn test_buffer_lengths() {
        for n in [0usize, 1, 2, 17, 256] {
            let stars: Vec<_> = (0..n).map(|i| star(Some(i as f64 * 0.1))).collect();
            let buffers = StarBuffers::build(&stars);
            assert_eq!(buffers.positions.len(), 3 * n);
            assert_eq!(buffers.colors.len(), 3 * n);
            assert_eq!(buffers.sizes.len(), n);
            assert_eq!(buffers.len(), n);
        }
    }

    #[test]
    fn test_empty_input() {
        let buffers = StarBuffers::build(&[]);
        assert!(buffers.is_empty());
        assert!(buffers.positions.is_empty());
        assert!(buffers.colors.is_empty());
        assert_eq!(buffers.position(0), None);
    }

    #[test]
    fn test_single_star() {
        let buffers = StarBuffers::build(&[star(Some(15.0))]);
        assert_eq!(buffers.positions, vec![1.0, 2.0, 3.0]);

        // t = 1/3
        assert_relative_eq!(buffers.sizes[0], 2.5, epsilon = 1e-6);
        let third = 1.0 / 3.0;
        for i in 0..3 {
            let expected = DIM_COLOR[i] + third * (BRIGHT_COLOR[i] - DIM_COLOR[i]);
            assert_relative_eq!(buffers.colors[i], expected, epsilon = 1e-6);
        }
        // Closer to violet than to white
        assert!(buffers.colors[1] < 0.5);
    }

    #[test]
    fn test_missing_magnitude_matches_fifteen() {
        let missing = StarBuffers::build(&[star(None)]);
        let fifteen = StarBuffers::build(&[star(Some(15.0))]);
        assert_eq!(missing, fifteen);
        let nan = StarBuffers::build(&[star(Some(f64::NAN))]);
        assert_eq!(nan, fifteen);
        assert_relative_eq!(brightness(15.0), 1.0 / 3.0, epsilon = 1e-7);
    }

    #[test]
    fn test_brightness_monotonic() {
        let mut previous = brightness(-30.0);
        let mut mag = -30.0;
        while mag <= 50.0 {
            let t = brightness(mag);
            assert!(t <= previous, "t increased at mag {}", mag);
            previous = t;
            mag += 0.25;
        }
    }

    #[test]
    fn test_brightness_clamped() {
        for mag in [-10.0, -26.7, 0.0, 5.0] {
            assert_eq!(brightness(mag), 1.0);
        }
        for mag in [20.0, 25.0, 35.0, 100.0] {
            assert_eq!(brightness(mag), 0.0);
        }
        assert_eq!(brightness(f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn test_size_endpoints() {
        assert_eq!(star_size(0.0), 1.5);
        assert_eq!(star_size(1.0), 4.5);
    }

    #[test]
    fn test_color_endpoints() {
        assert_eq!(star_color(0.0), DIM_COLOR);
        for (c, b) in star_color(1.0).iter().zip(BRIGHT_COLOR.iter()) {
            assert_relative_eq!(*c, *b, epsilon = 1e-6);
        }
        assert_relative_eq!(DIM_COLOR[0], 0.541, epsilon = 1e-3);
        assert_relative_eq!(DIM_COLOR[1], 0.169, epsilon = 1e-3);
        assert_relative_eq!(DIM_COLOR[2], 0.886, epsilon = 1e-3);
    }

    #[test]
    fn test_positions_verbatim() {
        let stars = vec![
            StarRecord::new("a", -4000.5, 12.25, 0.0),
            StarRecord::new("b", 1e4, -1e4, 3.5),
        ];
        let buffers = StarBuffers::build(&stars);
        assert_eq!(buffers.position(0), Some([-4000.5, 12.25, 0.0]));
        assert_eq!(buffers.position(1), Some([1e4, -1e4, 3.5]));
    }

    #[test]
    fn test_non_finite_positions_copied() {
        let stars = vec![
            StarRecord::new("nan", f64::NAN, 1.0, f64::INFINITY).with_magnitude(4.0),
            StarRecord::new("inf", f64::NEG_INFINITY, f64::NAN, -2.0),
        ];
        let buffers = StarBuffers::build(&stars);

        assert_eq!(buffers.len(), 2);
        assert!(buffers.positions[0].is_nan());
        assert_eq!(buffers.positions[1], 1.0);
        assert_eq!(buffers.positions[2], f32::INFINITY);
        assert_eq!(buffers.positions[3], f32::NEG_INFINITY);
        assert!(buffers.positions[4].is_nan());
        assert_eq!(buffers.positions[5], -2.0);

        assert!(buffers.colors.iter().all(|c| c.is_finite()));
        assert!(buffers.sizes.iter().all(|s| s.is_finite()));
        assert_eq!(buffers.sizes[0], 4.5);
    }

    #[test]
    fn test_position_index_out_of_range() {
        let buffers = StarBuffers::build(&[star(Some(1.0))]);
        assert_eq!(buffers.position(1), None);
        assert_eq!(buffers.position(usize::MAX / 2), None);
        assert_eq!(buffers.position(usize::MAX), None);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let stars: Vec<_> = (0..50)
            .map(|i| {
                StarRecord::new(i.to_string(), i as f64, -(i as f64), 0.5)
                    .with_magnitude(i as f64 * 0.4)
            })
            .collect();
        assert_eq!(StarBuffers::build(&stars), StarBuffers::build(&stars));
    }
}
