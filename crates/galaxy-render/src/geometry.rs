//! Procedural geometry for the static scene decoration

use crate::gpu_types::MeshVertex;

use galaxy_core::rng::Lcg;
use galaxy_engine::StarBuffers;

use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereOptions {
    pub radius: f32,
    pub stacks: u32,
    pub slices: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 10.0,
            stacks: 32,
            slices: 32,
        }
    }
}

/// Generate a UV sphere centred on the origin.
///
/// Returns `(vertices, indices)`; `indices` is a triangle list.
pub fn generate_uv_sphere(opts: SphereOptions) -> (Vec<MeshVertex>, Vec<u32>) {
    let stacks = opts.stacks.max(2);
    let slices = opts.slices.max(3);

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);

    for stack in 0..=stacks {
        let phi = stack as f32 / stacks as f32 * PI;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for slice in 0..=slices {
            let theta = slice as f32 / slices as f32 * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(MeshVertex {
                position: normal.map(|n| n * opts.radius),
                normal,
            });
        }
    }

    let ring = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);

    for stack in 0..stacks {
        for slice in 0..slices {
            let i0 = stack * ring + slice;
            let i1 = i0 + 1;
            let i2 = (stack + 1) * ring + slice;
            let i3 = i2 + 1;

            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    (vertices, indices)
}

/// Static background starfield: a thin shell of random points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldOptions {
    /// Inner radius of the shell
    pub radius: f32,
    /// Shell thickness
    pub depth: f32,
    pub count: usize,
    /// Sprite size multiplier in pixels
    pub factor: f32,
    /// 0 draws every point grey-white
    pub saturation: f32,
    pub seed: u64,
}

impl Default for StarfieldOptions {
    fn default() -> Self {
        Self {
            radius: 30_000.0,
            depth: 50.0,
            count: 5_000,
            factor: 4.0,
            saturation: 0.0,
            seed: 0x5EED,
        }
    }
}

/// Background points in the same layout as the query results, so they go
/// through the same point pipeline. Sizes are relative (0.5..1.0) and get
/// multiplied by `factor` at draw time.
pub fn generate_starfield(opts: StarfieldOptions) -> StarBuffers {
    let mut rng = Lcg::new(opts.seed);
    let mut buffers = StarBuffers {
        positions: Vec::with_capacity(opts.count * 3),
        colors: Vec::with_capacity(opts.count * 3),
        sizes: Vec::with_capacity(opts.count),
    };

    // Radius shrinks a little with every point, inside [radius, radius + depth]
    let mut r = opts.radius + opts.depth;
    let increment = opts.depth / opts.count.max(1) as f32;

    for i in 0..opts.count {
        r -= increment * rng.next_f64() as f32;

        let cos_polar = 1.0 - rng.next_f64() as f32 * 2.0;
        let sin_polar = (1.0 - cos_polar * cos_polar).max(0.0).sqrt();
        let azimuth = rng.next_f64() as f32 * TAU;
        buffers.positions.extend_from_slice(&[
            r * sin_polar * azimuth.sin(),
            r * cos_polar,
            r * sin_polar * azimuth.cos(),
        ]);

        let hue = i as f32 / opts.count as f32;
        buffers.colors.extend_from_slice(&hsl_to_rgb(hue, opts.saturation, 0.9));
        buffers.sizes.push(0.5 + 0.5 * rng.next_f64() as f32);
    }

    buffers
}

/// HSL (all in [0, 1]) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
