//! Scene decoration: lights, reference sphere and background starfield

use crate::geometry::{SphereOptions, StarfieldOptions};
use crate::gpu_types::MaterialUniform;

/// Reference sphere at the origin ("Earth")
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceSphere {
    pub sphere: SphereOptions,
    /// sRGB hex
    pub color: u32,
    /// sRGB hex
    pub emissive: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub clear_color: [f64; 3],
    pub ambient_intensity: f32,
    pub point_light_position: [f32; 3],
    pub point_light_intensity: f32,
    pub earth: ReferenceSphere,
    pub starfield: StarfieldOptions,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0],
            ambient_intensity: 0.1,
            point_light_position: [10.0, 10.0, 10.0],
            point_light_intensity: 1.0,
            earth: ReferenceSphere {
                sphere: SphereOptions { radius: 10.0, stacks: 32, slices: 32 },
                color: 0x20B2AA,
                emissive: 0x004040,
            },
            starfield: StarfieldOptions::default(),
        }
    }
}

impl SceneConfig {
    /// Sphere material with colors converted to linear RGB
    pub fn earth_material(&self) -> MaterialUniform {
        let color = hex_to_linear(self.earth.color);
        let emissive = hex_to_linear(self.earth.emissive);
        let [lx, ly, lz] = self.point_light_position;

        MaterialUniform {
            color: [color[0], color[1], color[2], 1.0],
            emissive: [emissive[0], emissive[1], emissive[2], 1.0],
            ambient: [1.0, 1.0, 1.0, self.ambient_intensity],
            light: [lx, ly, lz, self.point_light_intensity],
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color;
        wgpu::Color { r, g, b, a: 1.0 }
    }
}

/// 0xRRGGBB to sRGB components in [0, 1]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_rgb(hex).map(srgb_to_linear)
}
