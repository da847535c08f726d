//! GPU-compatible data types

use bytemuck::{Pod, Zeroable};
use galaxy_engine::OrbitCamera;

/// Camera uniform shared by the point and mesh pipelines
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// Viewport size in pixels
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
}

impl CameraUniform {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn from_camera(camera: &OrbitCamera, width: u32, height: u32) -> Self {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;

        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix(width / height).to_cols_array_2d(),
            viewport: [width, height],
            _pad: [0.0; 2],
        }
    }
}

/// Per-batch sprite parameters
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointStyle {
    /// Base sprite diameter in pixels, multiplied by the per-star size
    pub point_size: f32,
    pub opacity: f32,
    /// 1.0 scales sprites with `(viewport_height / 2) / depth`, 0.0 keeps them fixed
    pub size_attenuation: f32,
    pub _pad: f32,
}

impl PointStyle {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn attenuated(point_size: f32, opacity: f32) -> Self {
        Self { point_size, opacity, size_attenuation: 1.0, _pad: 0.0 }
    }

    pub fn fixed(point_size: f32, opacity: f32) -> Self {
        Self { point_size, opacity, size_attenuation: 0.0, _pad: 0.0 }
    }
}

/// Lit mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Material and lighting for the reference sphere (linear RGB)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    /// rgb + unused
    pub color: [f32; 4],
    /// rgb + unused
    pub emissive: [f32; 4],
    /// rgb of ambient light, w = intensity
    pub ambient: [f32; 4],
    /// xyz of the point light, w = intensity
    pub light: [f32; 4],
}

impl MaterialUniform {
    pub const SIZE: usize = std::mem::size_of::<Self>();
}
