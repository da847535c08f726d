pub mod geometry;
pub mod gpu_types;
pub mod input;
pub mod mesh_pipeline;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod window;

pub use renderer::Renderer;
pub use scene::SceneConfig;
pub use window::run;

pub mod shaders {
    pub const POINTS: &str = include_str!("shaders/points.wgsl");
    pub const MESH: &str = include_str!("shaders/mesh.wgsl");
}
