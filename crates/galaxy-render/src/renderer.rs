//! Main renderer: surface, pipelines and the per-frame pass

use crate::geometry::generate_starfield;
use crate::gpu_types::{CameraUniform, PointStyle};
use crate::mesh_pipeline::{MeshBatch, MeshPipeline};
use crate::pipeline::{create_depth_texture, PointBatch, PointPipeline};
use crate::scene::SceneConfig;

use galaxy_engine::{OrbitCamera, StarBuffers, ViewerConfig};

use anyhow::{Context, Result};
use std::sync::Arc;
use winit::window::Window;

pub struct Renderer {
    // WGPU state
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    #[allow(dead_code)]
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,

    point_pipeline: PointPipeline,
    mesh_pipeline: MeshPipeline,
    camera_buffer: wgpu::Buffer,

    // Draw order: background, sphere, stars
    background: Option<PointBatch>,
    earth: MeshBatch,
    stars: Option<PointBatch>,

    star_style: PointStyle,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        viewer: &ViewerConfig,
        scene: &SceneConfig,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapters found")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Galaxy Explorer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("request_device failed")?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        tracing::info!("Window inner_size: {}x{}", size.width, size.height);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (depth_texture, depth_view) =
            create_depth_texture(&device, config.width, config.height);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: CameraUniform::SIZE as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let point_pipeline = PointPipeline::new(&device, surface_format);
        let mesh_pipeline = MeshPipeline::new(&device, surface_format);

        let starfield = generate_starfield(scene.starfield);
        let background = point_pipeline.create_batch(
            &device,
            &camera_buffer,
            &starfield,
            PointStyle::fixed(scene.starfield.factor, 1.0),
            "Background",
        );
        tracing::info!("Background starfield: {} points", starfield.len());

        let earth = mesh_pipeline.create_sphere(
            &device,
            &camera_buffer,
            scene.earth.sphere,
            scene.earth_material(),
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            depth_view,
            point_pipeline,
            mesh_pipeline,
            camera_buffer,
            background,
            earth,
            stars: None,
            star_style: PointStyle::attenuated(viewer.point_size, viewer.point_opacity),
            clear_color: scene.clear_color(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        tracing::debug!("Resizing to {}x{}", new_size.width, new_size.height);
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let (depth_texture, depth_view) =
            create_depth_texture(&self.device, new_size.width, new_size.height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    /// Replace the star buffers on the GPU
    pub fn upload_stars(&mut self, buffers: &StarBuffers) {
        self.stars = self.point_pipeline.create_batch(
            &self.device,
            &self.camera_buffer,
            buffers,
            self.star_style,
            "Stars",
        );
        tracing::debug!("Uploaded {} stars", buffers.len());
    }

    pub fn star_count(&self) -> u32 {
        self.stars.as_ref().map_or(0, PointBatch::count)
    }

    pub fn render(&mut self, camera: &OrbitCamera) -> Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("Surface out of memory");
            }
            Err(e) => {
                return Err(anyhow::anyhow!(e));
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera_uniform =
            CameraUniform::from_camera(camera, self.config.width, self.config.height);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera_uniform));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(background) = &self.background {
                self.point_pipeline.draw(&mut pass, background);
            }
            self.mesh_pipeline.draw(&mut pass, &self.earth);
            if let Some(stars) = &self.stars {
                self.point_pipeline.draw(&mut pass, stars);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
