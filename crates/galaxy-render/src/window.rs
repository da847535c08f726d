//! Window management and input handling

use crate::input::control_for_key;
use crate::renderer::Renderer;
use crate::scene::SceneConfig;

use galaxy_core::QueryParams;
use galaxy_engine::overlay::window_title;
use galaxy_engine::{
    AppState, FetchClient, FetchCompletion, HttpStarService, OrbitCamera, QueryController,
    ScreenProjector, StarCloud, ViewerConfig,
};

use glam::Vec2;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowId},
};

/// Pixels of touchpad scroll per zoom notch
const PIXELS_PER_NOTCH: f64 = 50.0;

/// Events delivered to the event loop from other threads
#[derive(Debug)]
pub enum AppEvent {
    FetchCompleted(FetchCompletion),
}

pub struct App {
    config: ViewerConfig,
    scene: SceneConfig,
    runtime: tokio::runtime::Handle,
    proxy: EventLoopProxy<AppEvent>,

    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,

    // Core
    state: AppState,
    controller: QueryController,
    client: FetchClient<HttpStarService>,
    cloud: StarCloud,
    camera: OrbitCamera,

    // Input state
    modifiers: ModifiersState,
    drag: Option<MouseButton>,
    cursor: Option<Vec2>,

    title: String,
}

impl App {
    pub fn new(
        config: ViewerConfig,
        service: HttpStarService,
        runtime: tokio::runtime::Handle,
        proxy: EventLoopProxy<AppEvent>,
    ) -> Self {
        let camera = OrbitCamera::new(&config.camera);
        Self {
            config,
            scene: SceneConfig::default(),
            runtime,
            proxy,
            window: None,
            renderer: None,
            state: AppState::new(),
            controller: QueryController::new(),
            client: FetchClient::new(Arc::new(service)),
            cloud: StarCloud::new(),
            camera,
            modifiers: ModifiersState::empty(),
            drag: None,
            cursor: None,
            title: String::new(),
        }
    }

    /// Start a query on the runtime; the result comes back as a user event
    fn spawn_fetch(&mut self, params: QueryParams) {
        let exchange = self.client.start(&mut self.state, params);
        let proxy = self.proxy.clone();

        self.runtime.spawn(async move {
            let completion = exchange.await;
            if proxy.send_event(AppEvent::FetchCompleted(completion)).is_err() {
                tracing::warn!("Event loop closed before the star query finished");
            }
        });

        self.update_title();
    }

    /// Push a replaced star set to the GPU
    fn sync_stars(&mut self) {
        if self.cloud.sync(self.state.stars()) {
            if let Some(renderer) = &mut self.renderer {
                renderer.upload_stars(self.cloud.buffers());
                tracing::info!("Drawing {} stars", renderer.star_count());
            }
        }
    }

    fn update_hover(&mut self) {
        let (Some(cursor), Some(renderer)) = (self.cursor, &self.renderer) else {
            return;
        };
        let (width, height) = renderer.size();
        let projector = ScreenProjector::from_camera(&self.camera, width as f32, height as f32);
        if self.cloud.hover_at(&projector, cursor, self.config.pick_radius_px) {
            self.update_title();
        }
    }

    fn update_title(&mut self) {
        let title = window_title(&self.state, &self.controller, self.cloud.hovered());
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        if key == KeyCode::Escape {
            event_loop.exit();
            return;
        }

        let Some(event) = control_for_key(key, self.modifiers.shift_key()) else {
            return;
        };
        if let Some(params) = self.controller.handle(event) {
            self.spawn_fetch(params);
        }
        self.update_title();
    }

    fn handle_cursor(&mut self, position: Vec2) {
        if let (Some(previous), Some(button)) = (self.cursor, self.drag) {
            let delta = position - previous;
            match button {
                MouseButton::Left => self.camera.rotate(delta.x, delta.y),
                MouseButton::Right => {
                    let height = self.renderer.as_ref().map_or(1, |r| r.size().1);
                    self.camera.pan(delta.x, delta.y, height as f32);
                }
                _ => {}
            }
        }
        self.cursor = Some(position);
        self.update_hover();
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Galaxy Explorer")
            .with_inner_size(PhysicalSize::new(1600, 900));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            Arc::clone(&window),
            &self.config,
            &self.scene,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("Failed to create renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);

        if let Some(params) = self.controller.activate() {
            self.spawn_fetch(params);
        }
        self.update_title();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::FetchCompleted(completion) => {
                self.client.complete(&mut self.state, completion);
                self.sync_stars();
                self.update_hover();
                self.update_title();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        self.handle_key(event_loop, key);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.drag = Some(button),
                ElementState::Released => self.drag = None,
            },

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = None;
                if self.cloud.pointer_left() {
                    self.update_title();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_NOTCH) as f32,
                };
                self.camera.zoom(notches);
                self.update_hover();
            }

            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render(&self.camera) {
                        tracing::warn!("Frame failed: {:#}", e);
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Open the viewer window and run until it is closed.
///
/// Star queries run on `runtime`; everything else stays on the calling thread.
pub fn run(config: ViewerConfig, runtime: tokio::runtime::Handle) -> anyhow::Result<()> {
    let service = HttpStarService::from_config(&config)?;
    tracing::info!("Star service: {}", service.base_url());

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, service, runtime, event_loop.create_proxy());
    event_loop.run_app(&mut app)?;

    Ok(())
}
