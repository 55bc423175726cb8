mod config;
mod gui;
mod present;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Config, SceneKind};
use glam::Vec2;
use gui::{Gui, UiState};
use particle_renderer::PixelCanvas;
use particle_simulation::Bounds;
use present::CanvasPresenter;
use scenes::Scene;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Frames averaged for the displayed frame time
const FRAME_TIME_WINDOW: usize = 100;

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    presenter: CanvasPresenter,
    canvas: PixelCanvas,

    // At most one live session; taken and dropped before the next is built
    scene: Option<Scene>,
    app_config: Config,

    // GUI
    gui: Gui,
    ui_state: UiState,

    // Performance tracking
    last_frame_time: Instant,
    frame_times: VecDeque<f32>,
}

impl GpuState {
    async fn new(window: Arc<Window>, app_config: Config) -> Result<Self> {
        let size = window.inner_size();
        let scale = window.scale_factor() as f32;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No compatible GPU adapter")?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let presenter = CanvasPresenter::new(&device, surface_format, size.width, size.height);
        let canvas = PixelCanvas::new(size.width, size.height, scale);

        let gui = Gui::new(&device, surface_format, &window);

        let bounds = logical_bounds(size, scale);
        let scene = Scene::new(app_config.scene, &app_config, bounds);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            presenter,
            canvas,
            scene: Some(scene),
            app_config,
            gui,
            ui_state: UiState::default(),
            last_frame_time: Instant::now(),
            frame_times: VecDeque::with_capacity(FRAME_TIME_WINDOW),
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, scale: f32) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.presenter
            .resize(&self.device, new_size.width, new_size.height);
        self.canvas.resize(new_size.width, new_size.height, scale);
        if let Some(scene) = &mut self.scene {
            scene.resize(logical_bounds(new_size, scale));
        }
    }

    fn bounds(&self) -> Bounds {
        logical_bounds(
            PhysicalSize::new(self.canvas.width(), self.canvas.height()),
            self.canvas.scale(),
        )
    }

    /// End the current session, then start `kind` with the carried-over parameters
    fn switch_scene(&mut self, kind: SceneKind) {
        if let Some(scene) = self.scene.take() {
            scene.store_params(&mut self.app_config);
        }
        log::info!("Switching to {kind}");
        self.canvas.clear();
        self.scene = Some(Scene::new(kind, &self.app_config, self.bounds()));
    }

    fn reset_scene(&mut self) {
        if let Some(scene) = &mut self.scene {
            scene.reset();
            self.canvas.clear();
        }
    }

    fn toggle_pause(&mut self) {
        if let Some(scene) = &mut self.scene {
            let clock = scene.clock_mut();
            clock.toggle_pause();
            log::info!("{}", if clock.is_paused() { "Paused" } else { "Resumed" });
        }
    }

    fn step_once(&mut self) {
        if let Some(scene) = &mut self.scene {
            scene.clock_mut().step_once();
        }
    }

    /// Cursor in physical pixels, forwarded as a logical offset from the view center
    fn set_pointer(&mut self, position: Option<PhysicalPosition<f64>>) {
        let center = self.bounds().center();
        let scale = self.canvas.scale();
        let pointer = position.map(|p| Vec2::new(p.x as f32, p.y as f32) / scale - center);
        if let Some(scene) = &mut self.scene {
            scene.set_pointer(pointer);
        }
    }

    fn scene_kind(&self) -> Option<SceneKind> {
        self.scene.as_ref().map(Scene::kind)
    }

    fn render(&mut self, window: &Window) -> Result<(f32, f32), wgpu::SurfaceError> {
        // Track frame time
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_TIME_WINDOW {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };
        self.ui_state.fps = fps;
        self.ui_state.frame_time = avg_frame_time;

        if let Some(scene) = &mut self.scene {
            if scene.frame(now, Some(&mut self.canvas)) > 0 {
                self.presenter.upload(&self.queue, &self.canvas);
            }
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.presenter.render(&mut encoder, &view);

        if let Some(scene) = &mut self.scene {
            self.gui.render(
                &self.device,
                &self.queue,
                &mut encoder,
                window,
                &view,
                &mut self.ui_state,
                scene,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // Panel requests take effect between frames
        if let Some(kind) = self.ui_state.requested_scene.take() {
            self.switch_scene(kind);
        }
        if std::mem::take(&mut self.ui_state.reset_requested) {
            self.reset_scene();
        }

        Ok((fps, avg_frame_time))
    }
}

fn logical_bounds(size: PhysicalSize<u32>, scale: f32) -> Bounds {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    Bounds::new(size.width as f32 / scale, size.height as f32 / scale)
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    config: Config,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            window: None,
            gpu_state: None,
            config,
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        if code == KeyCode::Escape {
            event_loop.exit();
            return;
        }
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        match code {
            KeyCode::Digit1 => gpu_state.switch_scene(SceneKind::Flocking),
            KeyCode::Digit2 => gpu_state.switch_scene(SceneKind::Pairing),
            KeyCode::Digit3 => gpu_state.switch_scene(SceneKind::Gravity),
            KeyCode::Digit4 => gpu_state.switch_scene(SceneKind::Orbital),
            KeyCode::Digit5 => gpu_state.switch_scene(SceneKind::Network),
            KeyCode::KeyR => gpu_state.reset_scene(),
            KeyCode::Space => gpu_state.toggle_pause(),
            KeyCode::Period => gpu_state.step_once(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(format!("Emergence - {}", self.config.scene))
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone(), self.config.clone())) {
            Ok(gpu_state) => {
                self.window = Some(window);
                self.gpu_state = Some(gpu_state);
            }
            Err(e) => {
                log::error!("Failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Handle GUI events
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            if gpu_state.gui.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),

            WindowEvent::Resized(physical_size) => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    gpu_state.resize(physical_size, window.scale_factor() as f32);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    let position = (!gpu_state.gui.wants_pointer()).then_some(position);
                    gpu_state.set_pointer(position);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.set_pointer(None);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok((fps, _)) => {
                            if let Some(kind) = gpu_state.scene_kind() {
                                window.set_title(&format!("Emergence - {kind} - {fps:.0} FPS"));
                            }
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            log::warn!("Surface lost, reconfiguring");
                            gpu_state.resize(window.inner_size(), window.scale_factor() as f32);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                        }
                        Err(e) => log::error!("Render error: {e:?}"),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    log::info!("Starting emergence with the {} scene...", config.scene);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("Event loop terminated with an error")?;
    Ok(())
}
