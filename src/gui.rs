use crate::config::SceneKind;
use crate::scenes::Scene;
use egui::Context;
use egui_wgpu::Renderer;
use egui_winit::State;
use particle_physics::OrbitalType;
use particle_simulation::Simulation;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

#[derive(Default)]
pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    /// Scene picked in the panel, applied after the frame
    pub requested_scene: Option<SceneKind>,
    pub reset_requested: bool,
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Whether the pointer is over a panel rather than the scene
    pub fn wants_pointer(&self) -> bool {
        self.context.wants_pointer_input()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
        scene: &mut Scene,
    ) {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            Self::ui(ctx, ui_state, scene);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn ui(ctx: &Context, state: &mut UiState, scene: &mut Scene) {
        // Diagnostics Panel (Top Left)
        egui::Window::new("Diagnostics")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.label(format!("Ticks: {}", scene.clock().tick()));
                ui.label(format!("Entities: {}", scene.entity_count()));
            });

        // Scene Panel (Top Right)
        egui::Window::new("Scene")
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let current = scene.kind();
                for (i, kind) in SceneKind::ALL.into_iter().enumerate() {
                    let label = format!("{} {}", i + 1, kind);
                    if ui.radio(current == kind, label).clicked() && current != kind {
                        state.requested_scene = Some(kind);
                    }
                }
                ui.separator();
                let clock = scene.clock_mut();
                let mut paused = clock.is_paused();
                if ui.checkbox(&mut paused, "Paused (Space)").changed() {
                    clock.toggle_pause();
                }
                ui.horizontal(|ui| {
                    if ui.add_enabled(paused, egui::Button::new("Step")).clicked() {
                        clock.step_once();
                    }
                    if ui.button("Reset (R)").clicked() {
                        state.reset_requested = true;
                    }
                });
            });

        // Parameter Controls (Bottom Left)
        egui::Window::new("Controls")
            .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| match scene {
                Scene::Flocking(session) => {
                    let params = session.simulation_mut().params_mut();
                    ui.heading("Steering");
                    ui.add(egui::Slider::new(&mut params.separation, 0.0..=5.0).text("Separation"));
                    ui.add(egui::Slider::new(&mut params.alignment, 0.0..=5.0).text("Alignment"));
                    ui.add(egui::Slider::new(&mut params.cohesion, 0.0..=5.0).text("Cohesion"));
                    ui.add(egui::Slider::new(&mut params.max_force, 0.0..=2.0).text("Max Force"));

                    ui.separator();
                    ui.heading("Motion");
                    ui.add(egui::Slider::new(&mut params.speed, 0.5..=10.0).text("Speed"));
                    ui.add(
                        egui::Slider::new(&mut params.perception_radius, 10.0..=150.0)
                            .text("Perception Radius"),
                    );

                    ui.separator();
                    ui.heading("Display");
                    ui.add(egui::Slider::new(&mut params.particle_count, 50..=2000).text("Particles"));
                    ui.add(
                        egui::Slider::new(&mut params.trail_length, 0.02..=1.0)
                            .text("Trail Fade")
                            .logarithmic(true),
                    );
                }
                Scene::Pairing(session) => {
                    let params = session.simulation_mut().params_mut();
                    ui.heading("Coupling");
                    ui.add(egui::Slider::new(&mut params.temperature, 0.0..=1.0).text("Temperature"));
                    ui.label(params.regime().description());
                    ui.add(
                        egui::Slider::new(&mut params.coupling_range, 10.0..=150.0).text("Coupling Range"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.coupling_strength, 0.0..=0.2)
                            .text("Coupling Strength"),
                    );
                    ui.add(egui::Slider::new(&mut params.friction, 0.0..=0.1).text("Friction"));

                    ui.separator();
                    ui.add(egui::Slider::new(&mut params.particle_count, 100..=2000).text("Electrons"));
                    let stats = session.simulation().stats();
                    ui.label(format!(
                        "Paired: {} (+{} / -{})",
                        stats.paired, stats.formed, stats.broken
                    ));
                }
                Scene::Gravity(session) => {
                    let params = session.simulation_mut().params_mut();
                    ui.heading("Central Mass");
                    ui.add(
                        egui::Slider::new(&mut params.gravitational_constant, 0.01..=0.3).text("G"),
                    );
                    ui.add(egui::Slider::new(&mut params.central_mass, 1.0..=20.0).text("Mass"));
                    ui.add(egui::Slider::new(&mut params.drag, 0.99..=1.0).text("Drag"));
                    ui.add(egui::Slider::new(&mut params.body_count, 1..=60).text("Bodies"));
                    ui.label(format!("Respawns: {}", session.simulation().respawns()));
                }
                Scene::Orbital(session) => {
                    let params = session.simulation_mut().params_mut();
                    ui.heading("Orbital");
                    egui::ComboBox::from_label("State")
                        .selected_text(params.orbital.label())
                        .show_ui(ui, |ui| {
                            for orbital in OrbitalType::ALL {
                                ui.selectable_value(&mut params.orbital, orbital, orbital.label());
                            }
                        });
                    ui.add(
                        egui::Slider::new(&mut params.sample_count, 500..=20_000)
                            .text("Samples")
                            .logarithmic(true),
                    );
                    ui.label("Hover the view to observe the electron");
                }
                Scene::Network(session) => {
                    let params = session.simulation_mut().params_mut();
                    ui.heading("Network");
                    ui.add(egui::Slider::new(&mut params.max_nodes, 10..=200).text("Max Nodes"));
                    ui.add(
                        egui::Slider::new(&mut params.link_distance, 50.0..=300.0).text("Link Distance"),
                    );
                }
            });
    }
}
