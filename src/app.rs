use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use cgmath::{Vector3, Zero};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    geometry::{generate_capsule, generate_cone},
    rendering::render_engine::RenderEngine,
    scene::{Mesh, Object, Scene},
};
use crate::import;

/// Interval of the color-cycle timer.
const CYCLE_PERIOD: Duration = Duration::from_secs(1);

/// Viewer application: owns the event loop and the application state.
pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    last_cycle_tick: Instant,
}

impl ViewerApp {
    /// Builds the scene from the given model files plus the two built-in
    /// primitives.
    ///
    /// Fails if a file cannot be read or has an unsupported extension;
    /// the window is not created until [`ViewerApp::run`].
    pub fn new(paths: &[PathBuf]) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let mut camera = OrbitCamera::new(400.0, 0.4, 0.2, Vector3::zero(), 1.0);
        camera.bounds.min_distance = Some(5.0);
        let controller = CameraController::new(0.005, 12.0);

        let camera_manager = CameraManager::new(camera, controller);
        let mut scene = Scene::new(camera_manager);

        for path in paths {
            let meshes = import::load(path)
                .with_context(|| format!("failed to load '{}'", path.display()))?;
            let triangles: usize = meshes.iter().map(|m| m.triangle_count()).sum();
            log::info!(
                "loaded '{}': {} mesh(es), {} triangles",
                path.display(),
                meshes.len(),
                triangles
            );
            scene.add_imported(&object_name(path), meshes);
        }

        // The two procedural shapes that flank the loaded models.
        let cone_data = generate_cone(30.25, 70.5, 48).to_mesh_data([0.8, 0.5, 0.2]);
        let mut cone = Object::new(scene.ensure_unique_name("cone"), Mesh::new(cone_data));
        cone.set_translation(Vector3::new(120.0, 1.0, 1.0));
        scene.add_object(cone);

        let capsule_data = generate_capsule(25.25, 40.5, 48, 24).to_mesh_data([1.0, 1.0, 1.0]);
        let mut capsule = Object::new(scene.ensure_unique_name("capsule"), Mesh::new(capsule_data));
        capsule.set_translation(Vector3::new(-100.0, -1.0, -1.0));
        scene.add_object(capsule);

        log::info!(
            "scene ready: {} objects, {} triangles",
            scene.object_count(),
            scene.triangle_count()
        );

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                last_cycle_tick: Instant::now(),
            },
        })
    }

    /// Runs the application (consumes self and starts the event loop).
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self.event_loop.take().context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop error")
    }
}

fn object_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("mesh")
        .to_string()
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("meshview")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer =
                pollster::block_on(
                    async move { RenderEngine::new(window_clone, width, height).await },
                );

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            self.render_engine = Some(renderer);
            self.last_cycle_tick = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } => {
                self.scene.toggle_mark();
                log::debug!(
                    "first object {}",
                    if self.scene.is_marked() {
                        "marked"
                    } else {
                        "unmarked"
                    }
                );
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.scene.update();
                render_engine.update(self.scene.camera_manager.camera.uniform);
                self.scene
                    .sync_materials(render_engine.device(), render_engine.queue());
                render_engine.render_frame(&self.scene);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.last_cycle_tick.elapsed() >= CYCLE_PERIOD {
            self.scene.advance_color_cycle();
            self.last_cycle_tick = Instant::now();
        }

        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
