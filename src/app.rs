//! Assignment trait and the runner that hosts it
//!
//! [`XrRunner::run`] opens a window and drives the render loop with winit;
//! [`XrRunner::run_headless`] runs a fixed number of simulated frames with no
//! display, which is what tests and batch runs use.

use std::sync::Arc;
use std::time::{Duration, Instant};

use cgmath::{Matrix4, SquareMatrix};
use futures::future::LocalBoxFuture;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, Event, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::RunnerConfig;
use crate::error::XrError;
use crate::gfx::{
    camera::{Camera, CameraController},
    engine::{Engine, HeadlessEngine, WindowEngine},
    rendering::RenderEngine,
    scene::Scene,
};
use crate::performance::PerformanceMonitor;
use crate::ui::{draw_scene_gui, UiManager};

const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// A runnable 3D scene
///
/// `create_scene` builds a fresh scene each time it is called; the runner
/// then calls `update_scene` once per frame with the same scene.
pub trait XrApp {
    fn name(&self) -> &str;

    fn create_scene<'a>(&'a mut self, engine: &'a dyn Engine) -> LocalBoxFuture<'a, Scene>;

    fn update_scene(&mut self, scene: &mut Scene, engine: &dyn Engine);
}

pub struct XrRunner {
    app: Box<dyn XrApp>,
    config: RunnerConfig,
}

impl XrRunner {
    pub fn new(app: Box<dyn XrApp>, config: RunnerConfig) -> Self {
        Self { app, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Creates the scene and runs `config.headless.frames` fixed-step frames
    ///
    /// Returns the scene as it is after the last frame.
    pub fn run_headless(&mut self) -> Scene {
        let (width, height) = (self.config.window.width, self.config.window.height);
        let mut engine = HeadlessEngine::new(width, height).with_fixed_step(self.config.headless.step());

        let mut scene = install_scene(self.app.as_mut(), &engine, &self.config);
        let mut monitor = PerformanceMonitor::new();
        let app = self.app.as_mut();

        log::info!(
            "Running '{}' headless for {} frames",
            app.name(),
            self.config.headless.frames
        );
        engine.run_render_loop(self.config.headless.frames, |engine| {
            let start = Instant::now();
            scene.poll_pending_loads();
            app.update_scene(&mut scene, engine);
            monitor.record_frame(start.elapsed());
        });

        monitor.log_summary(app.name());
        scene
    }

    /// Opens a window and runs until it is closed or Escape is pressed
    pub fn run(self) -> Result<(), XrError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let (width, height) = (self.config.window.width, self.config.window.height);
        let mut state = RunnerState {
            app: self.app,
            config: self.config,
            engine: WindowEngine::new(width, height),
            controller: CameraController::default(),
            monitor: PerformanceMonitor::new(),
            graphics: None,
            scene: None,
            error: None,
        };

        event_loop.run_app(&mut state)?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Builds a fresh scene from `app` and applies the runner settings to it
fn install_scene(app: &mut dyn XrApp, engine: &dyn Engine, config: &RunnerConfig) -> Scene {
    let mut scene = pollster::block_on(app.create_scene(engine));
    scene.clear_color = config.clear_color;

    let (width, height) = engine.render_size();
    scene.handle_resize(width, height);

    let stats = scene.statistics();
    log::info!(
        "Scene '{}' ready: {} camera(s), {} light(s), {} mesh(es), {} triangles",
        app.name(),
        stats.camera_count,
        stats.light_count,
        stats.mesh_count,
        stats.total_triangles
    );
    scene
}

struct Graphics {
    window: Arc<Window>,
    render_engine: RenderEngine,
    ui_manager: UiManager,
}

struct RunnerState {
    app: Box<dyn XrApp>,
    config: RunnerConfig,
    engine: WindowEngine,
    controller: CameraController,
    monitor: PerformanceMonitor,
    graphics: Option<Graphics>,
    scene: Option<Scene>,
    error: Option<XrError>,
}

impl RunnerState {
    fn create_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics, XrError> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let (width, height) = window.inner_size().into();
        let render_engine = pollster::block_on(RenderEngine::new(window.clone(), width, height))?;

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        Ok(Graphics {
            window,
            render_engine,
            ui_manager,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: XrError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if !self.engine.resize(width, height) {
            return;
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.handle_resize(width, height);
        }
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.render_engine.resize(width, height);
            graphics.ui_manager.update_display_size(width, height);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(graphics), Some(scene)) = (self.graphics.as_mut(), self.scene.as_mut()) else {
            return;
        };

        self.monitor.begin_frame();
        self.engine.begin_frame();
        scene.poll_pending_loads();
        self.app.update_scene(scene, &self.engine);

        let view_proj = scene
            .active_camera()
            .map(|camera| camera.build_view_projection_matrix())
            .unwrap_or_else(Matrix4::identity);
        let (width, height) = graphics.render_engine.surface_size();
        let monitor = &self.monitor;

        graphics.ui_manager.update_logic(&graphics.window, |ui| {
            draw_scene_gui(ui, scene, view_proj, [width as f32, height as f32]);
            monitor.render_overlay(ui);
        });

        let ui_manager = &mut graphics.ui_manager;
        let result = graphics.render_engine.render_frame(scene, |device, queue, encoder, view| {
            ui_manager.render_display_only(device, queue, encoder, view);
        });

        match result {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                graphics.render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("{}", XrError::OutOfMemory);
                self.error = Some(XrError::OutOfMemory);
                event_loop.exit();
                return;
            }
            Err(err) => log::warn!("Skipped frame: {}", err),
        }

        self.monitor.end_frame();
        self.monitor.report_every(REPORT_INTERVAL, self.app.name());
    }
}

impl ApplicationHandler for RunnerState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_none() {
            match self.create_graphics(event_loop) {
                Ok(graphics) => {
                    let (width, height) = graphics.window.inner_size().into();
                    self.engine.resize(width, height);
                    self.graphics = Some(graphics);
                }
                Err(err) => {
                    self.fail(event_loop, err);
                    return;
                }
            }
        }

        if self.scene.is_none() {
            let scene = install_scene(self.app.as_mut(), &self.engine, &self.config);
            if let Some(graphics) = self.graphics.as_mut() {
                graphics.render_engine.reset_scene_resources();
            }
            self.scene = Some(scene);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let ui_event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        if graphics.ui_manager.handle_input(&graphics.window, &ui_event) {
            graphics.window.request_redraw();
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.controller.process_key_event(&event);
                if event.state == ElementState::Pressed && event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => self.resize(width, height),
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(graphics) = self.graphics.as_ref() {
            if graphics.ui_manager.wants_input() {
                return;
            }
        }

        let Some(camera) = self
            .scene
            .as_mut()
            .and_then(|scene| scene.active_camera_mut())
            .and_then(|camera| camera.as_arc_rotate_mut())
        else {
            return;
        };
        self.controller.process_device_event(&event, camera);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = self.graphics.as_ref() {
            graphics.window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::BoxOptions;
    use cgmath::Vector3;
    use futures::FutureExt;

    #[derive(Default)]
    struct CountingApp {
        scenes_created: u32,
        updates: u64,
        last_delta: Duration,
    }

    impl XrApp for CountingApp {
        fn name(&self) -> &str {
            "counting"
        }

        fn create_scene<'a>(&'a mut self, _engine: &'a dyn Engine) -> LocalBoxFuture<'a, Scene> {
            async move {
                self.scenes_created += 1;
                let mut scene = Scene::new();
                scene.create_box("box", BoxOptions::default());
                scene
            }
            .boxed_local()
        }

        fn update_scene(&mut self, _scene: &mut Scene, engine: &dyn Engine) {
            self.updates += 1;
            self.last_delta = engine.delta_time();
        }
    }

    #[test]
    fn test_headless_run_drives_every_frame() {
        let mut config = RunnerConfig::default();
        config.headless.frames = 7;
        config.headless.step_ms = 20;
        config.clear_color = [0.0, 0.0, 0.0, 1.0];

        let mut runner = XrRunner::new(Box::<CountingApp>::default(), config);
        let scene = runner.run_headless();

        assert_eq!(scene.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(scene.get_mesh_by_name("box").is_some());
    }

    #[test]
    fn test_install_scene_resizes_cameras() {
        let mut app = CountingApp::default();
        let engine = HeadlessEngine::new(400, 200);
        let mut scene = install_scene(&mut app, &engine, &RunnerConfig::default());
        assert_eq!(app.scenes_created, 1);

        let camera = scene.create_free_camera("late", Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 0.0));
        scene.handle_resize(400, 200);
        assert_eq!(scene.camera(camera).projection.aspect, 2.0);
    }

    #[test]
    fn test_update_receives_engine_delta() {
        let mut app = CountingApp::default();
        let mut engine = HeadlessEngine::new(10, 10).with_fixed_step(Duration::from_millis(5));
        let mut scene = Scene::new();

        engine.run_render_loop(3, |engine| app.update_scene(&mut scene, engine));
        assert_eq!(app.updates, 3);
        assert_eq!(app.last_delta, Duration::from_millis(5));
    }
}
