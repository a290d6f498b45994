use cgmath::Vector3;
use futures::future::{FutureExt, LocalBoxFuture};
use std::cell::Cell;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::app::XrApp;
use crate::gfx::{
    engine::Engine,
    material::StandardMaterial,
    scene::{GroundOptions, MeshId, Scene},
};
use crate::ui::{Button, HorizontalAlign, TextBlock, VerticalAlign};

use super::AppTimer;

const ROTATION_SPEED: f32 = 0.5;

/// Ground, skybox and an OBJ model loaded in the background
///
/// A fullscreen GUI toggles auto-rotation of the model and shows whether it
/// has finished loading.
#[derive(Debug)]
pub struct ModelViewer {
    model_path: PathBuf,
    timer: AppTimer,
    model: Rc<Cell<Option<MeshId>>>,
    auto_rotate: Rc<Cell<bool>>,
    angle: f32,
}

impl ModelViewer {
    pub fn new(model_path: impl AsRef<Path>) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
            timer: AppTimer::default(),
            model: Rc::new(Cell::new(None)),
            auto_rotate: Rc::new(Cell::new(true)),
            angle: 0.0,
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// The loaded model, once attached to the scene
    pub fn model(&self) -> Option<MeshId> {
        self.model.get()
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate.get()
    }

    fn status(&self) -> String {
        match (self.model.get(), self.auto_rotate.get()) {
            (None, _) => "Loading model...".to_string(),
            (Some(_), true) => "Auto-rotate: on".to_string(),
            (Some(_), false) => "Auto-rotate: off".to_string(),
        }
    }
}

impl XrApp for ModelViewer {
    fn name(&self) -> &str {
        "model-viewer"
    }

    fn create_scene<'a>(&'a mut self, _engine: &'a dyn Engine) -> LocalBoxFuture<'a, Scene> {
        async move {
            self.timer.reset();
            self.angle = 0.0;
            self.model = Rc::new(Cell::new(None));
            self.auto_rotate = Rc::new(Cell::new(true));

            let mut scene = Scene::new();
            scene.create_arc_rotate_camera("camera", -PI / 2.0, PI / 2.5, 6.0, Vector3::new(0.0, 1.0, 0.0));
            scene.create_hemispheric_light("light", Vector3::new(0.0, 1.0, 0.0));

            let ground_material = scene.add_material(StandardMaterial::new("ground material").with_diffuse(0.35, 0.45, 0.3));
            let ground = scene.create_ground(
                "ground",
                GroundOptions {
                    width: 20.0,
                    height: 20.0,
                    subdivisions: 4,
                },
            );
            scene.mesh_mut(ground).set_material(&ground_material);

            scene.create_skybox(
                "skybox",
                500.0,
                StandardMaterial::new("skybox material").with_emissive(0.45, 0.6, 0.85),
            );

            let model = Rc::clone(&self.model);
            scene.import_mesh_async("model", self.model_path.clone(), move |scene: &mut Scene, meshes: &[MeshId]| {
                let material = scene.add_material(StandardMaterial::new("model material").with_diffuse(0.7, 0.55, 0.4));
                for &mesh in meshes {
                    let mesh = scene.mesh_mut(mesh);
                    mesh.set_material(&material);
                    mesh.transform.position = Vector3::new(0.0, 1.0, 0.0);
                }
                model.set(meshes.first().copied());
            });

            let ui = scene.create_fullscreen_ui("ui");
            let mut button =
                Button::new("rotate button", "Toggle rotation").with_alignment(HorizontalAlign::Center, VerticalAlign::Bottom);
            let auto_rotate = Rc::clone(&self.auto_rotate);
            button.on_click(move || auto_rotate.set(!auto_rotate.get()));

            let texture = scene.texture_mut(ui);
            texture.add_control(button);
            texture.add_control(
                TextBlock::new("status text", &self.status())
                    .with_color(1.0, 1.0, 1.0, 1.0)
                    .with_alignment(HorizontalAlign::Center, VerticalAlign::Top),
            );

            scene
        }
        .boxed_local()
    }

    fn update_scene(&mut self, scene: &mut Scene, engine: &dyn Engine) {
        let delta = engine.delta_seconds();
        self.timer.advance(engine);

        if let Some(model) = self.model.get() {
            if self.auto_rotate.get() {
                self.angle += ROTATION_SPEED * delta;
            }
            scene.mesh_mut(model).transform.set_rotation_axis_angle(Vector3::unit_y(), self.angle);
        }

        let status = self.status();
        if let Some(text) = scene
            .get_texture_by_name_mut("ui")
            .and_then(|ui| ui.get_control_by_name_mut("status text"))
        {
            text.set_text(&status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::engine::HeadlessEngine;
    use crate::gfx::loader::tests::{write_temp_obj, TETRAHEDRON_OBJ};
    use std::time::{Duration, Instant};

    fn wait_for_load(scene: &mut Scene) {
        let start = Instant::now();
        while scene.pending_load_count() > 0 && start.elapsed() < Duration::from_secs(5) {
            scene.poll_pending_loads();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn status_text(scene: &Scene) -> String {
        scene
            .get_texture_by_name("ui")
            .and_then(|ui| ui.get_control_by_name("status text"))
            .map(|control| control.text().to_string())
            .unwrap()
    }

    #[test]
    fn test_failed_load_leaves_model_absent() {
        let engine = HeadlessEngine::default();
        let mut app = ModelViewer::new("missing/model.obj");
        let mut scene = pollster::block_on(app.create_scene(&engine));

        wait_for_load(&mut scene);
        app.update_scene(&mut scene, &engine);

        assert!(scene.get_mesh_by_name("model").is_none());
        assert!(app.model().is_none());
        assert_eq!(status_text(&scene), "Loading model...");
        assert!(scene.get_mesh_by_name("ground").is_some());
        assert!(scene.get_mesh_by_name("skybox").is_some());
    }

    #[test]
    fn test_loaded_model_rotates_until_toggled() {
        let path = write_temp_obj("model_viewer.obj", TETRAHEDRON_OBJ);
        let mut engine = HeadlessEngine::default();
        let mut app = ModelViewer::new(&path);
        let mut scene = pollster::block_on(app.create_scene(&engine));

        wait_for_load(&mut scene);
        let model = app.model().unwrap();
        assert_eq!(scene.mesh(model).name, "model");
        assert_eq!(scene.mesh(model).material.as_deref(), Some("model material"));

        engine.step_by(Duration::from_secs(2));
        app.update_scene(&mut scene, &engine);
        assert!((app.angle - 1.0).abs() < 1e-5);
        assert_eq!(status_text(&scene), "Auto-rotate: on");

        scene
            .get_texture_by_name_mut("ui")
            .and_then(|ui| ui.get_control_by_name_mut("rotate button"))
            .and_then(|control| control.as_button_mut())
            .unwrap()
            .click();
        assert!(!app.auto_rotate());

        engine.step_by(Duration::from_secs(2));
        app.update_scene(&mut scene, &engine);
        assert!((app.angle - 1.0).abs() < 1e-5);
        assert_eq!(status_text(&scene), "Auto-rotate: off");
    }
}
