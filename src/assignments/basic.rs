use cgmath::Vector3;
use futures::future::{FutureExt, LocalBoxFuture};
use std::f32::consts::PI;

use crate::app::XrApp;
use crate::gfx::{
    engine::Engine,
    material::StandardMaterial,
    scene::{BoxOptions, MeshId, Scene},
};
use crate::greeting::say_hello;

use super::AppTimer;

/// A lit box spinning about Y at one radian per second
#[derive(Debug, Default)]
pub struct BasicScene {
    timer: AppTimer,
    cube: Option<MeshId>,
}

impl BasicScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self) -> f32 {
        self.timer.seconds()
    }
}

impl XrApp for BasicScene {
    fn name(&self) -> &str {
        "basic"
    }

    fn create_scene<'a>(&'a mut self, _engine: &'a dyn Engine) -> LocalBoxFuture<'a, Scene> {
        async move {
            say_hello("World");
            self.timer.reset();

            let mut scene = Scene::new();
            scene.create_arc_rotate_camera("camera", -PI / 2.0, PI / 2.5, 3.0, Vector3::new(0.0, 0.0, 0.0));
            let light = scene.create_hemispheric_light("light", Vector3::new(0.0, 1.0, 0.0));
            scene.light_mut(light).intensity = 0.7;

            let material = scene.add_material(StandardMaterial::new("box material").with_diffuse(0.4, 0.6, 0.9));
            let cube = scene.create_box("box", BoxOptions { size: 1.0 });
            scene.mesh_mut(cube).set_material(&material);

            self.cube = Some(cube);
            scene
        }
        .boxed_local()
    }

    fn update_scene(&mut self, scene: &mut Scene, engine: &dyn Engine) {
        let t = self.timer.advance(engine);
        if let Some(cube) = self.cube {
            scene.mesh_mut(cube).transform.set_rotation_axis_angle(Vector3::unit_y(), t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::engine::HeadlessEngine;
    use cgmath::{Quaternion, Rad, Rotation3};
    use std::time::Duration;

    #[test]
    fn test_scene_contents() {
        let engine = HeadlessEngine::default();
        let mut app = BasicScene::new();
        let scene = pollster::block_on(app.create_scene(&engine));

        assert!(scene.get_camera_by_name("camera").is_some());
        assert!(scene.get_light_by_name("light").is_some());
        let cube = scene.get_mesh_by_name("box").unwrap();
        assert_eq!(cube.material.as_deref(), Some("box material"));
    }

    #[test]
    fn test_box_spins_one_radian_per_second() {
        let mut engine = HeadlessEngine::default();
        let mut app = BasicScene::new();
        let mut scene = pollster::block_on(app.create_scene(&engine));

        app.update_scene(&mut scene, &engine);
        engine.step_by(Duration::from_millis(1500));
        app.update_scene(&mut scene, &engine);

        let expected = Quaternion::from_angle_y(Rad(1.5));
        let actual = scene.get_mesh_by_name("box").unwrap().transform.rotation;
        assert!((actual.s - expected.s).abs() < 1e-5);
        assert!((actual.v.y - expected.v.y).abs() < 1e-5);
        assert!((app.timer() - 1.5).abs() < 1e-5);
    }
}
