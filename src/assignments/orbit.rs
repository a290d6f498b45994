use cgmath::{Vector3, VectorSpace};
use futures::future::{FutureExt, LocalBoxFuture};
use std::f32::consts::PI;

use crate::app::XrApp;
use crate::gfx::{
    engine::Engine,
    material::StandardMaterial,
    scene::{BoxOptions, IcoSphereOptions, MeshId, Scene},
};

use super::AppTimer;

const ORBIT_RADIUS: f32 = 2.0;

/// Rotation axis for time `t`: X blended towards Y by `(sin t + 1) / 2`
pub fn wobble_axis(t: f32) -> Vector3<f32> {
    let blend = (t.sin() + 1.0) / 2.0;
    Vector3::unit_x().lerp(Vector3::unit_y(), blend)
}

/// Moon position on its orbit around the origin at time `t`
pub fn orbit_position(t: f32) -> Vector3<f32> {
    Vector3::new(ORBIT_RADIUS * t.cos(), 0.0, ORBIT_RADIUS * t.sin())
}

/// A wobbling box with a small moon circling it
#[derive(Debug, Default)]
pub struct OrbitScene {
    timer: AppTimer,
    cube: Option<MeshId>,
    moon: Option<MeshId>,
}

impl OrbitScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XrApp for OrbitScene {
    fn name(&self) -> &str {
        "orbit"
    }

    fn create_scene<'a>(&'a mut self, _engine: &'a dyn Engine) -> LocalBoxFuture<'a, Scene> {
        async move {
            self.timer.reset();

            let mut scene = Scene::new();
            scene.create_arc_rotate_camera("camera", -PI / 2.0, PI / 3.0, 7.0, Vector3::new(0.0, 0.0, 0.0));
            scene.create_hemispheric_light("light", Vector3::new(0.0, 1.0, 0.0));

            let box_material = scene.add_material(StandardMaterial::new("box material").with_diffuse(0.8, 0.5, 0.2));
            let cube = scene.create_box("box", BoxOptions { size: 1.0 });
            scene.mesh_mut(cube).set_material(&box_material);

            let moon_material = scene.add_material(StandardMaterial::new("moon material").with_diffuse(0.75, 0.75, 0.8));
            let moon = scene.create_icosphere(
                "moon",
                IcoSphereOptions {
                    radius: 0.3,
                    subdivisions: 3,
                },
            );
            let moon_mesh = scene.mesh_mut(moon);
            moon_mesh.set_material(&moon_material);
            moon_mesh.transform.position = orbit_position(0.0);

            self.cube = Some(cube);
            self.moon = Some(moon);
            scene
        }
        .boxed_local()
    }

    fn update_scene(&mut self, scene: &mut Scene, engine: &dyn Engine) {
        let t = self.timer.advance(engine);
        if let Some(cube) = self.cube {
            scene.mesh_mut(cube).transform.set_rotation_axis_angle(wobble_axis(t), t);
        }
        if let Some(moon) = self.moon {
            scene.mesh_mut(moon).transform.position = orbit_position(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::engine::HeadlessEngine;
    use approx::assert_relative_eq;
    use cgmath::InnerSpace;
    use std::time::Duration;

    #[test]
    fn test_wobble_axis_blends_between_x_and_y() {
        assert_relative_eq!(wobble_axis(0.0), Vector3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(wobble_axis(PI / 2.0), Vector3::unit_y(), epsilon = 1e-6);
        assert_relative_eq!(wobble_axis(-PI / 2.0), Vector3::unit_x(), epsilon = 1e-6);
    }

    #[test]
    fn test_moon_follows_orbit() {
        let mut engine = HeadlessEngine::default();
        let mut app = OrbitScene::new();
        let mut scene = pollster::block_on(app.create_scene(&engine));

        app.update_scene(&mut scene, &engine);
        assert_relative_eq!(
            scene.get_mesh_by_name("moon").unwrap().transform.position,
            Vector3::new(2.0, 0.0, 0.0)
        );

        engine.step_by(Duration::from_secs_f32(PI / 2.0));
        app.update_scene(&mut scene, &engine);
        let position = scene.get_mesh_by_name("moon").unwrap().transform.position;
        assert_relative_eq!(position, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-4);
        assert_relative_eq!(position.magnitude(), ORBIT_RADIUS, epsilon = 1e-5);
    }
}
