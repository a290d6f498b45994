use cgmath::Vector3;
use futures::future::{FutureExt, LocalBoxFuture};
use std::f32::consts::PI;

use crate::app::XrApp;
use crate::gfx::{
    engine::Engine,
    material::StandardMaterial,
    scene::{MeshId, PlaneOptions, Scene, SphereOptions},
};
use crate::greeting::create_hello_message;
use crate::ui::TextBlock;

use super::AppTimer;

const PLANE_HEIGHT: f32 = 2.5;

/// A bobbing sphere under a plane that greets the viewer
#[derive(Debug, Default)]
pub struct HelloXr {
    timer: AppTimer,
    sphere: Option<MeshId>,
}

impl HelloXr {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XrApp for HelloXr {
    fn name(&self) -> &str {
        "hello-xr"
    }

    fn create_scene<'a>(&'a mut self, _engine: &'a dyn Engine) -> LocalBoxFuture<'a, Scene> {
        async move {
            self.timer.reset();

            let mut scene = Scene::new();
            scene.create_arc_rotate_camera("camera", -PI / 2.0, PI / 2.5, 6.0, Vector3::new(0.0, 1.0, 0.0));
            scene.create_hemispheric_light("light", Vector3::new(0.0, 1.0, 0.0));

            let sphere = scene.create_sphere(
                "sphere",
                SphereOptions {
                    diameter: 1.0,
                    segments: 32,
                },
            );
            let sphere_material = scene.add_material(StandardMaterial::new("sphere material").with_diffuse(0.9, 0.4, 0.3));
            scene.mesh_mut(sphere).set_material(&sphere_material);

            let plane = scene.create_plane("hello plane", PlaneOptions { width: 3.0, height: 1.0 });
            let plane_material = scene.add_material(StandardMaterial::new("plane material").with_diffuse(0.1, 0.1, 0.15));
            let plane_mesh = scene.mesh_mut(plane);
            plane_mesh.transform.position = Vector3::new(0.0, PLANE_HEIGHT, 0.0);
            plane_mesh.set_material(&plane_material);

            let texture = scene.create_texture_for_mesh("hello texture", plane, 1024, 1024);
            scene.texture_mut(texture).add_control(
                TextBlock::new("hello text", &create_hello_message("XR"))
                    .with_color(1.0, 1.0, 1.0, 1.0)
                    .with_font_size(48.0),
            );

            self.sphere = Some(sphere);
            scene
        }
        .boxed_local()
    }

    fn update_scene(&mut self, scene: &mut Scene, engine: &dyn Engine) {
        let t = self.timer.advance(engine);
        if let Some(sphere) = self.sphere {
            scene.mesh_mut(sphere).transform.position.y = t.sin();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::engine::HeadlessEngine;
    use crate::ui::GuiTarget;
    use cgmath::{InnerSpace, Vector4};
    use std::time::Duration;

    #[test]
    fn test_hello_texture_is_bound_to_plane() {
        let engine = HeadlessEngine::default();
        let mut app = HelloXr::new();
        let scene = pollster::block_on(app.create_scene(&engine));

        let plane = scene.get_mesh_id_by_name("hello plane").unwrap();
        let texture = scene.get_texture_by_name("hello texture").unwrap();
        assert!(matches!(texture.target, GuiTarget::Mesh { mesh, .. } if mesh == plane));
        assert_eq!(texture.get_control_by_name("hello text").unwrap().text(), "Hello, XR!");
    }

    #[test]
    fn test_plane_front_faces_active_camera() {
        let engine = HeadlessEngine::default();
        let mut app = HelloXr::new();
        let scene = pollster::block_on(app.create_scene(&engine));

        let eye = scene.active_camera().unwrap().position();
        let plane = scene.get_mesh_by_name("hello plane").unwrap();
        let world = plane.world_matrix();
        let corner = |index: u32| {
            let [x, y, z] = plane.geometry.vertices[index as usize];
            (world * Vector4::new(x, y, z, 1.0)).truncate()
        };

        // Counter-clockwise triangles are front faces; culling drops the rest
        for tri in plane.geometry.indices.chunks(3) {
            let (a, b, c) = (corner(tri[0]), corner(tri[1]), corner(tri[2]));
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(eye - a) > 0.0);
        }
    }

    #[test]
    fn test_sphere_bobs_with_timer() {
        let mut engine = HeadlessEngine::default();
        let mut app = HelloXr::new();
        let mut scene = pollster::block_on(app.create_scene(&engine));

        app.update_scene(&mut scene, &engine);
        assert_eq!(scene.get_mesh_by_name("sphere").unwrap().transform.position.y, 0.0);

        engine.step_by(Duration::from_secs_f32(PI / 2.0));
        app.update_scene(&mut scene, &engine);
        let y = scene.get_mesh_by_name("sphere").unwrap().transform.position.y;
        assert!((y - 1.0).abs() < 1e-4);
    }
}
