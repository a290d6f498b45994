//! GPU-side uniform layouts
//!
//! Both structs MUST match `Globals` and `Model` in `shader.wgsl`.

use cgmath::{Matrix, SquareMatrix};

use crate::gfx::{
    lights::{LightKind, SceneLight},
    material::StandardMaterial,
    scene::{Scene, SceneMesh},
};

const LIGHT_NONE: f32 = 0.0;
const LIGHT_HEMISPHERIC: f32 = 1.0;
const LIGHT_DIRECTIONAL: f32 = 2.0;
const LIGHT_POINT: f32 = 3.0;

/// Per-frame camera and lighting data, bound at group 0
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// xyz: light direction or position, w: light kind
    pub light_vector: [f32; 4],
    /// rgb: diffuse colour scaled by intensity
    pub light_diffuse: [f32; 4],
    /// rgb: hemispheric ground colour
    pub light_ground: [f32; 4],
}

impl GlobalUniform {
    /// Uniform for the scene's active camera and primary light
    ///
    /// Without a camera the view-projection is the identity; without an
    /// enabled light only emissive colour shows.
    pub fn from_scene(scene: &Scene) -> Self {
        let camera = scene
            .active_camera()
            .map(|camera| camera.uniform())
            .unwrap_or_default();

        let mut uniform = Self {
            view_proj: camera.view_proj,
            eye: camera.view_position,
            light_vector: [0.0, 1.0, 0.0, LIGHT_NONE],
            light_diffuse: [0.0; 4],
            light_ground: [0.0; 4],
        };
        if let Some(light) = scene.primary_light() {
            uniform.set_light(light);
        }
        uniform
    }

    fn set_light(&mut self, light: &SceneLight) {
        let scale = light.intensity;
        self.light_diffuse = [
            light.diffuse[0] * scale,
            light.diffuse[1] * scale,
            light.diffuse[2] * scale,
            1.0,
        ];

        match light.kind {
            LightKind::Hemispheric { direction, ground_color } => {
                self.light_vector = [direction.x, direction.y, direction.z, LIGHT_HEMISPHERIC];
                self.light_ground = [
                    ground_color[0] * scale,
                    ground_color[1] * scale,
                    ground_color[2] * scale,
                    1.0,
                ];
            }
            LightKind::Directional { direction } => {
                self.light_vector = [direction.x, direction.y, direction.z, LIGHT_DIRECTIONAL];
            }
            LightKind::Point { position } => {
                self.light_vector = [position.x, position.y, position.z, LIGHT_POINT];
            }
        }
    }
}

/// Per-mesh transform and material, bound at group 1
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb: diffuse, a: alpha
    pub diffuse: [f32; 4],
    /// rgb: emissive, w: 1.0 when lighting is disabled
    pub emissive: [f32; 4],
}

impl MeshUniform {
    pub fn new(mesh: &SceneMesh, material: &StandardMaterial) -> Self {
        let model = mesh.world_matrix();
        // Degenerate (zero-scale) transforms fall back to the model matrix
        let normal_matrix = model.invert().map(|m| m.transpose()).unwrap_or(model);

        Self {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
            diffuse: [
                material.diffuse[0],
                material.diffuse[1],
                material.diffuse[2],
                material.alpha,
            ],
            emissive: [
                material.emissive[0],
                material.emissive[1],
                material.emissive[2],
                if material.disable_lighting { 1.0 } else { 0.0 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::BoxOptions;
    use cgmath::Vector3;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 128);
        assert_eq!(std::mem::size_of::<MeshUniform>(), 160);
    }

    #[test]
    fn test_scene_without_light_is_unlit() {
        let mut scene = Scene::new();
        scene.create_free_camera("camera", Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 0.0));
        let uniform = GlobalUniform::from_scene(&scene);

        assert_eq!(uniform.light_vector[3], LIGHT_NONE);
        assert_eq!(uniform.eye, [0.0, 0.0, -5.0, 1.0]);
    }

    #[test]
    fn test_first_enabled_light_is_used() {
        let mut scene = Scene::new();
        let off = scene.create_point_light("off", Vector3::new(1.0, 2.0, 3.0));
        scene.light_mut(off).enabled = false;
        scene.create_directional_light("sun", Vector3::new(0.0, -1.0, 0.0));

        let uniform = GlobalUniform::from_scene(&scene);
        assert_eq!(uniform.light_vector, [0.0, -1.0, 0.0, LIGHT_DIRECTIONAL]);
        assert_eq!(uniform.light_diffuse, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unlit_material_sets_flag() {
        let mut scene = Scene::new();
        let id = scene.create_box("box", BoxOptions::default());
        let material = StandardMaterial::new("glow").with_emissive(1.0, 0.5, 0.0).unlit();
        let uniform = MeshUniform::new(scene.mesh(id), &material);

        assert_eq!(uniform.emissive, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(uniform.normal_matrix, uniform.model);
    }
}
