use cgmath::{InnerSpace, Matrix4, One, Quaternion, Rad, Rotation3, Vector3};

use crate::gfx::{geometry::GeometryData, material::MaterialId};

/// Position, rotation and scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scaling: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// World matrix composed as T * R * S
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scaling.x, self.scaling.y, self.scaling.z)
    }

    /// Replaces the rotation with `angle` radians around `axis`
    ///
    /// A zero-length axis resets the rotation to identity.
    pub fn set_rotation_axis_angle(&mut self, axis: Vector3<f32>, angle: f32) {
        self.rotation = if axis.magnitude2() > f32::EPSILON {
            Quaternion::from_axis_angle(axis.normalize(), Rad(angle))
        } else {
            Quaternion::one()
        };
    }

    /// Replaces the rotation with Euler angles applied in Y, X, Z order
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quaternion::from_angle_y(Rad(y))
            * Quaternion::from_angle_x(Rad(x))
            * Quaternion::from_angle_z(Rad(z));
    }

    /// Applies an additional rotation around a local axis
    pub fn rotate(&mut self, axis: Vector3<f32>, angle: f32) {
        if axis.magnitude2() > f32::EPSILON {
            self.rotation = (self.rotation * Quaternion::from_axis_angle(axis.normalize(), Rad(angle))).normalize();
        }
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scaling = Vector3::new(scale, scale, scale);
    }
}

/// Named mesh owned by a scene
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub name: String,
    pub geometry: GeometryData,
    pub transform: Transform,
    pub material: Option<MaterialId>,
    pub visible: bool,
}

impl SceneMesh {
    pub fn new(name: &str, geometry: GeometryData) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            transform: Transform::default(),
            material: None,
            visible: true,
        }
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    /// Centre of the mesh in world space
    pub fn world_position(&self) -> Vector3<f32> {
        self.transform.position
    }

    pub fn set_material(&mut self, material: &str) {
        self.material = Some(material.to_string());
    }
}
