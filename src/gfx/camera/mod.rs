//! # Cameras
//!
//! Scenes hold any number of named [`SceneCamera`]s; the first one created is
//! active unless the scene selects another. Two kinds exist:
//!
//! - [`ArcRotateCamera`] - orbits a target, driven by mouse drag and wheel
//! - [`FreeCamera`] - fixed eye position looking at a target

pub mod arc_rotate_camera;
pub mod camera_controller;
pub mod camera_utils;

use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3};

pub use arc_rotate_camera::{ArcRotateBounds, ArcRotateCamera};
pub use camera_controller::CameraController;
pub use camera_utils::{Camera, CameraUniform, Projection};

/// Camera at a fixed position looking at a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeCamera {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraKind {
    ArcRotate(ArcRotateCamera),
    Free(FreeCamera),
}

/// Named camera owned by a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    pub name: String,
    pub kind: CameraKind,
    pub projection: Projection,
}

impl SceneCamera {
    pub fn arc_rotate(name: &str, camera: ArcRotateCamera) -> Self {
        Self {
            name: name.to_string(),
            kind: CameraKind::ArcRotate(camera),
            projection: Projection::default(),
        }
    }

    pub fn free(name: &str, position: Vector3<f32>, target: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            kind: CameraKind::Free(FreeCamera { position, target }),
            projection: Projection::default(),
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        match &self.kind {
            CameraKind::ArcRotate(camera) => camera.position(),
            CameraKind::Free(camera) => camera.position,
        }
    }

    pub fn target(&self) -> Vector3<f32> {
        match &self.kind {
            CameraKind::ArcRotate(camera) => camera.target,
            CameraKind::Free(camera) => camera.target,
        }
    }

    pub fn as_arc_rotate_mut(&mut self) -> Option<&mut ArcRotateCamera> {
        match &mut self.kind {
            CameraKind::ArcRotate(camera) => Some(camera),
            CameraKind::Free(_) => None,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.position()),
            Point3::from_vec(self.target()),
            Vector3::unit_y(),
        )
    }

    pub fn uniform(&self) -> CameraUniform {
        let eye = self.position();
        CameraUniform {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: self.build_view_projection_matrix().into(),
        }
    }
}

impl Camera for SceneCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix() * self.view_matrix()
    }
}
