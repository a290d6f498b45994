//! # Scene Management Module
//!
//! The [`Scene`] container owns every camera, light, mesh, material and GUI
//! texture an assignment creates, and attaches asynchronously loaded models
//! once they arrive.
//!
//! ## Key Components
//!
//! - [`Scene`] - The scene container with factory methods and name lookups
//! - [`SceneMesh`] - Named geometry with a [`Transform`] and optional material
//! - [`Vertex3D`] - Vertex layout consumed by the renderer
//!
//! ## Usage
//!
//! ```no_run
//! use xr_scenes::gfx::scene::{BoxOptions, Scene};
//!
//! let mut scene = Scene::new();
//! let cube = scene.create_box("box", BoxOptions { size: 1.0 });
//! scene.mesh_mut(cube).transform.set_rotation_euler(0.0, 0.5, 0.0);
//! ```

pub mod mesh;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use mesh::{SceneMesh, Transform};
pub use scene::{
    BoxOptions, CameraId, GroundOptions, IcoSphereOptions, LightId, MeshId, PlaneOptions, Scene,
    SceneStatistics, SphereOptions, TextureId,
};
pub use vertex::Vertex3D;
