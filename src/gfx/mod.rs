//! # Graphics Module
//!
//! Scene graph, cameras, lights, materials, geometry and the wgpu renderer.
//!
//! ## Architecture Overview
//!
//! - **Engine** ([`engine`]) - frame timing and viewport size, windowed or headless
//! - **Camera System** ([`camera`]) - arc-rotate and free cameras with mouse control
//! - **Geometry** ([`geometry`]) - procedural primitives and vertex data
//! - **Scene Management** ([`scene`]) - named meshes, cameras, lights and GUI textures
//! - **Model Loading** ([`loader`]) - OBJ files read on a background thread
//! - **Rendering Pipeline** ([`rendering`]) - forward renderer drawing a [`Scene`]
//!
//! Everything except [`rendering`] is GPU-free, so scenes can be built and
//! stepped with a [`HeadlessEngine`] in tests.
//!
//! [`Scene`]: scene::Scene
//! [`HeadlessEngine`]: engine::HeadlessEngine

pub mod camera;
pub mod engine;
pub mod geometry;
pub mod lights;
pub mod loader;
pub mod material;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use camera::{ArcRotateCamera, SceneCamera};
pub use engine::{Engine, HeadlessEngine, WindowEngine};
pub use rendering::RenderEngine;
pub use scene::Scene;
