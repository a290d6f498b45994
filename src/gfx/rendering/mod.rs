//! Rendering subsystem: surface, pipeline and per-mesh GPU resources

pub mod render_engine;
pub mod texture_resource;
pub mod uniforms;

pub use render_engine::RenderEngine;
pub use uniforms::{GlobalUniform, MeshUniform};
