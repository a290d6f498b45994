//! WGPU utility functions and helpers
//!
//! Thin wrappers for the buffer and binding boilerplate the renderer repeats
//! per mesh.

pub mod binding_types;
pub mod uniform_buffer;

pub use uniform_buffer::UniformBuffer;
