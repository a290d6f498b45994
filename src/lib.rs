// src/lib.rs
//! xr-scenes
//!
//! Small interactive 3D scene assignments built on a wgpu and winit scene
//! graph. Each assignment builds a [`Scene`](gfx::Scene) and updates it once
//! per frame; [`XrRunner`] shows it in a window or steps it headless.

pub mod app;
pub mod assignments;
pub mod config;
pub mod error;
pub mod gfx;
pub mod greeting;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{XrApp, XrRunner};
pub use config::RunnerConfig;
pub use error::{Result, XrError};
pub use greeting::{create_hello_message, say_hello};
