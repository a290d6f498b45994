//! # Prelude
//!
//! Commonly used types for writing assignments:
//!
//! ```no_run
//! use xr_scenes::prelude::*;
//!
//! let app = xr_scenes::assignments::by_name("basic").unwrap();
//! XrRunner::new(app, RunnerConfig::default()).run().unwrap();
//! ```

// Application and runner
pub use crate::app::{XrApp, XrRunner};
pub use crate::assignments::AppTimer;
pub use crate::config::RunnerConfig;
pub use crate::error::XrError;

// Scene types
pub use crate::gfx::engine::{Engine, HeadlessEngine};
pub use crate::gfx::material::StandardMaterial;
pub use crate::gfx::scene::{
    BoxOptions, GroundOptions, IcoSphereOptions, MeshId, PlaneOptions, Scene, SphereOptions,
};

// GUI
pub use crate::ui::{Button, HorizontalAlign, TextBlock, VerticalAlign};

pub use crate::greeting::{create_hello_message, say_hello};

// Common external types
pub use cgmath::{InnerSpace, Vector3};
pub use futures::future::{FutureExt, LocalBoxFuture};
