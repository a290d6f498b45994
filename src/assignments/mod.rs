//! # Assignments
//!
//! The runnable scenes, selectable by name from the command line:
//!
//! | name           | type            |
//! |----------------|-----------------|
//! | `basic`        | [`BasicScene`]  |
//! | `hello-xr`     | [`HelloXr`]     |
//! | `orbit`        | [`OrbitScene`]  |
//! | `model-viewer` | [`ModelViewer`] |

mod basic;
mod hello_xr;
mod model_viewer;
mod orbit;

pub use basic::BasicScene;
pub use hello_xr::HelloXr;
pub use model_viewer::ModelViewer;
pub use orbit::OrbitScene;

use crate::app::XrApp;
use crate::config::RunnerConfig;
use crate::gfx::engine::Engine;

pub const ASSIGNMENT_NAMES: [&str; 4] = ["basic", "hello-xr", "orbit", "model-viewer"];

/// Assignment with default settings
pub fn by_name(name: &str) -> Option<Box<dyn XrApp>> {
    with_config(name, &RunnerConfig::default())
}

/// Assignment configured from `config` (the model viewer's asset path)
pub fn with_config(name: &str, config: &RunnerConfig) -> Option<Box<dyn XrApp>> {
    let app: Box<dyn XrApp> = match name {
        "basic" => Box::new(BasicScene::new()),
        "hello-xr" => Box::new(HelloXr::new()),
        "orbit" => Box::new(OrbitScene::new()),
        "model-viewer" => Box::new(ModelViewer::new(&config.model_path)),
        _ => return None,
    };
    Some(app)
}

/// Seconds accumulated from engine frame deltas; never decreases
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AppTimer {
    seconds: f32,
}

impl AppTimer {
    /// Adds the current frame delta and returns the new total
    pub fn advance(&mut self, engine: &dyn Engine) -> f32 {
        self.seconds += engine.delta_seconds();
        self.seconds
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    pub fn reset(&mut self) {
        self.seconds = 0.0;
    }
}
