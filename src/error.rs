//! Error types surfaced by the runner
//!
//! Scene construction itself never fails; only window, GPU and configuration
//! setup can. Model loading reports through [`LoadError`](crate::gfx::loader::LoadError)
//! and is handled inside the scene.

use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum XrError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("surface ran out of memory")]
    OutOfMemory,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown assignment '{0}'")]
    UnknownAssignment(String),
}

pub type Result<T, E = XrError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;

    #[test]
    fn test_config_errors_keep_their_message() {
        let err = RunnerConfig::load("no/such/config.toml").map_err(XrError::from).unwrap_err();
        assert!(matches!(err, XrError::Config(ConfigError::Io { .. })));
        assert!(err.to_string().contains("no/such/config.toml"));
    }
}
