//! # User Interface Module
//!
//! Scene-side GUI model plus its imgui rendering.
//!
//! ## Key Components
//!
//! - [`GuiTexture`] - named overlay layer bound to a mesh or the full viewport
//! - [`TextBlock`] / [`Button`] - the controls a texture hosts
//! - [`UiManager`] - imgui integration with winit and wgpu
//! - [`draw_scene_gui`] - builds the imgui frame for a scene's textures
//!
//! The GUI model has no GPU dependency, so headless runs and tests build and
//! inspect it the same way the windowed runner does.

pub mod controls;
pub mod gui_texture;
pub mod manager;
pub mod overlay;

// Re-export main types
pub use controls::{Button, Control, HorizontalAlign, TextBlock, VerticalAlign};
pub use gui_texture::{GuiTarget, GuiTexture};
pub use manager::UiManager;
pub use overlay::{draw_scene_gui, project_to_screen};
