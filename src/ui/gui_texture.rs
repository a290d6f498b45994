use crate::gfx::scene::MeshId;

use super::controls::Control;

/// Where a GUI texture is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiTarget {
    /// Rendered onto the surface of a mesh, `width` x `height` texels
    Mesh { mesh: MeshId, width: u32, height: u32 },
    /// Covers the whole viewport
    Fullscreen,
}

/// 2D overlay layer holding named controls
#[derive(Debug)]
pub struct GuiTexture {
    pub name: String,
    pub target: GuiTarget,
    pub background: Option<[f32; 4]>,
    controls: Vec<Control>,
}

impl GuiTexture {
    pub fn for_mesh(name: &str, mesh: MeshId, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            target: GuiTarget::Mesh { mesh, width, height },
            background: None,
            controls: Vec::new(),
        }
    }

    pub fn fullscreen(name: &str) -> Self {
        Self {
            name: name.to_string(),
            target: GuiTarget::Fullscreen,
            background: None,
            controls: Vec::new(),
        }
    }

    /// Adds a control; returns its index within this texture
    pub fn add_control(&mut self, control: impl Into<Control>) -> usize {
        self.controls.push(control.into());
        self.controls.len() - 1
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }

    /// First control with the given name
    pub fn get_control_by_name(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name() == name)
    }

    pub fn get_control_by_name_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|control| control.name() == name)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.target == GuiTarget::Fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::{Button, TextBlock};

    #[test]
    fn test_lookup_by_name_returns_first_match() {
        let mut texture = GuiTexture::fullscreen("ui");
        texture.add_control(TextBlock::new("label", "one"));
        texture.add_control(TextBlock::new("label", "two"));
        texture.add_control(Button::new("ok", "OK"));

        assert_eq!(texture.get_control_by_name("label").unwrap().text(), "one");
        assert_eq!(texture.get_control_by_name("ok").unwrap().text(), "OK");
        assert!(texture.get_control_by_name("missing").is_none());
        assert_eq!(texture.controls().len(), 3);
        assert!(texture.is_fullscreen());
    }
}
