//! Material system
//!
//! Materials are stored centrally in [`MaterialManager`] and meshes reference
//! them by name. Meshes without a material, or naming one that doesn't exist,
//! render with the default material.

use std::collections::HashMap;

/// Material ID for referencing materials
pub type MaterialId = String;

/// Flat-shaded material with diffuse and emissive colour
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub name: String,
    pub diffuse: [f32; 3],
    pub emissive: [f32; 3],
    pub alpha: f32,
    /// Ignore scene lights and show the emissive colour only (skyboxes)
    pub disable_lighting: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            diffuse: [0.8, 0.8, 0.8],
            emissive: [0.0, 0.0, 0.0],
            alpha: 1.0,
            disable_lighting: false,
        }
    }
}

impl StandardMaterial {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Builder pattern: Set diffuse color from RGB values
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = [r, g, b];
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emissive(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Render unlit
    pub fn unlit(mut self) -> Self {
        self.disable_lighting = true;
        self
    }
}

/// Central material storage
#[derive(Debug, Clone)]
pub struct MaterialManager {
    materials: HashMap<MaterialId, StandardMaterial>,
    default_material: StandardMaterial,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: StandardMaterial::default(),
        }
    }

    /// Adds a material, replacing any material with the same name
    pub fn add_material(&mut self, material: StandardMaterial) -> MaterialId {
        let id = material.name.clone();
        self.materials.insert(id.clone(), material);
        id
    }

    pub fn get_material(&self, id: &str) -> Option<&StandardMaterial> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut StandardMaterial> {
        self.materials.get_mut(id)
    }

    /// Material to render with for an optional assignment
    pub fn resolve(&self, id: Option<&str>) -> &StandardMaterial {
        id.and_then(|id| self.materials.get(id))
            .unwrap_or(&self.default_material)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_default() {
        let mut manager = MaterialManager::new();
        manager.add_material(StandardMaterial::new("red").with_diffuse(1.0, 0.0, 0.0));

        assert_eq!(manager.resolve(Some("red")).diffuse, [1.0, 0.0, 0.0]);
        assert_eq!(manager.resolve(Some("missing")).name, "default");
        assert_eq!(manager.resolve(None).name, "default");
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut manager = MaterialManager::new();
        manager.add_material(StandardMaterial::new("sky"));
        manager.add_material(StandardMaterial::new("sky").with_alpha(3.0).unlit());

        assert_eq!(manager.len(), 1);
        let sky = manager.get_material("sky").unwrap();
        assert_eq!(sky.alpha, 1.0);
        assert!(sky.disable_lighting);
    }
}
