//! Scene lights
//!
//! The renderer shades with the first enabled light of a scene; the rest are
//! kept for lookup and for scenes that switch lights at runtime.

use cgmath::{InnerSpace, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Sky/ground blend along `direction` (pointing towards the sky)
    Hemispheric {
        direction: Vector3<f32>,
        ground_color: [f32; 3],
    },
    /// Parallel rays travelling along `direction`
    Directional { direction: Vector3<f32> },
    /// Omnidirectional light at `position`
    Point { position: Vector3<f32> },
}

/// Named light owned by a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLight {
    pub name: String,
    pub kind: LightKind,
    pub diffuse: [f32; 3],
    pub intensity: f32,
    pub enabled: bool,
}

impl SceneLight {
    fn with_kind(name: &str, kind: LightKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            diffuse: [1.0, 1.0, 1.0],
            intensity: 1.0,
            enabled: true,
        }
    }

    pub fn hemispheric(name: &str, direction: Vector3<f32>) -> Self {
        Self::with_kind(
            name,
            LightKind::Hemispheric {
                direction: safe_normalize(direction),
                ground_color: [0.0, 0.0, 0.0],
            },
        )
    }

    pub fn directional(name: &str, direction: Vector3<f32>) -> Self {
        Self::with_kind(
            name,
            LightKind::Directional {
                direction: safe_normalize(direction),
            },
        )
    }

    pub fn point(name: &str, position: Vector3<f32>) -> Self {
        Self::with_kind(name, LightKind::Point { position })
    }

    /// Builder pattern: Set intensity, clamped at zero
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity.max(0.0);
        self
    }

    /// Builder pattern: Set diffuse colour
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = [r, g, b];
        self
    }
}

/// Normalises `v`, falling back to +Y for zero-length input
fn safe_normalize(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > f32::EPSILON {
        v.normalize()
    } else {
        Vector3::unit_y()
    }
}
