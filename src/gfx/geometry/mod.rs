//! # Procedural Geometry Generation
//!
//! Functions that generate the primitive meshes the assignments are built
//! from, so no model files are needed for basic shapes.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box, unit cube by default
//! - **Sphere**: UV sphere with configurable resolution
//! - **Icosphere**: subdivided icosahedron
//! - **Plane**: vertical plane facing -Z (text overlays go here)
//! - **Ground**: horizontal plane facing +Y
//!
//! ## Usage
//!
//! ```rust
//! use xr_scenes::gfx::geometry::{generate_box, generate_sphere, generate_ground};
//!
//! let crate_box = generate_box(2.0);
//! let sphere = generate_sphere(32, 16);
//! let ground = generate_ground(10.0, 10.0, 4);
//! assert_eq!(ground.triangle_count(), 32);
//! ```

pub mod primitives;

pub use primitives::*;

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Builds geometry from the flat arrays a model loader produces
    ///
    /// Missing normals are computed by averaging face normals; missing
    /// texture coordinates default to zero.
    pub fn from_flat(positions: &[f32], normals: &[f32], tex_coords: &[f32], indices: Vec<u32>) -> Self {
        let vertices: Vec<[f32; 3]> = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();

        let normals = if normals.len() == positions.len() {
            normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
        } else {
            compute_vertex_normals(&vertices, &indices)
        };

        let tex_coords = if tex_coords.len() / 2 == vertices.len() {
            tex_coords.chunks_exact(2).map(|t| [t[0], t[1]]).collect()
        } else {
            vec![[0.0, 0.0]; vertices.len()]
        };

        Self {
            vertices,
            tex_coords,
            normals,
            indices,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns a copy with every position multiplied by `factor`
    pub fn scaled(mut self, factor: f32) -> Self {
        for v in self.vertices.iter_mut() {
            v[0] *= factor;
            v[1] *= factor;
            v[2] *= factor;
        }
        self
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for empty geometry
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
            (min, max)
        }))
    }

    /// Flips triangle winding and normals so the inside faces outward
    pub fn flipped(mut self) -> Self {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        for n in self.normals.iter_mut() {
            *n = [-n[0], -n[1], -n[2]];
        }
        self
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<crate::gfx::scene::vertex::Vertex3D> {
        use crate::gfx::scene::vertex::Vertex3D;

        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Averages the face normals touching each vertex
fn compute_vertex_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }
        let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);
        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let face = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        for &i in &[i0, i1, i2] {
            normals[i][0] += face[0];
            normals[i][1] += face[1];
            normals[i][2] += face[2];
        }
    }

    for n in normals.iter_mut() {
        let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if length > 0.0 {
            *n = [n[0] / length, n[1] / length, n[2] / length];
        } else {
            *n = [0.0, 1.0, 0.0];
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_computes_missing_normals() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let geometry = GeometryData::from_flat(&positions, &[], &[], vec![0, 1, 2]);

        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.tex_coords.len(), 3);
        for n in &geometry.normals {
            assert_eq!(*n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_bounds_and_scale() {
        let geometry = generate_box(1.0).scaled(4.0);
        let (min, max) = geometry.bounds().unwrap();
        assert_eq!(min, [-2.0, -2.0, -2.0]);
        assert_eq!(max, [2.0, 2.0, 2.0]);
        assert!(GeometryData::new().bounds().is_none());
    }

    #[test]
    fn test_flipped_reverses_winding() {
        let plane = generate_plane(1.0, 1.0, 1, 1);
        let flipped = plane.clone().flipped();
        assert_eq!(flipped.indices[1], plane.indices[2]);
        assert_eq!(flipped.normals[0], [0.0, 0.0, -1.0]);
    }
}
