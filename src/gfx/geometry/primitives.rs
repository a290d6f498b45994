//! # Primitive Shape Generation
//!
//! All shapes are generated with outward normals and texture coordinates,
//! centred on the origin, Y-up.

use super::GeometryData;
use std::collections::HashMap;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
pub fn generate_cube() -> GeometryData {
    generate_box(1.0)
}

/// Generate an axis-aligned box with edge length `size`
///
/// Each face has its own four vertices so normals stay flat.
pub fn generate_box(size: f32) -> GeometryData {
    let h = size * 0.5;
    let mut data = GeometryData::new();

    // (normal, tangent u, tangent v) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    for (normal, u, v) in faces.iter() {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            data.vertices.push([
                (normal[0] + u[0] * su + v[0] * sv) * h,
                (normal[1] + u[1] * su + v[1] * sv) * h,
                (normal[2] + u[2] * su + v[2] * sv) * h,
            ]);
            data.normals.push(*normal);
            data.tex_coords.push([(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let p = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices.push(p);
            data.normals.push(p);
            data.tex_coords
                .push([long as f32 / long_segs as f32, lat as f32 / lat_segs as f32]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a vertical plane in the XY plane facing -Z
///
/// The front face is seen from a camera on the -Z side, with `u` growing to
/// that viewer's right.
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
pub fn generate_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            data.vertices.push([(0.5 - u) * width, (v - 0.5) * height, 0.0]);
            data.normals.push([0.0, 0.0, -1.0]);
            data.tex_coords.push([u, 1.0 - v]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[next_row, i + 1, next_row + 1]);
        }
    }

    data
}

/// Generate a horizontal ground plane in the XZ plane facing +Y
///
/// `subdivisions` applies to both axes.
pub fn generate_ground(width: f32, depth: f32, subdivisions: u32) -> GeometryData {
    let segs = subdivisions.max(1);
    let mut data = GeometryData::new();

    for row in 0..=segs {
        let v = row as f32 / segs as f32;
        for col in 0..=segs {
            let u = col as f32 / segs as f32;
            data.vertices.push([(u - 0.5) * width, 0.0, (0.5 - v) * depth]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, v]);
        }
    }

    for row in 0..segs {
        for col in 0..segs {
            let i = row * (segs + 1) + col;
            let next_row = i + segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[next_row, i + 1, next_row + 1]);
        }
    }

    data
}

/// Generate an icosphere by subdividing an icosahedron
///
/// Each subdivision splits every triangle into four, so the triangle count is
/// `20 * 4^subdivisions`. Subdivisions are capped at 6.
pub fn generate_icosphere(radius: f32, subdivisions: u32) -> GeometryData {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;

    let mut positions: Vec<[f32; 3]> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|p| normalize(*p))
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for _ in 0..subdivisions.min(6) {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, positions: &mut Vec<[f32; 3]>| -> u32 {
            let key = if a < b { (a, b) } else { (b, a) };
            *midpoints.entry(key).or_insert_with(|| {
                let (pa, pb) = (positions[a as usize], positions[b as usize]);
                positions.push(normalize([
                    (pa[0] + pb[0]) * 0.5,
                    (pa[1] + pb[1]) * 0.5,
                    (pa[2] + pb[2]) * 0.5,
                ]));
                positions.len() as u32 - 1
            })
        };

        faces = faces
            .iter()
            .flat_map(|&[a, b, c]| {
                let ab = midpoint(a, b, &mut positions);
                let bc = midpoint(b, c, &mut positions);
                let ca = midpoint(c, a, &mut positions);
                [[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]
            })
            .collect();
    }

    let mut data = GeometryData::new();
    for p in &positions {
        data.vertices.push([p[0] * radius, p[1] * radius, p[2] * radius]);
        data.normals.push(*p);
        data.tex_coords.push([
            0.5 + p[2].atan2(p[0]) / (2.0 * PI),
            0.5 - p[1].asin() / PI,
        ]);
    }
    data.indices = faces.into_iter().flatten().collect();
    data
}

fn normalize(p: [f32; 3]) -> [f32; 3] {
    let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    [p[0] / length, p[1] / length, p[2] / length]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(data: &GeometryData) {
        for tri in data.indices.chunks_exact(3) {
            let [a, b, c] = [
                data.vertices[tri[0] as usize],
                data.vertices[tri[1] as usize],
                data.vertices[tri[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let centre = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = n[0] * centre[0] + n[1] * centre[1] + n[2] * centre[2];
            assert!(dot >= -1e-5, "triangle {:?} faces inward", tri);
        }
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_outward(&cube);

        let (min, max) = generate_box(3.0).bounds().unwrap();
        assert_eq!(min, [-1.5, -1.5, -1.5]);
        assert_eq!(max, [1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9);
        assert_eq!(plane.indices.len(), 24);
        assert!(plane.vertices.iter().all(|v| v[2] == 0.0));
    }

    #[test]
    fn test_plane_faces_negative_z() {
        let plane = generate_plane(3.0, 1.0, 1, 1);
        assert!(plane.normals.iter().all(|n| *n == [0.0, 0.0, -1.0]));

        // Every triangle winds counter-clockwise when seen from -Z
        for tri in plane.indices.chunks(3) {
            let a = plane.vertices[tri[0] as usize];
            let b = plane.vertices[tri[1] as usize];
            let c = plane.vertices[tri[2] as usize];
            let nz = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(nz < 0.0);
        }
    }

    #[test]
    fn test_ground_faces_up() {
        let ground = generate_ground(6.0, 6.0, 3);
        assert_eq!(ground.vertex_count(), 16);
        assert_eq!(ground.triangle_count(), 18);
        assert!(ground.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));

        // Counter-clockwise seen from above means the face normal is +Y
        let tri = &ground.indices[0..3];
        let a = ground.vertices[tri[0] as usize];
        let b = ground.vertices[tri[1] as usize];
        let c = ground.vertices[tri[2] as usize];
        let ny = (b[2] - a[2]) * (c[0] - a[0]) - (b[0] - a[0]) * (c[2] - a[2]);
        assert!(ny > 0.0);
    }

    #[test]
    fn test_icosphere_subdivision() {
        let base = generate_icosphere(1.0, 0);
        assert_eq!(base.vertex_count(), 12);
        assert_eq!(base.triangle_count(), 20);
        assert_outward(&base);

        let refined = generate_icosphere(2.0, 2);
        assert_eq!(refined.triangle_count(), 320);
        assert_eq!(refined.vertex_count(), 162);
        for v in &refined.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 2.0).abs() < 1e-4);
        }
    }
}
