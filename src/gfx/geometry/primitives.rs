//! # Primitive Shape Generation
//!
//! This module contains functions to generate the 3D primitive shapes used by
//! the scene. Surface shapes come with normals and texture coordinates; line
//! shapes only carry positions and an up-facing normal.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere with specified radius and resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere centered at the origin, Y-up.
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a torus lying in the XY plane (axis along Z)
///
/// # Arguments
/// * `radius` - Distance from the center to the middle of the tube
/// * `tube` - Tube radius
/// * `radial_segments` - Segments around the tube cross-section
/// * `tubular_segments` - Segments around the ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * 2.0 * PI;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * 2.0 * PI;

            let x = (radius + tube * v.cos()) * u.cos();
            let y = (radius + tube * v.cos()) * u.sin();
            let z = tube * v.sin();
            data.vertices.push([x, y, z]);

            // Normal points away from the tube center line
            let cx = radius * u.cos();
            let cy = radius * u.sin();
            let (nx, ny, nz) = (x - cx, y - cy, z);
            let len = (nx * nx + ny * ny + nz * nz).sqrt().max(f32::EPSILON);
            data.normals.push([nx / len, ny / len, nz / len]);

            data.tex_coords
                .push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    for j in 1..=radial {
        for i in 1..=tubular {
            let a = (tubular + 1) * j + i - 1;
            let b = (tubular + 1) * (j - 1) + i - 1;
            let c = (tubular + 1) * (j - 1) + i;
            let d = (tubular + 1) * j + i;

            data.indices.extend_from_slice(&[a, b, d]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    data
}

/// Generate a (possibly tapered) cylinder along the Y axis
///
/// # Arguments
/// * `radius_top` - Radius of the top cap
/// * `radius_bottom` - Radius of the bottom cap
/// * `height` - Height of the cylinder
/// * `segments` - Number of circular segments
///
/// Returns a cylinder centered at the origin extending from -height/2 to height/2 in Y.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Slope of the side wall feeds into the side normals
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        let len = (1.0 + slope * slope).sqrt();
        let normal = [cos_a / len, slope / len, sin_a / len];

        data.vertices
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([i as f32 / segs as f32, 0.0]);

        data.vertices
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([i as f32 / segs as f32, 1.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        data.indices.push(top_current);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    // Caps get their own rim vertices so they shade flat
    for (y, radius, normal_y) in [(-half_height, radius_bottom, -1.0), (half_height, radius_top, 1.0)] {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, y, 0.0]);
        data.normals.push([0.0, normal_y, 0.0]);
        data.tex_coords.push([0.5, 0.5]);

        let rim_start = data.vertices.len() as u32;
        for i in 0..=segs {
            let angle = i as f32 * 2.0 * PI / segs as f32;
            data.vertices
                .push([radius * angle.cos(), y, radius * angle.sin()]);
            data.normals.push([0.0, normal_y, 0.0]);
            data.tex_coords
                .push([0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin()]);
        }

        for i in 0..segs {
            let current = rim_start + i;
            let next = current + 1;
            if normal_y > 0.0 {
                data.indices.extend_from_slice(&[center, next, current]);
            } else {
                data.indices.extend_from_slice(&[center, current, next]);
            }
        }
    }

    data
}

/// Generate a square grid of lines on the XZ plane
///
/// # Arguments
/// * `size` - Side length of the grid
/// * `divisions` - Number of cells along each side
pub fn generate_grid(size: f32, divisions: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let divs = divisions.max(1);
    let half = size * 0.5;
    let step = size / divs as f32;

    for i in 0..=divs {
        let k = -half + i as f32 * step;

        // Line parallel to Z
        push_segment(&mut data, [k, 0.0, -half], [k, 0.0, half]);
        // Line parallel to X
        push_segment(&mut data, [-half, 0.0, k], [half, 0.0, k]);
    }

    data
}

/// Generate a single line segment
pub fn generate_line(from: [f32; 3], to: [f32; 3]) -> GeometryData {
    let mut data = GeometryData::new();
    push_segment(&mut data, from, to);
    data
}

fn push_segment(data: &mut GeometryData, from: [f32; 3], to: [f32; 3]) {
    let start = data.vertices.len() as u32;
    data.vertices.push(from);
    data.vertices.push(to);
    data.normals.push([0.0, 1.0, 0.0]);
    data.normals.push([0.0, 1.0, 0.0]);
    data.tex_coords.push([0.0, 0.0]);
    data.tex_coords.push([1.0, 0.0]);
    data.line_indices.push(start);
    data.line_indices.push(start + 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(2.0, 8, 6);
        assert_eq!(sphere.vertices.len(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_wireframe_dedupes_edges() {
        let sphere = generate_sphere(1.0, 4, 2);
        let wire = sphere.wireframe();
        assert!(wire.indices.is_empty());
        assert!(wire.line_count() > 0);
        // Every triangle contributes at most three new edges
        assert!(wire.line_count() <= sphere.triangle_count() * 3);

        let mut edges: Vec<(u32, u32)> = wire
            .line_indices
            .chunks_exact(2)
            .map(|e| (e[0], e[1]))
            .collect();
        let before = edges.len();
        edges.sort();
        edges.dedup();
        assert_eq!(before, edges.len());
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(5.2, 0.08, 16, 100);
        assert_eq!(torus.vertex_count(), 17 * 101);
        assert_eq!(torus.triangle_count(), 16 * 100 * 2);

        // Torus lies around the Z axis
        for v in &torus.vertices {
            let planar = (v[0] * v[0] + v[1] * v[1]).sqrt();
            assert!(planar >= 5.2 - 0.08 - 1e-4 && planar <= 5.2 + 0.08 + 1e-4);
            assert!(v[2].abs() <= 0.08 + 1e-4);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(0.5, 0.4, 2.0, 8);
        // side ring pairs + two caps of center and rim
        assert_eq!(cylinder.vertex_count(), 9 * 2 + 2 * (1 + 9));
        assert_eq!(cylinder.triangle_count(), 8 * 2 + 8 * 2);

        let max_y = cylinder.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let min_y = cylinder.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 1.0);
        assert_eq!(min_y, -1.0);
    }

    #[test]
    fn test_grid_generation() {
        let grid = generate_grid(20.0, 20);
        assert_eq!(grid.line_count(), 21 * 2);
        assert!(grid.indices.is_empty());
    }
}
