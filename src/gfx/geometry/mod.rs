//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the 3D primitive shapes the
//! visualization is built from, plus the surface point sampler used to
//! scatter markers over the boundary sphere.
//!
//! ## Supported Primitives
//!
//! - **Sphere**: UV sphere with configurable radius and resolution
//! - **Torus**: ring around the Z axis, used for the rotation rings
//! - **Cylinder**: tapered cylinder along Y, used for figure bodies
//! - **Grid / Line**: line-only geometry for the floor grid, axes and paths
//!
//! ## Usage
//!
//! ```rust
//! use ethics_manifold::gfx::geometry::{generate_sphere, generate_torus};
//!
//! let sphere = generate_sphere(5.0, 32, 32).wireframe();
//! let ring = generate_torus(5.2, 0.08, 16, 100);
//! assert!(sphere.line_count() > 0);
//! assert_eq!(ring.vertex_count(), 17 * 101);
//! ```

pub mod primitives;
pub mod sampling;

pub use primitives::*;
pub use sampling::{sample, Distribution, SamplePoint, SphereSampler};

use std::collections::HashSet;

/// Represents generated geometry data ready for flattening into a frame
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    /// Line segment indices, two per segment
    pub line_indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            line_indices: Vec::new(),
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

    /// Get the number of line segments in this geometry
    pub fn line_count(&self) -> usize {
        self.line_indices.len() / 2
    }

    /// Returns a line-only copy made of the unique triangle edges
    pub fn wireframe(&self) -> GeometryData {
        let mut seen = HashSet::new();
        let mut line_indices = Vec::with_capacity(self.indices.len());

        for triangle in self.indices.chunks_exact(3) {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    line_indices.push(key.0);
                    line_indices.push(key.1);
                }
            }
        }

        GeometryData {
            vertices: self.vertices.clone(),
            tex_coords: self.tex_coords.clone(),
            normals: self.normals.clone(),
            indices: Vec::new(),
            line_indices,
        }
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
