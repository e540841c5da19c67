//! # Scene Management Module
//!
//! This module provides the CPU-side scene graph the visualization is built
//! from: nodes with local transforms, shared geometry and materials, plus
//! the lights and fog the renderer consumes.
//!
//! ## Key Components
//!
//! - [`Scene`] - Node arena with lights, background and fog
//! - [`SceneNode`] - A group or a mesh with a [`Transform`] and a material
//! - [`FrameScratch`] - Caller-owned buffers the scene is flattened into each frame
//! - [`Vertex3D`] - GPU vertex format of the flattened scene
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use ethics_manifold::gfx::geometry::generate_sphere;
//! use ethics_manifold::gfx::material::{Color, Material};
//! use ethics_manifold::gfx::scene::{FrameScratch, Scene, SceneNode};
//!
//! let mut scene = Scene::new(Color::BLACK);
//! let sphere = Arc::new(generate_sphere(1.0, 8, 8));
//! scene.add_node(None, SceneNode::mesh("ball", sphere, Material::phong(Color::WHITE)));
//!
//! let mut scratch = FrameScratch::new();
//! scene.flatten_into(&mut scratch);
//! assert!(!scratch.opaque_indices.is_empty());
//! ```

pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use node::{NodeId, SceneNode, Transform};
pub use scene::{Fog, FrameScratch, Light, Scene, SceneStatistics};
pub use vertex::Vertex3D;
