//! # Graphics Module
//!
//! Camera, geometry, materials, the scene graph and the wgpu renderer.
//!
//! - **Camera System** ([`camera`]) - Orbit camera with damped mouse controls
//! - **Geometry** ([`geometry`]) - Primitive meshes and sphere point sampling
//! - **Scene Management** ([`scene`]) - Node arena, lights and fog
//! - **Rendering** ([`rendering`]) - Opaque, transparent and line passes
//!
//! The scene is CPU-side only. Each frame it is flattened into world-space
//! vertices that the renderer uploads in one go.

pub mod camera;
pub mod geometry;
pub mod material;
pub mod rendering;
pub mod scene;

pub use camera::OrbitCamera;
pub use rendering::RenderEngine;
