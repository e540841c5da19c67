//! WGPU utility functions and helpers
//!
//! Thin wrappers over buffers and binding types used by the renderer.

pub mod binding_types;
pub mod uniform_buffer;

pub use uniform_buffer::{GrowableBuffer, UniformBuffer};
