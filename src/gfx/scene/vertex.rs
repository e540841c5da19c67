//! # Vertex Data Structures
//!
//! This module defines the GPU vertex format the scene is flattened into.
//! Every vertex is already in world space and carries its material, so a
//! whole frame draws from a single vertex buffer.

/// A world-space vertex with baked material parameters.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
///
/// # Fields
///
/// - `position`: world position [x, y, z]
/// - `normal`: world normal [nx, ny, nz]
/// - `color`: base color and opacity [r, g, b, a]
/// - `params`: emissive color and shininess [er, eg, eb, shininess];
///   a shininess of zero marks an unlit vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
        3 => Float32x4,
    ];

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Normal (Float32x3)
    /// - Attribute 2: Color (Float32x4)
    /// - Attribute 3: Emissive + shininess (Float32x4)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.params[3] > 0.0
    }
}
