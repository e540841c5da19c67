//! Render pipeline configuration and creation
//!
//! The frame is drawn in three passes over one vertex buffer: opaque
//! triangles, translucent triangles, then line segments.

use wgpu::*;

use crate::gfx::scene::Vertex3D;

use super::depth_texture::DepthTexture;

/// Parameters of one render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub blend: BlendState,
    pub depth_write_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: None,
            blend: BlendState::REPLACE,
            depth_write_enabled: true,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    pub fn with_blend(mut self, blend: BlendState) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_depth_write(mut self, enabled: bool) -> Self {
        self.depth_write_enabled = enabled;
        self
    }

    /// Solid geometry, writes depth
    pub fn opaque() -> Self {
        Self::default().with_label("Opaque Pipeline")
    }

    /// Alpha-blended geometry, tests depth but leaves it untouched
    pub fn transparent() -> Self {
        Self::default()
            .with_label("Transparent Pipeline")
            .with_blend(BlendState::ALPHA_BLENDING)
            .with_depth_write(false)
    }

    pub fn lines() -> Self {
        Self::default()
            .with_label("Line Pipeline")
            .with_primitive_topology(PrimitiveTopology::LineList)
            .with_blend(BlendState::ALPHA_BLENDING)
            .with_depth_write(false)
    }
}

/// The three pipelines a frame is drawn with
pub struct ScenePipelines {
    pub opaque: RenderPipeline,
    pub transparent: RenderPipeline,
    pub lines: RenderPipeline,
}

impl ScenePipelines {
    pub fn new(
        device: &Device,
        layout: &PipelineLayout,
        shader: &ShaderModule,
        format: TextureFormat,
    ) -> Self {
        Self {
            opaque: create_pipeline(device, layout, shader, format, &PipelineConfig::opaque()),
            transparent: create_pipeline(
                device,
                layout,
                shader,
                format,
                &PipelineConfig::transparent(),
            ),
            lines: create_pipeline(device, layout, shader, format, &PipelineConfig::lines()),
        }
    }
}

pub fn create_pipeline(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    format: TextureFormat,
    config: &PipelineConfig,
) -> RenderPipeline {
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&config.label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(config.blend),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: config.primitive_topology,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: config.cull_mode,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: DepthTexture::FORMAT,
            depth_write_enabled: config.depth_write_enabled,
            depth_compare: CompareFunction::LessEqual,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_configs() {
        let opaque = PipelineConfig::opaque();
        assert!(opaque.depth_write_enabled);
        assert_eq!(opaque.primitive_topology, PrimitiveTopology::TriangleList);

        let transparent = PipelineConfig::transparent();
        assert!(!transparent.depth_write_enabled);
        assert_eq!(transparent.blend, BlendState::ALPHA_BLENDING);

        let lines = PipelineConfig::lines();
        assert_eq!(lines.primitive_topology, PrimitiveTopology::LineList);
    }
}
