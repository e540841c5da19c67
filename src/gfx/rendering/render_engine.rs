//! WGPU-based renderer for the flattened scene
//!
//! Owns the surface, device and queue, one depth buffer, the scene uniform
//! and growable vertex/index buffers. Each frame is a single render pass
//! drawing opaque triangles, translucent triangles, then lines.

use std::{iter, sync::Arc};

use anyhow::Context;
use wgpu::TextureFormat;

use crate::gfx::scene::Vertex3D;
use crate::wgpu_utils::{binding_types, GrowableBuffer, UniformBuffer};

use super::{
    depth_texture::DepthTexture, frame::FrameData, pipelines::ScenePipelines,
    uniforms::SceneUniform,
};

const INITIAL_VERTICES: usize = 16 * 1024;
const INITIAL_INDICES: usize = 32 * 1024;

/// Result of presenting one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The surface was lost or outdated and has been reconfigured
    Reconfigured,
    /// Acquiring the next surface texture timed out
    Skipped,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    format: TextureFormat,

    pipelines: ScenePipelines,
    scene_ubo: UniformBuffer<SceneUniform>,
    scene_bind_group: wgpu::BindGroup,

    vertex_buffer: GrowableBuffer<Vertex3D>,
    opaque_indices: GrowableBuffer<u32>,
    transparent_indices: GrowableBuffer<u32>,
    line_indices: GrowableBuffer<u32>,
}

impl RenderEngine {
    /// Creates a renderer drawing into `window`.
    ///
    /// Fails when no adapter or device is available, which callers treat as
    /// the graphics capability being missing.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to request adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let present_mode = surface_capabilities
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture = DepthTexture::new(&device, &config, "depth_texture");

        let scene_ubo = UniformBuffer::<SceneUniform>::new(&device);
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[binding_types::uniform_entry(0)],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_ubo.binding_resource(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipelines = ScenePipelines::new(&device, &pipeline_layout, &shader, format);

        let vertex_buffer =
            GrowableBuffer::new(&device, wgpu::BufferUsages::VERTEX, INITIAL_VERTICES);
        let opaque_indices =
            GrowableBuffer::new(&device, wgpu::BufferUsages::INDEX, INITIAL_INDICES);
        let transparent_indices =
            GrowableBuffer::new(&device, wgpu::BufferUsages::INDEX, INITIAL_INDICES);
        let line_indices = GrowableBuffer::new(&device, wgpu::BufferUsages::INDEX, INITIAL_INDICES);

        log::info!(
            "Renderer ready: {} ({:?}), surface {}x{} {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            format
        );

        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            pipelines,
            scene_ubo,
            scene_bind_group,
            vertex_buffer,
            opaque_indices,
            transparent_indices,
            line_indices,
        })
    }

    /// Uploads and draws one frame.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is dropped;
    /// only unrecoverable surface errors are returned.
    pub fn render_frame(&mut self, frame: &FrameData<'_>) -> anyhow::Result<FrameOutcome> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameOutcome::Reconfigured);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture");
                return Ok(FrameOutcome::Skipped);
            }
            Err(e) => return Err(e).context("Failed to acquire surface texture"),
        };

        self.scene_ubo.update_content(&self.queue, frame.uniform);
        let geometry = frame.geometry;
        self.vertex_buffer
            .write(&self.device, &self.queue, &geometry.vertices);
        self.opaque_indices
            .write(&self.device, &self.queue, &geometry.opaque_indices);
        self.transparent_indices
            .write(&self.device, &self.queue, &geometry.transparent_indices);
        self.line_indices
            .write(&self.device, &self.queue, &geometry.line_indices);

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.format),
                ..Default::default()
            });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let bg = frame.background;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !self.vertex_buffer.is_empty() {
                render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));

                let passes = [
                    (&self.pipelines.opaque, &self.opaque_indices),
                    (&self.pipelines.transparent, &self.transparent_indices),
                    (&self.pipelines.lines, &self.line_indices),
                ];
                for (pipeline, indices) in passes {
                    if indices.is_empty() {
                        continue;
                    }
                    render_pass.set_pipeline(pipeline);
                    render_pass
                        .set_index_buffer(indices.buffer().slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
                }
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(FrameOutcome::Presented)
    }

    /// Reconfigures the surface and depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = DepthTexture::new(&self.device, &self.config, "depth_texture");
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}
