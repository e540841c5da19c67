//! GPU side: turns a flattened [`crate::gfx::scene::FrameScratch`] into pixels.

pub mod depth_texture;
pub mod frame;
pub mod pipelines;
pub mod render_engine;
pub mod uniforms;

pub use frame::FrameData;
pub use render_engine::{FrameOutcome, RenderEngine};
pub use uniforms::SceneUniform;
