//! Ethics Manifold
//!
//! A decorative 3D visualization of an "ethical boundary": a wireframe
//! sphere with orbiting rings and constraint markers, flanked by a robot
//! and a human figure. Rendered with wgpu in a winit window.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod lifecycle;
pub mod manifold;
pub mod wgpu_utils;

pub use app::ManifoldApp;
pub use config::ManifoldConfig;
pub use error::{Error, Result};
pub use gfx::geometry::{sample, Distribution, SamplePoint, SphereSampler};
pub use lifecycle::{LifecycleGuard, Visualization};
