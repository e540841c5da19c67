//! # Ethical Boundary Scene
//!
//! Builds and animates the decorative scene: the boundary sphere with its
//! rings and constraint markers, the robot and human figures, their paths,
//! the grid and the axes.
//!
//! - [`builder`] - scene construction from a [`crate::config::ManifoldConfig`]
//! - [`animator`] - per-frame motion
//! - [`metrics`] - distances reported when the view changes

pub mod animator;
pub mod builder;
pub mod metrics;

pub use animator::Animator;
pub use builder::{build_manifold, ManifoldLayout, ManifoldScene};
pub use metrics::SceneMetrics;
