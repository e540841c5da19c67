//! # Visualization Configuration
//!
//! Every tunable constant of the scene lives here. Configuration is done in
//! code: build a [`ManifoldConfig`] (usually from [`Default`]) and hand it to
//! [`crate::app::ManifoldApp::with_config`].
//!
//! ```
//! use ethics_manifold::config::ManifoldConfig;
//!
//! let mut config = ManifoldConfig::default();
//! config.boundary.point_count = 40;
//! assert!(config.validate().is_ok());
//! ```

use cgmath::Vector3;

use crate::error::{Error, Result};
use crate::gfx::geometry::Distribution;

/// Camera framing for the initial view
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Fraction of the pending orbit motion applied each frame
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vector3::new(15.0, 8.0, 15.0),
            target: Vector3::new(0.0, 2.0, 0.0),
            fov_degrees: 60.0,
            znear: 0.1,
            zfar: 1000.0,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

/// The ethical boundary sphere and its marker points
#[derive(Debug, Clone, Copy)]
pub struct BoundaryConfig {
    pub radius: f32,
    pub center: Vector3<f32>,
    pub point_count: usize,
    /// Maximum outward radial offset added to each marker point
    pub jitter: f32,
    pub distribution: Distribution,
    /// Seed for the marker jitter, `None` draws a fresh seed from the OS
    pub seed: Option<u64>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            center: Vector3::new(0.0, 3.0, 0.0),
            point_count: 25,
            jitter: 0.3,
            distribution: Distribution::Original,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PerformanceConfig {
    /// Upper bound on the device pixel ratio used to size the surface
    pub max_pixel_ratio: f64,
    /// Minimum seconds between recomputing the marker pulse
    pub scale_update_interval: f32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            scale_update_interval: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Maths & Ethics".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Complete configuration of the visualization
#[derive(Debug, Clone)]
pub struct ManifoldConfig {
    pub camera: CameraConfig,
    pub robot: Vector3<f32>,
    pub human: Vector3<f32>,
    pub boundary: BoundaryConfig,
    pub performance: PerformanceConfig,
    pub window: WindowConfig,
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            robot: Vector3::new(-7.0, 1.0, 0.0),
            human: Vector3::new(7.0, 0.7, 0.0),
            boundary: BoundaryConfig::default(),
            performance: PerformanceConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl ManifoldConfig {
    /// Checks the values the scene builder and the render loop rely on
    pub fn validate(&self) -> Result<()> {
        let boundary = &self.boundary;
        if !boundary.radius.is_finite() || boundary.radius <= 0.0 {
            return Err(Error::invalid(format!(
                "boundary radius must be positive and finite, got {}",
                boundary.radius
            )));
        }
        if !boundary.jitter.is_finite() || boundary.jitter < 0.0 {
            return Err(Error::invalid(format!(
                "boundary jitter must be non-negative, got {}",
                boundary.jitter
            )));
        }

        let perf = &self.performance;
        if !perf.max_pixel_ratio.is_finite() || perf.max_pixel_ratio <= 0.0 {
            return Err(Error::invalid(format!(
                "max pixel ratio must be positive, got {}",
                perf.max_pixel_ratio
            )));
        }
        if !perf.scale_update_interval.is_finite() || perf.scale_update_interval < 0.0 {
            return Err(Error::invalid(format!(
                "scale update interval must be non-negative, got {}",
                perf.scale_update_interval
            )));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::invalid("window size must be non-zero"));
        }

        Ok(())
    }
}

impl PerformanceConfig {
    /// Device pixel ratio actually used for the render surface
    pub fn effective_pixel_ratio(&self, device_ratio: f64) -> f64 {
        device_ratio.min(self.max_pixel_ratio)
    }

    /// Physical surface size for a logical size and device pixel ratio.
    ///
    /// Never returns a zero dimension.
    pub fn surface_size(&self, logical: (f64, f64), device_ratio: f64) -> (u32, u32) {
        let ratio = self.effective_pixel_ratio(device_ratio);
        let width = (logical.0 * ratio).round().max(1.0) as u32;
        let height = (logical.1 * ratio).round().max(1.0) as u32;
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ManifoldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.boundary.point_count, 25);
        assert_eq!(config.boundary.radius, 5.0);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let mut config = ManifoldConfig::default();
        config.boundary.radius = -1.0;
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));

        config.boundary.radius = f32::NAN;
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_pixel_ratio_is_clamped() {
        let perf = PerformanceConfig::default();
        assert_eq!(perf.effective_pixel_ratio(3.0), 2.0);
        assert_eq!(perf.effective_pixel_ratio(1.5), 1.5);
        assert_eq!(perf.surface_size((600.0, 400.0), 3.0), (1200, 800));
        assert_eq!(perf.surface_size((0.0, 0.0), 1.0), (1, 1));
    }
}
