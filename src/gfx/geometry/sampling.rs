//! # Sphere Surface Sampling
//!
//! Deterministic placement of N marker points over the surface of a sphere.
//!
//! The polar angle follows `phi = acos(-1 + 2i/n)`, which spreads points
//! uniformly in `cos(phi)`. The azimuth comes from the selected
//! [`Distribution`]; [`Distribution::Original`] reproduces the layout of the
//! boundary markers exactly, [`Distribution::Fibonacci`] is the usual
//! golden-angle spiral.
//!
//! Radial jitter is drawn from a caller-supplied [`rand::Rng`], so seeding
//! the generator makes the output reproducible.
//!
//! ```
//! use ethics_manifold::gfx::geometry::sample;
//!
//! let points = sample(25, 5.0).unwrap();
//! assert_eq!(points.len(), 25);
//! assert!((points[0].z + 5.0).abs() < 1e-5);
//! ```

use std::f32::consts::PI;

use cgmath::Vector3;
use rand::Rng;

use crate::error::{Error, Result};

/// A point produced by the sampler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SamplePoint {
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<SamplePoint> for Vector3<f32> {
    fn from(p: SamplePoint) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

/// Azimuthal spread used by the sampler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Distribution {
    /// `theta = sqrt(n) * pi * i`, the layout of the boundary markers
    #[default]
    Original,
    /// `theta = i * pi * (3 - sqrt(5))`, the golden-angle spiral
    Fibonacci,
}

impl Distribution {
    fn azimuth(self, i: usize, n: usize) -> f32 {
        match self {
            Distribution::Original => (n as f32).sqrt() * PI * i as f32,
            Distribution::Fibonacci => i as f32 * PI * (3.0 - 5.0_f32.sqrt()),
        }
    }
}

/// Configured sampler: distribution plus the maximum radial jitter
#[derive(Debug, Clone, Copy)]
pub struct SphereSampler {
    pub distribution: Distribution,
    pub jitter: f32,
}

impl Default for SphereSampler {
    fn default() -> Self {
        Self {
            distribution: Distribution::Original,
            jitter: 0.0,
        }
    }
}

impl SphereSampler {
    pub fn new(distribution: Distribution, jitter: f32) -> Self {
        Self {
            distribution,
            jitter,
        }
    }

    /// Places `n` points on a sphere of `radius`, jittering each radius
    /// outward by up to `self.jitter` using `rng`.
    ///
    /// No random numbers are drawn when the jitter is zero.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n: usize,
        radius: f32,
        rng: &mut R,
    ) -> Result<Vec<SamplePoint>> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid(format!(
                "sampling radius must be positive and finite, got {radius}"
            )));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(Error::invalid(format!(
                "sampling jitter must be non-negative and finite, got {}",
                self.jitter
            )));
        }

        let points = (0..n)
            .map(|i| {
                let phi = (-1.0 + (i as f32 / n as f32) * 2.0).acos();
                let theta = self.distribution.azimuth(i, n);
                let r = if self.jitter > 0.0 {
                    radius + rng.random::<f32>() * self.jitter
                } else {
                    radius
                };

                SamplePoint {
                    x: r * phi.sin() * theta.cos(),
                    y: r * phi.sin() * theta.sin(),
                    z: r * phi.cos(),
                }
            })
            .collect();

        Ok(points)
    }
}

/// Places `n` points on a sphere of `radius` with [`Distribution::Original`] and no jitter
pub fn sample(n: usize, radius: f32) -> Result<Vec<SamplePoint>> {
    SphereSampler::default().sample(n, radius, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_count() {
        for n in [0, 1, 2, 7, 25, 100] {
            assert_eq!(sample(n, 3.0).unwrap().len(), n);
        }
        assert!(sample(0, 3.0).unwrap().is_empty());
    }

    #[test]
    fn test_points_lie_on_sphere_without_jitter() {
        let points = sample(64, 5.0).unwrap();
        for p in &points {
            assert!((p.norm() - 5.0).abs() < 1e-4, "norm was {}", p.norm());
        }

        let fib = SphereSampler::new(Distribution::Fibonacci, 0.0);
        let points = fib.sample(64, 2.5, &mut StdRng::seed_from_u64(1)).unwrap();
        for p in &points {
            assert!((p.norm() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_single_point_is_south_pole() {
        let points = sample(1, 4.0).unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0].x.abs() < 1e-5);
        assert!(points[0].y.abs() < 1e-5);
        assert!((points[0].z + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_boundary_marker_layout() {
        let points = sample(25, 5.0).unwrap();
        assert_eq!(points.len(), 25);
        let first = points[0];
        assert!(first.x.abs() < 1e-5);
        assert!(first.y.abs() < 1e-5);
        assert!((first.z + 5.0).abs() < 1e-5);

        // i = 5: phi = acos(-0.6), theta = 25 * pi, i.e. cos(theta) = -1
        let p = points[5];
        let sin_phi = (1.0f32 - 0.36).sqrt();
        assert!((p.x + 5.0 * sin_phi).abs() < 1e-3);
        assert!((p.z + 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_jitter_is_deterministic_with_seed() {
        let sampler = SphereSampler::new(Distribution::Original, 0.3);
        let a = sampler
            .sample(25, 5.0, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = sampler
            .sample(25, 5.0, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);

        for p in &a {
            assert!(p.norm() >= 5.0 - 1e-4 && p.norm() <= 5.3 + 1e-4);
        }
    }

    #[test]
    fn test_rejects_invalid_radius() {
        assert!(matches!(sample(5, -1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(sample(5, 0.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(sample(5, f32::INFINITY), Err(Error::InvalidArgument(_))));
        assert!(matches!(sample(5, f32::NAN), Err(Error::InvalidArgument(_))));

        let sampler = SphereSampler::new(Distribution::Original, -0.1);
        let result = sampler.sample(5, 1.0, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
