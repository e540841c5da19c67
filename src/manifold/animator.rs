//! Per-frame motion of the boundary, its rings and markers, and the figures.

use cgmath::Vector3;

use crate::config::PerformanceConfig;
use crate::gfx::scene::Scene;

use super::builder::ManifoldLayout;

const BOUNDARY_SPIN: f32 = 0.1;
const RING_SPIN: [f32; 3] = [0.5, -0.35, 0.25];
const PULSE_AMPLITUDE: f32 = 0.3;
const PULSE_RATE: f32 = 2.0;
const BOB_AMPLITUDE: f32 = 0.1;
const BOB_RATE: f32 = 1.5;

/// Drives the decorative animation.
///
/// Rotation and bobbing advance every frame; the marker pulse is recomputed
/// at most once per `scale_update_interval`.
#[derive(Debug, Clone)]
pub struct Animator {
    elapsed: f32,
    since_pulse: f32,
    scale_update_interval: f32,
    robot_base: Vector3<f32>,
    human_base: Vector3<f32>,
}

impl Animator {
    pub fn new(scene: &Scene, layout: &ManifoldLayout, performance: &PerformanceConfig) -> Self {
        let base = |id| {
            scene
                .node(id)
                .map(|n| n.transform.position)
                .unwrap_or(Vector3::new(0.0, 0.0, 0.0))
        };

        Self {
            elapsed: 0.0,
            since_pulse: f32::INFINITY,
            scale_update_interval: performance.scale_update_interval,
            robot_base: base(layout.robot),
            human_base: base(layout.human),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advances the animation by `delta_time` seconds.
    ///
    /// Returns true when the marker pulse was recomputed this frame.
    pub fn update(&mut self, scene: &mut Scene, layout: &ManifoldLayout, delta_time: f32) -> bool {
        let dt = delta_time.max(0.0);
        self.elapsed += dt;
        let t = self.elapsed;

        if let Some(boundary) = scene.node_mut(layout.boundary) {
            boundary.transform.rotation.y += BOUNDARY_SPIN * dt;
        }

        for (ring, spin) in layout.rings.iter().zip(RING_SPIN) {
            if let Some(ring) = scene.node_mut(*ring) {
                ring.transform.rotation.z += spin * dt;
            }
        }

        if let Some(robot) = scene.node_mut(layout.robot) {
            robot.transform.position.y = self.robot_base.y + BOB_AMPLITUDE * (BOB_RATE * t).sin();
        }
        if let Some(human) = scene.node_mut(layout.human) {
            human.transform.position.y =
                self.human_base.y + BOB_AMPLITUDE * (BOB_RATE * t + std::f32::consts::PI).sin();
        }

        self.since_pulse += dt;
        if self.since_pulse < self.scale_update_interval {
            return false;
        }
        self.since_pulse = 0.0;

        for (i, id) in layout.points.iter().enumerate() {
            if let Some(point) = scene.node_mut(*id) {
                let s = 1.0 + PULSE_AMPLITUDE * (PULSE_RATE * t + i as f32 * 0.5).sin();
                point.transform.scale = Vector3::new(s, s, s);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManifoldConfig;
    use crate::manifold::builder::build_manifold;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pulse_is_throttled() {
        let config = ManifoldConfig::default();
        let mut manifold = build_manifold(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        let mut animator = Animator::new(&manifold.scene, &manifold.layout, &config.performance);

        // First frame always computes the pulse
        assert!(animator.update(&mut manifold.scene, &manifold.layout, 0.016));
        // Then at most once per 0.1 s
        let mut updates = 0;
        for _ in 0..60 {
            if animator.update(&mut manifold.scene, &manifold.layout, 0.016) {
                updates += 1;
            }
        }
        assert!(updates >= 8 && updates <= 10, "updates = {updates}");
    }

    #[test]
    fn test_figures_bob_around_base() {
        let config = ManifoldConfig::default();
        let mut manifold = build_manifold(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        let mut animator = Animator::new(&manifold.scene, &manifold.layout, &config.performance);

        for _ in 0..100 {
            animator.update(&mut manifold.scene, &manifold.layout, 0.05);
            let robot = manifold.scene.node(manifold.layout.robot).unwrap();
            assert!((robot.transform.position.y - 1.0).abs() <= BOB_AMPLITUDE + 1e-5);
            assert_eq!(robot.transform.position.x, -7.0);
        }
        assert!((animator.elapsed() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_boundary_rotates() {
        let config = ManifoldConfig::default();
        let mut manifold = build_manifold(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        let mut animator = Animator::new(&manifold.scene, &manifold.layout, &config.performance);

        animator.update(&mut manifold.scene, &manifold.layout, 1.0);
        let boundary = manifold.scene.node(manifold.layout.boundary).unwrap();
        assert!((boundary.transform.rotation.y - BOUNDARY_SPIN).abs() < 1e-6);
    }
}
