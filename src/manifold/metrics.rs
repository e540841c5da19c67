//! Distances between the figures, the boundary and the camera.
//!
//! Recomputed whenever the camera controls report a change.

use std::fmt;

use cgmath::{InnerSpace, Vector3};

use crate::gfx::camera::OrbitCamera;
use crate::gfx::scene::Scene;

use super::builder::ManifoldLayout;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneMetrics {
    /// Distance from the camera eye to its orbit target
    pub camera_distance: f32,
    pub robot_to_human: f32,
    /// Signed distance from the robot to the boundary surface, positive outside
    pub robot_margin: f32,
    /// Signed distance from the human to the boundary surface, positive outside
    pub human_margin: f32,
}

impl SceneMetrics {
    pub fn compute(scene: &Scene, layout: &ManifoldLayout, camera: &OrbitCamera) -> Self {
        let position = |id| scene.world_position(id).unwrap_or(Vector3::new(0.0, 0.0, 0.0));
        let center = position(layout.boundary);
        let robot = position(layout.robot);
        let human = position(layout.human);

        Self {
            camera_distance: (camera.eye - camera.target).magnitude(),
            robot_to_human: (robot - human).magnitude(),
            robot_margin: (robot - center).magnitude() - layout.boundary_radius,
            human_margin: (human - center).magnitude() - layout.boundary_radius,
        }
    }

    pub fn both_outside(&self) -> bool {
        self.robot_margin > 0.0 && self.human_margin > 0.0
    }
}

impl fmt::Display for SceneMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "view {:.1} | robot-human {:.2} | margins robot {:+.2} human {:+.2}",
            self.camera_distance, self.robot_to_human, self.robot_margin, self.human_margin
        )
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
    fn test_default_scene_metrics() {
        let config = ManifoldConfig::default();
        let manifold = build_manifold(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let camera = OrbitCamera::looking_at(config.camera.eye, config.camera.target, 1.5);

        let metrics = SceneMetrics::compute(&manifold.scene, &manifold.layout, &camera);

        assert!((metrics.robot_to_human - (14.0f32 * 14.0 + 0.09).sqrt()).abs() < 1e-4);
        // robot at (-7, 1, 0), center at (0, 3, 0)
        assert!((metrics.robot_margin - (53.0f32.sqrt() - 5.0)).abs() < 1e-4);
        assert!(metrics.both_outside());
        assert!((metrics.camera_distance - 486.0f32.sqrt()).abs() < 1e-3);
        assert!(metrics.to_string().contains("robot-human"));
    }
}
