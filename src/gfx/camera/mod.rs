pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::Camera;
pub use orbit_camera::OrbitCamera;

use crate::config::CameraConfig;

/// Camera plus the controls attached to it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Builds the initial view from the configuration
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = OrbitCamera::looking_at(config.eye, config.target, aspect);
        camera.fovy = cgmath::Deg(config.fov_degrees).into();
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        Self::new(camera, CameraController::from_config(config))
    }

    /// Advances the damped controls by one frame, returns true if the view changed
    pub fn update(&mut self) -> bool {
        self.controller.update(&mut self.camera)
    }
}
