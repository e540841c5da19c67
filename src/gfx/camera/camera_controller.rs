use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta},
};

use super::orbit_camera::OrbitCamera;
use crate::config::CameraConfig;

/// Below this the pending motion is dropped instead of decayed further
const SETTLE_EPSILON: f32 = 1e-5;

/// Mouse-driven orbit controls with damped rotation
///
/// Drag deltas are accumulated and applied a fraction at a time in
/// [`CameraController::update`], which gives the camera its glide.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    is_rotating: bool,
    is_panning: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32, damping_factor: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping_factor: damping_factor.clamp(f32::EPSILON, 1.0),
            is_rotating: false,
            is_panning: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.rotate_speed, config.zoom_speed, config.damping_factor)
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.is_panning = pressed,
            _ => (),
        }
    }

    /// Feeds raw mouse motion and wheel input, returns true if the view changed
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 * 0.1
                    }
                };
                self.pending_zoom += scroll_amount * self.zoom_speed;
                true
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_panning {
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                    true
                } else if self.is_rotating {
                    self.pending_yaw += -delta.0 as f32 * self.rotate_speed;
                    self.pending_pitch += delta.1 as f32 * self.rotate_speed;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Applies one damped step of the pending motion, returns true if the camera moved
    pub fn update(&mut self, camera: &mut OrbitCamera) -> bool {
        let mut changed = false;

        if self.pending_yaw.abs() > SETTLE_EPSILON {
            let step = self.pending_yaw * self.damping_factor;
            camera.add_yaw(step);
            self.pending_yaw -= step;
            changed = true;
        } else {
            self.pending_yaw = 0.0;
        }

        if self.pending_pitch.abs() > SETTLE_EPSILON {
            let step = self.pending_pitch * self.damping_factor;
            camera.add_pitch(step);
            self.pending_pitch -= step;
            changed = true;
        } else {
            self.pending_pitch = 0.0;
        }

        if self.pending_zoom.abs() > SETTLE_EPSILON {
            let step = self.pending_zoom * self.damping_factor;
            camera.add_distance(step);
            self.pending_zoom -= step;
            changed = true;
        } else {
            self.pending_zoom = 0.0;
        }

        changed
    }

    /// Returns true while motion is still being played out
    pub fn is_settling(&self) -> bool {
        self.pending_yaw != 0.0 || self.pending_pitch != 0.0 || self.pending_zoom != 0.0
    }

    pub fn is_rotating(&self) -> bool {
        self.is_rotating
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn test_drag_is_damped() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let mut controller = CameraController::new(0.01, 0.1, 0.5);

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.process_events(
            &DeviceEvent::MouseMotion { delta: (-10.0, 0.0) },
            &mut camera
        ));

        // Half of the 0.1 rad yaw is applied on the first step
        assert!(controller.update(&mut camera));
        assert!((camera.yaw - 0.05).abs() < 1e-6);
        assert!(controller.update(&mut camera));
        assert!((camera.yaw - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let mut controller = CameraController::new(0.01, 0.1, 0.5);

        assert!(!controller.process_events(
            &DeviceEvent::MouseMotion { delta: (5.0, 5.0) },
            &mut camera
        ));
        assert!(!controller.update(&mut camera));
        assert!(!controller.is_settling());
    }

    #[test]
    fn test_motion_settles() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let mut controller = CameraController::new(0.01, 0.1, 0.05);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_events(&DeviceEvent::MouseMotion { delta: (3.0, 1.0) }, &mut camera);

        let mut steps = 0;
        while controller.update(&mut camera) {
            steps += 1;
            assert!(steps < 10_000);
        }
        assert!(!controller.is_settling());
    }
}
