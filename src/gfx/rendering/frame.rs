use crate::gfx::camera::OrbitCamera;
use crate::gfx::material::Color;
use crate::gfx::scene::{FrameScratch, Scene};

use super::uniforms::SceneUniform;

/// Everything the renderer needs to draw one frame
#[derive(Debug)]
pub struct FrameData<'a> {
    pub geometry: &'a FrameScratch,
    pub uniform: SceneUniform,
    pub background: Color,
}

impl<'a> FrameData<'a> {
    /// Flattens `scene` into `scratch` and captures the camera and lights
    pub fn prepare(scene: &Scene, camera: &OrbitCamera, scratch: &'a mut FrameScratch) -> Self {
        scene.flatten_into(scratch);
        Self {
            geometry: scratch,
            uniform: SceneUniform::new(scene, camera),
            background: scene.background,
        }
    }
}
