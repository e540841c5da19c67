//! Per-frame scene uniform shared by every pipeline.
//!
//! MUST match the `SceneUniform` struct in `shader.wgsl` exactly.

use cgmath::{InnerSpace, Vector3};

use crate::gfx::camera::{camera_utils::convert_matrix4_to_array, Camera, OrbitCamera};
use crate::gfx::scene::{Light, Scene};

/// Point lights beyond this count are ignored
pub const MAX_POINT_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera position, w unused
    pub eye: [f32; 4],
    /// Summed ambient color premultiplied by intensity
    pub ambient: [f32; 4],
    /// Directional light color premultiplied by intensity
    pub sun_color: [f32; 4],
    /// Unit vector pointing toward the directional light
    pub sun_direction: [f32; 4],
    /// xyz position, w range
    pub point_position: [[f32; 4]; MAX_POINT_LIGHTS],
    pub point_color: [[f32; 4]; MAX_POINT_LIGHTS],
    pub fog_color: [f32; 4],
    /// near, far, fog enabled (0 or 1), active point light count
    pub fog_params: [f32; 4],
}

impl SceneUniform {
    pub fn new(scene: &Scene, camera: &OrbitCamera) -> Self {
        let mut uniform = Self {
            view_proj: convert_matrix4_to_array(camera.build_view_projection_matrix()),
            eye: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
            ..Self::zeroed_uniform()
        };

        let mut ambient = Vector3::new(0.0f32, 0.0, 0.0);
        let mut has_sun = false;
        let mut points = 0usize;

        for light in &scene.lights {
            match *light {
                Light::Ambient { color, intensity } => {
                    let c = color.scaled(intensity);
                    ambient += Vector3::new(c.r, c.g, c.b);
                }
                Light::Directional {
                    color,
                    intensity,
                    position,
                } => {
                    if has_sun {
                        log::debug!("Ignoring extra directional light");
                        continue;
                    }
                    if position.magnitude2() > 0.0 {
                        let dir = position.normalize();
                        uniform.sun_direction = [dir.x, dir.y, dir.z, 0.0];
                        uniform.sun_color = color.scaled(intensity).with_alpha(1.0);
                        has_sun = true;
                    }
                }
                Light::Point {
                    color,
                    intensity,
                    position,
                    range,
                } => {
                    if points == MAX_POINT_LIGHTS {
                        log::debug!("Ignoring point light beyond {MAX_POINT_LIGHTS}");
                        continue;
                    }
                    uniform.point_position[points] = [position.x, position.y, position.z, range];
                    uniform.point_color[points] = color.scaled(intensity).with_alpha(1.0);
                    points += 1;
                }
            }
        }

        uniform.ambient = [ambient.x, ambient.y, ambient.z, 1.0];
        if let Some(fog) = scene.fog {
            uniform.fog_color = fog.color.with_alpha(1.0);
            uniform.fog_params = [fog.near, fog.far, 1.0, points as f32];
        } else {
            uniform.fog_params = [0.0, 0.0, 0.0, points as f32];
        }

        uniform
    }

    fn zeroed_uniform() -> Self {
        bytemuck::Zeroable::zeroed()
    }

    pub fn point_light_count(&self) -> usize {
        self.fog_params[3] as usize
    }

    pub fn fog_enabled(&self) -> bool {
        self.fog_params[2] > 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::material::Color;
    use crate::gfx::scene::Fog;

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at(Vector3::new(15.0, 8.0, 15.0), Vector3::new(0.0, 2.0, 0.0), 1.5)
    }

    #[test]
    fn test_uniform_size_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 288);
    }

    #[test]
    fn test_lights_are_packed() {
        let mut scene = Scene::new(Color::BLACK);
        scene.add_light(Light::Ambient {
            color: Color::WHITE,
            intensity: 0.2,
        });
        scene.add_light(Light::Ambient {
            color: Color::rgb(1.0, 0.0, 0.0),
            intensity: 0.1,
        });
        scene.add_light(Light::Directional {
            color: Color::WHITE,
            intensity: 0.8,
            position: Vector3::new(0.0, 10.0, 0.0),
        });
        for i in 0..6 {
            scene.add_light(Light::Point {
                color: Color::WHITE,
                intensity: 1.0,
                position: Vector3::new(i as f32, 0.0, 0.0),
                range: 20.0,
            });
        }

        let uniform = SceneUniform::new(&scene, &camera());
        assert!((uniform.ambient[0] - 0.3).abs() < 1e-6);
        assert!((uniform.ambient[1] - 0.2).abs() < 1e-6);
        assert_eq!(uniform.sun_direction, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(uniform.point_light_count(), MAX_POINT_LIGHTS);
        assert_eq!(uniform.point_position[3][0], 3.0);
        assert!(!uniform.fog_enabled());
    }

    #[test]
    fn test_fog_and_eye() {
        let mut scene = Scene::new(Color::BLACK);
        scene.fog = Some(Fog {
            color: Color::from_hex(0x0a0a1a),
            near: 10.0,
            far: 50.0,
        });

        let uniform = SceneUniform::new(&scene, &camera());
        assert!(uniform.fog_enabled());
        assert_eq!(uniform.fog_params[0], 10.0);
        assert_eq!(uniform.fog_params[1], 50.0);
        assert!((uniform.eye[0] - 15.0).abs() < 1e-4);
    }
}
