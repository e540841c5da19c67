use std::sync::Arc;

use cgmath::{Euler, Matrix4, Quaternion, Rad, Vector3};

use crate::gfx::{geometry::GeometryData, material::Material};

/// Index of a node inside its [`super::Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Euler angles in radians
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        let rotation = Quaternion::from(Euler {
            x: Rad(self.rotation.x),
            y: Rad(self.rotation.y),
            z: Rad(self.rotation.z),
        });
        Matrix4::from_translation(self.position)
            * Matrix4::from(rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// A node in the scene graph.
///
/// Nodes without geometry act as groups; their transform still applies to
/// their children.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub geometry: Option<Arc<GeometryData>>,
    pub material: Material,
    pub visible: bool,
    pub(crate) parent: Option<NodeId>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            geometry: None,
            material: Material::basic(crate::gfx::material::Color::WHITE),
            visible: true,
            parent: None,
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: Arc<GeometryData>, material: Material) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            geometry: Some(geometry),
            material,
            visible: true,
            parent: None,
        }
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn test_transform_matrix_translates_and_scales() {
        let transform = Transform {
            position: Vector3::new(1.0, 2.0, 3.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(2.0, 2.0, 2.0),
        };
        let p = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.truncate() - Vector3::new(3.0, 2.0, 3.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_transform_matrix_rotates() {
        let transform = Transform {
            rotation: Vector3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            ..Default::default()
        };
        // +Y rotated a quarter turn about X lands on +Z
        let p = transform.matrix() * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!((p.truncate() - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
    }
}
