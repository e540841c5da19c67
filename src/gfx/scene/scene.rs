use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::material::{Color, Shading};

use super::{
    node::{NodeId, SceneNode},
    vertex::Vertex3D,
};

/// Light sources understood by the renderer
#[derive(Debug, Clone, Copy)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Parallel light shining from `position` toward the origin
    Directional {
        color: Color,
        intensity: f32,
        position: Vector3<f32>,
    },
    /// Omni light with linear falloff reaching zero at `range`
    Point {
        color: Color,
        intensity: f32,
        position: Vector3<f32>,
        range: f32,
    },
}

/// Linear distance fog
#[derive(Debug, Clone, Copy)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// Per-frame buffers the scene is flattened into.
///
/// Owned by the caller and reused across frames so the render loop does not
/// allocate once the vectors have grown to the scene size.
#[derive(Debug, Default)]
pub struct FrameScratch {
    pub vertices: Vec<Vertex3D>,
    /// Filled triangles of fully opaque materials
    pub opaque_indices: Vec<u32>,
    /// Filled triangles of translucent materials
    pub transparent_indices: Vec<u32>,
    /// Line segments (wireframes, grid, axes)
    pub line_indices: Vec<u32>,
    world: Vec<Option<Matrix4<f32>>>,
}

impl FrameScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.opaque_indices.clear();
        self.transparent_indices.clear();
        self.line_indices.clear();
        self.world.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Scene graph: a flat arena of nodes, background, fog and lights
pub struct Scene {
    nodes: Vec<SceneNode>,
    pub lights: Vec<Light>,
    pub background: Color,
    pub fog: Option<Fog>,
}

impl Scene {
    /// Creates an empty scene with the given background color
    pub fn new(background: Color) -> Self {
        Self {
            nodes: Vec::new(),
            lights: Vec::new(),
            background,
            fog: None,
        }
    }

    /// Adds a node under `parent` (or at the root) and returns its id.
    ///
    /// Parents always precede their children in the arena, which lets
    /// [`Scene::flatten_into`] resolve world transforms in one pass.
    pub fn add_node(&mut self, parent: Option<NodeId>, mut node: SceneNode) -> NodeId {
        if let Some(parent) = parent {
            debug_assert!(parent.0 < self.nodes.len(), "parent must already exist");
        }
        node.parent = parent;
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of the direct children of `parent`
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// World-space matrix of a node, `None` for an unknown id
    pub fn world_matrix(&self, id: NodeId) -> Option<Matrix4<f32>> {
        let node = self.nodes.get(id.0)?;
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    /// World-space position of a node's origin
    pub fn world_position(&self, id: NodeId) -> Option<Vector3<f32>> {
        self.world_matrix(id)
            .map(|m| (m * Vector4::new(0.0, 0.0, 0.0, 1.0)).truncate())
    }

    /// Writes every visible node, transformed to world space, into `scratch`.
    ///
    /// Hidden nodes hide their whole subtree.
    pub fn flatten_into(&self, scratch: &mut FrameScratch) {
        scratch.clear();

        for (index, node) in self.nodes.iter().enumerate() {
            let parent_world = match node.parent {
                Some(parent) => scratch.world.get(parent.0).copied().flatten(),
                None => Some(Matrix4::identity()),
            };
            let world = match parent_world {
                Some(parent_world) if node.visible => Some(parent_world * node.transform.matrix()),
                _ => None,
            };
            debug_assert_eq!(scratch.world.len(), index);
            scratch.world.push(world);

            let (Some(world), Some(geometry)) = (world, node.geometry.as_ref()) else {
                continue;
            };

            let material = &node.material;
            let base = scratch.vertices.len() as u32;
            let color = material.color.with_alpha(material.opacity);
            let shininess = match material.shading {
                Shading::Unlit => 0.0,
                Shading::Phong => material.shininess.max(1.0),
            };
            let emissive = material.emissive;
            let params = [emissive.r, emissive.g, emissive.b, shininess];

            for (i, position) in geometry.vertices.iter().enumerate() {
                let p = world * Vector4::new(position[0], position[1], position[2], 1.0);
                let n = geometry.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
                let n = (world * Vector4::new(n[0], n[1], n[2], 0.0)).truncate();
                let n = if n.magnitude2() > 0.0 { n.normalize() } else { n };

                scratch.vertices.push(Vertex3D {
                    position: [p.x, p.y, p.z],
                    normal: [n.x, n.y, n.z],
                    color,
                    params,
                });
            }

            if material.wireframe {
                // Wireframe materials draw the outline of filled geometry
                if geometry.line_indices.is_empty() {
                    let wire = geometry.wireframe();
                    scratch
                        .line_indices
                        .extend(wire.line_indices.iter().map(|i| base + i));
                } else {
                    scratch
                        .line_indices
                        .extend(geometry.line_indices.iter().map(|i| base + i));
                }
                continue;
            }

            let triangles = if material.is_transparent() {
                &mut scratch.transparent_indices
            } else {
                &mut scratch.opaque_indices
            };
            triangles.extend(geometry.indices.iter().map(|i| base + i));
            scratch
                .line_indices
                .extend(geometry.line_indices.iter().map(|i| base + i));
        }
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let meshes = self.nodes.iter().filter_map(|n| n.geometry.as_ref());
        let (total_vertices, total_triangles) = meshes.fold((0, 0), |(v, t), g| {
            (v + g.vertex_count(), t + g.triangle_count())
        });

        SceneStatistics {
            node_count: self.nodes.len(),
            light_count: self.lights.len(),
            total_vertices,
            total_triangles,
        }
    }
}

/// Scene statistics for debugging and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub light_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_grid, generate_sphere};
    use crate::gfx::material::Material;
    use std::sync::Arc;

    fn sphere_node(name: &str, opacity: f32) -> SceneNode {
        SceneNode::mesh(
            name,
            Arc::new(generate_sphere(1.0, 4, 3)),
            Material::phong(Color::WHITE).with_opacity(opacity),
        )
    }

    #[test]
    fn test_children_inherit_parent_transform() {
        let mut scene = Scene::new(Color::BLACK);
        let parent = scene.add_node(
            None,
            SceneNode::group("parent").with_position(Vector3::new(0.0, 3.0, 0.0)),
        );
        let child = scene.add_node(
            Some(parent),
            SceneNode::group("child").with_position(Vector3::new(1.0, 0.0, 0.0)),
        );

        let p = scene.world_position(child).unwrap();
        assert!((p - Vector3::new(1.0, 3.0, 0.0)).magnitude() < 1e-6);
        assert_eq!(scene.children(parent), vec![child]);
        assert_eq!(scene.find("child"), Some(child));
    }

    #[test]
    fn test_flatten_splits_passes() {
        let mut scene = Scene::new(Color::BLACK);
        scene.add_node(None, sphere_node("opaque", 1.0));
        scene.add_node(None, sphere_node("glass", 0.5));
        let wire = sphere_node("wire", 0.15);
        scene.add_node(None, SceneNode {
            material: wire.material.with_wireframe(true),
            ..wire
        });
        scene.add_node(
            None,
            SceneNode::mesh("grid", Arc::new(generate_grid(2.0, 2)), Material::basic(Color::WHITE)),
        );

        let mut scratch = FrameScratch::new();
        scene.flatten_into(&mut scratch);

        let sphere = generate_sphere(1.0, 4, 3);
        assert_eq!(scratch.opaque_indices.len(), sphere.indices.len());
        assert_eq!(scratch.transparent_indices.len(), sphere.indices.len());
        assert_eq!(
            scratch.line_indices.len(),
            sphere.wireframe().line_indices.len() + 3 * 2 * 2
        );
        assert_eq!(scratch.vertices.len(), sphere.vertex_count() * 3 + 12);

        let max_index = scratch
            .opaque_indices
            .iter()
            .chain(&scratch.transparent_indices)
            .chain(&scratch.line_indices)
            .copied()
            .max()
            .unwrap();
        assert!((max_index as usize) < scratch.vertices.len());
    }

    #[test]
    fn test_hidden_parent_hides_subtree() {
        let mut scene = Scene::new(Color::BLACK);
        let parent = scene.add_node(None, sphere_node("parent", 1.0));
        scene.add_node(Some(parent), sphere_node("child", 1.0));
        scene.node_mut(parent).unwrap().visible = false;

        let mut scratch = FrameScratch::new();
        scene.flatten_into(&mut scratch);
        assert!(scratch.is_empty());
        assert!(scratch.opaque_indices.is_empty());
    }

    #[test]
    fn test_scratch_is_reused() {
        let mut scene = Scene::new(Color::BLACK);
        scene.add_node(None, sphere_node("a", 1.0));

        let mut scratch = FrameScratch::new();
        scene.flatten_into(&mut scratch);
        let first = scratch.vertices.len();
        let capacity = scratch.vertices.capacity();

        scene.flatten_into(&mut scratch);
        assert_eq!(scratch.vertices.len(), first);
        assert_eq!(scratch.vertices.capacity(), capacity);
    }

    #[test]
    fn test_vertices_are_in_world_space() {
        let mut scene = Scene::new(Color::BLACK);
        scene.add_node(
            None,
            sphere_node("moved", 1.0).with_position(Vector3::new(10.0, 0.0, 0.0)),
        );

        let mut scratch = FrameScratch::new();
        scene.flatten_into(&mut scratch);
        for v in &scratch.vertices {
            assert!(v.position[0] >= 9.0 - 1e-5 && v.position[0] <= 11.0 + 1e-5);
            assert!(v.is_lit());
        }
    }
}
