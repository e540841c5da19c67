//! Construction of the ethical boundary scene.

use std::f32::consts::PI;
use std::sync::Arc;

use cgmath::{InnerSpace, Vector3};
use log::debug;
use rand::Rng;

use crate::config::ManifoldConfig;
use crate::error::Result;
use crate::gfx::{
    geometry::{
        generate_cylinder, generate_grid, generate_line, generate_sphere, generate_torus,
        GeometryData, SphereSampler,
    },
    material::{Color, Material},
    scene::{Fog, Light, NodeId, Scene, SceneNode},
};

pub const BACKGROUND: u32 = 0x0a0a1a;

const RING_COLORS: [u32; 3] = [0xff4444, 0xffaa00, 0x00ff88];
const RING_RADII: [f32; 3] = [5.2, 5.3, 5.4];
const RING_TUBE: f32 = 0.08;
const MARKER_RADIUS: f32 = 0.08;
const PATH_STEPS: usize = 12;
const PATH_LIFT: f32 = 3.0;
const GRID_SIZE: f32 = 20.0;
const GRID_DIVISIONS: u32 = 20;
const AXIS_LENGTH: f32 = 5.0;

/// Node ids of everything the animator and the metrics touch
#[derive(Debug, Clone)]
pub struct ManifoldLayout {
    pub boundary: NodeId,
    pub rings: [NodeId; 3],
    pub points: Vec<NodeId>,
    pub robot: NodeId,
    pub human: NodeId,
    pub boundary_radius: f32,
}

/// The complete scene together with its layout
pub struct ManifoldScene {
    pub scene: Scene,
    pub layout: ManifoldLayout,
}

impl ManifoldScene {
    /// Builds the scene, seeding the marker jitter from the configuration
    pub fn from_config(config: &ManifoldConfig) -> Result<Self> {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = match config.boundary.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        build_manifold(config, &mut rng)
    }
}

/// Builds the boundary sphere, its rings and markers, both figures, the
/// movement paths, the floor grid, the axes and the lights.
pub fn build_manifold<R: Rng + ?Sized>(config: &ManifoldConfig, rng: &mut R) -> Result<ManifoldScene> {
    config.validate()?;

    let background = Color::from_hex(BACKGROUND);
    let mut scene = Scene::new(background);
    scene.fog = Some(Fog {
        color: background,
        near: 10.0,
        far: 50.0,
    });
    add_lights(&mut scene);

    let (boundary, rings, points) = add_boundary(&mut scene, config, rng)?;
    let robot = add_robot(&mut scene, config.robot);
    let human = add_human(&mut scene, config.human);

    add_path(&mut scene, "robot_path", config.robot, config, Color::from_hex(0x0088ff));
    add_path(&mut scene, "human_path", config.human, config, Color::from_hex(0xffaa00));
    add_grid(&mut scene);
    add_axes(&mut scene);

    let stats = scene.get_statistics();
    debug!(
        "Built manifold scene: {} nodes, {} vertices, {} triangles",
        stats.node_count, stats.total_vertices, stats.total_triangles
    );

    Ok(ManifoldScene {
        scene,
        layout: ManifoldLayout {
            boundary,
            rings,
            points,
            robot,
            human,
            boundary_radius: config.boundary.radius,
        },
    })
}

fn add_lights(scene: &mut Scene) {
    scene.add_light(Light::Ambient {
        color: Color::from_hex(0x404040),
        intensity: 0.6,
    });
    scene.add_light(Light::Directional {
        color: Color::from_hex(0xffffff),
        intensity: 1.0,
        position: Vector3::new(20.0, 30.0, 10.0),
    });
    scene.add_light(Light::Point {
        color: Color::from_hex(0x00ff88),
        intensity: 0.3,
        position: Vector3::new(5.0, 10.0, 5.0),
        range: 20.0,
    });
    scene.add_light(Light::Point {
        color: Color::from_hex(0x0088ff),
        intensity: 0.2,
        position: Vector3::new(-5.0, 8.0, -5.0),
        range: 20.0,
    });
}

fn add_boundary<R: Rng + ?Sized>(
    scene: &mut Scene,
    config: &ManifoldConfig,
    rng: &mut R,
) -> Result<(NodeId, [NodeId; 3], Vec<NodeId>)> {
    let boundary_cfg = &config.boundary;

    let sphere = generate_sphere(boundary_cfg.radius, 32, 32).wireframe();
    let material = Material::phong(Color::from_hex(0x00ff88))
        .with_opacity(0.15)
        .with_emissive(Color::from_hex(0x004400))
        .with_wireframe(true);
    let boundary = scene.add_node(
        None,
        SceneNode::mesh("ethical_boundary", Arc::new(sphere), material)
            .with_position(boundary_cfg.center),
    );

    let ring_rotations = [
        Vector3::new(PI / 2.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, PI / 2.0),
        Vector3::new(0.0, PI / 4.0, 0.0),
    ];
    let mut rings = [boundary; 3];
    for (index, ring) in rings.iter_mut().enumerate() {
        let geometry = generate_torus(RING_RADII[index], RING_TUBE, 16, 100);
        let material = Material::basic(Color::from_hex(RING_COLORS[index])).with_opacity(0.7);
        *ring = scene.add_node(
            Some(boundary),
            SceneNode::mesh(format!("ring_{index}"), Arc::new(geometry), material)
                .with_rotation(ring_rotations[index]),
        );
    }

    let sampler = SphereSampler::new(boundary_cfg.distribution, boundary_cfg.jitter);
    let positions = sampler.sample(boundary_cfg.point_count, boundary_cfg.radius, rng)?;
    let marker = Arc::new(generate_sphere(MARKER_RADIUS, 8, 8));
    let count = positions.len().max(1) as f32;

    let points = positions
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let hue = i as f32 / count;
            let material = Material::basic(Color::from_hsl(hue, 0.9, 0.6))
                .with_emissive(Color::from_hsl(hue, 0.7, 0.3));
            scene.add_node(
                Some(boundary),
                SceneNode::mesh(format!("constraint_{i}"), marker.clone(), material)
                    .with_position(p.into()),
            )
        })
        .collect();

    Ok((boundary, rings, points))
}

fn add_robot(scene: &mut Scene, position: Vector3<f32>) -> NodeId {
    let robot = scene.add_node(None, SceneNode::group("robot").with_position(position));

    let body = Material::phong(Color::from_hex(0x0088ff))
        .with_emissive(Color::from_hex(0x002244))
        .with_shininess(100.0);
    scene.add_node(
        Some(robot),
        SceneNode::mesh("robot_body", Arc::new(generate_cylinder(0.5, 0.4, 2.0, 8)), body),
    );

    let head = Material::phong(Color::from_hex(0x0066cc)).with_emissive(Color::from_hex(0x001133));
    scene.add_node(
        Some(robot),
        SceneNode::mesh("robot_head", Arc::new(generate_sphere(0.3, 8, 8)), head)
            .with_position(Vector3::new(0.0, 1.2, 0.0)),
    );

    let eye = Arc::new(generate_sphere(0.05, 6, 6));
    for (name, x) in [("robot_left_eye", 0.15), ("robot_right_eye", -0.15)] {
        scene.add_node(
            Some(robot),
            SceneNode::mesh(name, eye.clone(), Material::basic(Color::WHITE))
                .with_position(Vector3::new(x, 1.25, 0.25)),
        );
    }

    robot
}

fn add_human(scene: &mut Scene, position: Vector3<f32>) -> NodeId {
    let human = scene.add_node(None, SceneNode::group("human").with_position(position));

    let clothing = Material::phong(Color::from_hex(0xff8844)).with_emissive(Color::from_hex(0x221100));
    scene.add_node(
        Some(human),
        SceneNode::mesh(
            "human_body",
            Arc::new(generate_cylinder(0.35, 0.3, 1.4, 12)),
            clothing,
        ),
    );

    let skin = Material::phong(Color::from_hex(0xffcc99)).with_emissive(Color::from_hex(0x221a11));
    scene.add_node(
        Some(human),
        SceneNode::mesh("human_head", Arc::new(generate_sphere(0.28, 12, 12)), skin)
            .with_position(Vector3::new(0.0, 1.0, 0.0)),
    );

    let arm = Arc::new(generate_cylinder(0.08, 0.08, 1.0, 8));
    for (name, x, tilt) in [("human_left_arm", 0.45, 0.3), ("human_right_arm", -0.45, -0.3)] {
        scene.add_node(
            Some(human),
            SceneNode::mesh(name, arm.clone(), clothing)
                .with_position(Vector3::new(x, 0.1, 0.0))
                .with_rotation(Vector3::new(0.0, 0.0, tilt)),
        );
    }

    human
}

/// Dotted arc from a figure toward the nearest point of the boundary
fn add_path(
    scene: &mut Scene,
    name: &str,
    from: Vector3<f32>,
    config: &ManifoldConfig,
    color: Color,
) {
    let center = config.boundary.center;
    let start = from + Vector3::new(0.0, 1.0, 0.0);
    let toward = start - center;
    let direction = if toward.magnitude2() > 0.0 {
        toward.normalize()
    } else {
        Vector3::unit_y()
    };
    let end = center + direction * config.boundary.radius;
    let control = (start + end) * 0.5 + Vector3::new(0.0, PATH_LIFT, 0.0);

    let group = scene.add_node(None, SceneNode::group(name));
    let dot = Arc::new(generate_sphere(0.05, 6, 6));
    let material = Material::basic(color).with_opacity(0.6);

    for step in 1..PATH_STEPS {
        let t = step as f32 / PATH_STEPS as f32;
        let position = quadratic_bezier(start, control, end, t);
        scene.add_node(
            Some(group),
            SceneNode::mesh(format!("{name}_{step}"), dot.clone(), material).with_position(position),
        );
    }
}

fn quadratic_bezier(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>, t: f32) -> Vector3<f32> {
    let u = 1.0 - t;
    a * (u * u) + b * (2.0 * u * t) + c * (t * t)
}

fn add_grid(scene: &mut Scene) {
    let material = Material::basic(Color::from_hex(0x444466)).with_opacity(0.5);
    scene.add_node(
        None,
        SceneNode::mesh(
            "grid",
            Arc::new(generate_grid(GRID_SIZE, GRID_DIVISIONS)),
            material,
        ),
    );
}

fn add_axes(scene: &mut Scene) {
    let axes: [(&str, [f32; 3], u32); 3] = [
        ("axis_x", [AXIS_LENGTH, 0.0, 0.0], 0xff0000),
        ("axis_y", [0.0, AXIS_LENGTH, 0.0], 0x00ff00),
        ("axis_z", [0.0, 0.0, AXIS_LENGTH], 0x0000ff),
    ];
    for (name, to, color) in axes {
        let line: GeometryData = generate_line([0.0, 0.0, 0.0], to);
        scene.add_node(
            None,
            SceneNode::mesh(name, Arc::new(line), Material::basic(Color::from_hex(color))),
        );
    }
}
