use crate::engine::Engine;
use glam::Vec3;
use stagecraft_common::{ComponentId, ObjectId};
use stagecraft_ecs::{
    Collider, ColliderParams, Component, GameObject, MeshRenderer, RigidBody, RigidBodyController,
};
use stagecraft_render::{Color, Geometry, Material, Renderer};

/// Handles to the sandbox objects, for hosts and tests that poke at them.
#[derive(Debug, Clone, Copy)]
pub struct Sandbox {
    pub ground: ObjectId,
    pub cube: ObjectId,
    /// Physics key of the cube's body.
    pub cube_body: ComponentId,
}

/// Speed of the cube's keyboard controller, per frame.
pub const CUBE_SPEED: f32 = 0.5;

/// Populate the demo scene: a green ground slab at y = -15 and a blue unit
/// cube at y = 10 that falls onto it and can be steered with W/A/S/D.
pub fn populate_sandbox<R: Renderer>(engine: &mut Engine<R>) -> Sandbox {
    let ground = ground(engine);
    let (cube, cube_body) = cube(engine);
    tracing::debug!("sandbox scene populated");
    Sandbox {
        ground,
        cube,
        cube_body,
    }
}

fn ground<R: Renderer>(engine: &mut Engine<R>) -> ObjectId {
    let scene = &mut engine.context_mut().scene;
    let renderer = MeshRenderer::new(
        scene,
        Geometry::plane(50.0, 50.0),
        Material::standard(Color::GREEN),
    );
    renderer.set_position(scene, Vec3::new(0.0, -15.0, 0.0));
    let collider = Collider::from_kind(
        "box",
        ColliderParams {
            half_extents: Some(Vec3::new(25.0, 0.05, 25.0)),
            ..Default::default()
        },
    );
    let body = RigidBody::new(scene, &renderer, &collider, 0.0);

    let mut ground = GameObject::named("ground");
    ground.add_component(renderer);
    ground.add_component(collider);
    ground.add_component(body);
    engine.add_game_object(ground)
}

fn cube<R: Renderer>(engine: &mut Engine<R>) -> (ObjectId, ComponentId) {
    let scene = &mut engine.context_mut().scene;
    let renderer = MeshRenderer::new(
        scene,
        Geometry::cuboid(1.0, 1.0, 1.0),
        Material::standard(Color::BLUE),
    );
    renderer.set_position(scene, Vec3::new(0.0, 10.0, 0.0));
    let collider = Collider::from_kind(
        "box",
        ColliderParams {
            half_extents: Some(Vec3::splat(0.5)),
            ..Default::default()
        },
    );
    let body = RigidBody::new(scene, &renderer, &collider, 1.0);
    let controller = RigidBodyController::new(&body, CUBE_SPEED);
    let body_id = body.id();

    let mut cube = GameObject::named("cube");
    cube.add_component(renderer);
    cube.add_component(collider);
    cube.add_component(body);
    cube.add_component(controller);
    (engine.add_game_object(cube), body_id)
}
