use crate::component::{Component, EngineContext};
use crate::mesh_renderer::MeshRenderer;
use crate::rigid_body::RigidBody;
use glam::Vec3;
use stagecraft_common::ComponentId;
use stagecraft_input::{InputHub, KeyState, SubscriptionId};
use stagecraft_render::MeshId;

/// Input subscription shared by both controllers.
#[derive(Debug, Default)]
struct KeyListener {
    subscription: Option<SubscriptionId>,
}

impl KeyListener {
    fn attach(&mut self, input: &mut InputHub) {
        if let Some(old) = self.subscription.replace(input.subscribe()) {
            input.unsubscribe(old);
        }
    }

    fn detach(&mut self, input: &mut InputHub) {
        if let Some(id) = self.subscription.take() {
            input.unsubscribe(id);
        }
    }

    /// This frame's step, or `None` when nothing is held.
    fn step(&self, input: &InputHub, speed: f32) -> Option<Vec3> {
        let keys: KeyState = input.state(self.subscription?)?;
        let delta = keys.planar_step(speed);
        (delta != Vec3::ZERO).then_some(delta)
    }
}

/// Moves a mesh directly with W/A/S/D.
#[derive(Debug)]
pub struct MeshController {
    id: ComponentId,
    mesh: MeshId,
    speed: f32,
    keys: KeyListener,
}

impl MeshController {
    /// `speed` is the distance moved per frame per held key.
    pub fn new(renderer: &MeshRenderer, speed: f32) -> Self {
        Self {
            id: ComponentId::new(),
            mesh: renderer.mesh(),
            speed,
            keys: KeyListener::default(),
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Component for MeshController {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn name(&self) -> &str {
        "Character controller"
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.keys.attach(&mut ctx.input);
    }

    fn on_update(&mut self, ctx: &mut EngineContext) {
        let Some(delta) = self.keys.step(&ctx.input, self.speed) else {
            return;
        };
        if let Some(position) = ctx.scene.position(self.mesh) {
            ctx.scene.set_position(self.mesh, position + delta);
        }
    }

    fn before_remove(&mut self, ctx: &mut EngineContext) {
        self.keys.detach(&mut ctx.input);
    }
}

/// Moves a physics body with W/A/S/D by teleporting it each frame.
#[derive(Debug)]
pub struct RigidBodyController {
    id: ComponentId,
    body: ComponentId,
    speed: f32,
    keys: KeyListener,
}

impl RigidBodyController {
    pub fn new(body: &RigidBody, speed: f32) -> Self {
        Self {
            id: ComponentId::new(),
            body: body.id(),
            speed,
            keys: KeyListener::default(),
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Component for RigidBodyController {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn name(&self) -> &str {
        "Rigid body controller"
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.keys.attach(&mut ctx.input);
    }

    fn on_update(&mut self, ctx: &mut EngineContext) {
        let Some(delta) = self.keys.step(&ctx.input, self.speed) else {
            return;
        };
        if let Some(position) = ctx.physics.body_position(self.body) {
            ctx.physics.set_body_position(self.body, position + delta);
        }
    }

    fn before_remove(&mut self, ctx: &mut EngineContext) {
        self.keys.detach(&mut ctx.input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Collider;
    use stagecraft_input::Key;
    use stagecraft_physics::ShapeSpec;
    use stagecraft_render::{Geometry, Material};

    fn mesh_at(ctx: &mut EngineContext, position: Vec3) -> MeshRenderer {
        let renderer = MeshRenderer::new(
            &mut ctx.scene,
            Geometry::cuboid(1.0, 1.0, 1.0),
            Material::default(),
        );
        renderer.set_position(&mut ctx.scene, position);
        renderer
    }

    #[test]
    fn holding_d_moves_plus_x_by_speed() {
        let mut ctx = EngineContext::default();
        let start = Vec3::new(1.0, 2.0, 3.0);
        let renderer = mesh_at(&mut ctx, start);
        let mut controller = MeshController::new(&renderer, 0.25);
        controller.init(&mut ctx);

        ctx.input.key_down(Key::Right);
        controller.on_update(&mut ctx);

        let p = renderer.position(&ctx.scene).unwrap();
        assert_eq!(p.x, start.x + 0.25);
        assert_eq!(p.y, start.y);
        assert_eq!(p.z, start.z);
    }

    #[test]
    fn opposite_keys_leave_position_unchanged() {
        let mut ctx = EngineContext::default();
        let start = Vec3::new(0.3, 0.0, -0.7);
        let renderer = mesh_at(&mut ctx, start);
        let mut controller = MeshController::new(&renderer, 0.5);
        controller.init(&mut ctx);

        ctx.input.key_down(Key::Left);
        ctx.input.key_down(Key::Right);
        controller.on_update(&mut ctx);
        assert_eq!(renderer.position(&ctx.scene), Some(start));
    }

    #[test]
    fn w_and_s_move_along_z() {
        let mut ctx = EngineContext::default();
        let renderer = mesh_at(&mut ctx, Vec3::ZERO);
        let mut controller = MeshController::new(&renderer, 1.0);
        controller.init(&mut ctx);

        ctx.input.key_down(Key::Forward);
        controller.on_update(&mut ctx);
        assert_eq!(renderer.position(&ctx.scene), Some(Vec3::new(0.0, 0.0, -1.0)));

        ctx.input.key_up(Key::Forward);
        ctx.input.key_down(Key::Back);
        controller.on_update(&mut ctx);
        controller.on_update(&mut ctx);
        assert_eq!(renderer.position(&ctx.scene), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn no_movement_before_init() {
        let mut ctx = EngineContext::default();
        let renderer = mesh_at(&mut ctx, Vec3::ZERO);
        let mut controller = MeshController::new(&renderer, 1.0);
        ctx.input.key_down(Key::Right);
        controller.on_update(&mut ctx);
        assert_eq!(renderer.position(&ctx.scene), Some(Vec3::ZERO));
    }

    #[test]
    fn before_remove_releases_subscription() {
        let mut ctx = EngineContext::default();
        let renderer = mesh_at(&mut ctx, Vec3::ZERO);
        let mut controller = MeshController::new(&renderer, 1.0);
        controller.init(&mut ctx);
        assert_eq!(ctx.input.subscriber_count(), 1);
        controller.before_remove(&mut ctx);
        assert_eq!(ctx.input.subscriber_count(), 0);

        ctx.input.key_down(Key::Right);
        controller.on_update(&mut ctx);
        assert_eq!(renderer.position(&ctx.scene), Some(Vec3::ZERO));
    }

    #[test]
    fn repeated_init_keeps_one_subscription() {
        let mut ctx = EngineContext::default();
        let renderer = mesh_at(&mut ctx, Vec3::ZERO);
        let mut controller = MeshController::new(&renderer, 1.0);
        controller.init(&mut ctx);
        controller.init(&mut ctx);
        assert_eq!(ctx.input.subscriber_count(), 1);
    }

    #[test]
    fn rigid_body_controller_moves_the_body() {
        let mut ctx = EngineContext::default();
        let renderer = mesh_at(&mut ctx, Vec3::new(0.0, 10.0, 0.0));
        let mut collider = Collider::new(ShapeSpec::Box {
            half_extents: Vec3::splat(0.5),
        });
        let mut body = RigidBody::new(&ctx.scene, &renderer, &collider, 1.0);
        let mut controller = RigidBodyController::new(&body, 0.5);
        collider.init(&mut ctx);
        body.init(&mut ctx);
        controller.init(&mut ctx);

        ctx.input.key_down(Key::Left);
        controller.on_update(&mut ctx);

        assert_eq!(body.position(&ctx), Some(Vec3::new(-0.5, 10.0, 0.0)));
        assert_eq!(controller.name(), "Rigid body controller");
        // Mesh catches up once the body syncs.
        body.on_update(&mut ctx);
        assert_eq!(
            renderer.position(&ctx.scene),
            Some(Vec3::new(-0.5, 10.0, 0.0))
        );
    }
}
