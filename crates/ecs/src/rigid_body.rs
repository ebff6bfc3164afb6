use crate::collider::Collider;
use crate::component::{Component, EngineContext};
use crate::mesh_renderer::MeshRenderer;
use glam::{Quat, Vec3};
use stagecraft_common::ComponentId;
use stagecraft_physics::BodyDesc;
use stagecraft_render::{MeshId, Scene};

/// Physics body driving a mesh.
///
/// The initial pose is captured from the mesh when the component is built.
/// Each frame the simulated pose is copied back onto the mesh; the mesh never
/// pushes its pose into the simulation.
#[derive(Debug)]
pub struct RigidBody {
    id: ComponentId,
    mesh: MeshId,
    collider: ComponentId,
    mass: f32,
    initial_position: Vec3,
    initial_rotation: Quat,
}

impl RigidBody {
    /// `mass <= 0` makes the body fixed.
    pub fn new(scene: &Scene, renderer: &MeshRenderer, collider: &Collider, mass: f32) -> Self {
        Self {
            id: ComponentId::new(),
            mesh: renderer.mesh(),
            collider: collider.id(),
            mass,
            initial_position: renderer.position(scene).unwrap_or(Vec3::ZERO),
            initial_rotation: renderer.quaternion(scene).unwrap_or(Quat::IDENTITY),
        }
    }

    /// Mass the body was created with.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Position snapshotted from the mesh at construction.
    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    /// Orientation snapshotted from the mesh at construction.
    pub fn initial_rotation(&self) -> Quat {
        self.initial_rotation
    }

    /// Simulated position, or `None` before `init`.
    pub fn position(&self, ctx: &EngineContext) -> Option<Vec3> {
        ctx.physics.body_position(self.id)
    }

    /// Teleport the body. The mesh follows on the next `on_update`.
    pub fn set_position(&self, ctx: &mut EngineContext, position: Vec3) -> bool {
        ctx.physics.set_body_position(self.id, position)
    }
}

impl Component for RigidBody {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn name(&self) -> &str {
        "Rigid body"
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let shape = ctx.physics.shape(self.collider).cloned();
        if shape.is_none() {
            tracing::warn!(
                body = %self.id,
                collider = %self.collider,
                "collider has no shape yet, adding body without one"
            );
        }
        ctx.physics.add_body(
            self.id,
            BodyDesc {
                mass: self.mass,
                position: self.initial_position,
                rotation: self.initial_rotation,
                shape,
            },
        );
    }

    fn on_update(&mut self, ctx: &mut EngineContext) {
        let (Some(position), Some(rotation)) = (
            ctx.physics.body_position(self.id),
            ctx.physics.body_rotation(self.id),
        ) else {
            return;
        };
        ctx.scene.set_position(self.mesh, position);
        ctx.scene.set_quaternion(self.mesh, rotation);
    }

    fn before_remove(&mut self, ctx: &mut EngineContext) {
        ctx.physics.remove_body(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_physics::ShapeSpec;
    use stagecraft_render::{Geometry, Material};

    fn setup(ctx: &mut EngineContext, height: f32) -> (MeshRenderer, Collider) {
        let renderer = MeshRenderer::new(
            &mut ctx.scene,
            Geometry::cuboid(1.0, 1.0, 1.0),
            Material::default(),
        );
        renderer.set_position(&mut ctx.scene, Vec3::new(1.0, height, -2.0));
        let collider = Collider::new(ShapeSpec::Box {
            half_extents: Vec3::splat(0.5),
        });
        (renderer, collider)
    }

    #[test]
    fn construction_snapshots_mesh_pose() {
        let mut ctx = EngineContext::default();
        let (renderer, collider) = setup(&mut ctx, 10.0);
        let body = RigidBody::new(&ctx.scene, &renderer, &collider, 1.0);

        assert_eq!(body.initial_position(), Vec3::new(1.0, 10.0, -2.0));
        assert_eq!(body.initial_rotation(), Quat::IDENTITY);
        assert!(body.position(&ctx).is_none());

        // Later mesh moves do not change the snapshot.
        renderer.set_position(&mut ctx.scene, Vec3::ZERO);
        assert_eq!(body.initial_position(), Vec3::new(1.0, 10.0, -2.0));
    }

    #[test]
    fn on_update_copies_post_step_pose_to_mesh() {
        let mut ctx = EngineContext::default();
        let (mut renderer, mut collider) = setup(&mut ctx, 10.0);
        let mut body = RigidBody::new(&ctx.scene, &renderer, &collider, 1.0);
        renderer.init(&mut ctx);
        collider.init(&mut ctx);
        body.init(&mut ctx);

        ctx.physics.step();
        body.on_update(&mut ctx);

        let position = ctx.physics.body_position(body.id()).unwrap();
        let rotation = ctx.physics.body_rotation(body.id()).unwrap();
        assert!(position.y < 10.0);
        assert_eq!(renderer.position(&ctx.scene), Some(position));
        assert_eq!(renderer.quaternion(&ctx.scene), Some(rotation));
    }

    #[test]
    fn init_before_collider_adds_shapeless_body() {
        let mut ctx = EngineContext::default();
        let (renderer, collider) = setup(&mut ctx, 0.0);
        let mut body = RigidBody::new(&ctx.scene, &renderer, &collider, 1.0);
        body.init(&mut ctx);
        assert!(ctx.physics.contains_body(body.id()));
    }

    #[test]
    fn set_position_moves_the_body_not_the_mesh() {
        let mut ctx = EngineContext::default();
        let (renderer, mut collider) = setup(&mut ctx, 0.0);
        let mut body = RigidBody::new(&ctx.scene, &renderer, &collider, 0.0);
        collider.init(&mut ctx);
        body.init(&mut ctx);

        assert!(body.set_position(&mut ctx, Vec3::new(5.0, 5.0, 5.0)));
        assert_eq!(body.position(&ctx), Some(Vec3::new(5.0, 5.0, 5.0)));
        assert_eq!(
            renderer.position(&ctx.scene),
            Some(Vec3::new(1.0, 0.0, -2.0))
        );
    }

    #[test]
    fn before_remove_drops_the_body() {
        let mut ctx = EngineContext::default();
        let (renderer, mut collider) = setup(&mut ctx, 0.0);
        let mut body = RigidBody::new(&ctx.scene, &renderer, &collider, 1.0);
        collider.init(&mut ctx);
        body.init(&mut ctx);
        body.before_remove(&mut ctx);
        assert!(!ctx.physics.contains_body(body.id()));
        assert_eq!(ctx.physics.body_count(), 0);
    }
}
