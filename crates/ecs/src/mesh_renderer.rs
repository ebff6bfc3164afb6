use crate::component::{Component, EngineContext};
use glam::{Quat, Vec3};
use stagecraft_common::ComponentId;
use stagecraft_render::{Geometry, Material, MeshId, Scene};

/// Drawable mesh of a game object.
///
/// The mesh node is created detached; it becomes visible on `init` and is
/// hidden again by `before_remove`. Pose accessors go straight to the scene.
#[derive(Debug)]
pub struct MeshRenderer {
    id: ComponentId,
    mesh: MeshId,
}

impl MeshRenderer {
    /// Create a detached mesh node. It becomes visible on `init`.
    pub fn new(scene: &mut Scene, geometry: Geometry, material: Material) -> Self {
        Self {
            id: ComponentId::new(),
            mesh: scene.create_mesh(geometry, material),
        }
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    /// Mesh position, or `None` if the node is not in `scene`.
    pub fn position(&self, scene: &Scene) -> Option<Vec3> {
        scene.position(self.mesh)
    }

    pub fn set_position(&self, scene: &mut Scene, position: Vec3) {
        scene.set_position(self.mesh, position);
    }

    /// Rotation as XYZ Euler angles in radians.
    pub fn euler(&self, scene: &Scene) -> Option<Vec3> {
        scene.mesh(self.mesh).map(|m| m.transform.euler())
    }

    pub fn set_euler(&self, scene: &mut Scene, angles: Vec3) {
        if let Some(mesh) = scene.mesh_mut(self.mesh) {
            mesh.transform.set_euler(angles);
        }
    }

    pub fn quaternion(&self, scene: &Scene) -> Option<Quat> {
        scene.quaternion(self.mesh)
    }

    pub fn set_quaternion(&self, scene: &mut Scene, rotation: Quat) {
        scene.set_quaternion(self.mesh, rotation);
    }

    pub fn geometry(&self, scene: &Scene) -> Option<Geometry> {
        scene.mesh(self.mesh).map(|m| m.geometry)
    }
}

impl Component for MeshRenderer {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn name(&self) -> &str {
        "Mesh renderer"
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.scene.add(self.mesh);
    }

    fn before_remove(&mut self, ctx: &mut EngineContext) {
        ctx.scene.remove(self.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_render::Color;

    fn cube(ctx: &mut EngineContext) -> MeshRenderer {
        MeshRenderer::new(
            &mut ctx.scene,
            Geometry::cuboid(1.0, 1.0, 1.0),
            Material::standard(Color::BLUE),
        )
    }

    #[test]
    fn init_attaches_and_before_remove_detaches() {
        let mut ctx = EngineContext::default();
        let mut renderer = cube(&mut ctx);
        assert_eq!(ctx.scene.visible_meshes().count(), 0);

        renderer.init(&mut ctx);
        assert_eq!(ctx.scene.visible_meshes().count(), 1);

        renderer.before_remove(&mut ctx);
        assert_eq!(ctx.scene.visible_meshes().count(), 0);
        assert_eq!(ctx.scene.mesh_count(), 1);
    }

    #[test]
    fn pose_accessors() {
        let mut ctx = EngineContext::default();
        let renderer = cube(&mut ctx);
        renderer.set_position(&mut ctx.scene, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(renderer.position(&ctx.scene), Some(Vec3::new(0.0, 10.0, 0.0)));

        renderer.set_euler(&mut ctx.scene, Vec3::new(0.0, 0.5, 0.0));
        let q = renderer.quaternion(&ctx.scene).unwrap();
        assert!(q.abs_diff_eq(Quat::from_rotation_y(0.5), 1e-6));
        let euler = renderer.euler(&ctx.scene).unwrap();
        assert!(euler.abs_diff_eq(Vec3::new(0.0, 0.5, 0.0), 1e-5));

        renderer.set_quaternion(&mut ctx.scene, Quat::IDENTITY);
        assert_eq!(renderer.quaternion(&ctx.scene), Some(Quat::IDENTITY));
    }

    #[test]
    fn geometry_is_readable() {
        let mut ctx = EngineContext::default();
        let renderer = cube(&mut ctx);
        assert_eq!(
            renderer.geometry(&ctx.scene),
            Some(Geometry::cuboid(1.0, 1.0, 1.0))
        );
        assert_eq!(renderer.name(), "Mesh renderer");
    }
}
