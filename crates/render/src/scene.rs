use crate::geometry::{Color, Geometry, Material};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stagecraft_common::Transform;

/// Handle of a mesh node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub u64);

/// A drawable node: geometry, material and a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    attached: bool,
}

impl Mesh {
    /// Whether the mesh is currently part of the drawn scene.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Scene lighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Light {
    Ambient { color: Color, intensity: f32 },
    /// Shines from `position` towards the origin.
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
}

/// Scene graph: every mesh node plus the lights.
///
/// Mesh nodes are created detached. Attaching makes them visible to renderers;
/// detaching hides them again without destroying their state.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: BTreeMap<MeshId, Mesh>,
    lights: Vec<Light>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached mesh node at the origin.
    pub fn create_mesh(&mut self, geometry: Geometry, material: Material) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.meshes.insert(
            id,
            Mesh {
                geometry,
                material,
                transform: Transform::default(),
                attached: false,
            },
        );
        tracing::trace!(mesh = id.0, kind = geometry.kind(), "mesh created");
        id
    }

    /// Attach a mesh so it is drawn. Returns false for unknown ids.
    pub fn add(&mut self, id: MeshId) -> bool {
        self.set_attached(id, true)
    }

    /// Detach a mesh. Returns false for unknown ids.
    pub fn remove(&mut self, id: MeshId) -> bool {
        self.set_attached(id, false)
    }

    fn set_attached(&mut self, id: MeshId, attached: bool) -> bool {
        match self.meshes.get_mut(&id) {
            Some(mesh) => {
                mesh.attached = attached;
                true
            }
            None => false,
        }
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(&id)
    }

    /// Attached meshes in creation order.
    pub fn visible_meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes
            .iter()
            .filter(|(_, m)| m.attached)
            .map(|(id, m)| (*id, m))
    }

    /// Number of mesh nodes, attached or not.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn position(&self, id: MeshId) -> Option<Vec3> {
        self.mesh(id).map(|m| m.transform.position)
    }

    pub fn set_position(&mut self, id: MeshId, position: Vec3) -> bool {
        match self.mesh_mut(id) {
            Some(mesh) => {
                mesh.transform.position = position;
                true
            }
            None => false,
        }
    }

    pub fn quaternion(&self, id: MeshId) -> Option<Quat> {
        self.mesh(id).map(|m| m.transform.rotation)
    }

    pub fn set_quaternion(&mut self, id: MeshId, rotation: Quat) -> bool {
        match self.mesh_mut(id) {
            Some(mesh) => {
                mesh.transform.rotation = rotation;
                true
            }
            None => false,
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Sum of all ambient lights.
    pub fn ambient(&self) -> Color {
        self.lights.iter().fold(Color::rgb(0.0, 0.0, 0.0), |acc, light| match light {
            Light::Ambient { color, intensity } => {
                let c = color.scaled(*intensity);
                Color::rgb(acc.r + c.r, acc.g + c.g, acc.b + c.b)
            }
            Light::Directional { .. } => acc,
        })
    }

    /// First directional light, as (direction towards the light, scaled color).
    pub fn key_light(&self) -> Option<(Vec3, Color)> {
        self.lights.iter().find_map(|light| match light {
            Light::Directional {
                color,
                intensity,
                position,
            } => Some((
                position.try_normalize().unwrap_or(Vec3::Y),
                color.scaled(*intensity),
            )),
            Light::Ambient { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(scene: &mut Scene) -> MeshId {
        scene.create_mesh(Geometry::cuboid(1.0, 1.0, 1.0), Material::default())
    }

    #[test]
    fn meshes_start_detached() {
        let mut scene = Scene::new();
        let id = cube(&mut scene);
        assert_eq!(scene.mesh_count(), 1);
        assert!(!scene.mesh(id).unwrap().is_attached());
        assert_eq!(scene.visible_meshes().count(), 0);
    }

    #[test]
    fn add_and_remove_toggle_visibility() {
        let mut scene = Scene::new();
        let id = cube(&mut scene);
        assert!(scene.add(id));
        assert_eq!(scene.visible_meshes().count(), 1);
        assert!(scene.remove(id));
        assert_eq!(scene.visible_meshes().count(), 0);
        // The node keeps its state after removal.
        assert!(scene.mesh(id).is_some());
        assert!(!scene.add(MeshId(99)));
    }

    #[test]
    fn ids_follow_creation_order() {
        let mut scene = Scene::new();
        let a = cube(&mut scene);
        let b = cube(&mut scene);
        scene.add(b);
        scene.add(a);
        let order: Vec<MeshId> = scene.visible_meshes().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn pose_accessors() {
        let mut scene = Scene::new();
        let id = cube(&mut scene);
        assert!(scene.set_position(id, Vec3::new(0.0, 10.0, 0.0)));
        assert_eq!(scene.position(id), Some(Vec3::new(0.0, 10.0, 0.0)));
        let q = Quat::from_rotation_z(1.0);
        assert!(scene.set_quaternion(id, q));
        assert_eq!(scene.quaternion(id), Some(q));
        assert!(scene.position(MeshId(42)).is_none());
    }

    #[test]
    fn lighting_summary() {
        let mut scene = Scene::new();
        assert!(scene.key_light().is_none());
        scene.add_light(Light::Ambient {
            color: Color::WHITE,
            intensity: 0.5,
        });
        scene.add_light(Light::Directional {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(0.0, 10.0, 0.0),
        });
        assert_eq!(scene.ambient(), Color::rgb(0.5, 0.5, 0.5));
        let (dir, color) = scene.key_light().unwrap();
        assert_eq!(dir, Vec3::Y);
        assert_eq!(color, Color::WHITE);
    }
}
