use crate::convert::{from_rotation, from_vector, to_rotation, to_vector};
use crate::shape::ColliderShape;
use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Translation3};
use rapier3d::prelude::*;
use std::collections::BTreeMap;
use stagecraft_common::ComponentId;

/// Gravity applied when no override is configured.
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Fixed integration step, one display frame at 60 Hz.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Everything needed to register a body.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    /// Mass in kilograms. Zero or less creates a fixed body.
    pub mass: f32,
    pub position: Vec3,
    pub rotation: Quat,
    /// Collision shape. A body without one still integrates but never collides.
    pub shape: Option<ColliderShape>,
}

impl BodyDesc {
    /// Fixed bodies are never moved by the solver.
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }
}

/// The simulated world.
///
/// Owns the whole rapier pipeline. Bodies and collider shapes are registered
/// under the `ComponentId` of the component that owns them; the rapier handles
/// stay internal.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    handles: BTreeMap<ComponentId, RigidBodyHandle>,
    shapes: BTreeMap<ComponentId, ColliderShape>,
    steps: u64,
}

impl PhysicsWorld {
    /// Create an empty world with the given gravity and fixed step.
    pub fn new(gravity: Vec3, time_step: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = time_step;
        Self {
            gravity: to_vector(gravity),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            handles: BTreeMap::new(),
            shapes: BTreeMap::new(),
            steps: 0,
        }
    }

    /// Gravity applied to every dynamic body.
    pub fn gravity(&self) -> Vec3 {
        from_vector(&self.gravity)
    }

    /// Seconds simulated by one `step`.
    pub fn time_step(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Change the fixed step used from the next `step` on.
    pub fn set_time_step(&mut self, time_step: f32) {
        self.integration_parameters.dt = time_step;
    }

    /// Number of steps taken since creation.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Number of registered bodies.
    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    /// Whether a body is registered under `key`.
    pub fn contains_body(&self, key: ComponentId) -> bool {
        self.handles.contains_key(&key)
    }

    /// Advance the simulation by exactly one fixed time step.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.steps += 1;
        tracing::trace!(step = self.steps, bodies = self.handles.len(), "physics step");
    }

    /// Register a body under `key`. A body already registered under the same
    /// key is replaced.
    pub fn add_body(&mut self, key: ComponentId, desc: BodyDesc) {
        if self.remove_body(key) {
            tracing::warn!(body = %key, "body registered twice, replacing previous one");
        }

        let pose = Isometry3::from_parts(
            Translation3::new(desc.position.x, desc.position.y, desc.position.z),
            to_rotation(desc.rotation),
        );
        let builder = if desc.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let mut builder = builder.position(pose);
        if desc.shape.is_none() && !desc.is_static() {
            builder = builder.additional_mass(desc.mass);
        }
        let handle = self.bodies.insert(builder.build());

        if let Some(shape) = &desc.shape {
            let mut collider = ColliderBuilder::new(shape.shared_shape().clone())
                .translation(to_vector(shape.offset()));
            if !desc.is_static() {
                collider = collider.mass(desc.mass);
            }
            self.colliders
                .insert_with_parent(collider.build(), handle, &mut self.bodies);
        }

        self.handles.insert(key, handle);
        tracing::debug!(
            body = %key,
            mass = desc.mass,
            shape = desc.shape.as_ref().map(|s| s.spec().kind()).unwrap_or("none"),
            "body added"
        );
    }

    /// Remove a body and its colliders. Returns false if nothing was registered.
    pub fn remove_body(&mut self, key: ComponentId) -> bool {
        let Some(handle) = self.handles.remove(&key) else {
            return false;
        };
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        tracing::debug!(body = %key, "body removed");
        true
    }

    fn body(&self, key: ComponentId) -> Option<&RigidBody> {
        self.handles.get(&key).and_then(|h| self.bodies.get(*h))
    }

    fn body_mut(&mut self, key: ComponentId) -> Option<&mut RigidBody> {
        let handle = *self.handles.get(&key)?;
        self.bodies.get_mut(handle)
    }

    /// Current translation of the body, if registered.
    pub fn body_position(&self, key: ComponentId) -> Option<Vec3> {
        self.body(key).map(|b| from_vector(b.translation()))
    }

    /// Current orientation of the body, if registered.
    pub fn body_rotation(&self, key: ComponentId) -> Option<Quat> {
        self.body(key).map(|b| from_rotation(b.rotation()))
    }

    /// Current linear velocity of the body, if registered.
    pub fn body_linear_velocity(&self, key: ComponentId) -> Option<Vec3> {
        self.body(key).map(|b| from_vector(b.linvel()))
    }

    /// Teleport a body. Returns false if the key is unknown.
    pub fn set_body_position(&mut self, key: ComponentId, position: Vec3) -> bool {
        match self.body_mut(key) {
            Some(body) => {
                body.set_translation(to_vector(position), true);
                true
            }
            None => false,
        }
    }

    /// Overwrite a body's orientation. Returns false if the key is unknown.
    pub fn set_body_rotation(&mut self, key: ComponentId, rotation: Quat) -> bool {
        match self.body_mut(key) {
            Some(body) => {
                body.set_rotation(to_rotation(rotation), true);
                true
            }
            None => false,
        }
    }

    /// Make a built shape available to bodies that reference `key`.
    pub fn register_shape(&mut self, key: ComponentId, shape: ColliderShape) {
        self.shapes.insert(key, shape);
    }

    /// The shape registered under `key`.
    pub fn shape(&self, key: ComponentId) -> Option<&ColliderShape> {
        self.shapes.get(&key)
    }

    /// Drop a registered shape. Bodies already built from it keep their collider.
    pub fn unregister_shape(&mut self, key: ComponentId) -> Option<ColliderShape> {
        self.shapes.remove(&key)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY, DEFAULT_TIME_STEP)
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("gravity", &self.gravity())
            .field("time_step", &self.time_step())
            .field("bodies", &self.handles.len())
            .field("shapes", &self.shapes.len())
            .field("steps", &self.steps)
            .finish()
    }
}
