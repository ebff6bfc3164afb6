use crate::component::{Component, EngineContext};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagecraft_common::ComponentId;
use stagecraft_physics::{Axis, ColliderShape, ShapeSpec};

/// Loose parameter bag for [`Collider::from_kind`].
///
/// Which fields are read depends on the kind:
/// `box` needs `half_extents`, `capsule` needs `radius` and `length` (and
/// optionally `axis`, default Y), `plane` needs `normal` and `constant`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderParams {
    pub half_extents: Option<Vec3>,
    pub radius: Option<f32>,
    pub length: Option<f32>,
    pub axis: Option<Axis>,
    pub normal: Option<Vec3>,
    pub constant: Option<f32>,
}

impl ColliderParams {
    fn to_spec(self, kind: &str) -> Option<ShapeSpec> {
        match kind {
            "box" => Some(ShapeSpec::Box {
                half_extents: self.half_extents?,
            }),
            "capsule" => Some(ShapeSpec::Capsule {
                radius: self.radius?,
                length: self.length?,
                axis: self.axis.unwrap_or_default(),
            }),
            "plane" => Some(ShapeSpec::Plane {
                normal: self.normal?,
                constant: self.constant?,
            }),
            _ => None,
        }
    }
}

/// Collision shape of a game object.
///
/// The shape is built on `init` and registered with the physics world under
/// this collider's id, where a [`RigidBody`](crate::RigidBody) picks it up.
#[derive(Debug)]
pub struct Collider {
    id: ComponentId,
    kind: String,
    name: String,
    spec: Option<ShapeSpec>,
    shape: Option<ColliderShape>,
}

impl Collider {
    /// Collider with an already typed shape description.
    pub fn new(spec: ShapeSpec) -> Self {
        Self::with_spec(spec.kind().to_string(), Some(spec))
    }

    /// Collider from a kind name (`"box"`, `"capsule"`, `"plane"`, any case)
    /// and a parameter bag.
    ///
    /// An unknown kind or a bag missing a required field yields a collider
    /// whose shape stays unset after `init`.
    pub fn from_kind(kind: &str, params: ColliderParams) -> Self {
        let kind = kind.to_lowercase();
        let spec = params.to_spec(&kind);
        if spec.is_none() {
            tracing::warn!(kind = %kind, ?params, "unsupported collider kind or missing parameters");
        }
        Self::with_spec(kind, spec)
    }

    fn with_spec(kind: String, spec: Option<ShapeSpec>) -> Self {
        Self {
            id: ComponentId::new(),
            name: format!("{kind} collider"),
            kind,
            spec,
            shape: None,
        }
    }

    /// Lowercased kind name.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Shape description, or `None` when the kind or parameters were unusable.
    pub fn spec(&self) -> Option<&ShapeSpec> {
        self.spec.as_ref()
    }

    /// The built shape. `None` before `init` or when the shape could not be built.
    pub fn shape(&self) -> Option<&ColliderShape> {
        self.shape.as_ref()
    }
}

impl Component for Collider {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let Some(spec) = self.spec else {
            return;
        };
        match ColliderShape::build(spec) {
            Ok(shape) => {
                ctx.physics.register_shape(self.id, shape.clone());
                self.shape = Some(shape);
            }
            Err(err) => {
                tracing::warn!(collider = %self.id, %err, "collider shape rejected");
            }
        }
    }

    fn before_remove(&mut self, ctx: &mut EngineContext) {
        ctx.physics.unregister_shape(self.id);
    }
}
