//! Component model for stagecraft game objects.
//!
//! A [`GameObject`] is an ordered list of boxed [`Component`]s. Components do
//! their work against an [`EngineContext`] lent to them by the engine; no
//! component holds references into the scene or physics world, only handles.
//!
//! # Invariants
//! - Insertion order is the call order for `init` and `on_update`.
//! - Name lookups are first-match; id lookups are exact.
//! - `before_remove` runs exactly once for every removed component.

mod collider;
mod component;
mod controller;
mod game_object;
mod mesh_renderer;
mod rigid_body;

pub use collider::{Collider, ColliderParams};
pub use component::{AsAny, Component, EngineContext};
pub use controller::{MeshController, RigidBodyController};
pub use game_object::GameObject;
pub use mesh_renderer::MeshRenderer;
pub use rigid_body::RigidBody;
