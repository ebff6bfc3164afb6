//! Physics world: wraps a rapier pipeline behind component-keyed bodies.
//!
//! # Invariants
//! - Bodies and shapes are keyed by the `ComponentId` of the component that owns them.
//! - `step` always advances by the configured fixed time step, never by wall-clock time.
//! - Pose read-back happens through glam types; rapier math never leaks out of this crate.

mod convert;
mod shape;
mod world;

pub use shape::{Axis, ColliderShape, ShapeError, ShapeSpec};
pub use world::{BodyDesc, PhysicsWorld, DEFAULT_GRAVITY, DEFAULT_TIME_STEP};
