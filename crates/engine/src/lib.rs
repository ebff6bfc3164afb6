//! Stagecraft engine: the per-frame loop over game objects, physics and rendering.
//!
//! # Invariants
//! - Frame order is animations, component updates, one physics step, render.
//! - Physics always advances by the configured fixed step, never wall-clock time.
//! - Object and animation pools are append-only.

mod animation;
mod engine;
pub mod sandbox;
pub mod settings;

pub use animation::Animation;
pub use engine::{Engine, EngineState, StopHandle};
pub use sandbox::{populate_sandbox, Sandbox};
pub use settings::{CameraSettings, EngineSettings, PhysicsSettings, SettingsError, WindowSettings};

/// Re-exports so hosts only need this crate to build scenes.
pub use stagecraft_ecs as ecs;
pub use stagecraft_input as input;
pub use stagecraft_render as render;
