//! Rendering adapter: scene graph, camera and a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate either.
//! - A mesh exists in the scene from creation, but only attached meshes are drawn.
//!
//! `DebugTextRenderer` renders a frame as text. It backs the headless CLI and
//! the tests; the wgpu backend implements the same trait.

mod camera;
mod geometry;
mod renderer;
mod scene;

pub use camera::PerspectiveCamera;
pub use geometry::{Color, Geometry, Material, MeshData};
pub use renderer::{DebugTextRenderer, Renderer, Viewport};
pub use scene::{Light, Mesh, MeshId, Scene};
