//! wgpu render backend.
//!
//! Draws every attached scene mesh as an instance of its geometry kind's unit
//! mesh, lit by the scene's ambient and first directional light.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Render frame rate is driven by the host; physics stepping is not tied to it here.

mod gpu;
mod shaders;
mod surface;

pub use gpu::WgpuRenderer;
pub use surface::{FrameStatus, RenderError, SurfaceRenderer};
