use crate::camera::PerspectiveCamera;
use crate::scene::Scene;
use std::fmt::Write;

/// Size of the render target in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and camera, then produces output. It never
/// mutates either of them.
pub trait Renderer {
    /// The output type produced by one frame.
    type Output;

    /// Current size of the render target.
    fn viewport(&self) -> Viewport;

    /// Called when the render target changes size.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Render one frame.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Renders a frame as human-readable text.
///
/// Used by the headless CLI, for logging, and to test the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    viewport: Viewport,
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            frames: 0,
        }
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let mut out = String::new();
        let visible = scene.visible_meshes().count();
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            self.frames, self.viewport.width, self.viewport.height
        );
        let _ = writeln!(
            out,
            "Meshes: {visible} visible / {} total, lights: {}",
            scene.mesh_count(),
            scene.lights().len()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov_degrees
        );

        for (id, mesh) in scene.visible_meshes() {
            let p = mesh.transform.position;
            let q = mesh.transform.rotation;
            let _ = writeln!(
                out,
                "  [mesh {}] {} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}, {:.3})",
                id.0,
                mesh.geometry.kind(),
                p.x,
                p.y,
                p.z,
                q.x,
                q.y,
                q.z,
                q.w
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Material};
    use glam::Vec3;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &PerspectiveCamera::default());

        assert!(output.contains("Frame 1"));
        assert!(output.contains("Meshes: 0 visible / 0 total"));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn debug_renderer_lists_only_attached_meshes() {
        let mut scene = Scene::new();
        let shown = scene.create_mesh(Geometry::cuboid(1.0, 1.0, 1.0), Material::default());
        scene.create_mesh(Geometry::sphere(1.0), Material::default());
        scene.add(shown);
        scene.set_position(shown, Vec3::new(1.0, 2.0, 3.0));

        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &PerspectiveCamera::default());

        assert!(output.contains("Meshes: 1 visible / 2 total"));
        assert!(output.contains("box pos=(1.00, 2.00, 3.00)"));
        assert!(!output.contains("sphere"));
    }

    #[test]
    fn viewport_aspect_and_resize() {
        let mut renderer = DebugTextRenderer::with_viewport(Viewport::new(800, 400));
        assert_eq!(renderer.viewport().aspect(), 2.0);
        renderer.resize(100, 100);
        assert_eq!(renderer.viewport(), Viewport::new(100, 100));
        assert_eq!(Viewport::new(10, 0).aspect(), 10.0);
    }
}
