use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.7, 0.7, 0.7);
    pub const GREEN: Self = Self::rgb(0.0, 0.5, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn scaled(self, intensity: f32) -> Self {
        Self {
            r: self.r * intensity,
            g: self.g * intensity,
            b: self.b * intensity,
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Shape of a drawable mesh. Dimensions are full sizes, not half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    /// Flat quad in the XZ plane, facing +Y.
    Plane { width: f32, depth: f32 },
    Sphere { radius: f32 },
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    pub fn plane(width: f32, depth: f32) -> Self {
        Self::Plane { width, depth }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Plane { .. } => "plane",
            Self::Sphere { .. } => "sphere",
        }
    }

    /// Scale that maps the kind's unit mesh onto this geometry.
    pub fn extent(&self) -> Vec3 {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Self::Plane { width, depth } => Vec3::new(width, 1.0, depth),
            Self::Sphere { radius } => Vec3::splat(radius * 2.0),
        }
    }

    /// Unit-sized triangle mesh for this kind, centered on the origin.
    pub fn unit_mesh(&self) -> MeshData {
        match self {
            Self::Box { .. } => MeshData::cube(),
            Self::Plane { .. } => MeshData::plane(),
            Self::Sphere { .. } => MeshData::sphere(24, 16),
        }
    }
}

/// Surface description. Only a flat lit color for now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self { color }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Color::GRAY)
    }
}

/// CPU-side triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Unit cube, one quad per face so each face gets flat normals.
    pub fn cube() -> Self {
        let p = 0.5_f32;
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([0.0, 0.0, 1.0], [[-p, -p, p], [p, -p, p], [p, p, p], [-p, p, p]]),
            ([0.0, 0.0, -1.0], [[p, -p, -p], [-p, -p, -p], [-p, p, -p], [p, p, -p]]),
            ([1.0, 0.0, 0.0], [[p, -p, p], [p, -p, -p], [p, p, -p], [p, p, p]]),
            ([-1.0, 0.0, 0.0], [[-p, -p, -p], [-p, -p, p], [-p, p, p], [-p, p, -p]]),
            ([0.0, 1.0, 0.0], [[-p, p, p], [p, p, p], [p, p, -p], [-p, p, -p]]),
            ([0.0, -1.0, 0.0], [[-p, -p, -p], [p, -p, -p], [p, -p, p], [-p, -p, p]]),
        ];
        let mut mesh = Self::default();
        for (normal, corners) in faces {
            mesh.push_quad(normal, corners);
        }
        mesh
    }

    /// Unit quad in the XZ plane at y = 0, facing +Y.
    pub fn plane() -> Self {
        let p = 0.5_f32;
        let mut mesh = Self::default();
        mesh.push_quad(
            [0.0, 1.0, 0.0],
            [[-p, 0.0, p], [p, 0.0, p], [p, 0.0, -p], [-p, 0.0, -p]],
        );
        mesh
    }

    /// UV sphere with diameter 1.
    pub fn sphere(segments: u16, rings: u16) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut mesh = Self::default();
        for ring in 0..=rings {
            let theta = std::f32::consts::PI * ring as f32 / rings as f32;
            for segment in 0..=segments {
                let phi = std::f32::consts::TAU * segment as f32 / segments as f32;
                let n = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
                mesh.positions.push([n[0] * 0.5, n[1] * 0.5, n[2] * 0.5]);
                mesh.normals.push(n);
            }
        }
        let stride = segments + 1;
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }
        mesh
    }

    fn push_quad(&mut self, normal: [f32; 3], corners: [[f32; 3]; 4]) {
        let base = self.positions.len() as u16;
        for corner in corners {
            self.positions.push(corner);
            self.normals.push(normal);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_flat_faces() {
        let cube = MeshData::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.normals.len(), cube.positions.len());
    }

    #[test]
    fn plane_is_single_quad_facing_up() {
        let plane = MeshData::plane();
        assert_eq!(plane.vertex_count(), 4);
        assert!(plane.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
        assert!(plane.positions.iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn sphere_indices_stay_in_range() {
        let sphere = MeshData::sphere(8, 4);
        let count = sphere.vertex_count() as u16;
        assert!(sphere.indices.iter().all(|&i| i < count));
        for p in &sphere.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn geometry_extent_matches_dimensions() {
        assert_eq!(
            Geometry::cuboid(1.0, 2.0, 3.0).extent(),
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(Geometry::plane(50.0, 50.0).extent(), Vec3::new(50.0, 1.0, 50.0));
        assert_eq!(Geometry::sphere(0.5).extent(), Vec3::ONE);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        let c = Color::from_hex(0x00ff00);
        assert_eq!((c.r, c.g, c.b), (0.0, 1.0, 0.0));
    }
}
