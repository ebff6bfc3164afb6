use crate::convert::to_vector;
use glam::Vec3;
use rapier3d::na::Unit;
use rapier3d::prelude::SharedShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal axis a capsule is aligned with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

/// Parameters of a collision shape, before it is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeSpec {
    /// Axis-aligned box given by its half-extents.
    Box { half_extents: Vec3 },
    /// Capsule whose cylindrical segment has the given total `length` along `axis`.
    Capsule { radius: f32, length: f32, axis: Axis },
    /// Infinite plane `normal · p = constant`; everything behind the normal is solid.
    Plane { normal: Vec3, constant: f32 },
}

impl ShapeSpec {
    /// Lowercase kind tag, matching the serialized `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Capsule { .. } => "capsule",
            Self::Plane { .. } => "plane",
        }
    }
}

/// Errors from building a collision shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("box half-extents must be positive, got {0:?}")]
    InvalidHalfExtents(Vec3),
    #[error("capsule needs a positive radius and non-negative length, got radius={radius} length={length}")]
    InvalidCapsule { radius: f32, length: f32 },
    #[error("plane normal must be non-zero")]
    DegenerateNormal,
}

/// A built collision shape plus its offset from the owning body's origin.
#[derive(Clone)]
pub struct ColliderShape {
    spec: ShapeSpec,
    shape: SharedShape,
    offset: Vec3,
}

impl ColliderShape {
    /// Build the physics shape described by `spec`.
    pub fn build(spec: ShapeSpec) -> Result<Self, ShapeError> {
        let (shape, offset) = match spec {
            ShapeSpec::Box { half_extents } => {
                if !half_extents.cmpgt(Vec3::ZERO).all() {
                    return Err(ShapeError::InvalidHalfExtents(half_extents));
                }
                (
                    SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
                    Vec3::ZERO,
                )
            }
            ShapeSpec::Capsule {
                radius,
                length,
                axis,
            } => {
                if radius.is_nan() || radius <= 0.0 || length.is_nan() || length < 0.0 {
                    return Err(ShapeError::InvalidCapsule { radius, length });
                }
                let half_height = length * 0.5;
                let shape = match axis {
                    Axis::X => SharedShape::capsule_x(half_height, radius),
                    Axis::Y => SharedShape::capsule_y(half_height, radius),
                    Axis::Z => SharedShape::capsule_z(half_height, radius),
                };
                (shape, Vec3::ZERO)
            }
            ShapeSpec::Plane { normal, constant } => {
                let normal = normal.try_normalize().ok_or(ShapeError::DegenerateNormal)?;
                (
                    SharedShape::halfspace(Unit::new_unchecked(to_vector(normal))),
                    normal * constant,
                )
            }
        };
        Ok(Self {
            spec,
            shape,
            offset,
        })
    }

    /// Parameters the shape was built from.
    pub fn spec(&self) -> &ShapeSpec {
        &self.spec
    }

    /// The underlying rapier shape.
    pub fn shared_shape(&self) -> &SharedShape {
        &self.shape
    }

    /// Local translation of the shape relative to its body.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

impl fmt::Debug for ColliderShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColliderShape")
            .field("spec", &self.spec)
            .field("offset", &self.offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_shape_keeps_half_extents() {
        let shape = ColliderShape::build(ShapeSpec::Box {
            half_extents: Vec3::new(25.0, 0.05, 25.0),
        })
        .unwrap();
        let cuboid = shape.shared_shape().as_cuboid().unwrap();
        assert_eq!(cuboid.half_extents.x, 25.0);
        assert_eq!(cuboid.half_extents.y, 0.05);
        assert_eq!(cuboid.half_extents.z, 25.0);
        assert_eq!(shape.offset(), Vec3::ZERO);
    }

    #[test]
    fn capsule_uses_half_length() {
        let shape = ColliderShape::build(ShapeSpec::Capsule {
            radius: 0.5,
            length: 2.0,
            axis: Axis::Y,
        })
        .unwrap();
        let capsule = shape.shared_shape().as_capsule().unwrap();
        assert_eq!(capsule.radius, 0.5);
        assert!((capsule.half_height() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn plane_is_normalized_and_offset() {
        let shape = ColliderShape::build(ShapeSpec::Plane {
            normal: Vec3::new(0.0, 2.0, 0.0),
            constant: -3.0,
        })
        .unwrap();
        let half_space = shape.shared_shape().as_halfspace().unwrap();
        assert!((half_space.normal.y - 1.0).abs() < 1e-6);
        assert_eq!(shape.offset(), Vec3::new(0.0, -3.0, 0.0));
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert_eq!(
            ColliderShape::build(ShapeSpec::Plane {
                normal: Vec3::ZERO,
                constant: 0.0,
            })
            .unwrap_err(),
            ShapeError::DegenerateNormal
        );
        assert!(ColliderShape::build(ShapeSpec::Box {
            half_extents: Vec3::new(1.0, 0.0, 1.0),
        })
        .is_err());
        assert!(ColliderShape::build(ShapeSpec::Capsule {
            radius: 0.0,
            length: 1.0,
            axis: Axis::X,
        })
        .is_err());
    }

    #[test]
    fn nan_dimensions_are_rejected() {
        assert!(matches!(
            ColliderShape::build(ShapeSpec::Box {
                half_extents: Vec3::new(1.0, f32::NAN, 1.0),
            }),
            Err(ShapeError::InvalidHalfExtents(_))
        ));
        assert!(matches!(
            ColliderShape::build(ShapeSpec::Capsule {
                radius: f32::NAN,
                length: 1.0,
                axis: Axis::Y,
            }),
            Err(ShapeError::InvalidCapsule { .. })
        ));
        assert!(matches!(
            ColliderShape::build(ShapeSpec::Capsule {
                radius: 0.5,
                length: f32::NAN,
                axis: Axis::Y,
            }),
            Err(ShapeError::InvalidCapsule { .. })
        ));
        assert_eq!(
            ColliderShape::build(ShapeSpec::Plane {
                normal: Vec3::new(0.0, f32::NAN, 0.0),
                constant: 0.0,
            })
            .unwrap_err(),
            ShapeError::DegenerateNormal
        );
    }

    #[test]
    fn spec_deserializes_from_tagged_json() {
        let spec: ShapeSpec = serde_json::from_str(
            r#"{"kind":"capsule","radius":0.25,"length":1.0,"axis":"z"}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            ShapeSpec::Capsule {
                radius: 0.25,
                length: 1.0,
                axis: Axis::Z,
            }
        );
        assert_eq!(spec.kind(), "capsule");
    }
}
