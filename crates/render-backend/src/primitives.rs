//! Placeholder geometry for each part shape.
//!
//! Parts have no real CAD geometry; each shape maps to one parametric
//! primitive whose dimensions scale with the part's scale factor.

use crate::types::{Primitive, ShapeKind};

/// Unscaled cylinder radius.
pub const CYLINDER_RADIUS: f64 = 0.4;
/// Unscaled cylinder height.
pub const CYLINDER_HEIGHT: f64 = 0.3;
/// Unscaled torus major radius.
pub const RING_RADIUS: f64 = 0.35;
/// Unscaled torus tube radius.
pub const RING_TUBE: f64 = 0.08;
/// Unscaled cube edge.
pub const BOX_EDGE: f64 = 0.3;
/// Unscaled sphere radius.
pub const SPHERE_RADIUS: f64 = 0.2;

/// Build the primitive for a part shape at the given scale.
pub fn part_primitive(shape: ShapeKind, scale: f64) -> Primitive {
    match shape {
        ShapeKind::Cylinder => Primitive::Cylinder {
            radius_top: CYLINDER_RADIUS * scale,
            radius_bottom: CYLINDER_RADIUS * scale,
            height: CYLINDER_HEIGHT * scale,
            radial_segments: 32,
        },
        ShapeKind::Ring => Primitive::Torus {
            radius: RING_RADIUS * scale,
            tube: RING_TUBE * scale,
            radial_segments: 16,
            tubular_segments: 32,
        },
        ShapeKind::Box => Primitive::Cuboid {
            width: BOX_EDGE * scale,
            height: BOX_EDGE * scale,
            depth: BOX_EDGE * scale,
        },
        ShapeKind::Sphere => Primitive::Sphere {
            radius: SPHERE_RADIUS * scale,
            width_segments: 32,
            height_segments: 32,
        },
    }
}
