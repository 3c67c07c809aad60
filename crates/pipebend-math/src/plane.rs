use std::f64::consts::PI;

use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A plane in 3D space defined by a point and unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Plane {
    /// Plane through `origin` spanned by the directions to `a` and `b`.
    ///
    /// The normal is `(a - origin) x (b - origin)`, normalized. Returns `None`
    /// when the three points do not span a plane.
    pub fn through_points(origin: Point3, a: Point3, b: Point3) -> Option<Self> {
        (a - origin)
            .cross(b - origin)
            .try_normalize()
            .map(|normal| Self { origin, normal })
    }

    /// Signed distance from a point to this plane.
    pub fn signed_distance(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Angle between the two planes regardless of normal orientation,
    /// in `[0, PI/2]`.
    pub fn folded_angle(&self, other: &Plane) -> f64 {
        let angle = self.normal.dot(other.normal).clamp(-1.0, 1.0).acos();
        angle.min(PI - angle)
    }
}
