//! Centerline curves of a bent pipe.

mod arc;
mod segment;

use pipebend_math::{Point3, Vector3};

pub use arc::Arc;
pub use segment::Segment;

/// Trait for parametric centerline pieces in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Evaluate the tangent vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Length of the centerline between the domain ends.
    fn length(&self) -> f64;
}
