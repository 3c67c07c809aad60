//! Fitting a circular bend of fixed radius into a polyline vertex.

use std::f64::consts::PI;

use pipebend_core::{DegenerateReason, PipeError, Result, Tolerance};
use pipebend_math::{Point3, Ray};

use crate::curve::Arc;

/// Fit the bend of `radius` at vertex `p1`, tangent to both `p1 -> p0` and
/// `p1 -> p2`, using the default tolerance.
pub fn fit_bend(p0: Point3, p1: Point3, p2: Point3, radius: f64) -> Result<Arc> {
    fit_bend_with(p0, p1, p2, radius, Tolerance::default())
}

/// Fit the bend at vertex `p1` with an explicit tolerance.
///
/// ```text
///   p0 <--v10--- p1
///               / |
///             /  v12
///            h    |
///           /     v
///                 p2
/// ```
///
/// The center lies on the bisector `h` of the two unit directions, at the
/// distance where the circle touches both rays. The swept angle is the turn
/// angle at the vertex, `PI - interior angle`.
///
/// # Errors
/// * [`PipeError::InvalidInput`] for a non-positive radius or non-finite points.
/// * [`PipeError::Geometry`] when two points coincide, the vertex is a straight
///   pass-through, or the path reverses on itself.
pub fn fit_bend_with(p0: Point3, p1: Point3, p2: Point3, radius: f64, tol: Tolerance) -> Result<Arc> {
    check_radius(radius)?;
    for p in [p0, p1, p2] {
        if !p.is_finite() {
            return Err(PipeError::InvalidInput(format!("waypoint is not finite: {}", p)));
        }
    }

    let coincident = |a: Point3, b: Point3| {
        PipeError::degenerate(
            DegenerateReason::CoincidentPoints,
            format!("points too close: {}, {}", a, b),
        )
    };
    if tol.is_zero_squared(p0.distance_squared(p1)) {
        return Err(coincident(p0, p1));
    }
    if tol.is_zero_squared(p1.distance_squared(p2)) {
        return Err(coincident(p1, p2));
    }
    let v10 = Ray::towards(p1, p0).ok_or_else(|| coincident(p0, p1))?;
    let v12 = Ray::towards(p1, p2).ok_or_else(|| coincident(p1, p2))?;

    let sum = v10.direction + v12.direction;
    let h = match Ray::try_new(p1, sum) {
        Some(h) if sum.length() >= tol.angular => h,
        _ => {
            return Err(PipeError::degenerate(
                DegenerateReason::Collinear,
                format!("{}, {}, {} lie on a straight line", p0, p1, p2),
            ))
        }
    };

    let cos_theta = h.direction.dot(v10.direction);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    if !(sin_theta.is_finite() && sin_theta > tol.angular) {
        return Err(PipeError::degenerate(
            DegenerateReason::Reversal,
            format!("path reverses at {} between {} and {}", p1, p0, p2),
        ));
    }

    let t = radius / sin_theta;
    let center = h.at(t);
    let central_angle = PI - 2.0 * cos_theta.acos();
    let start = v10.at(cos_theta * t);
    let end = v12.at(cos_theta * t);

    // A vertex that is straight within rounding leaves no turn to bend.
    if central_angle <= tol.angular || tol.is_zero_squared(start.distance_squared(end)) {
        return Err(PipeError::degenerate(
            DegenerateReason::Collinear,
            format!("{}, {}, {} are straight within tolerance", p0, p1, p2),
        ));
    }

    Ok(Arc::new(center, start, end, central_angle, radius))
}

pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(PipeError::InvalidInput(format!(
            "bend radius must be a positive number, got {}",
            radius
        )))
    }
}
