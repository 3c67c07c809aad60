//! Circular bend.

use std::f64::consts::PI;

use pipebend_core::{DegenerateReason, PipeError, Result, Tolerance, Validate};
use pipebend_math::{Plane, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// One circular bend of a pipe, parameterized over `[0, central_angle]`.
///
/// The arc sweeps from `start` to `end` around `center` in the bend plane.
/// `start` and `end` are the tangent points where the neighbouring straight
/// runs meet the bend. Deserialized arcs are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArcData")]
pub struct Arc {
    center: Point3,
    start: Point3,
    end: Point3,
    central_angle: f64,
    radius: f64,
}

impl Arc {
    pub fn new(center: Point3, start: Point3, end: Point3, central_angle: f64, radius: f64) -> Self {
        Self {
            center,
            start,
            end,
            central_angle,
            radius,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn start(&self) -> Point3 {
        self.start
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Swept angle in radians.
    pub fn central_angle(&self) -> f64 {
        self.central_angle
    }

    pub fn central_angle_degrees(&self) -> f64 {
        self.central_angle.to_degrees()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unit normal of the bend plane, `(start - center) x (end - center)`.
    pub fn normal(&self) -> Vector3 {
        (self.start - self.center)
            .cross(self.end - self.center)
            .normalize_or_zero()
    }

    pub fn bend_plane(&self) -> Plane {
        Plane {
            origin: self.center,
            normal: self.normal(),
        }
    }

    /// Orthonormal frame (u_axis, v_axis) in the bend plane, with `u_axis`
    /// pointing from the center to `start`.
    fn local_frame(&self) -> (Vector3, Vector3) {
        let u = (self.start - self.center).normalize_or_zero();
        let v = self.normal().cross(u);
        (u, v)
    }
}

#[derive(Deserialize)]
struct ArcData {
    center: Point3,
    start: Point3,
    end: Point3,
    central_angle: f64,
    radius: f64,
}

impl TryFrom<ArcData> for Arc {
    type Error = PipeError;

    fn try_from(data: ArcData) -> Result<Self> {
        let arc = Arc::new(data.center, data.start, data.end, data.central_angle, data.radius);
        arc.validate()?;
        Ok(arc)
    }
}

impl Curve for Arc {
    fn point_at(&self, t: f64) -> Point3 {
        let (u, v) = self.local_frame();
        self.center + self.radius * (t.cos() * u + t.sin() * v)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let (u, v) = self.local_frame();
        self.radius * (-t.sin() * u + t.cos() * v)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.central_angle)
    }

    fn length(&self) -> f64 {
        self.central_angle * self.radius
    }
}

impl Validate for Arc {
    fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(PipeError::InvalidInput(format!(
                "arc radius must be positive, got {}",
                self.radius
            )));
        }
        if !self.central_angle.is_finite() {
            return Err(PipeError::InvalidInput(format!(
                "arc central angle is not finite: {}",
                self.central_angle
            )));
        }
        if self.central_angle <= Tolerance::default().angular {
            return Err(PipeError::degenerate(
                DegenerateReason::Collinear,
                format!("bend turns by {} rad, nothing to bend", self.central_angle),
            ));
        }
        if self.central_angle >= PI {
            return Err(PipeError::degenerate(
                DegenerateReason::Reversal,
                format!("bend turns by {} rad, path doubles back", self.central_angle),
            ));
        }

        let tol = Tolerance::loose();
        for (name, p) in [("start", self.start), ("end", self.end)] {
            let d = self.center.distance(p);
            if !tol.linear_eq(d, self.radius) {
                return Err(PipeError::InvalidInput(format!(
                    "arc {} is {} from center, expected radius {}",
                    name, d, self.radius
                )));
            }
        }

        if Tolerance::default().is_zero_squared(self.start.distance_squared(self.end)) {
            return Err(PipeError::degenerate(
                DegenerateReason::CoincidentPoints,
                format!("arc tangent points coincide: {}", self.start),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pipebend_math::DVec3;

    /// Quarter bend of radius 2 around the origin in the XY plane.
    fn quarter() -> Arc {
        Arc::new(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0), PI / 2.0, 2.0)
    }

    #[test]
    fn test_arc_length() {
        let arc = quarter();
        assert_abs_diff_eq!(arc.length(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.central_angle_degrees(), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_endpoints() {
        let arc = quarter();
        let (t0, t1) = arc.domain();
        assert!((arc.point_at(t0) - arc.start()).length() < 1e-10);
        assert!((arc.point_at(t1) - arc.end()).length() < 1e-10);
    }

    #[test]
    fn test_arc_points_on_circle() {
        let arc = quarter();
        for i in 0..=8 {
            let t = arc.central_angle() * i as f64 / 8.0;
            let p = arc.point_at(t);
            assert!(
                (p.length() - 2.0).abs() < 1e-10,
                "Point at t={} not on arc: dist={}",
                t,
                p.length()
            );
            assert!(p.z.abs() < 1e-10, "Point not in bend plane");
            // Tangent should be perpendicular to radius vector
            let dot = p.dot(arc.tangent_at(t));
            assert!(dot.abs() < 1e-10, "Tangent not perpendicular at t={}: dot={}", t, dot);
        }
    }

    #[test]
    fn test_arc_normal() {
        let arc = quarter();
        assert!((arc.normal() - DVec3::Z).length() < 1e-12);
        let plane = arc.bend_plane();
        assert_abs_diff_eq!(plane.signed_distance(arc.point_at(0.3)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_validate() {
        quarter().validate().unwrap();

        let off_circle = Arc::new(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 3.0, 0.0), PI / 2.0, 2.0);
        assert!(off_circle.validate().is_err());

        let flat = Arc::new(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(-2.0, 0.0, 0.0), PI, 2.0);
        let err = flat.validate().unwrap_err();
        assert_eq!(err.as_geometry().map(|e| e.reason()), Some(DegenerateReason::Reversal));
    }

    #[test]
    fn test_zero_turn_is_collinear() {
        let p = DVec3::new(2.0, 0.0, 0.0);
        let straight = Arc::new(DVec3::ZERO, p, p, 0.0, 2.0);
        let err = straight.validate().unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.as_geometry().map(|e| e.reason()), Some(DegenerateReason::Collinear));

        let nan = Arc::new(DVec3::ZERO, p, p, f64::NAN, 2.0);
        assert!(!nan.validate().unwrap_err().is_recoverable());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = serde_json::to_string(&quarter()).unwrap();
        let arc: Arc = serde_json::from_str(&json).unwrap();
        assert_eq!(arc, quarter());

        let json = r#"{"center":[0,0,0],"start":[2,0,0],"end":[2,0,0],"central_angle":0.0,"radius":2.0}"#;
        assert!(serde_json::from_str::<Arc>(json).is_err());
    }
}
