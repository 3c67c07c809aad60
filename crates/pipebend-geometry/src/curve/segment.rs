//! Straight run of pipe.

use pipebend_core::{DegenerateReason, PipeError, Result, Tolerance, Validate};
use pipebend_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// A straight run from `start` to `end`, parameterized over `[0, 1]`.
///
/// The endpoints are always further apart than the linear tolerance it was
/// built with. Deserialization goes through [`Segment::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentData")]
pub struct Segment {
    start: Point3,
    end: Point3,
}

#[derive(Deserialize)]
struct SegmentData {
    start: Point3,
    end: Point3,
}

impl TryFrom<SegmentData> for Segment {
    type Error = PipeError;

    fn try_from(data: SegmentData) -> Result<Self> {
        Segment::new(data.start, data.end, Tolerance::default())
    }
}

impl Segment {
    pub fn new(start: Point3, end: Point3, tol: Tolerance) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(PipeError::InvalidInput(format!(
                "segment endpoints must be finite: {}, {}",
                start, end
            )));
        }
        if tol.is_zero_squared(start.distance_squared(end)) {
            return Err(PipeError::degenerate(
                DegenerateReason::CoincidentPoints,
                format!("points too close: {}, {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Point3 {
        self.start
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Unit direction from `start` to `end`.
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize_or_zero()
    }
}

impl Curve for Segment {
    fn point_at(&self, t: f64) -> Point3 {
        self.start + t * (self.end - self.start)
    }

    fn tangent_at(&self, _t: f64) -> Vector3 {
        self.end - self.start
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl Validate for Segment {
    fn validate(&self) -> Result<()> {
        Segment::new(self.start, self.end, Tolerance::default()).map(|_| ())
    }
}
