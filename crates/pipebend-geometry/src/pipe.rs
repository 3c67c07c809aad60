//! Assembling a bent pipe from waypoints.

use pipebend_core::{DegenerateReason, PipeError, Result, Tolerance, Validate};
use pipebend_math::Point3;
use serde::{Deserialize, Serialize};

use crate::bend::{check_radius, fit_bend_with};
use crate::curve::{Arc, Curve, Segment};
use crate::twist::bend_plane_twist;

/// A pipe route made of straight runs joined by circular bends.
///
/// The pieces alternate `segment[0], arc[0], segment[1], ..., arc[n-1], segment[n]`
/// and consecutive pieces share their tangent points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendedPipe {
    segments: Vec<Segment>,
    arcs: Vec<Arc>,
}

/// One piece of a [`BendedPipe`], in fabrication order.
#[derive(Debug, Clone, Copy)]
pub enum PipeElement<'a> {
    Straight(&'a Segment),
    Bend(&'a Arc),
}

impl<'a> PipeElement<'a> {
    pub fn as_curve(&self) -> &'a dyn Curve {
        match *self {
            Self::Straight(s) => s,
            Self::Bend(a) => a,
        }
    }
}

impl BendedPipe {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn bend_count(&self) -> usize {
        self.arcs.len()
    }

    /// First point of the route.
    pub fn start(&self) -> Option<Point3> {
        self.segments.first().map(Segment::start)
    }

    /// Last point of the route.
    pub fn end(&self) -> Option<Point3> {
        self.segments.last().map(Segment::end)
    }

    /// Unrolled length: the stock needed before bending.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length()).sum::<f64>()
            + self.arcs.iter().map(|a| a.length()).sum::<f64>()
    }

    /// Twist between each pair of consecutive bend planes.
    pub fn twists(&self) -> Vec<f64> {
        self.arcs
            .windows(2)
            .map(|pair| bend_plane_twist(&pair[0], &pair[1]))
            .collect()
    }

    /// Iterate over all pieces in fabrication order.
    pub fn elements(&self) -> impl Iterator<Item = PipeElement<'_>> {
        let bends = self.arcs.iter().map(PipeElement::Bend).map(Some).chain(std::iter::once(None));
        self.segments
            .iter()
            .map(PipeElement::Straight)
            .zip(bends)
            .flat_map(|(straight, bend)| std::iter::once(straight).chain(bend))
    }
}

impl Validate for BendedPipe {
    fn validate(&self) -> Result<()> {
        if self.segments.len() != self.arcs.len() + 1 {
            return Err(PipeError::InvalidInput(format!(
                "pipe has {} segments for {} bends",
                self.segments.len(),
                self.arcs.len()
            )));
        }

        let tol = Tolerance::loose();
        for (i, arc) in self.arcs.iter().enumerate() {
            arc.validate().map_err(|e| e.context(format!("bend {}", i)))?;
            let before = &self.segments[i];
            let after = &self.segments[i + 1];
            if !tol.is_zero(before.end().distance(arc.start())) {
                return Err(PipeError::InvalidInput(format!(
                    "segment {} ends at {} but bend {} starts at {}",
                    i,
                    before.end(),
                    i,
                    arc.start()
                )));
            }
            if !tol.is_zero(after.start().distance(arc.end())) {
                return Err(PipeError::InvalidInput(format!(
                    "bend {} ends at {} but segment {} starts at {}",
                    i,
                    arc.end(),
                    i + 1,
                    after.start()
                )));
            }
        }
        for (i, segment) in self.segments.iter().enumerate() {
            segment.validate().map_err(|e| e.context(format!("segment {}", i)))?;
        }
        Ok(())
    }
}

/// Build the pipe through `points` with bends of `radius`, using the default
/// tolerance.
pub fn calc_pipe(points: &[Point3], radius: f64) -> Result<BendedPipe> {
    calc_pipe_with(points, radius, Tolerance::default())
}

/// Build the pipe through `points` with bends of `radius`.
///
/// A bend is fitted at every interior waypoint, then each straight run is
/// trimmed to the tangent points of its neighbouring bends. The call fails as
/// a whole if any bend or trimmed run is degenerate.
pub fn calc_pipe_with(points: &[Point3], radius: f64, tol: Tolerance) -> Result<BendedPipe> {
    if points.len() < 3 {
        return Err(PipeError::InvalidInput(format!(
            "at least 3 waypoints are needed to bend a pipe, got {}",
            points.len()
        )));
    }
    check_radius(radius)?;
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(PipeError::InvalidInput(format!(
            "waypoint {} is not finite: {}",
            i, points[i]
        )));
    }

    let result = assemble(points, radius, tol);
    match &result {
        Ok(pipe) => log::debug!(
            "Bent pipe through {} waypoints at radius {}: {} bends, total length {:.3}",
            points.len(),
            radius,
            pipe.bend_count(),
            pipe.total_length()
        ),
        Err(e) => log::debug!("Pipe through {} waypoints rejected: {}", points.len(), e),
    }
    result
}

fn assemble(points: &[Point3], radius: f64, tol: Tolerance) -> Result<BendedPipe> {
    let arcs = points
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            let arc = fit_bend_with(w[0], w[1], w[2], radius, tol)
                .map_err(|e| e.context(format!("bend at waypoint {}", i + 1)))?;
            log::trace!(
                "Bend at waypoint {}: angle {:.4} deg, length {:.4}",
                i + 1,
                arc.central_angle_degrees(),
                arc.length()
            );
            Ok(arc)
        })
        .collect::<Result<Vec<_>>>()?;

    let segments = points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let start = if i > 0 { arcs[i - 1].end() } else { w[0] };
            let end = arcs.get(i).map_or(w[1], Arc::start);
            trimmed_segment(w[0], w[1], start, end, tol)
                .map_err(|e| e.context(format!("segment {} ({} -> {})", i, w[0], w[1])))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BendedPipe { segments, arcs })
}

/// Straight run from `start` to `end`, cut out of the raw run between two
/// waypoints. Fails if trimming leaves nothing or flips the run around.
fn trimmed_segment(
    raw_start: Point3,
    raw_end: Point3,
    start: Point3,
    end: Point3,
    tol: Tolerance,
) -> Result<Segment> {
    let degenerate = |what: &str| {
        PipeError::degenerate(
            DegenerateReason::DegenerateTrim,
            format!(
                "{} between tangent points {} and {}; radius too large for waypoint spacing",
                what, start, end
            ),
        )
    };
    if tol.is_zero_squared(start.distance_squared(end)) {
        return Err(degenerate("no straight run left"));
    }
    if (end - start).dot(raw_end - raw_start) <= 0.0 {
        return Err(degenerate("bends overlap"));
    }
    Segment::new(start, end, tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pipebend_math::dvec3;

    fn square_corner(radius: f64) -> Result<BendedPipe> {
        calc_pipe(
            &[dvec3(0.0, 0.0, 0.0), dvec3(100.0, 0.0, 0.0), dvec3(100.0, 100.0, 0.0), dvec3(0.0, 100.0, 0.0)],
            radius,
        )
    }

    #[test]
    fn test_elements_alternate() {
        let pipe = square_corner(10.0).unwrap();
        let kinds: Vec<bool> = pipe
            .elements()
            .map(|e| matches!(e, PipeElement::Straight(_)))
            .collect();
        assert_eq!(kinds, vec![true, false, true, false, true]);

        let total: f64 = pipe.elements().map(|e| e.as_curve().length()).sum();
        assert_abs_diff_eq!(total, pipe.total_length(), epsilon = 1e-9);
    }

    #[test]
    fn test_start_and_end_keep_waypoints() {
        let pipe = square_corner(10.0).unwrap();
        assert_eq!(pipe.start(), Some(dvec3(0.0, 0.0, 0.0)));
        assert_eq!(pipe.end(), Some(dvec3(0.0, 100.0, 0.0)));
    }

    #[test]
    fn test_trim_to_zero_length() {
        // 90 degree bends of radius r eat r of each adjacent run.
        let err = calc_pipe(&[dvec3(0.0, 0.0, 0.0), dvec3(100.0, 0.0, 0.0), dvec3(100.0, 100.0, 0.0)], 100.0)
            .unwrap_err();
        assert_eq!(
            err.as_geometry().map(|e| e.reason()),
            Some(DegenerateReason::DegenerateTrim)
        );
    }

    #[test]
    fn test_overlapping_bends() {
        let err = square_corner(60.0).unwrap_err();
        let geometry = err.as_geometry().unwrap();
        assert_eq!(geometry.reason(), DegenerateReason::DegenerateTrim);
        assert!(geometry.message().starts_with("segment 1"), "{}", geometry.message());
    }

    #[test]
    fn test_validate_detects_gap() {
        let mut pipe = square_corner(10.0).unwrap();
        pipe.validate().unwrap();
        pipe.segments[1] = Segment::new(dvec3(100.0, 20.0, 0.0), dvec3(100.0, 90.0, 0.0), Tolerance::default())
            .unwrap();
        assert!(pipe.validate().is_err());

        pipe.segments.pop();
        assert!(pipe.validate().is_err());
    }
}
