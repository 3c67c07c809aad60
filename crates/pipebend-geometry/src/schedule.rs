//! Bending table: the feed/rotate/bend sequence for a bending machine.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::pipe::BendedPipe;

/// One feed-rotate-bend step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendStep {
    /// Straight length fed before the bend.
    pub feed: f64,
    /// Rotation of the stock relative to the previous bend plane, in radians.
    /// Zero for the first bend.
    pub rotation: f64,
    /// Bend angle in radians.
    pub bend_angle: f64,
    /// Centerline length consumed by the bend.
    pub arc_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendSchedule {
    pub steps: Vec<BendStep>,
    /// Straight length after the last bend.
    pub final_feed: f64,
    pub total_length: f64,
}

impl BendSchedule {
    pub fn from_pipe(pipe: &BendedPipe) -> Self {
        let segments = pipe.segments();
        let rotations = std::iter::once(0.0).chain(pipe.twists());
        let steps = pipe
            .arcs()
            .iter()
            .zip(segments)
            .zip(rotations)
            .map(|((arc, segment), rotation)| BendStep {
                feed: segment.length(),
                rotation,
                bend_angle: arc.central_angle(),
                arc_length: arc.length(),
            })
            .collect();

        Self {
            steps,
            final_feed: segments.last().map_or(0.0, |s| s.length()),
            total_length: pipe.total_length(),
        }
    }
}

impl From<&BendedPipe> for BendSchedule {
    fn from(pipe: &BendedPipe) -> Self {
        Self::from_pipe(pipe)
    }
}
