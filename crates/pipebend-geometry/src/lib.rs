//! Pipe bending geometry: fitting bends into a waypoint polyline and deriving
//! the lengths and angles needed to cut and bend pipe stock.

pub mod bend;
pub mod curve;
pub mod pipe;
pub mod schedule;
pub mod twist;

pub use bend::{fit_bend, fit_bend_with};
pub use curve::{Arc, Curve, Segment};
pub use pipe::{calc_pipe, calc_pipe_with, BendedPipe, PipeElement};
pub use schedule::{BendSchedule, BendStep};
pub use twist::bend_plane_twist;
