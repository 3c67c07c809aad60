//! Rotation between consecutive bend planes.

use crate::curve::Arc;

/// Angle between the bend planes of two adjacent bends, in `[0, PI/2]`.
///
/// Normals of opposite orientation describe the same plane, so the raw angle
/// between them is folded onto the smaller of itself and its supplement. This
/// is the rotation a bending machine applies to the stock between the two
/// bends.
pub fn bend_plane_twist(arc0: &Arc, arc1: &Arc) -> f64 {
    arc0.bend_plane().folded_angle(&arc1.bend_plane())
}
