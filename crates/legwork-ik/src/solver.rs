//! Closed-form two-bone solver.

use legwork_core::math::{EPSILON, any_perpendicular, normalize_or_zero, rotate_about};
use legwork_core::types::Segment;
use nalgebra::Vector3;

/// Solve a two-bone limb.
///
/// Returns `(anchor, joint, resolved_target)`. The joint lies `l1` from the
/// anchor and `l2` from the resolved target, rotated from the
/// anchor-target line toward `segment.upwards`. If the target is out of
/// reach the resolved target is the nearest reachable point on the same
/// line.
///
/// `segment.anchor` must differ from `segment.target`; a zero-length
/// direction puts the joint on the anchor.
pub fn solve(segment: &Segment, (l1, l2): (f32, f32)) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let direction = segment.direction();
    let unit = normalize_or_zero(&direction);
    let distance = direction.norm().clamp((l1 - l2).abs(), l1 + l2);

    let mut axis = direction.cross(&segment.upwards);
    if axis.norm_squared() < EPSILON * EPSILON {
        // Bending toward `upwards` is undefined when it lies on the limb.
        axis = any_perpendicular(&direction);
    }

    let rotated = rotate_about(&unit, &axis, bend_angle(distance, l1, l2));
    let joint = segment.anchor + rotated * l1;
    let target = segment.anchor + unit * distance;
    (segment.anchor, joint, target)
}

/// Angle at the anchor, in degrees, of the triangle with sides
/// `distance`, `l1` and opposite side `l2`.
fn bend_angle(distance: f32, l1: f32, l2: f32) -> f32 {
    let denominator = 2.0 * distance * l1;
    if denominator < EPSILON {
        return 90.0;
    }
    ((distance * distance + l1 * l1 - l2 * l2) / denominator)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

/// A [`solve`] bound to a fixed pair of bone lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneSolver {
    lengths: (f32, f32),
}

impl TwoBoneSolver {
    /// Solver for bones of `(anchor-to-joint, joint-to-target)` length.
    pub const fn new(lengths: (f32, f32)) -> Self {
        Self { lengths }
    }

    /// Longest anchor-target distance the limb can span.
    pub fn reach(&self) -> f32 {
        self.lengths.0 + self.lengths.1
    }

    pub fn solve(&self, segment: &Segment) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        solve(segment, self.lengths)
    }

    /// Solve and split the result into its two bones.
    pub fn bones(&self, segment: &Segment) -> (Segment, Segment) {
        Segment::pair(self.solve(segment), segment.upwards)
    }
}
