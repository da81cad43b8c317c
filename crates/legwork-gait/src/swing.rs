//! Interpolating a foot through the air.

use legwork_core::math::{normalize_or_zero, slerp};
use legwork_core::types::Step;
use nalgebra::Vector3;

use crate::planner::StepPlanner;

/// Which interpolation a step uses. Also picks the travel speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingKind {
    Stride,
    Strafe,
}

/// Parabolic lift profile: 0 at both ends, 1 at `t = 0.5`.
pub fn parabola(t: f32) -> f32 {
    (4.0 * t * (1.0 - t)).clamp(0.0, 1.0)
}

/// Step between `from` and `to` at `t`, lifted off the ground.
///
/// The lift scales with how horizontal the travel is and with the travelled
/// distance relative to `max_distance`, so short or vertical moves barely
/// leave the ground.
pub fn lift_lerp(
    from: &Step,
    to: &Step,
    t: f32,
    max_distance: f32,
    height: f32,
    up: &Vector3<f32>,
) -> Step {
    let t = t.clamp(0.0, 1.0);
    let up = normalize_or_zero(up);
    let travel = to.position - from.position;

    let alignment = normalize_or_zero(&travel).cross(&up).norm();
    let reach = if max_distance > 0.0 {
        (travel.norm() / max_distance).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let lift = up * (alignment * reach * parabola(t) * height);

    Step::new(
        from.position.lerp(&to.position, t) + lift,
        slerp(&from.forward, &to.forward, t),
    )
}

impl StepPlanner {
    /// Interpolation for forward, back and idle steps.
    pub fn stride_lerp(&self, from: &Step, to: &Step, t: f32) -> Step {
        lift_lerp(from, to, t, 2.0 * self.stride, self.height, &self.up)
    }

    /// Interpolation for lateral steps.
    pub fn strafe_lerp(&self, from: &Step, to: &Step, t: f32) -> Step {
        lift_lerp(from, to, t, self.strafe, self.height, &self.up)
    }

    pub fn lerp(&self, kind: SwingKind, from: &Step, to: &Step, t: f32) -> Step {
        match kind {
            SwingKind::Stride => self.stride_lerp(from, to, t),
            SwingKind::Strafe => self.strafe_lerp(from, to, t),
        }
    }
}
