//! Where the free foot should land next.
//!
//! Every rule is written once for the moving foot and mirrored with
//! [`Foot::outward_sign`]. Turn angles are measured "outward": positive
//! when the moving foot rotates away from the body midline, negative when
//! it rotates across it. The outward range is `[-45, 90]` degrees for both
//! feet, which in world terms is `[-45, 90]` clockwise for a moving right
//! foot and `[-90, 45]` clockwise for a moving left foot.

use legwork_core::config::GaitConfig;
use legwork_core::math::{angle, ground_basis, normalize_or_zero, project, rotate_about, signed_angle};
use legwork_core::types::{Foot, Stance, Step};
use nalgebra::Vector3;

/// Inward turn limit in degrees.
pub const MAX_INWARD_TURN: f32 = 45.0;
/// Outward turn limit in degrees.
pub const MAX_OUTWARD_TURN: f32 = 90.0;

/// Stateless step geometry for one character.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlanner {
    pub(crate) spread: f32,
    pub(crate) splay: f32,
    pub(crate) stride: f32,
    pub(crate) strafe: f32,
    pub(crate) height: f32,
    pub(crate) up: Vector3<f32>,
}

impl StepPlanner {
    pub fn new(config: &GaitConfig) -> Self {
        Self {
            spread: config.spread,
            splay: config.splay,
            stride: config.stride,
            strafe: config.strafe,
            height: config.step_height,
            up: config.up(),
        }
    }

    /// Unit up axis.
    pub const fn up(&self) -> Vector3<f32> {
        self.up
    }

    /// Symmetric stance around `position`, feet `spread` apart and each
    /// splayed outward from `forward`.
    pub fn idle_stance(&self, position: Vector3<f32>, forward: Vector3<f32>, pivot: Foot) -> Stance {
        let forward = self.ground_forward(&forward);
        let right = forward.cross(&self.up);
        let half = 0.5 * self.spread;

        let left = Step::new(
            position - right * half,
            rotate_about(&forward, &self.up, Foot::Left.outward_sign() * self.splay),
        );
        let right = Step::new(
            position + right * half,
            rotate_about(&forward, &self.up, Foot::Right.outward_sign() * self.splay),
        );
        Stance::new(left, right, pivot)
    }

    /// Step that brings the moving foot back beside the pivot in an idle
    /// pose.
    pub fn idle_step(&self, stance: &Stance) -> Step {
        let moving = stance.moving();
        let pivot = stance.step(stance.pivot);
        let turn = moving.outward_sign() * self.splay;

        let body = rotate_about(&pivot.forward, &self.up, turn);
        let direction = rotate_about(&body, &self.up, turn);
        let position = pivot.position + self.outward(moving, &body) * self.spread;
        Step::new(position, direction)
    }

    /// Stride forward toward `forward` without crossing the feet.
    pub fn forward(&self, stance: &Stance, forward: Vector3<f32>) -> Step {
        self.stride(stance, forward, 1.0)
    }

    /// Stride backward while facing `forward` without crossing the feet.
    pub fn back(&self, stance: &Stance, forward: Vector3<f32>) -> Step {
        self.stride(stance, forward, -1.0)
    }

    /// Strafe to the character's left while facing `forward`.
    pub fn left(&self, stance: &Stance, forward: Vector3<f32>) -> Step {
        self.strafe(stance, forward, Foot::Left)
    }

    /// Strafe to the character's right while facing `forward`.
    pub fn right(&self, stance: &Stance, forward: Vector3<f32>) -> Step {
        self.strafe(stance, forward, Foot::Right)
    }

    /// Clamped outward turn of the moving foot, in degrees, measured from
    /// the pivot foot's forward to `forward`.
    pub fn turn_angle(&self, stance: &Stance, forward: &Vector3<f32>) -> f32 {
        let sign = stance.moving().outward_sign();
        let pivot = stance.step(stance.pivot);
        (sign * signed_angle(&pivot.forward, forward, &self.up)).clamp(-MAX_INWARD_TURN, MAX_OUTWARD_TURN)
    }

    /// Forward direction of the moving foot after turning by `turn` degrees
    /// outward.
    fn turned(&self, stance: &Stance, turn: f32) -> Vector3<f32> {
        let sign = stance.moving().outward_sign();
        rotate_about(&stance.step(stance.pivot).forward, &self.up, sign * (turn + self.splay))
    }

    /// `sense` is `1` for a forward stride and `-1` for a backward one.
    fn stride(&self, stance: &Stance, forward: Vector3<f32>, sense: f32) -> Step {
        let moving = stance.moving();
        let pivot = stance.step(stance.pivot);
        let turn = self.turn_angle(stance, &forward);
        let direction = self.turned(stance, turn);

        // Turning inward while stepping forward (or outward while stepping
        // back) brings the moving foot toward the pivot's lateral line.
        let magnitude = if turn * sense < 0.0 {
            let beta = angle(&(pivot.forward + direction), &forward);
            self.stride.min(self.spread / beta.to_radians().tan())
        } else {
            self.stride
        };

        let position = pivot.position
            + self.outward(moving, &forward) * self.spread
            + normalize_or_zero(&forward) * (sense * magnitude);
        Step::new(position, direction)
    }

    /// Lateral step toward `side`. The foot on that side leads by `strafe`;
    /// the other closes up to at most `spread` beside it.
    fn strafe(&self, stance: &Stance, forward: Vector3<f32>, side: Foot) -> Step {
        let moving = stance.moving();
        let pivot = stance.step(stance.pivot);
        let direction = self.turned(stance, self.turn_angle(stance, &forward));

        let distance = if moving == side {
            self.strafe
        } else {
            self.spread.min(stance.width())
        };
        let position = pivot.position + self.outward(moving, &forward) * distance;
        Step::new(position, direction)
    }

    /// Unit lateral vector pointing away from the midline on `foot`'s side
    /// of a body facing `forward`.
    fn outward(&self, foot: Foot, forward: &Vector3<f32>) -> Vector3<f32> {
        normalize_or_zero(&forward.cross(&self.up)) * -foot.outward_sign()
    }

    /// `forward` flattened onto the ground plane and normalized.
    fn ground_forward(&self, forward: &Vector3<f32>) -> Vector3<f32> {
        let flat = normalize_or_zero(&(forward - project(forward, &self.up)));
        if flat == Vector3::zeros() {
            ground_basis(&self.up).1
        } else {
            flat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn planner() -> StepPlanner {
        StepPlanner::new(&GaitConfig::default())
    }

    /// Feet side by side facing +Z, left foot at +X (the left of a body
    /// facing +Z with +Y up).
    fn parallel(pivot: Foot) -> Stance {
        Stance::new(
            Step::new(Vector3::new(0.15, 0.0, 0.0), Vector3::z()),
            Step::new(Vector3::new(-0.15, 0.0, 0.0), Vector3::z()),
            pivot,
        )
    }

    #[test]
    fn idle_stance_is_spread_and_splayed() {
        let p = planner();
        let stance = p.idle_stance(Vector3::zeros(), Vector3::z(), Foot::Left);
        assert_eq!(stance.pivot, Foot::Left);
        assert_relative_eq!(stance.left.position, Vector3::new(0.15, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(stance.right.position, Vector3::new(-0.15, 0.0, 0.0), epsilon = 1e-6);
        // Left foot turns toward +X, right foot toward -X.
        assert_relative_eq!(signed_angle(&Vector3::z(), &stance.left.forward, &Vector3::y()), 10.0, epsilon = 1e-3);
        assert_relative_eq!(signed_angle(&Vector3::z(), &stance.right.forward, &Vector3::y()), -10.0, epsilon = 1e-3);
        assert_relative_eq!(stance.position(), Vector3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn idle_stance_ignores_vertical_forward_component() {
        let p = planner();
        let flat = p.idle_stance(Vector3::zeros(), Vector3::z(), Foot::Left);
        let tilted = p.idle_stance(Vector3::zeros(), Vector3::new(0.0, 0.5, 1.0), Foot::Left);
        assert_relative_eq!(flat.left.position, tilted.left.position, epsilon = 1e-6);
        assert_relative_eq!(flat.right.forward, tilted.right.forward, epsilon = 1e-6);
    }

    #[test]
    fn forward_straight_ahead_is_full_stride() {
        let p = planner();
        let stance = parallel(Foot::Left);
        let step = p.forward(&stance, Vector3::z());
        // Right foot lands spread to the right and a stride ahead.
        assert_relative_eq!(step.position, Vector3::new(-0.15, 0.0, 0.4), epsilon = 1e-5);
        // Splayed outward, i.e. clockwise for the right foot.
        assert_relative_eq!(signed_angle(&Vector3::z(), &step.forward, &Vector3::y()), -10.0, epsilon = 1e-3);
    }

    #[test]
    fn forward_is_mirrored_between_feet() {
        let p = planner();
        for degrees in [-70.0_f32, -30.0, -5.0, 0.0, 20.0, 60.0, 120.0] {
            let desired = rotate_about(&Vector3::z(), &Vector3::y(), degrees);
            let mirrored = rotate_about(&Vector3::z(), &Vector3::y(), -degrees);
            let right = p.forward(&parallel(Foot::Left), desired);
            let left = p.forward(&parallel(Foot::Right), mirrored);
            // Reflection across the YZ plane swaps left and right.
            assert_relative_eq!(right.position.x, -left.position.x, epsilon = 1e-5);
            assert_relative_eq!(right.position.z, left.position.z, epsilon = 1e-5);
            assert_relative_eq!(right.forward.x, -left.forward.x, epsilon = 1e-5);
        }
    }

    #[test]
    fn turn_angle_clamps_asymmetrically() {
        let p = planner();
        let up = Vector3::y();
        // Moving right foot: outward is clockwise.
        let stance = parallel(Foot::Left);
        assert_relative_eq!(p.turn_angle(&stance, &rotate_about(&Vector3::z(), &up, -120.0)), 90.0, epsilon = 1e-3);
        assert_relative_eq!(p.turn_angle(&stance, &rotate_about(&Vector3::z(), &up, 80.0)), -45.0, epsilon = 1e-3);
        // Moving left foot: outward is counter-clockwise.
        let stance = parallel(Foot::Right);
        assert_relative_eq!(p.turn_angle(&stance, &rotate_about(&Vector3::z(), &up, 120.0)), 90.0, epsilon = 1e-3);
        assert_relative_eq!(p.turn_angle(&stance, &rotate_about(&Vector3::z(), &up, -80.0)), -45.0, epsilon = 1e-3);
    }

    #[test]
    fn back_steps_behind_pivot() {
        let p = planner();
        let step = p.back(&parallel(Foot::Right), Vector3::z());
        assert_relative_eq!(step.position, Vector3::new(0.15, 0.0, -0.4), epsilon = 1e-5);
    }

    #[test]
    fn back_reduces_stride_on_outward_turn() {
        let p = planner();
        let stance = parallel(Foot::Left);
        // A full outward turn of the moving right foot.
        let desired = rotate_about(&Vector3::z(), &Vector3::y(), -90.0);
        let step = p.back(&stance, desired);
        let travelled = -(step.position - stance.left.position).dot(&desired);
        assert!(travelled > 0.0 && travelled < 0.4);
        assert_relative_eq!(travelled, 0.3 / 40.0_f32.to_radians().tan(), epsilon = 1e-4);
    }

    #[test]
    fn leading_strafe_moves_strafe_distance() {
        let p = planner();
        // Pivot left, moving right foot, strafing right.
        let step = p.right(&parallel(Foot::Left), Vector3::z());
        assert_relative_eq!(step.position, Vector3::new(0.15 - 0.5, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn closing_strafe_is_limited_by_current_width() {
        let p = planner();
        let mut stance = parallel(Foot::Right);
        stance.left.position = Vector3::new(0.05, 0.0, 0.0);
        stance.right.position = Vector3::new(-0.05, 0.0, 0.0);
        // Pivot right, moving left foot, strafing right: close up.
        let step = p.right(&stance, Vector3::z());
        assert_relative_eq!(step.position, Vector3::new(0.05, 0.0, 0.0), epsilon = 1e-5);

        let wide = parallel(Foot::Right);
        let step = p.right(&wide, Vector3::z());
        assert_relative_eq!(step.position, Vector3::new(0.15, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn idle_step_restores_spread() {
        let p = planner();
        let idle = p.idle_stance(Vector3::zeros(), Vector3::z(), Foot::Left);
        let step = p.idle_step(&idle);
        // From a splayed pivot the moving foot ends up at the idle spot.
        assert_relative_eq!(step.position, idle.right.position, epsilon = 1e-5);
        assert_relative_eq!(step.forward, idle.right.forward, epsilon = 1e-5);
    }
}
