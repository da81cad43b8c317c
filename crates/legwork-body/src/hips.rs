//! Hip anchors derived from the live stance.

use legwork_core::config::{GaitConfig, HipsConfig};
use legwork_core::math::{ground_basis, normalize_or_zero, project};
use legwork_core::types::{Hips, Stance};
use nalgebra::{UnitQuaternion, Vector3};

/// Rotation taking local `+Z` to `forward` flattened onto the ground and
/// local `+Y` to `up`. Local `+X` is the character's left.
pub fn facing(forward: &Vector3<f32>, up: &Vector3<f32>) -> UnitQuaternion<f32> {
    let mut flat = normalize_or_zero(&(forward - project(forward, up)));
    if flat == Vector3::zeros() {
        flat = ground_basis(up).1;
    }
    UnitQuaternion::face_towards(&flat, up)
}

/// Places both hips above the stance midpoint and leans them with the feet.
#[derive(Debug, Clone, PartialEq)]
pub struct HipsComposer {
    spread: f32,
    height: f32,
    lean: f32,
    up: Vector3<f32>,
}

impl HipsComposer {
    pub fn new(gait: &GaitConfig, hips: &HipsConfig) -> Self {
        Self {
            spread: gait.spread,
            height: hips.height,
            lean: hips.lean,
            up: gait.up(),
        }
    }

    /// Hips for `stance`. A lifted foot raises its hip by `lean` times the
    /// foot's height above the stance midpoint.
    pub fn compose(&self, stance: &Stance) -> Hips {
        let position = stance.position();
        let rotation = facing(&stance.forward(), &self.up);
        let half = 0.5 * self.spread;

        let left = position
            + rotation * Vector3::new(half, self.height, 0.0)
            + project(&(stance.left.position - position), &self.up) * self.lean;
        let right = position
            + rotation * Vector3::new(-half, self.height, 0.0)
            + project(&(stance.right.position - position), &self.up) * self.lean;
        Hips::new(left, right)
    }
}
