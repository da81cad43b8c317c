//! Head placement relative to the hips.

use legwork_core::config::HeadConfig;
use legwork_core::math::normalize_or_zero;
use legwork_core::types::Hips;
use nalgebra::{UnitQuaternion, Vector2, Vector3};

/// Head transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadPose {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

/// Keeps the head at a fixed offset from the hips, level with the line
/// between them.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadComposer {
    /// `(forward, up)` offset from the hip midpoint.
    offset: Vector2<f32>,
}

impl HeadComposer {
    pub fn new(config: &HeadConfig) -> Self {
        Self {
            offset: Vector2::from(config.offset),
        }
    }

    pub fn compose(&self, hips: &Hips, forward: &Vector3<f32>) -> HeadPose {
        let forward = normalize_or_zero(forward);
        let across = normalize_or_zero(&(hips.right - hips.left));
        let upwards = across.cross(&forward);

        let position = hips.position() + forward * self.offset.x + upwards * self.offset.y;
        let rotation = if forward.cross(&upwards) == Vector3::zeros() {
            UnitQuaternion::identity()
        } else {
            UnitQuaternion::face_towards(&forward, &upwards)
        };
        HeadPose { position, rotation }
    }
}
