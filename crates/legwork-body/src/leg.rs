//! Per-leg IK and mesh generation.
//!
//! ```text
//! hip ──► Segment ──► two-bone IK ──► hip, knee, ankle, heel, toe
//!                                          │
//!                      plane(hip→foot, foot forward) projection
//!                                          │
//!                            square path mesh ──► extrude ──► LegMesh
//! ```

use legwork_core::config::LegConfig;
use legwork_core::math::{normalize_or_zero, orthonormalize};
use legwork_core::plane::Plane;
use legwork_core::types::Segment;
use legwork_ik::TwoBoneSolver;
use nalgebra::{Vector2, Vector3};
use tracing::{debug, trace};

use crate::mesh::{LegMesh, extrude, square_path_mesh};

/// Bone segments of one solved leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegPose {
    pub femur: Segment,
    pub tibia: Segment,
    pub foot: Segment,
}

impl LegPose {
    /// Hip, knee, ankle, heel and toe.
    pub const fn points(&self) -> [Vector3<f32>; 5] {
        [
            self.femur.anchor,
            self.femur.target,
            self.tibia.target,
            self.foot.anchor,
            self.foot.target,
        ]
    }
}

/// A solved leg and its mesh. `mesh` is `None` on frames where the leg
/// cannot be projected onto its drawing plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub pose: LegPose,
    pub plane: Plane,
    pub mesh: Option<LegMesh>,
}

impl Leg {
    pub const fn is_drawable(&self) -> bool {
        self.mesh.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegDriver {
    solver: TwoBoneSolver,
    foot: f32,
    width: f32,
    up: Vector3<f32>,
}

impl LegDriver {
    pub fn new(config: &LegConfig, up: Vector3<f32>) -> Self {
        Self {
            solver: TwoBoneSolver::new(config.lengths()),
            foot: config.foot,
            width: config.width,
            up: normalize_or_zero(&up),
        }
    }

    /// Segment with its target raised off the ground by the leg width.
    fn raised(&self, segment: &Segment) -> Segment {
        Segment::new(segment.anchor, segment.target + self.up * self.width, segment.upwards)
    }

    /// Solve the bones for `segment`: hip anchor, foot position and foot
    /// forward as the bend constraint.
    pub fn pose(&self, segment: &Segment) -> LegPose {
        self.pose_raised(&self.raised(segment))
    }

    fn pose_raised(&self, segment: &Segment) -> LegPose {
        if segment.length() > self.solver.reach() {
            trace!(distance = segment.length(), reach = self.solver.reach(), "foot target out of reach");
        }
        let (femur, tibia) = self.solver.bones(segment);
        let heel = tibia.target - self.up * (0.5 * self.width);
        let toe = heel + normalize_or_zero(&segment.upwards) * self.foot;
        LegPose {
            femur,
            tibia,
            foot: Segment::new(heel, toe, self.up),
        }
    }

    /// Solve and mesh one leg.
    pub fn drive(&self, segment: &Segment) -> Leg {
        let segment = self.raised(segment);
        let pose = self.pose_raised(&segment);
        let plane = Plane::new(
            orthonormalize(&segment.direction(), &segment.upwards),
            segment.anchor,
        );

        let mesh = plane.projector().map(|projector| {
            let path: Vec<Vector2<f32>> = pose.points().iter().map(|p| projector.project(p)).collect();
            let half = 0.5 * self.width;
            extrude(&square_path_mesh(&path, self.width), &plane, -half, half)
        });
        if mesh.is_none() {
            debug!(anchor = ?segment.anchor, target = ?segment.target, "leg projection is singular, skipping mesh");
        }

        Leg { pose, plane, mesh }
    }
}
