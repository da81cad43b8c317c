//! Data model shared across the gait pipeline.
//!
//! These are plain value types: a [`Stance`] is owned and mutated by the
//! stance state machine, everything else is rebuilt every frame from a
//! snapshot of it.

use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Foot
// ---------------------------------------------------------------------------

/// One side of a biped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    /// The opposite foot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Sign that turns a counter-clockwise angle about `up` into an angle
    /// measured away from the body's midline for this foot.
    ///
    /// The left foot turns outward counter-clockwise (`+1`), the right foot
    /// clockwise (`-1`). Multiplying by this sign lets left and right share
    /// one implementation of every planner rule.
    #[must_use]
    pub const fn outward_sign(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Pose of a single foot, planted or in flight.
///
/// `forward` is not required to be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub position: Vector3<f32>,
    pub forward: Vector3<f32>,
}

impl Step {
    #[must_use]
    pub const fn new(position: Vector3<f32>, forward: Vector3<f32>) -> Self {
        Self { position, forward }
    }
}

// ---------------------------------------------------------------------------
// Stance
// ---------------------------------------------------------------------------

/// Both feet plus which of them is the grounded pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stance {
    pub pivot: Foot,
    pub left: Step,
    pub right: Step,
}

impl Stance {
    #[must_use]
    pub const fn new(left: Step, right: Step, pivot: Foot) -> Self {
        Self { pivot, left, right }
    }

    /// Midpoint of both feet.
    #[must_use]
    pub fn position(&self) -> Vector3<f32> {
        (self.left.position + self.right.position) * 0.5
    }

    /// Sum of both feet's forward vectors. Not normalized.
    #[must_use]
    pub fn forward(&self) -> Vector3<f32> {
        self.left.forward + self.right.forward
    }

    /// The step of the given foot.
    #[must_use]
    pub const fn step(&self, foot: Foot) -> &Step {
        match foot {
            Foot::Left => &self.left,
            Foot::Right => &self.right,
        }
    }

    /// Mutable access to the step of the given foot.
    pub const fn step_mut(&mut self, foot: Foot) -> &mut Step {
        match foot {
            Foot::Left => &mut self.left,
            Foot::Right => &mut self.right,
        }
    }

    /// The foot that is free to move.
    #[must_use]
    pub const fn moving(&self) -> Foot {
        self.pivot.other()
    }

    /// Distance between the two feet.
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.left.position - self.right.position).norm()
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// Desired endpoints of a two-bone limb plus the constraint that picks its
/// bend direction.
///
/// The joint bends toward `upwards`: it is rotated from the anchor-target
/// line about the axis `(target - anchor) x upwards`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub anchor: Vector3<f32>,
    pub target: Vector3<f32>,
    pub upwards: Vector3<f32>,
}

impl Segment {
    #[must_use]
    pub const fn new(anchor: Vector3<f32>, target: Vector3<f32>, upwards: Vector3<f32>) -> Self {
        Self {
            anchor,
            target,
            upwards,
        }
    }

    /// Split a solved `(anchor, joint, target)` triple into its two bones.
    #[must_use]
    pub const fn pair(
        (anchor, joint, target): (Vector3<f32>, Vector3<f32>, Vector3<f32>),
        upwards: Vector3<f32>,
    ) -> (Self, Self) {
        (
            Self::new(anchor, joint, upwards),
            Self::new(joint, target, upwards),
        )
    }

    /// Vector from anchor to target.
    #[must_use]
    pub fn direction(&self) -> Vector3<f32> {
        self.target - self.anchor
    }

    /// Distance from anchor to target.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.direction().norm()
    }
}

// ---------------------------------------------------------------------------
// Hips
// ---------------------------------------------------------------------------

/// Left and right hip anchors for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hips {
    pub left: Vector3<f32>,
    pub right: Vector3<f32>,
}

impl Hips {
    #[must_use]
    pub const fn new(left: Vector3<f32>, right: Vector3<f32>) -> Self {
        Self { left, right }
    }

    /// Midpoint of both hips.
    #[must_use]
    pub fn position(&self) -> Vector3<f32> {
        (self.left + self.right) * 0.5
    }

    /// Anchor of the given side.
    #[must_use]
    pub const fn anchor(&self, foot: Foot) -> Vector3<f32> {
        match foot {
            Foot::Left => self.left,
            Foot::Right => self.right,
        }
    }
}
