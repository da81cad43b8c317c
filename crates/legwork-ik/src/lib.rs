//! Analytic two-bone inverse kinematics.
//!
//! Given a [`Segment`](legwork_core::types::Segment) describing where a
//! limb starts, where it should reach and which way it should bend, and
//! the lengths of its two bones, [`solve`] returns the position of the
//! middle joint in closed form.
//!
//! ```text
//! Segment + (l1, l2) ──► law of cosines ──► (anchor, joint, target)
//! ```
//!
//! Unreachable targets are not an error: the anchor-target distance is
//! clamped into `[|l1 - l2|, l1 + l2]` and the limb reaches as far as it
//! can.

pub mod solver;

pub use solver::{TwoBoneSolver, solve};
