//! Biped gait: where the free foot goes, how it gets there, and who owns
//! the stance while it does.
//!
//! # Architecture
//!
//! ```text
//! Command ──► StanceMachine ──► StepPlanner (target) ──► swing lerp per tick ──► Stance
//!                   │
//!                   └── AnimationEvent ──► IdleTracker ──► Command::Idle
//! ```

pub mod idle;
pub mod planner;
pub mod stance;
pub mod swing;

pub use idle::{IdleState, IdleTracker};
pub use planner::StepPlanner;
pub use stance::{AnimationEvent, Command, StanceMachine};
pub use swing::SwingKind;
