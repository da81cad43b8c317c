//! Body composition for legwork characters.
//!
//! Reads the live stance once per frame and turns it into hips, a head
//! transform and two meshed legs.
//!
//! # Architecture
//!
//! ```text
//! Command ──► StanceMachine ──► Stance ──► HipsComposer ──► Hips ──► HeadComposer
//!                                              │
//!                                              └──► Segment per leg ──► LegDriver ──► Leg
//! ```
//!
//! [`Character`] wires these together in the fixed frame order. With the
//! `bevy` feature, [`plugin::LegworkPlugin`] runs it as an ECS system.

pub mod character;
pub mod head;
pub mod hips;
pub mod intent;
pub mod leg;
pub mod mesh;
#[cfg(feature = "bevy")]
pub mod plugin;

pub use character::{Character, Frame};
pub use head::{HeadComposer, HeadPose};
pub use hips::HipsComposer;
pub use intent::command_from_input;
pub use leg::{Leg, LegDriver, LegPose};
pub use mesh::{LegMesh, Mesh2d, extrude, square_path_mesh};
#[cfg(feature = "bevy")]
pub use plugin::{CharacterRig, LegworkPlugin, PendingCommand, RigFrame};
