//! Bevy ECS integration.
//!
//! Provides [`LegworkPlugin`], which owns a [`CharacterRig`] and runs the
//! whole frame pipeline in one `Update` system.
//!
//! # Usage
//!
//! 1. Add [`LegworkPlugin`] to your app.
//! 2. Write movement into [`PendingCommand`] (consumed every frame).
//! 3. Read the result from [`RigFrame`].

use bevy::prelude::*;
use legwork_core::config::CharacterConfig;
use legwork_core::math::ground_basis;
use legwork_gait::Command;
use nalgebra::Vector3;
use tracing::error;

use crate::character::{Character, Frame};

/// Bevy plugin driving one legwork character.
#[derive(Debug, Clone, Default)]
pub struct LegworkPlugin {
    pub config: CharacterConfig,
}

impl Plugin for LegworkPlugin {
    fn build(&self, app: &mut App) {
        let forward = ground_basis(&self.config.gait.up()).1;
        match Character::new(self.config.clone(), Vector3::zeros(), forward) {
            Ok(character) => {
                app.insert_resource(CharacterRig(character))
                    .init_resource::<PendingCommand>()
                    .init_resource::<RigFrame>()
                    .add_systems(Update, drive_rig_system);
            }
            Err(err) => error!("legwork plugin disabled: {err}"),
        }
    }
}

/// The animated character.
#[derive(Resource, Debug, Clone)]
pub struct CharacterRig(pub Character);

/// Command to issue on the next update. Taken by the system.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PendingCommand(pub Option<Command>);

/// Output of the most recent update.
#[derive(Resource, Debug, Clone, Default)]
pub struct RigFrame(pub Option<Frame>);

/// Run one frame of the pipeline with the frame's delta time.
pub fn drive_rig_system(
    time: Res<Time>,
    mut rig: ResMut<CharacterRig>,
    mut pending: ResMut<PendingCommand>,
    mut frame: ResMut<RigFrame>,
) {
    let command = pending.0.take();
    frame.0 = Some(rig.0.update(command, time.delta_secs()));
}
