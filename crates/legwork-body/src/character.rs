//! The per-frame pipeline for one character.

use legwork_core::config::CharacterConfig;
use legwork_core::error::LegworkError;
use legwork_core::math::ground_coordinates;
use legwork_core::path::project_on_path;
use legwork_core::types::{Foot, Hips, Segment, Stance};
use legwork_gait::{Command, IdleTracker, StanceMachine};
use nalgebra::{Vector2, Vector3};
use tracing::info;

use crate::head::{HeadComposer, HeadPose};
use crate::hips::HipsComposer;
use crate::leg::{Leg, LegDriver, LegPose};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Stance midpoint; the character's world anchor.
    pub position: Vector3<f32>,
    pub animating: bool,
    /// A swing started this frame.
    pub started: bool,
    /// A swing landed or was interrupted this frame. Both edges are set when
    /// a step starts and lands within one update.
    pub stopped: bool,
    pub hips: Hips,
    pub head: HeadPose,
    pub left: Leg,
    pub right: Leg,
}

impl Frame {
    pub const fn leg(&self, foot: Foot) -> &Leg {
        match foot {
            Foot::Left => &self.left,
            Foot::Right => &self.right,
        }
    }
}

/// One procedurally animated biped.
///
/// [`update`](Self::update) runs the fixed frame order: idle check, command,
/// stance tick, hips, head, legs.
#[derive(Debug, Clone)]
pub struct Character {
    config: CharacterConfig,
    machine: StanceMachine,
    idle: IdleTracker,
    hips: HipsComposer,
    head: HeadComposer,
    legs: LegDriver,
}

impl Character {
    /// Validate `config` and stand the character at `position` facing
    /// `forward`.
    pub fn new(
        config: CharacterConfig,
        position: Vector3<f32>,
        forward: Vector3<f32>,
    ) -> Result<Self, LegworkError> {
        config.validate()?;
        let up = config.gait.up();
        info!(?position, "character created");
        Ok(Self {
            machine: StanceMachine::new(&config.gait, position, forward),
            idle: IdleTracker::new(config.idle.delay),
            hips: HipsComposer::new(&config.gait, &config.hips),
            head: HeadComposer::new(&config.head),
            legs: LegDriver::new(&config.leg, up),
            config,
        })
    }

    pub const fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub const fn stance(&self) -> &Stance {
        self.machine.stance()
    }

    pub const fn machine(&self) -> &StanceMachine {
        &self.machine
    }

    pub const fn idle(&self) -> &IdleTracker {
        &self.idle
    }

    pub fn position(&self) -> Vector3<f32> {
        self.stance().position()
    }

    pub const fn is_animating(&self) -> bool {
        self.machine.is_animating()
    }

    /// Advance one frame by `dt` seconds with an optional user command.
    ///
    /// Without a user command the idle tracker may issue
    /// [`Command::Idle`] to settle the feet.
    pub fn update(&mut self, command: Option<Command>, dt: f32) -> Frame {
        self.idle.advance(dt);
        let command = command.or_else(|| self.idle.poll(self.machine.is_animating()).then_some(Command::Idle));

        let started = command.and_then(|command| self.machine.command(command));
        let stopped = self.machine.tick(dt);
        for event in [started, stopped].into_iter().flatten() {
            self.idle.observe(event);
        }

        self.frame(started.is_some(), stopped.is_some())
    }

    /// Hard reset to an idle stance.
    pub fn reset(&mut self, position: Vector3<f32>, forward: Vector3<f32>) -> Frame {
        let stopped = self.machine.reset(position, forward);
        if let Some(event) = stopped {
            self.idle.observe(event);
        }
        self.frame(false, stopped.is_some())
    }

    fn segments(&self, hips: &Hips) -> [Segment; 2] {
        let stance = self.stance();
        [Foot::Left, Foot::Right].map(|foot| {
            let step = stance.step(foot);
            Segment::new(hips.anchor(foot), step.position, step.forward)
        })
    }

    fn frame(&self, started: bool, stopped: bool) -> Frame {
        let stance = self.stance();
        let hips = self.hips.compose(stance);
        let head = self.head.compose(&hips, &stance.forward());
        let [left, right] = self.segments(&hips).map(|segment| self.legs.drive(&segment));
        Frame {
            position: stance.position(),
            animating: self.is_animating(),
            started,
            stopped,
            hips,
            head,
            left,
            right,
        }
    }

    /// Solved bones of both legs for the current stance, without meshes.
    pub fn leg_poses(&self) -> [LegPose; 2] {
        let hips = self.hips.compose(self.stance());
        self.segments(&hips).map(|segment| self.legs.pose(&segment))
    }

    /// `true` if either foot is within `size / 2` of `path`, measured in
    /// ground coordinates.
    pub fn collides_with(&self, path: &[Vector2<f32>], size: f32) -> bool {
        let up = self.config.gait.up();
        self.leg_poses()
            .iter()
            .flat_map(|pose| [pose.foot.anchor, pose.foot.target])
            .filter_map(|point| project_on_path(&ground_coordinates(&point, &up), path))
            .any(|(_, distance)| distance < 0.5 * size)
    }
}
