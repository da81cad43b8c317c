//! The live stance and the timed swing of its free foot.
//!
//! ```text
//!            command (accepted)
//!   Grounded ──────────────────► Animating
//!      ▲                             │
//!      └──── elapsed >= duration ────┘   (moving foot lands, pivot flips)
//!
//!   reset(position, forward): any state ──► Grounded, idle stance, pivot Left
//! ```

use legwork_core::config::GaitConfig;
use legwork_core::types::{Foot, Stance, Step};
use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::planner::StepPlanner;
use crate::swing::SwingKind;

/// A high-level movement request. Each variant except `Idle` carries the
/// world-space direction the character should face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Bring the free foot back into an idle pose beside the pivot.
    Idle,
    Forward(Vector3<f32>),
    Back(Vector3<f32>),
    Left(Vector3<f32>),
    Right(Vector3<f32>),
}

impl Command {
    pub const fn kind(&self) -> SwingKind {
        match self {
            Self::Idle | Self::Forward(_) | Self::Back(_) => SwingKind::Stride,
            Self::Left(_) | Self::Right(_) => SwingKind::Strafe,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Forward(_) => "forward",
            Self::Back(_) => "back",
            Self::Left(_) => "left",
            Self::Right(_) => "right",
        }
    }
}

/// Edge of the animating signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationEvent {
    Started,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Swing {
    from: Step,
    to: Step,
    kind: SwingKind,
    duration: f32,
    elapsed: f32,
}

/// Owns the [`Stance`] of one character and advances it frame by frame.
///
/// Call [`command`](Self::command) (optional) then [`tick`](Self::tick)
/// once per frame. The pivot foot never moves while a swing is in flight.
#[derive(Debug, Clone)]
pub struct StanceMachine {
    planner: StepPlanner,
    stance: Stance,
    swing: Option<Swing>,
    min_animation_time: f32,
    stride_speed: f32,
    strafe_speed: f32,
}

impl StanceMachine {
    /// A grounded machine in an idle stance at `position` facing `forward`.
    pub fn new(config: &GaitConfig, position: Vector3<f32>, forward: Vector3<f32>) -> Self {
        let planner = StepPlanner::new(config);
        let stance = planner.idle_stance(position, forward, Foot::Left);
        Self {
            planner,
            stance,
            swing: None,
            min_animation_time: config.min_animation_time,
            stride_speed: config.stride_speed,
            strafe_speed: config.strafe_speed,
        }
    }

    pub const fn stance(&self) -> &Stance {
        &self.stance
    }

    pub const fn planner(&self) -> &StepPlanner {
        &self.planner
    }

    pub const fn is_animating(&self) -> bool {
        self.swing.is_some()
    }

    /// Target of the swing in flight, if any.
    pub fn target(&self) -> Option<&Step> {
        self.swing.as_ref().map(|swing| &swing.to)
    }

    /// How long a swing of `kind` covering `distance` lasts.
    pub fn animation_duration(&self, kind: SwingKind, distance: f32) -> f32 {
        let speed = match kind {
            SwingKind::Stride => self.stride_speed,
            SwingKind::Strafe => self.strafe_speed,
        };
        self.min_animation_time.max(distance / speed)
    }

    /// Plan and start a swing. Ignored while a swing is in flight.
    pub fn command(&mut self, command: Command) -> Option<AnimationEvent> {
        if self.is_animating() {
            trace!(command = command.name(), "command ignored while animating");
            return None;
        }

        let stance = &self.stance;
        let target = match command {
            Command::Idle => self.planner.idle_step(stance),
            Command::Forward(forward) => self.planner.forward(stance, forward),
            Command::Back(forward) => self.planner.back(stance, forward),
            Command::Left(forward) => self.planner.left(stance, forward),
            Command::Right(forward) => self.planner.right(stance, forward),
        };

        let kind = command.kind();
        let from = *stance.step(stance.moving());
        let duration = self.animation_duration(kind, (target.position - from.position).norm());
        debug!(
            command = command.name(),
            pivot = ?self.stance.pivot,
            duration,
            "step planned"
        );

        self.swing = Some(Swing {
            from,
            to: target,
            kind,
            duration,
            elapsed: 0.0,
        });
        Some(AnimationEvent::Started)
    }

    /// Advance the swing in flight by `dt` seconds.
    ///
    /// Returns [`AnimationEvent::Stopped`] on the tick the moving foot lands.
    pub fn tick(&mut self, dt: f32) -> Option<AnimationEvent> {
        let swing = self.swing.as_mut()?;
        swing.elapsed += dt.max(0.0);
        let moving = self.stance.moving();

        if swing.elapsed >= swing.duration {
            *self.stance.step_mut(moving) = swing.to;
            self.stance.pivot = moving;
            self.swing = None;
            debug!(pivot = ?self.stance.pivot, "step landed");
            return Some(AnimationEvent::Stopped);
        }

        let t = swing.elapsed / swing.duration;
        let step = self.planner.lerp(swing.kind, &swing.from, &swing.to, t);
        trace!(t, foot = ?moving, "swing");
        *self.stance.step_mut(moving) = step;
        None
    }

    /// Hard reset to an idle stance with the left foot as pivot.
    ///
    /// Cancels any swing in flight and reports it as stopped.
    pub fn reset(&mut self, position: Vector3<f32>, forward: Vector3<f32>) -> Option<AnimationEvent> {
        let interrupted = self.swing.take().is_some();
        self.stance = self.planner.idle_stance(position, forward, Foot::Left);
        debug!(interrupted, "stance reset");
        interrupted.then_some(AnimationEvent::Stopped)
    }
}
