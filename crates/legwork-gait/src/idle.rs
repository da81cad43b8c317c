//! Detects when a character has stood still long enough to settle its feet.

use tracing::debug;

use crate::stance::AnimationEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdleState {
    /// Feet are in an idle pose.
    Idle,
    /// The character has moved since it was last idle.
    Active,
    /// An idle step has been requested and is in flight.
    Settling,
}

/// Turns animation edges and elapsed time into idle-step requests.
///
/// Feed every [`AnimationEvent`] to [`observe`](Self::observe), advance the
/// clock once per frame, and [`poll`](Self::poll) on frames without user
/// input.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleTracker {
    delay: f32,
    state: IdleState,
    clock: f32,
    last_stop: f32,
}

impl IdleTracker {
    pub const fn new(delay: f32) -> Self {
        Self {
            delay,
            state: IdleState::Idle,
            clock: 0.0,
            last_stop: 0.0,
        }
    }

    pub const fn state(&self) -> IdleState {
        self.state
    }

    pub fn advance(&mut self, dt: f32) {
        self.clock += dt.max(0.0);
    }

    pub fn observe(&mut self, event: AnimationEvent) {
        self.state = match (self.state, event) {
            (IdleState::Idle, AnimationEvent::Started) => IdleState::Active,
            (IdleState::Active, AnimationEvent::Stopped) => {
                self.last_stop = self.clock;
                IdleState::Active
            }
            (IdleState::Settling, AnimationEvent::Stopped) => IdleState::Idle,
            (state, _) => state,
        };
    }

    /// `true` if an idle step should be issued now. Moves to
    /// [`IdleState::Settling`] when it does.
    pub fn poll(&mut self, animating: bool) -> bool {
        if self.state == IdleState::Active && !animating && self.clock - self.last_stop > self.delay {
            debug!(since_stop = self.clock - self.last_stop, "settling into idle");
            self.state = IdleState::Settling;
            return true;
        }
        false
    }
}
