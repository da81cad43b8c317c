//! Integration test: drive a full character through walking, turning,
//! strafing and idling.
//!
//! Checks that:
//! 1. The character advances along its heading and the pivot alternates
//! 2. Every frame reads the stance after that frame's tick
//! 3. Hips lean toward a lifted foot mid-swing
//! 4. The feet settle into an idle stance after the idle delay
//! 5. A leg whose plane basis degenerates is skipped, not poisoned
//! 6. Frames longer than a whole step still report both animation edges

use approx::assert_relative_eq;
use legwork_body::{Character, LegDriver, command_from_input};
use legwork_core::config::{CharacterConfig, LegConfig};
use legwork_core::math::{angle, project};
use legwork_core::types::{Foot, Segment};
use legwork_gait::{Command, IdleState};
use nalgebra::{Vector2, Vector3};

const DT: f32 = 1.0 / 60.0;

fn character() -> Character {
    Character::new(CharacterConfig::default(), Vector3::zeros(), Vector3::z()).unwrap()
}

/// Hold `command` every frame for `frames` frames and count landings.
fn hold(character: &mut Character, command: Command, frames: usize) -> usize {
    (0..frames)
        .filter(|_| character.update(Some(command), DT).stopped)
        .count()
}

#[test]
fn walking_forward_advances_and_alternates() {
    let mut c = character();
    let mut pivots = Vec::new();
    for _ in 0..240 {
        let frame = c.update(Some(Command::Forward(Vector3::z())), DT);
        if frame.stopped {
            pivots.push(c.stance().pivot);
        }
        assert!(frame.left.is_drawable() && frame.right.is_drawable());
    }

    assert!(pivots.len() >= 8, "only {} steps landed", pivots.len());
    for pair in pivots.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    let position = c.position();
    assert!(position.z > 1.0, "advanced only {}", position.z);
    assert!(position.x.abs() < 0.3);
}

#[test]
fn frame_reads_stance_after_tick() {
    let mut c = character();
    c.update(Some(Command::Forward(Vector3::z())), DT);
    for _ in 0..5 {
        let frame = c.update(None, DT);
        let stance = c.stance();
        assert_eq!(frame.position, stance.position());
        // The right leg's foot target is the swinging foot, as ticked this frame.
        let raised = stance.right.position + Vector3::y() * LegConfig::default().width;
        let reach = (raised - frame.hips.right).norm();
        if reach < 1.0 {
            assert_relative_eq!(frame.right.pose.tibia.target, raised, epsilon = 1e-4);
        }
    }
}

#[test]
fn hips_lean_toward_lifted_foot() {
    let mut c = character();
    c.update(Some(Command::Forward(Vector3::z())), DT);
    // Roughly mid-swing.
    let mut frame = c.update(None, DT);
    for _ in 0..4 {
        frame = c.update(None, DT);
    }
    assert!(frame.animating);
    let stance = c.stance();
    assert!(stance.right.position.y > 0.0);
    // The moving (right) hip sits higher than the pivot (left) hip.
    assert!(frame.hips.right.y > frame.hips.left.y);
}

#[test]
fn turning_follows_input() {
    let mut c = character();
    let up = Vector3::y();
    let input = Vector2::new(0.0, 1.0);
    let yaw = 90.0;
    let Some(command) = command_from_input(input, yaw, &Vector3::z(), &up) else {
        panic!("no command for forward input");
    };
    hold(&mut c, command, 300);

    let Command::Forward(desired) = command else {
        panic!("expected forward command");
    };
    let facing = c.stance().forward();
    let flat = facing - project(&facing, &up);
    assert!(angle(&flat, &desired) < 15.0, "facing {flat:?}, wanted {desired:?}");
}

#[test]
fn strafing_moves_sideways() {
    let mut c = character();
    let landed = hold(&mut c, Command::Right(Vector3::z()), 180);
    assert!(landed >= 4);
    // Right of a body facing +Z with +Y up is -X.
    assert!(c.position().x < -0.2);
    assert!(c.position().z.abs() < 0.1);
    // The leading foot never gets further than the strafe distance away.
    assert!(c.stance().width() <= CharacterConfig::default().gait.strafe + 1e-4);
}

#[test]
fn feet_settle_after_idle_delay() {
    let mut c = character();
    hold(&mut c, Command::Forward(Vector3::z()), 30);
    while c.is_animating() {
        c.update(None, DT);
    }
    assert_eq!(c.idle().state(), IdleState::Active);

    let mut settled = false;
    for _ in 0..180 {
        let frame = c.update(None, DT);
        if frame.stopped && c.idle().state() == IdleState::Idle {
            settled = true;
            break;
        }
    }
    assert!(settled, "idle step never completed");

    // Settled feet are spread apart and splayed symmetrically.
    let stance = c.stance();
    assert_relative_eq!(stance.width(), 0.3, epsilon = 1e-3);
    let splay = angle(&stance.left.forward, &stance.right.forward);
    assert_relative_eq!(splay, 20.0, epsilon = 1e-2);
}

#[test]
fn user_input_preempts_idle() {
    let mut c = character();
    hold(&mut c, Command::Forward(Vector3::z()), 30);
    while c.is_animating() {
        c.update(None, DT);
    }
    // Keep walking well past the idle delay; idle never interferes.
    let landed = hold(&mut c, Command::Back(Vector3::z()), 120);
    assert!(landed >= 3);
    assert_eq!(c.idle().state(), IdleState::Active);
}

#[test]
fn reset_mid_stride_restores_idle_pose() {
    let mut c = character();
    c.update(Some(Command::Left(Vector3::z())), DT);
    c.update(None, DT);
    let frame = c.reset(Vector3::new(2.0, 0.0, 2.0), -Vector3::z());
    assert!(frame.stopped);
    assert!(!frame.started);
    assert_eq!(c.stance().pivot, Foot::Left);
    assert!(!frame.animating);
    assert!(frame.left.is_drawable() && frame.right.is_drawable());
}

#[test]
fn degenerate_leg_plane_yields_no_mesh() {
    let driver = LegDriver::new(&LegConfig::default(), Vector3::y());
    // Foot forward lies along the hip-to-foot line: the plane has no normal.
    let segment = Segment::new(Vector3::new(0.0, 0.9, 0.0), Vector3::zeros(), Vector3::y());
    let leg = driver.drive(&segment);
    assert!(leg.mesh.is_none());
    assert!(leg.plane.projector().is_none());
    assert!(leg.pose.points().iter().flat_map(|p| p.iter()).all(|c| c.is_finite()));

    // A healthy leg next to it is unaffected.
    let healthy = driver.drive(&Segment::new(Vector3::new(0.0, 0.9, 0.0), Vector3::zeros(), Vector3::z()));
    assert!(healthy.mesh.is_some());
}

#[test]
fn collision_tracks_feet() {
    let mut c = character();
    let path = [Vector2::new(-2.0, 1.0), Vector2::new(2.0, 1.0)];
    assert!(!c.collides_with(&path, 0.2));
    hold(&mut c, Command::Forward(Vector3::z()), 120);
    c.update(None, DT);
    let z = c.position().z;
    let through_feet = [Vector2::new(-2.0, z), Vector2::new(2.0, z)];
    assert!(c.collides_with(&through_feet, 0.4));
}

#[test]
fn coarse_frames_keep_both_edges() {
    let mut c = character();
    let dt = 0.5;
    assert!(dt > CharacterConfig::default().gait.min_animation_time);

    let (mut started, mut stopped) = (0, 0);
    for _ in 0..10 {
        let frame = c.update(Some(Command::Forward(Vector3::z())), dt);
        // Every step starts and lands inside the same update.
        assert_eq!(frame.started, frame.stopped);
        started += usize::from(frame.started);
        stopped += usize::from(frame.stopped);
    }
    assert_eq!(started, 10);
    assert_eq!(stopped, 10);
    assert!(!c.is_animating());
    assert_eq!(c.idle().state(), IdleState::Active);
}
