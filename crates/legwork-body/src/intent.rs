//! Mapping planar movement input to gait commands.

use legwork_core::math::rotate_about;
use legwork_gait::Command;
use nalgebra::{Vector2, Vector3};

/// Command for a planar `input` (`x` right, `y` forward) seen from a camera
/// turned `yaw` degrees counter-clockwise about `up` from
/// `reference_forward`.
///
/// Forward input wins over back, back over right, right over left. Strafes
/// keep facing the camera direction; a back step faces away from its
/// travel. `None` when there is no input.
pub fn command_from_input(
    input: Vector2<f32>,
    yaw: f32,
    reference_forward: &Vector3<f32>,
    up: &Vector3<f32>,
) -> Option<Command> {
    // Counter-clockwise heading of the input, 0 for straight ahead.
    let heading = (-input.x).atan2(input.y).to_degrees();
    let facing = |offset: f32| rotate_about(reference_forward, up, yaw + heading + offset);

    if input.y > 0.5 {
        Some(Command::Forward(facing(0.0)))
    } else if input.y < -0.5 {
        Some(Command::Back(facing(180.0)))
    } else if input.x > 0.5 {
        Some(Command::Right(facing(90.0)))
    } else if input.x < -0.5 {
        Some(Command::Left(facing(-90.0)))
    } else {
        None
    }
}
