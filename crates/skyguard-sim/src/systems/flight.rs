//! Flight controller — converts a desired pose into bounded, banked motion.
//!
//! The position command passes through untouched; the smoothing actuator
//! downstream eases the body toward it. The orientation command banks the
//! body into its direction of travel, clamped so abrupt velocity changes
//! can never flip it.

use glam::{DQuat, DVec3};
use hecs::World;

use skyguard_core::components::PoseActuator;
use skyguard_core::config::DroneConfig;
use skyguard_core::constants::TILT_SENSITIVITY;
use skyguard_core::math;
use skyguard_core::types::{Pose, Velocity};

use crate::drone::Drone;
use crate::world_setup::actor_body;

/// A commanded pose for a body's actuator.
#[derive(Debug, Clone, Copy)]
pub struct FlightCommand {
    pub position: DVec3,
    pub orientation: DQuat,
}

/// Clamped (pitch, roll) bank angles for a local-frame velocity.
/// Forward speed pitches the body into the motion; lateral speed rolls it.
pub fn tilt_angles(local_velocity: DVec3, max_tilt: f64) -> (f64, f64) {
    let pitch = (local_velocity.y * TILT_SENSITIVITY).clamp(-max_tilt, max_tilt);
    let roll = (-local_velocity.x * TILT_SENSITIVITY).clamp(-max_tilt, max_tilt);
    (pitch, roll)
}

/// Compute the position and orientation commands for one body.
///
/// The position passes through; the orientation combines the desired yaw
/// with bank angles derived from the body's local-frame velocity.
pub fn compute_command(
    current: &Pose,
    velocity_world: DVec3,
    desired_position: DVec3,
    desired_yaw: f64,
    config: &DroneConfig,
) -> FlightCommand {
    let local = math::world_to_local(current.orientation, velocity_world);
    let (pitch, roll) = tilt_angles(local, config.max_tilt_radians);
    let orientation = math::yaw_orientation(desired_yaw)
        * DQuat::from_rotation_x(pitch)
        * DQuat::from_rotation_y(roll);
    FlightCommand {
        position: desired_position,
        orientation,
    }
}

/// Per-tick flight update for one drone: hold station above the owner's
/// body, facing the owner's heading.
///
/// No-op while the owner has no body — the drone freezes in place until
/// the owner respawns. Bodies without an actuator degrade to direct pose
/// assignment (desired position and yaw, no banking, no easing).
pub fn run(world: &mut World, drone: &Drone) {
    let Some(owner_body) = actor_body(world, drone.owner) else {
        return;
    };
    let Ok(owner_pose) = world.get::<&Pose>(owner_body).map(|p| *p) else {
        return;
    };

    let desired_position = owner_pose.position + DVec3::Z * drone.config.hover_height;
    let desired_yaw = math::yaw_of(owner_pose.orientation);

    let Ok(body_pose) = world.get::<&Pose>(drone.body).map(|p| *p) else {
        return;
    };
    let velocity = world
        .get::<&Velocity>(drone.body)
        .map(|v| v.0)
        .unwrap_or_default();

    let command = compute_command(
        &body_pose,
        velocity,
        desired_position,
        desired_yaw,
        &drone.config,
    );

    if let Ok(mut actuator) = world.get::<&mut PoseActuator>(drone.body) {
        actuator.target = Pose::new(command.position, command.orientation);
        return;
    }

    if let Ok(mut pose) = world.get::<&mut Pose>(drone.body) {
        *pose = Pose::new(desired_position, math::yaw_orientation(desired_yaw));
    }
    if let Ok(mut velocity) = world.get::<&mut Velocity>(drone.body) {
        velocity.0 = DVec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::constants::DEFAULT_MAX_TILT_RADIANS;

    #[test]
    fn test_zero_velocity_produces_zero_tilt() {
        let (pitch, roll) = tilt_angles(DVec3::ZERO, DEFAULT_MAX_TILT_RADIANS);
        assert_eq!(pitch, 0.0);
        assert_eq!(roll, 0.0);
    }

    #[test]
    fn test_extreme_velocity_clamps_exactly_at_max_tilt() {
        let max = DEFAULT_MAX_TILT_RADIANS;
        let (pitch, _) = tilt_angles(DVec3::new(0.0, 1.0e6, 0.0), max);
        assert_eq!(pitch, max);

        let (pitch, _) = tilt_angles(DVec3::new(0.0, -1.0e6, 0.0), max);
        assert_eq!(pitch, -max);

        let (_, roll) = tilt_angles(DVec3::new(1.0e6, 0.0, 0.0), max);
        assert_eq!(roll, -max);
    }

    #[test]
    fn test_tilt_bounded_for_any_finite_velocity() {
        let max = DEFAULT_MAX_TILT_RADIANS;
        for magnitude in [0.0, 0.1, 1.0, 7.0, 50.0, 1.0e3, 1.0e9, f64::MAX / 4.0] {
            for direction in [
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(-1.0, 1.0, 0.0),
                DVec3::new(0.3, -0.7, 0.5),
            ] {
                let (pitch, roll) = tilt_angles(direction * magnitude, max);
                assert!(pitch.abs() <= max, "pitch {pitch} out of bounds");
                assert!(roll.abs() <= max, "roll {roll} out of bounds");
            }
        }
    }

    #[test]
    fn test_small_velocity_scales_by_sensitivity() {
        let (pitch, roll) = tilt_angles(DVec3::new(0.0, 4.0, 0.0), DEFAULT_MAX_TILT_RADIANS);
        assert!((pitch - 4.0 * TILT_SENSITIVITY).abs() < 1e-12);
        assert_eq!(roll, 0.0);
    }

    #[test]
    fn test_position_command_passes_through() {
        let config = DroneConfig::default();
        let desired = DVec3::new(3.0, -2.0, 10.0);
        let command = compute_command(&Pose::default(), DVec3::ZERO, desired, 0.0, &config);
        assert_eq!(command.position, desired);
    }

    #[test]
    fn test_stationary_command_faces_desired_yaw() {
        let config = DroneConfig::default();
        let yaw = 1.25;
        let command = compute_command(&Pose::default(), DVec3::ZERO, DVec3::ZERO, yaw, &config);
        assert!((math::yaw_of(command.orientation) - yaw).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_velocity_does_not_tilt() {
        let (pitch, roll) = tilt_angles(DVec3::new(0.0, 0.0, 9.0), DEFAULT_MAX_TILT_RADIANS);
        assert_eq!(pitch, 0.0);
        assert_eq!(roll, 0.0);
    }
}
