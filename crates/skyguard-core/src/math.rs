//! Orientation and interpolation helpers shared by flight control and effects.

use glam::{DQuat, DVec3};

/// Linear interpolation between `a` and `b` by `t` in `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A world-space vector expressed in the local frame of `orientation`.
pub fn world_to_local(orientation: DQuat, world: DVec3) -> DVec3 {
    orientation.inverse() * world
}

/// Orientation for a yaw angle (radians, 0 = North (+Y), clockwise toward East).
pub fn yaw_orientation(yaw: f64) -> DQuat {
    DQuat::from_rotation_z(-yaw)
}

/// Yaw angle of an orientation, from the horizontal projection of its
/// forward axis. Well-defined as long as the body is not pitched vertical.
pub fn yaw_of(orientation: DQuat) -> f64 {
    let forward = orientation * DVec3::Y;
    forward.x.atan2(forward.y).rem_euclid(std::f64::consts::TAU)
}

/// Yaw that faces `to` from `from` in the horizontal plane.
/// Falls back to 0 when the points coincide horizontally.
pub fn yaw_toward(from: DVec3, to: DVec3) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return 0.0;
    }
    dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
}
