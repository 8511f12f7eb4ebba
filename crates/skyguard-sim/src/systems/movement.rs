//! Body motion integration: actuator easing and ballistic free fall.

use glam::DVec3;
use hecs::World;

use skyguard_core::components::{Collidable, Collider, FreeFall, PoseActuator};
use skyguard_core::constants::{DT, GRAVITY};
use skyguard_core::types::{Pose, Velocity};

/// Ease every actuated body toward its commanded pose and derive its
/// velocity from the motion. Runs after flight commands are written and
/// before the attack check, so firing uses this tick's position.
pub fn run(world: &mut World) {
    for (_entity, (pose, actuator, velocity)) in
        world.query_mut::<(&mut Pose, &PoseActuator, &mut Velocity)>()
    {
        let alpha = (actuator.responsiveness * DT).min(1.0);
        let new_position = pose.position.lerp(actuator.target.position, alpha);
        velocity.0 = (new_position - pose.position) / DT;
        pose.position = new_position;
        pose.orientation = pose.orientation.slerp(actuator.target.orientation, alpha);
    }

    // Bodies released from their actuator fall ballistically and come to
    // rest on the ground plane once collidable.
    for (_entity, (pose, velocity, _fall, collider, collidable)) in world.query_mut::<(
        &mut Pose,
        &mut Velocity,
        &FreeFall,
        &Collider,
        &Collidable,
    )>() {
        velocity.0.z -= GRAVITY * DT;
        pose.position += velocity.0 * DT;
        if collidable.enabled && pose.position.z < collider.radius {
            pose.position.z = collider.radius;
            velocity.0 = DVec3::ZERO;
        }
    }
}
