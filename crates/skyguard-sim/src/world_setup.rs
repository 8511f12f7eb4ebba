//! Entity spawn factories for host worlds and tests.

use glam::DVec3;
use hecs::{Entity, World};

use skyguard_core::components::{ActorBody, BodyGroup, Collider, Targetable};
use skyguard_core::math;
use skyguard_core::types::{ActorId, Pose, Velocity};

/// First body controlled by `actor`, if one is present.
pub fn actor_body(world: &World, actor: ActorId) -> Option<Entity> {
    let mut query = world.query::<&ActorBody>();
    query
        .iter()
        .find(|(_, body)| body.actor == actor)
        .map(|(entity, _)| entity)
}

/// Spawn a controllable body for an actor, facing `yaw`.
pub fn spawn_actor_body(world: &mut World, actor: ActorId, position: DVec3, yaw: f64) -> Entity {
    world.spawn((
        ActorBody { actor },
        Pose::new(position, math::yaw_orientation(yaw)),
        Velocity::default(),
        Collider { radius: 1.0 },
    ))
}

/// Spawn a targetable body. Bodies sharing `group` count as one model for
/// line-of-sight validation.
pub fn spawn_target(world: &mut World, position: DVec3, radius: f64, group: u32) -> Entity {
    world.spawn((
        Targetable,
        Pose::at(position),
        Collider { radius },
        BodyGroup { group },
    ))
}

/// Spawn a static occluder (wall, prop) that blocks visibility rays.
pub fn spawn_obstacle(world: &mut World, position: DVec3, radius: f64) -> Entity {
    world.spawn((Pose::at(position), Collider { radius }))
}
