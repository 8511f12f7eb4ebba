//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Controller logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::{ActorId, Pose};

/// Marks a body as controlled by an actor — the "owner body" drones follow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActorBody {
    pub actor: ActorId,
}

/// Marks an entity as an eligible attack target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Targetable;

/// Logical grouping of bodies (all parts of one model share a group).
/// A visibility ray whose first hit is in the candidate's group counts as clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyGroup {
    pub group: u32,
}

/// Sphere collider used by visibility rays and ground contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Whether the body participates in collision. Drones fly non-colliding and
/// become colliding when released at teardown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collidable {
    pub enabled: bool,
}

/// Visual transparency: 0.0 opaque, 1.0 invisible.
/// Presence of this component marks a body as supporting fades.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transparency {
    pub value: f64,
}

/// The drone's lamp sub-object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Light {
    pub enabled: bool,
}

/// Smoothing actuator: eases the body toward a commanded pose.
/// Absent on bodies without physics support; callers degrade to direct
/// pose assignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoseActuator {
    pub target: Pose,
    /// Fraction of the remaining error closed per second.
    pub responsiveness: f64,
}

/// An in-flight transparency transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fade {
    pub start_value: f64,
    pub target_value: f64,
    pub start_tick: u64,
    pub duration_ticks: u64,
}

/// Scheduled removal of the entity at a future tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RemoveAfter {
    pub at_tick: u64,
}

/// Marks a target as highlighted for the duration of an engagement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Highlighted {
    pub until_tick: u64,
}

/// Jittered beam polyline from a drone to its target (visual only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub points: Vec<DVec3>,
}

/// Ballistic free fall for bodies released from their actuator at teardown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FreeFall;

/// Simulation authority hint: the actor whose session should own this
/// body's physics for responsiveness. Advisory only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Authority {
    pub actor: ActorId,
}
