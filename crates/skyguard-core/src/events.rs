//! Events emitted by the simulation for host and frontend feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::SpawnError;
use crate::types::ActorId;

/// Feedback events drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DroneEvent {
    /// A drone finished spawning and is following its owner.
    DroneSpawned { drone_id: u32, owner: ActorId },
    /// A queued spawn expired without the owner's body becoming ready.
    SpawnFailed { owner: ActorId, reason: SpawnError },
    /// An engagement started: beam fired from the drone to the target.
    TargetEngaged {
        drone_id: u32,
        target_id: u64,
        from: DVec3,
        to: DVec3,
    },
    /// An engagement resolved and removed its target.
    TargetDestroyed { drone_id: u32, target_id: u64 },
    /// The owner toggled the drone's lamp.
    LightToggled { drone_id: u32, enabled: bool },
    /// Teardown released the body and started its fade-out.
    DroneFadingOut { drone_id: u32 },
    /// The drone's body left the world.
    DroneRemoved { drone_id: u32 },
}
