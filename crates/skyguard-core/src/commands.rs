//! Host commands relayed to drone controllers.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::config::DroneConfig;
use crate::types::ActorId;

/// All requests a host session can relay to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DroneCommand {
    /// Spawn a drone for `owner`. Held until the owner's body is ready,
    /// bounded by `OWNER_READY_WAIT_SECS`.
    Spawn {
        owner: ActorId,
        config: Option<DroneConfig>,
    },
    /// Remote request to toggle a drone's lamp. Honored only when
    /// `requested_by` is the drone's owner; otherwise silently ignored.
    ToggleLight { drone_id: u32, requested_by: ActorId },
    /// Begin teardown of a drone.
    Teardown { drone_id: u32 },
}
