//! Simulation snapshot — the complete visible state built after each tick.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::AttackPhase;
use crate::events::DroneEvent;
use crate::types::{ActorId, SimTime};

/// Complete snapshot handed to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub drones: Vec<DroneView>,
    pub targets: Vec<TargetView>,
    pub beams: Vec<BeamView>,
    pub events: Vec<DroneEvent>,
}

/// A drone's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub drone_id: u32,
    pub owner: ActorId,
    pub position: DVec3,
    pub orientation: DQuat,
    pub phase: AttackPhase,
    pub light_enabled: bool,
    /// Seconds until the next scan is allowed (0 when ready).
    pub cooldown_remaining_secs: f64,
    pub active: bool,
    /// Actor holding simulation authority over the body, if any.
    pub authority: Option<ActorId>,
}

/// A target's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub target_id: u64,
    pub position: DVec3,
    pub highlighted: bool,
}

/// A beam effect in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub points: Vec<DVec3>,
    pub transparency: f64,
}
