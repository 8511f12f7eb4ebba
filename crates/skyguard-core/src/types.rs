//! Fundamental geometric and simulation types.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DT, TICK_RATE};

/// Identity of an actor (player or NPC) in the host session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ActorId(pub u64);

/// Position and orientation of a body in world space.
/// x = East, y = North, z = Up. Yaw 0 = North, clockwise toward East.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Pose {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at a position with identity orientation (level, facing North).
    pub fn at(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}

/// Body velocity in world space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Number of whole ticks covering `secs` of simulation time (at least one).
pub fn duration_ticks(secs: f64) -> u64 {
    ((secs / DT).ceil() as u64).max(1)
}
