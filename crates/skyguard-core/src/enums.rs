//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Attack sequencer phase. Cyclic while the drone is active; teardown may
/// interrupt at any phase without error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Waiting out the minimum interval since the last engagement start.
    #[default]
    Cooldown,
    /// Cooldown elapsed; a target scan runs this tick.
    Scanning,
    /// A target was selected this tick; effect and deadline are being set up.
    Engaging,
    /// An engagement's destructive outcome is pending its deadline.
    Resolving,
}

/// Spawn failure surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnError {
    /// The owner had no controllable body within the bounded wait.
    OwnerNotReady,
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnError::OwnerNotReady => write!(f, "owner has no controllable body"),
        }
    }
}

impl std::error::Error for SpawnError {}
