//! Per-tick systems that operate on the simulation world.
//!
//! Systems are free functions over `&mut World` (or `&World` when
//! read-only). Controller state lives in the engine's records, not here.

pub mod attack;
pub mod cleanup;
pub mod effects;
pub mod flight;
pub mod movement;
pub mod snapshot;
pub mod targeting;
