//! Drone controller engine for SKYGUARD.
//!
//! Owns the hecs ECS world, runs the per-tick control loop
//! (flight → attack → effects → cleanup), and produces `SimSnapshot`s
//! for the host. Completely headless, enabling deterministic testing.

pub mod drone;
pub mod engagement;
pub mod engine;
pub mod raycast;
pub mod systems;
pub mod world_setup;

pub use engine::{DroneEngine, SimConfig};
pub use skyguard_core as core;
