//! Drone controller records — one per spawned drone, owned by the engine.
//!
//! Stored in `DroneEngine`'s drone map, NOT as ECS entities; only the
//! drone's body lives in the world.

use hecs::Entity;

use skyguard_core::config::DroneConfig;
use skyguard_core::enums::AttackPhase;
use skyguard_core::types::ActorId;

/// Controller state for one drone.
#[derive(Debug, Clone)]
pub struct Drone {
    pub id: u32,
    /// The actor this drone serves. Its body is looked up every tick and
    /// may be absent at any time (owner respawning).
    pub owner: ActorId,
    pub config: DroneConfig,
    /// The drone's body entity in the world.
    pub body: Entity,
    /// False once teardown begins; all further ticks and events are no-ops.
    pub active: bool,
    /// Attack sequencer phase, for snapshots.
    pub phase: AttackPhase,
    /// Tick of the last engagement start. `None` allows immediate first fire.
    pub last_fire_tick: Option<u64>,
    /// Event registrations held for this drone's lifetime.
    pub subscriptions: Subscriptions,
}

/// The set of live event registrations acquired at spawn and released
/// exactly once at teardown, on every exit path.
#[derive(Debug, Clone)]
pub struct Subscriptions {
    tick: bool,
    light_toggle: bool,
}

impl Subscriptions {
    /// Register the per-tick driver and the light-toggle listener.
    pub fn registered() -> Self {
        Self {
            tick: true,
            light_toggle: true,
        }
    }

    /// Release all registrations. Safe to call more than once.
    pub fn release(&mut self) {
        self.tick = false;
        self.light_toggle = false;
    }

    /// Whether the per-tick driver is still registered.
    pub fn tick_live(&self) -> bool {
        self.tick
    }

    /// Whether the light-toggle listener is still registered.
    pub fn light_live(&self) -> bool {
        self.light_toggle
    }
}
