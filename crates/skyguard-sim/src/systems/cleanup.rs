//! Cleanup system: removes expired bodies and drops finished drone records.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use skyguard_core::components::RemoveAfter;
use skyguard_core::events::DroneEvent;

use crate::drone::Drone;

/// Despawn entities whose scheduled removal has arrived, then drop
/// inactive drone records whose bodies are gone.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    drones: &mut BTreeMap<u32, Drone>,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<DroneEvent>,
    current_tick: u64,
) {
    despawn_buffer.clear();
    for (entity, remove) in world.query_mut::<&RemoveAfter>() {
        if current_tick >= remove.at_tick {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    let finished: Vec<u32> = drones
        .values()
        .filter(|drone| !drone.active && !world.contains(drone.body))
        .map(|drone| drone.id)
        .collect();
    for id in finished {
        drones.remove(&id);
        events.push(DroneEvent::DroneRemoved { drone_id: id });
    }
}
