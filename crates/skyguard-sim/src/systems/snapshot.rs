//! Snapshot system: queries the world and builds a complete SimSnapshot.
//!
//! This system is read-only — it never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use skyguard_core::components::{Authority, Beam, Highlighted, Light, Targetable, Transparency};
use skyguard_core::constants::DT;
use skyguard_core::events::DroneEvent;
use skyguard_core::state::{BeamView, DroneView, SimSnapshot, TargetView};
use skyguard_core::types::{Pose, SimTime};

use crate::drone::Drone;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    drones: &BTreeMap<u32, Drone>,
    events: Vec<DroneEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        drones: build_drones(world, time, drones),
        targets: build_targets(world),
        beams: build_beams(world),
        events,
    }
}

/// Build DroneView list from the engine's drone records.
fn build_drones(world: &World, time: &SimTime, drones: &BTreeMap<u32, Drone>) -> Vec<DroneView> {
    drones
        .values()
        .filter_map(|drone| {
            let pose = world.get::<&Pose>(drone.body).ok().map(|p| *p)?;
            let light_enabled = world
                .get::<&Light>(drone.body)
                .map(|light| light.enabled)
                .unwrap_or(false);
            let authority = world
                .get::<&Authority>(drone.body)
                .ok()
                .map(|authority| authority.actor);
            let cooldown_remaining_secs = drone.last_fire_tick.map_or(0.0, |last| {
                (drone.config.fire_interval_secs - time.tick.saturating_sub(last) as f64 * DT)
                    .max(0.0)
            });

            Some(DroneView {
                drone_id: drone.id,
                owner: drone.owner,
                position: pose.position,
                orientation: pose.orientation,
                phase: drone.phase,
                light_enabled,
                cooldown_remaining_secs,
                active: drone.active,
                authority,
            })
        })
        .collect()
}

/// Build TargetView list from all targetable entities.
fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = {
        let mut query = world.query::<(&Targetable, &Pose)>();
        query
            .iter()
            .map(|(entity, (_tag, pose))| TargetView {
                target_id: entity.to_bits().get(),
                position: pose.position,
                highlighted: world.get::<&Highlighted>(entity).is_ok(),
            })
            .collect()
    };
    targets.sort_by_key(|target| target.target_id);
    targets
}

/// Build BeamView list from all beam entities.
fn build_beams(world: &World) -> Vec<BeamView> {
    let mut query = world.query::<(&Beam, &Transparency)>();
    query
        .iter()
        .map(|(_, (beam, transparency))| BeamView {
            points: beam.points.clone(),
            transparency: transparency.value,
        })
        .collect()
}
