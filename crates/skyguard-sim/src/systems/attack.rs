//! Attack sequencer — cooldown gate, target scan, engagement setup, and
//! deadline-driven resolution.
//!
//! The fire timestamp resets at engagement START, not at resolution, so
//! engagement starts are rate-bounded independently of effect duration.

use std::collections::BTreeMap;

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::{Beam, Fade, Highlighted, RemoveAfter, Transparency};
use skyguard_core::constants::DT;
use skyguard_core::enums::AttackPhase;
use skyguard_core::events::DroneEvent;
use skyguard_core::types::{duration_ticks, Pose, SimTime};

use crate::drone::Drone;
use crate::engagement::Engagement;
use crate::systems::targeting;
use crate::world_setup::actor_body;

/// Per-tick sequencer check for one drone.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    drone: &mut Drone,
    engagements: &mut BTreeMap<u32, Engagement>,
    next_engagement_id: &mut u32,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<DroneEvent>,
    time: &SimTime,
) {
    if !drone.active {
        return;
    }

    // Cooldown gate: no scan until the minimum interval has elapsed.
    if let Some(last) = drone.last_fire_tick {
        let elapsed = time.tick.saturating_sub(last) as f64 * DT;
        if elapsed <= drone.config.fire_interval_secs {
            drone.phase = AttackPhase::Cooldown;
            return;
        }
    }

    drone.phase = AttackPhase::Scanning;

    let Ok(origin) = world.get::<&Pose>(drone.body).map(|p| p.position) else {
        return;
    };
    let mut exclude = vec![drone.body];
    if let Some(owner_body) = actor_body(world, drone.owner) {
        exclude.push(owner_body);
    }

    let Some(target) = targeting::select_target(world, origin, &exclude, drone.config.max_range)
    else {
        // Nothing visible: back to cooldown; the scan repeats next tick.
        drone.phase = AttackPhase::Cooldown;
        return;
    };

    drone.phase = AttackPhase::Engaging;
    drone.last_fire_tick = Some(time.tick);

    let target_position = match world.get::<&Pose>(target) {
        Ok(pose) => pose.position,
        Err(_) => return,
    };

    let effect_ticks = duration_ticks(drone.config.effect_duration_secs);
    let resolve_at_tick = time.tick + effect_ticks;

    spawn_beam(
        world,
        rng,
        origin,
        target_position,
        drone,
        time.tick,
        effect_ticks,
    );
    let _ = world.insert_one(
        target,
        Highlighted {
            until_tick: resolve_at_tick,
        },
    );

    let id = *next_engagement_id;
    *next_engagement_id += 1;
    engagements.insert(
        id,
        Engagement {
            id,
            drone_id: drone.id,
            target,
            started_tick: time.tick,
            resolve_at_tick,
        },
    );

    events.push(DroneEvent::TargetEngaged {
        drone_id: drone.id,
        target_id: target.to_bits().get(),
        from: origin,
        to: target_position,
    });

    drone.phase = AttackPhase::Resolving;
}

/// Resolve engagements whose deadline has passed. The destructive effect
/// applies only if the owning drone is still active and the target still
/// exists; a vanished target is skipped silently.
pub fn resolve_due(
    world: &mut World,
    drones: &mut BTreeMap<u32, Drone>,
    engagements: &mut BTreeMap<u32, Engagement>,
    events: &mut Vec<DroneEvent>,
    despawn_buffer: &mut Vec<Entity>,
    time: &SimTime,
) {
    let due: Vec<u32> = engagements
        .values()
        .filter(|e| time.tick >= e.resolve_at_tick)
        .map(|e| e.id)
        .collect();

    for id in due {
        let Some(engagement) = engagements.remove(&id) else {
            continue;
        };

        let drone_active = drones
            .get(&engagement.drone_id)
            .is_some_and(|d| d.active);
        if drone_active && world.contains(engagement.target) {
            despawn_buffer.push(engagement.target);
            events.push(DroneEvent::TargetDestroyed {
                drone_id: engagement.drone_id,
                target_id: engagement.target.to_bits().get(),
            });
        }

        if let Some(drone) = drones.get_mut(&engagement.drone_id) {
            if drone.phase == AttackPhase::Resolving {
                drone.phase = AttackPhase::Cooldown;
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Spawn the jittered beam polyline with its fade-out and scheduled removal.
fn spawn_beam(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    from: DVec3,
    to: DVec3,
    drone: &Drone,
    now_tick: u64,
    effect_ticks: u64,
) -> Entity {
    let points = beam_points(
        rng,
        from,
        to,
        drone.config.effect_segments,
        drone.config.effect_jitter,
    );
    world.spawn((
        Beam { points },
        Transparency { value: 0.0 },
        Fade {
            start_value: 0.0,
            target_value: 1.0,
            start_tick: now_tick,
            duration_ticks: effect_ticks,
        },
        RemoveAfter {
            at_tick: now_tick + effect_ticks,
        },
    ))
}

/// Straight chain from `from` to `to` with every interior vertex offset by
/// up to `jitter` on each axis.
fn beam_points(
    rng: &mut ChaCha8Rng,
    from: DVec3,
    to: DVec3,
    segments: u32,
    jitter: f64,
) -> Vec<DVec3> {
    let segments = segments.max(1) as usize;
    let mut points = Vec::with_capacity(segments + 1);
    points.push(from);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        let mut point = from.lerp(to, t);
        if jitter > 0.0 {
            point.x += rng.gen_range(-jitter..=jitter);
            point.y += rng.gen_range(-jitter..=jitter);
            point.z += rng.gen_range(-jitter..=jitter);
        }
        points.push(point);
    }
    points.push(to);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_beam_points_span_endpoints() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let from = DVec3::new(0.0, 0.0, 6.0);
        let to = DVec3::new(10.0, 0.0, 1.0);
        let points = beam_points(&mut rng, from, to, 20, 2.0);

        assert_eq!(points.len(), 21);
        assert_eq!(points[0], from);
        assert_eq!(*points.last().unwrap(), to);
    }

    #[test]
    fn test_beam_jitter_stays_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let from = DVec3::ZERO;
        let to = DVec3::new(20.0, 0.0, 0.0);
        let jitter = 2.0;
        let points = beam_points(&mut rng, from, to, 20, jitter);

        for (i, point) in points.iter().enumerate() {
            let t = i as f64 / 20.0;
            let base = from.lerp(to, t);
            assert!((point.x - base.x).abs() <= jitter + 1e-9);
            assert!((point.y - base.y).abs() <= jitter + 1e-9);
            assert!((point.z - base.z).abs() <= jitter + 1e-9);
        }
    }

    #[test]
    fn test_zero_jitter_yields_straight_beam() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let from = DVec3::ZERO;
        let to = DVec3::new(12.0, 0.0, 0.0);
        let points = beam_points(&mut rng, from, to, 4, 0.0);

        assert_eq!(points.len(), 5);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(*point, from.lerp(to, i as f64 / 4.0));
        }
    }

    #[test]
    fn test_degenerate_segment_count_still_produces_a_line() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let points = beam_points(&mut rng, DVec3::ZERO, DVec3::X, 0, 1.0);
        assert_eq!(points.len(), 2);
    }
}
