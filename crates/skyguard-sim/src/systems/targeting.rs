//! Target selection — closest unoccluded target within range.

use glam::DVec3;
use hecs::{Entity, World};

use skyguard_core::components::{BodyGroup, Targetable};
use skyguard_core::types::Pose;

use crate::raycast;

/// Scan all targetable entities and pick the nearest one with a clear line
/// of sight from `origin`, within `max_range`.
///
/// Entities in `exclude` (the drone's own body, the owner's body) never
/// block the ray. A candidate qualifies when the ray's first hit is the
/// candidate itself or a body in its group — anything else occludes it.
/// On exact distance ties the first candidate enumerated wins. Read-only.
pub fn select_target(
    world: &World,
    origin: DVec3,
    exclude: &[Entity],
    max_range: f64,
) -> Option<Entity> {
    let mut best_range = max_range;
    let mut best: Option<Entity> = None;

    let mut query = world.query::<(&Targetable, &Pose)>();
    for (candidate, (_tag, pose)) in query.iter() {
        let distance = origin.distance(pose.position);
        if distance >= best_range {
            continue;
        }
        let Some(hit) = raycast::cast_ray(world, origin, pose.position, exclude) else {
            continue;
        };
        if hit.entity == candidate || same_group(world, hit.entity, candidate) {
            best_range = distance;
            best = Some(candidate);
        }
    }
    best
}

/// Whether two bodies belong to the same logical group (parts of one model).
fn same_group(world: &World, a: Entity, b: Entity) -> bool {
    let (Ok(group_a), Ok(group_b)) = (world.get::<&BodyGroup>(a), world.get::<&BodyGroup>(b))
    else {
        return false;
    };
    *group_a == *group_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::{spawn_obstacle, spawn_target};
    use skyguard_core::components::Collider;

    const ORIGIN: DVec3 = DVec3::new(0.0, 0.0, 6.0);

    #[test]
    fn test_selects_nearest_unobstructed_target() {
        let mut world = World::new();
        let near = spawn_target(&mut world, DVec3::new(0.0, 10.0, 1.0), 1.0, 1);
        let far = spawn_target(&mut world, DVec3::new(0.0, 20.0, 1.0), 1.0, 2);

        let selected = select_target(&world, ORIGIN, &[], 30.0);
        assert_eq!(selected, Some(near));
        assert_ne!(selected, Some(far));
    }

    #[test]
    fn test_occluded_near_target_loses_to_clear_far_target() {
        let mut world = World::new();
        let near = spawn_target(&mut world, DVec3::new(0.0, 10.0, 6.0), 1.0, 1);
        let far = spawn_target(&mut world, DVec3::new(10.0, 0.0, 6.0), 1.0, 2);
        // Wall between origin and the near target
        spawn_obstacle(&mut world, DVec3::new(0.0, 5.0, 6.0), 2.0);

        let selected = select_target(&world, ORIGIN, &[], 30.0);
        assert_eq!(selected, Some(far));
        assert_ne!(selected, Some(near));
    }

    #[test]
    fn test_out_of_range_target_is_ignored() {
        let mut world = World::new();
        spawn_target(&mut world, DVec3::new(0.0, 50.0, 6.0), 1.0, 1);

        assert_eq!(select_target(&world, ORIGIN, &[], 30.0), None);
    }

    #[test]
    fn test_empty_world_yields_none() {
        let world = World::new();
        assert_eq!(select_target(&world, ORIGIN, &[], 30.0), None);
    }

    #[test]
    fn test_fully_occluded_set_yields_none() {
        let mut world = World::new();
        spawn_target(&mut world, DVec3::new(0.0, 10.0, 6.0), 1.0, 1);
        spawn_obstacle(&mut world, DVec3::new(0.0, 5.0, 6.0), 2.0);

        assert_eq!(select_target(&world, ORIGIN, &[], 30.0), None);
    }

    #[test]
    fn test_excluded_bodies_do_not_occlude() {
        let mut world = World::new();
        let target = spawn_target(&mut world, DVec3::new(0.0, 10.0, 6.0), 1.0, 1);
        // A body in the way, but excluded (e.g. the owner's own body)
        let owner_body = spawn_obstacle(&mut world, DVec3::new(0.0, 5.0, 6.0), 2.0);

        let selected = select_target(&world, ORIGIN, &[owner_body], 30.0);
        assert_eq!(selected, Some(target));
    }

    #[test]
    fn test_sibling_part_of_same_group_does_not_occlude() {
        let mut world = World::new();
        // A non-targetable part of the same model sits in front of the
        // candidate part; a first hit within the group counts as clear.
        world.spawn((
            Pose::at(DVec3::new(0.0, 8.0, 6.0)),
            Collider { radius: 1.0 },
            BodyGroup { group: 7 },
        ));
        let candidate = spawn_target(&mut world, DVec3::new(0.0, 10.0, 6.0), 1.0, 7);

        assert_eq!(select_target(&world, ORIGIN, &[], 30.0), Some(candidate));
    }

    #[test]
    fn test_exact_tie_keeps_first_enumerated() {
        let mut world = World::new();
        let first = spawn_target(&mut world, DVec3::new(0.0, 10.0, 6.0), 1.0, 1);
        let second = spawn_target(&mut world, DVec3::new(0.0, -10.0, 6.0), 1.0, 2);

        let selected = select_target(&world, ORIGIN, &[], 30.0);
        // Both are at range 10; the first spawned is enumerated first and
        // a later equal-range candidate must not displace it.
        assert_eq!(selected, Some(first));
        let _ = second;
    }
}
