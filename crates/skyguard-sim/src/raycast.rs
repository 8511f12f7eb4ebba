//! Visibility rays against sphere colliders.

use glam::DVec3;
use hecs::{Entity, World};

use skyguard_core::components::Collider;
use skyguard_core::types::Pose;

/// First collider hit along a ray.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub entity: Entity,
    /// Distance from the ray origin to the hit point.
    pub distance: f64,
}

/// Cast a ray from `from` toward `to`, skipping entities in `exclude`.
/// Returns the first collider hit within the segment, or None.
pub fn cast_ray(world: &World, from: DVec3, to: DVec3, exclude: &[Entity]) -> Option<RayHit> {
    let delta = to - from;
    let max_dist = delta.length();
    if max_dist <= f64::EPSILON {
        return None;
    }
    let dir = delta / max_dist;

    let mut best: Option<RayHit> = None;
    let mut query = world.query::<(&Pose, &Collider)>();
    for (entity, (pose, collider)) in query.iter() {
        if exclude.contains(&entity) {
            continue;
        }
        let Some(distance) = ray_sphere(from, dir, max_dist, pose.position, collider.radius)
        else {
            continue;
        };
        if best.map_or(true, |hit| distance < hit.distance) {
            best = Some(RayHit { entity, distance });
        }
    }
    best
}

/// Distance along the ray to the near intersection with a sphere, if it
/// lies within `[0, max_dist]`. A ray starting inside the sphere hits at 0.
fn ray_sphere(origin: DVec3, dir: DVec3, max_dist: f64, center: DVec3, radius: f64) -> Option<f64> {
    let to_center = center - origin;
    if to_center.length_squared() <= radius * radius {
        return Some(0.0);
    }
    let along = to_center.dot(dir);
    if along < 0.0 {
        return None;
    }
    let closest_sq = to_center.length_squared() - along * along;
    if closest_sq > radius * radius {
        return None;
    }
    let half_chord = (radius * radius - closest_sq).sqrt();
    let t = along - half_chord;
    (t >= 0.0 && t <= max_dist).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world_with_sphere(center: DVec3, radius: f64) -> (World, Entity) {
        let mut world = World::new();
        let entity = world.spawn((Pose::at(center), Collider { radius }));
        (world, entity)
    }

    #[test]
    fn test_ray_hits_sphere_on_path() {
        let (world, sphere) = make_world_with_sphere(DVec3::new(0.0, 10.0, 0.0), 1.0);
        let hit = cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[]).unwrap();
        assert_eq!(hit.entity, sphere);
        assert!((hit.distance - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_misses_offset_sphere() {
        let (world, _) = make_world_with_sphere(DVec3::new(5.0, 10.0, 0.0), 1.0);
        assert!(cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_ray_ignores_sphere_behind_origin() {
        let (world, _) = make_world_with_sphere(DVec3::new(0.0, -10.0, 0.0), 1.0);
        assert!(cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_ray_ignores_sphere_beyond_segment_end() {
        let (world, _) = make_world_with_sphere(DVec3::new(0.0, 30.0, 0.0), 1.0);
        assert!(cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_ray_returns_nearest_of_two() {
        let mut world = World::new();
        let far = world.spawn((Pose::at(DVec3::new(0.0, 15.0, 0.0)), Collider { radius: 1.0 }));
        let near = world.spawn((Pose::at(DVec3::new(0.0, 5.0, 0.0)), Collider { radius: 1.0 }));
        let hit = cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[]).unwrap();
        assert_eq!(hit.entity, near);
        assert_ne!(hit.entity, far);
    }

    #[test]
    fn test_ray_respects_exclusion() {
        let mut world = World::new();
        let near = world.spawn((Pose::at(DVec3::new(0.0, 5.0, 0.0)), Collider { radius: 1.0 }));
        let far = world.spawn((Pose::at(DVec3::new(0.0, 15.0, 0.0)), Collider { radius: 1.0 }));
        let hit = cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[near]).unwrap();
        assert_eq!(hit.entity, far);
    }

    #[test]
    fn test_ray_from_inside_sphere_hits_at_zero() {
        let (world, sphere) = make_world_with_sphere(DVec3::ZERO, 2.0);
        let hit = cast_ray(&world, DVec3::ZERO, DVec3::new(0.0, 20.0, 0.0), &[]).unwrap();
        assert_eq!(hit.entity, sphere);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_degenerate_ray_returns_none() {
        let (world, _) = make_world_with_sphere(DVec3::ZERO, 2.0);
        assert!(cast_ray(&world, DVec3::ONE, DVec3::ONE, &[]).is_none());
    }
}
