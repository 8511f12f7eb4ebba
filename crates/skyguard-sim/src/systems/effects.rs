//! Property interpolation service: transparency fades and highlight expiry.

use hecs::{Entity, World};

use skyguard_core::components::{Fade, Highlighted, Transparency};
use skyguard_core::math;

/// Advance all fades, then drop finished fades and stale highlights.
pub fn run(world: &mut World, current_tick: u64) {
    let mut finished: Vec<Entity> = Vec::new();
    for (entity, (fade, transparency)) in world.query_mut::<(&Fade, &mut Transparency)>() {
        let t = if fade.duration_ticks == 0 {
            1.0
        } else {
            (current_tick.saturating_sub(fade.start_tick) as f64 / fade.duration_ticks as f64)
                .clamp(0.0, 1.0)
        };
        transparency.value = math::lerp(fade.start_value, fade.target_value, t);
        if t >= 1.0 {
            finished.push(entity);
        }
    }
    for entity in finished {
        let _ = world.remove_one::<Fade>(entity);
    }

    let expired: Vec<Entity> = {
        let mut query = world.query::<&Highlighted>();
        query
            .iter()
            .filter(|(_, highlight)| current_tick >= highlight.until_tick)
            .map(|(entity, _)| entity)
            .collect()
    };
    for entity in expired {
        let _ = world.remove_one::<Highlighted>(entity);
    }
}
