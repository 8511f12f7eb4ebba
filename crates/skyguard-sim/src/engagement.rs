//! Engagement records — one attack attempt from selection to resolution.
//!
//! Stored in `DroneEngine`'s engagement map, NOT as ECS entities.

use hecs::Entity;

/// One pending engagement: a selected target and its resolution deadline.
#[derive(Debug, Clone)]
pub struct Engagement {
    pub id: u32,
    /// The drone that started this engagement.
    pub drone_id: u32,
    /// The selected target. May vanish before the deadline; resolution
    /// then skips the destructive step.
    pub target: Entity,
    /// Tick at which the engagement started.
    pub started_tick: u64,
    /// Tick at which the destructive outcome fires.
    pub resolve_at_tick: u64,
}
