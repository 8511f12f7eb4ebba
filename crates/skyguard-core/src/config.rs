//! Per-drone tuning configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Immutable per-instance drone tuning.
///
/// All numeric fields are non-negative and the tilt limit stays below a
/// quarter turn; `sanitized` enforces both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneConfig {
    /// Hover height above the owner's body (units).
    pub hover_height: f64,
    /// Maximum target detection range (units).
    pub max_range: f64,
    /// Beam effect duration; the destructive step fires when it ends (seconds).
    pub effect_duration_secs: f64,
    /// Number of beam segments.
    pub effect_segments: u32,
    /// Maximum random offset applied to each interior beam vertex (units).
    pub effect_jitter: f64,
    /// Minimum interval between engagement starts (seconds).
    pub fire_interval_secs: f64,
    /// Maximum bank angle while maneuvering (radians).
    pub max_tilt_radians: f64,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            hover_height: DEFAULT_HOVER_HEIGHT,
            max_range: DEFAULT_MAX_RANGE,
            effect_duration_secs: DEFAULT_EFFECT_DURATION_SECS,
            effect_segments: DEFAULT_EFFECT_SEGMENTS,
            effect_jitter: DEFAULT_EFFECT_JITTER,
            fire_interval_secs: DEFAULT_FIRE_INTERVAL_SECS,
            max_tilt_radians: DEFAULT_MAX_TILT_RADIANS,
        }
    }
}

impl DroneConfig {
    /// Clamp all fields into their valid ranges.
    pub fn sanitized(mut self) -> Self {
        self.hover_height = self.hover_height.max(0.0);
        self.max_range = self.max_range.max(0.0);
        self.effect_duration_secs = self.effect_duration_secs.max(0.0);
        self.effect_jitter = self.effect_jitter.max(0.0);
        self.fire_interval_secs = self.fire_interval_secs.max(0.0);
        self.max_tilt_radians = self.max_tilt_radians.clamp(0.0, MAX_TILT_LIMIT);
        self
    }
}
