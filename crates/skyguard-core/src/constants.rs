//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Default drone loadout ---

/// Hover height above the owner's body (units).
pub const DEFAULT_HOVER_HEIGHT: f64 = 6.0;

/// Maximum target detection range (units).
pub const DEFAULT_MAX_RANGE: f64 = 30.0;

/// Beam effect duration; the destructive step fires when it ends (seconds).
pub const DEFAULT_EFFECT_DURATION_SECS: f64 = 0.3;

/// Number of beam segments.
pub const DEFAULT_EFFECT_SEGMENTS: u32 = 20;

/// Maximum random offset applied to each interior beam vertex (units).
pub const DEFAULT_EFFECT_JITTER: f64 = 2.0;

/// Minimum interval between engagement starts (seconds).
pub const DEFAULT_FIRE_INTERVAL_SECS: f64 = 1.0;

/// Maximum bank angle while maneuvering (radians, 20 degrees).
pub const DEFAULT_MAX_TILT_RADIANS: f64 = std::f64::consts::PI / 9.0;

// --- Flight ---

/// Bank angle per unit of local-frame velocity (radians per unit/s).
pub const TILT_SENSITIVITY: f64 = 0.05;

/// Hard ceiling for configured tilt. A quarter-turn bank flips the body,
/// so configurations are clamped well below it.
pub const MAX_TILT_LIMIT: f64 = 1.5;

/// Easing gain of the pose actuator (fraction of remaining error per second).
pub const ACTUATOR_RESPONSIVENESS: f64 = 10.0;

/// Downward acceleration for bodies released into free fall (units/s²).
pub const GRAVITY: f64 = 9.81;

/// Radius of the drone body's collider (units).
pub const DRONE_BODY_RADIUS: f64 = 0.6;

// --- Spawn / teardown ---

/// How long a queued spawn waits for the owner's body before failing (seconds).
pub const OWNER_READY_WAIT_SECS: f64 = 5.0;

/// Fade-to-invisible duration when a drone is dismissed (seconds).
pub const DESPAWN_FADE_SECS: f64 = 2.0;
