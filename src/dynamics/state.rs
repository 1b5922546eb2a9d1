use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const GRAVITY: f64 = 3.711; // m/s^2, constant over the descent corridor

pub const MAX_ROTATE: i32 = 90; // deg from vertical, either side
pub const MAX_POWER: i32 = 4; // discrete thrust levels 0..=4

/// Per-tick actuator limits: attitude changes by at most 15 deg and thrust
/// by at most one level between consecutive ticks.
pub const MAX_ROTATE_STEP: i32 = 15;
pub const MAX_POWER_STEP: i32 = 1;

// ---------------------------------------------------------------------------
// Vehicle state
// ---------------------------------------------------------------------------

/// Full vehicle state at a single control tick.
///
/// Two roles share this type: the authoritative state the control loop
/// advances once per cycle, and the throwaway copies produced during
/// candidate rollouts. Frame: x right, y up, ground at y = 0.
#[derive(Debug, Clone)]
pub struct LanderState {
    pub pos: Vector2<f64>, // m
    pub vel: Vector2<f64>, // m/s
    pub fuel: i32,         // thrust units remaining (may go negative mid-rollout)
    pub rotate: i32,       // deg from vertical, positive tilts thrust leftward
    pub power: i32,        // current thrust level
}

// ---------------------------------------------------------------------------
// Control command
// ---------------------------------------------------------------------------

/// Absolute attitude/thrust command for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Command {
    pub rotate: i32, // deg
    pub power: i32,  // thrust level
}
