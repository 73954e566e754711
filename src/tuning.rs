//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. A JSON override may replace any subset of
//! fields; missing fields keep their default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tuning value `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    pub gravity: f32,
    pub jump_force: f32,
    pub release_velocity: f32,

    // === Speed ramp ===
    pub start_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    pub speed_threshold_step: u64,

    // === Spawning ===
    /// Probability that a spawn produces a collectible
    pub collectible_chance: f64,
    /// Frame at which the first entity of a session spawns
    pub first_spawn_frame: f32,
    /// Re-check interval while spawning is suppressed
    pub suppressed_recheck: f32,

    // === Scoring ===
    pub collectible_bonus: u64,
    pub collision_margin: f32,

    // === Story ===
    pub transition_score: u64,
    /// Spawn-free frame-units after the handoff completes
    pub handoff_cooldown: f32,
    /// Delay before the trailing actor copies a jump (frame-units)
    pub mimic_delay: f32,

    // === Effects ===
    pub particle_count: usize,

    /// Milliseconds after game over before a restart press is accepted
    pub restart_debounce_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            release_velocity: RELEASE_VELOCITY,

            start_speed: START_SPEED,
            max_speed: MAX_SPEED,
            speed_step: SPEED_STEP,
            speed_threshold_step: SPEED_THRESHOLD_STEP,

            collectible_chance: 0.25,
            first_spawn_frame: 50.0,
            suppressed_recheck: 30.0,

            collectible_bonus: COLLECTIBLE_BONUS,
            collision_margin: COLLISION_MARGIN,

            transition_score: TRANSITION_SCORE,
            handoff_cooldown: 180.0,
            mimic_delay: 12.0,

            particle_count: 20,

            restart_debounce_ms: 500.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity as f64),
            ("jump_force", self.jump_force as f64),
            ("start_speed", self.start_speed as f64),
            ("speed_step", self.speed_step as f64),
            ("suppressed_recheck", self.suppressed_recheck as f64),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::OutOfRange { field, value });
            }
        }
        if self.max_speed < self.start_speed {
            return Err(TuningError::OutOfRange {
                field: "max_speed",
                value: self.max_speed as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.collectible_chance) {
            return Err(TuningError::OutOfRange {
                field: "collectible_chance",
                value: self.collectible_chance,
            });
        }
        if self.speed_threshold_step == 0 {
            return Err(TuningError::OutOfRange {
                field: "speed_threshold_step",
                value: 0.0,
            });
        }
        Ok(())
    }
}
