//! Data-driven game balance
//!
//! Every field has a default, so a tuning document only needs to name the
//! values it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Error, Result};

/// Gameplay and physics constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Rules ===
    /// Score at the start of every round
    pub start_score: i32,
    /// Points lost each time a box lands
    pub ground_penalty: i32,
    /// Key code that starts rounds and drops boxes
    pub action_key: String,

    // === Timers ===
    /// Pendulum swing period (ms)
    pub pendulum_interval_ms: u64,
    /// Scoreboard refresh period (ms)
    pub scoreboard_interval_ms: u64,

    // === Physics ===
    /// Box edge length (pixels)
    pub box_size: f32,
    /// Horizontal force applied to the pendulum each swing tick
    pub pendulum_force: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Box density (mass per square pixel)
    pub box_density: f32,
    /// Box surface friction
    pub box_friction: f32,
    /// Pendulum spring stiffness
    pub spring_stiffness: f32,
    /// Pendulum spring damping
    pub spring_damping: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_score: START_SCORE,
            ground_penalty: GROUND_PENALTY,
            action_key: ACTION_KEY.to_string(),

            pendulum_interval_ms: PENDULUM_INTERVAL_MS,
            scoreboard_interval_ms: SCOREBOARD_INTERVAL_MS,

            box_size: BOX_SIZE,
            // Held for one 60 Hz step: ~130 px/s kick on a 2.5 mass box
            pendulum_force: 20_000.0,
            gravity: 1000.0,
            box_density: 0.001,
            box_friction: 0.1,
            spring_stiffness: 25.0,
            spring_damping: 0.5,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning document from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.start_score <= 0 {
            return Err(Error::InvalidTuning(format!(
                "start_score must be positive, got {}",
                self.start_score
            )));
        }
        if self.ground_penalty < 0 {
            return Err(Error::InvalidTuning(format!(
                "ground_penalty must not be negative, got {}",
                self.ground_penalty
            )));
        }
        if self.action_key.is_empty() {
            return Err(Error::InvalidTuning("action_key is empty".to_string()));
        }
        if self.pendulum_interval_ms == 0 || self.scoreboard_interval_ms == 0 {
            return Err(Error::InvalidTuning("timer intervals must be non-zero".to_string()));
        }
        if !(self.box_size > 0.0) || !(self.box_density > 0.0) {
            return Err(Error::InvalidTuning(format!(
                "box_size and box_density must be positive, got {} and {}",
                self.box_size, self.box_density
            )));
        }
        Ok(())
    }

    pub fn pendulum_interval(&self) -> Duration {
        Duration::from_millis(self.pendulum_interval_ms)
    }

    pub fn scoreboard_interval(&self) -> Duration {
        Duration::from_millis(self.scoreboard_interval_ms)
    }
}
