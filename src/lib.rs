//! Swing Stack - a pendulum box-stacking arcade game
//!
//! A box swings on a soft pendulum above the field. Press the action key to
//! release a copy of it; every box that lands costs points, and a stack that
//! touches the finish line wins the round.
//!
//! Core modules:
//! - `sim`: Game controller (state machine, collision rules, timers)
//! - `physics`: Physics engine adapter and the Rapier2D backend
//! - `ui`: Score/panel sink (DOM on web, headless for tests)
//! - `renderer`: WebGPU rendering of the play field
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod physics;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{Error, Result};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum physics substeps per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the browser loop will feed the controller (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 340.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Box edge length (pixels)
    pub const BOX_SIZE: f32 = 50.0;

    /// Score at round start
    pub const START_SCORE: i32 = 3000;
    /// Points lost each time a box lands
    pub const GROUND_PENALTY: i32 = 100;

    /// Pendulum swing timer period (ms)
    pub const PENDULUM_INTERVAL_MS: u64 = 500;
    /// Scoreboard refresh timer period (ms)
    pub const SCOREBOARD_INTERVAL_MS: u64 = 100;

    /// Key code (`KeyboardEvent.code`) that starts rounds and drops boxes
    pub const ACTION_KEY: &str = "Space";
}
