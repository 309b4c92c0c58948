//! Gameplay simulation
//!
//! All game rules live here. The controller is driven by a virtual clock
//! and key events only:
//! - Fixed physics timestep
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod controller;
pub mod scene;
pub mod state;
pub mod timer;

pub use controller::GameController;
pub use scene::{Constraint, Scene};
pub use state::{BodyRecord, BodyTag, BoxState, GamePhase, RenderBody, RoundOutcome};
pub use timer::Interval;
