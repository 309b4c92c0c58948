//! Game state and body tags
//!
//! Tags live in a side table owned by the controller, keyed by body id.
//! The physics engine never sees them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu or result screen, waiting for the action key
    MainMenu,
    /// Round in progress
    Game,
}

/// Whether the player may drop the next box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxState {
    /// Ready to drop
    Idle,
    /// A dropped box has not landed yet
    Moving,
}

/// What a body means to the game rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    /// The floor
    Ground,
    /// A dropped box that has not landed
    PendingBox,
    /// A landed box; part of the stack and treated like the floor
    SettledBox,
    /// Touching it with the stack wins the round
    FinishLine,
    /// Side border
    Wall,
    /// The swinging box under the anchor
    Pendulum,
}

impl BodyTag {
    /// Floor or anything stacked on it
    pub fn is_grounded(self) -> bool {
        matches!(self, BodyTag::Ground | BodyTag::SettledBox)
    }

    /// Drawn as an outline rather than filled
    pub fn is_outlined(self) -> bool {
        matches!(self, BodyTag::PendingBox | BodyTag::SettledBox | BodyTag::Pendulum)
    }
}

/// Controller-side record for a body in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRecord {
    pub tag: BodyTag,
    /// Full width and height (pixels)
    pub size: Vec2,
    pub visible: bool,
}

impl BodyRecord {
    pub fn new(tag: BodyTag, size: Vec2) -> Self {
        Self {
            tag,
            size,
            visible: true,
        }
    }
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Lose,
}

impl RoundOutcome {
    /// A round is won iff points remain when it ends
    pub fn from_score(score: i32) -> Self {
        if score > 0 { RoundOutcome::Win } else { RoundOutcome::Lose }
    }
}

/// A body as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderBody {
    pub tag: BodyTag,
    pub center: Vec2,
    pub half_extents: Vec2,
    pub rotation: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounded_tags() {
        assert!(BodyTag::Ground.is_grounded());
        assert!(BodyTag::SettledBox.is_grounded());
        assert!(!BodyTag::PendingBox.is_grounded());
        assert!(!BodyTag::FinishLine.is_grounded());
        assert!(!BodyTag::Pendulum.is_grounded());
    }

    #[test]
    fn test_outcome_from_score() {
        assert_eq!(RoundOutcome::from_score(2900), RoundOutcome::Win);
        assert_eq!(RoundOutcome::from_score(1), RoundOutcome::Win);
        assert_eq!(RoundOutcome::from_score(0), RoundOutcome::Lose);
        assert_eq!(RoundOutcome::from_score(-100), RoundOutcome::Lose);
    }
}
