//! Game-specific components

use hero_engine::prelude::*;

/// Paddle steered by the arrow keys (or W/S)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerPaddle;

impl Component for PlayerPaddle {}

/// Paddle that chases the ball
#[derive(Debug, Clone, Copy, Default)]
pub struct AiPaddle;

impl Component for AiPaddle {}

/// The ball
#[derive(Debug, Clone, Copy, Default)]
pub struct Ball;

impl Component for Ball {}

/// Running score, attached to the score label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Points for the left paddle
    pub player: u32,

    /// Points for the right paddle
    pub ai: u32,
}

impl Component for Score {}

impl Score {
    /// Text shown on the label
    pub fn label(&self) -> String {
        format!("{}  :  {}", self.player, self.ai)
    }
}
