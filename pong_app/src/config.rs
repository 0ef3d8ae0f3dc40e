//! Game configuration

use hero_engine::config::Config;
use serde::{Deserialize, Serialize};

/// Pong tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    /// Playfield width
    pub width: f32,

    /// Playfield height
    pub height: f32,

    /// Paddle width
    pub paddle_width: f32,

    /// Paddle height
    pub paddle_height: f32,

    /// Ball edge length
    pub ball_size: f32,

    /// Player paddle speed (pixels per second)
    pub paddle_speed: f32,

    /// AI paddle speed (pixels per second)
    pub ai_speed: f32,

    /// AI ignores the ball while it is this close vertically
    pub ai_dead_zone: f32,

    /// Ball speed at serve
    pub ball_speed: f32,

    /// Speed-up applied on every paddle hit
    pub speed_up: f32,

    /// How long the headless demo runs, in seconds
    pub run_seconds: f32,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            paddle_width: 15.0,
            paddle_height: 100.0,
            ball_size: 15.0,
            paddle_speed: 400.0,
            ai_speed: 350.0,
            ai_dead_zone: 30.0,
            ball_speed: 300.0,
            speed_up: 1.05,
            run_seconds: 5.0,
        }
    }
}

impl Config for PongConfig {}

impl PongConfig {
    /// Upper bound on ball speed
    pub fn max_ball_speed(&self) -> f32 {
        self.ball_speed * 2.0
    }
}
