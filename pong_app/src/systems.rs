//! Game systems

use hero_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::{AiPaddle, Ball, PlayerPaddle, Score};
use crate::config::PongConfig;

fn clamp_paddle(transform: &mut Transform, config: &PongConfig) {
    let half_height = config.paddle_height / 2.0;
    let y = transform.y().clamp(half_height, config.height - half_height);
    transform.set_position(transform.x(), y);
}

/// Steers the player paddle from the keyboard
pub struct PlayerControlSystem {
    config: PongConfig,
}

impl PlayerControlSystem {
    /// Create the system
    pub fn new(config: PongConfig) -> Self {
        Self { config }
    }
}

impl System for PlayerControlSystem {
    fn name(&self) -> &str {
        "PlayerControlSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        input: &InputState,
        _delta_time: f32,
    ) -> Result<(), SystemError> {
        let mut vy = 0.0;
        if input.is_down(KeyCode::Up) || input.is_down(KeyCode::W) {
            vy = -self.config.paddle_speed;
        }
        if input.is_down(KeyCode::Down) || input.is_down(KeyCode::S) {
            vy = self.config.paddle_speed;
        }

        for entity in world.query::<(Transform, Velocity, PlayerPaddle)>() {
            if let Some(velocity) = world.get_mut::<Velocity>(entity) {
                velocity.set(0.0, vy);
            }
            if let Some(transform) = world.get_mut::<Transform>(entity) {
                clamp_paddle(transform, &self.config);
            }
        }
        Ok(())
    }
}

/// Moves the AI paddle toward the ball
pub struct AiControlSystem {
    config: PongConfig,
}

impl AiControlSystem {
    /// Create the system
    pub fn new(config: PongConfig) -> Self {
        Self { config }
    }
}

impl System for AiControlSystem {
    fn name(&self) -> &str {
        "AiControlSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputState,
        _delta_time: f32,
    ) -> Result<(), SystemError> {
        let Some(ball_y) = world
            .query::<(Transform, Ball)>()
            .first()
            .and_then(|ball| world.get::<Transform>(*ball))
            .map(Transform::y)
        else {
            return Ok(());
        };

        for entity in world.query::<(Transform, Velocity, AiPaddle)>() {
            let Some(transform) = world.get_mut::<Transform>(entity) else {
                continue;
            };
            clamp_paddle(transform, &self.config);
            let diff = ball_y - transform.y();

            let vy = if diff.abs() < self.config.ai_dead_zone {
                0.0
            } else {
                self.config.ai_speed.copysign(diff)
            };
            if let Some(velocity) = world.get_mut::<Velocity>(entity) {
                velocity.set(0.0, vy);
            }
        }
        Ok(())
    }
}

/// Bounces the ball off the top and bottom walls
pub struct BallBounceSystem {
    config: PongConfig,
}

impl BallBounceSystem {
    /// Create the system
    pub fn new(config: PongConfig) -> Self {
        Self { config }
    }
}

impl System for BallBounceSystem {
    fn name(&self) -> &str {
        "BallBounceSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputState,
        _delta_time: f32,
    ) -> Result<(), SystemError> {
        let half_size = self.config.ball_size / 2.0;
        for entity in world.query::<(Transform, Velocity, Ball)>() {
            let Some(transform) = world.get_mut::<Transform>(entity) else {
                continue;
            };
            let direction = if transform.y() - half_size < 0.0 {
                transform.set_position(transform.x(), half_size);
                1.0
            } else if transform.y() + half_size > self.config.height {
                transform.set_position(transform.x(), self.config.height - half_size);
                -1.0
            } else {
                continue;
            };
            if let Some(velocity) = world.get_mut::<Velocity>(entity) {
                let vx = velocity.vx();
                velocity.set(vx, velocity.vy().abs() * direction);
            }
        }
        Ok(())
    }
}

/// Collision response: the ball rebounds off paddles
///
/// The rebound angle depends on where the ball hit the paddle, and every hit
/// speeds the ball up to a cap.
pub struct PaddleRebound {
    config: PongConfig,
}

impl PaddleRebound {
    /// Create the handler
    pub fn new(config: PongConfig) -> Self {
        Self { config }
    }
}

impl CollisionHandler for PaddleRebound {
    fn on_collision(&mut self, world: &mut World, a: Entity, b: Entity) {
        let (ball, paddle) = if world.has::<Ball>(a) {
            (a, b)
        } else if world.has::<Ball>(b) {
            (b, a)
        } else {
            return;
        };
        if !world.has::<PlayerPaddle>(paddle) && !world.has::<AiPaddle>(paddle) {
            return;
        }

        let (Some(ball_pos), Some(paddle_pos)) = (
            world.get::<Transform>(ball).map(|t| t.position),
            world.get::<Transform>(paddle).map(|t| t.position),
        ) else {
            return;
        };
        let Some(velocity) = world.get_mut::<Velocity>(ball) else {
            return;
        };

        // Always send the ball away from the paddle so a deep hit cannot flip it twice
        let away = (ball_pos.x - paddle_pos.x).signum();
        let relative_y = (ball_pos.y - paddle_pos.y) / (self.config.paddle_height / 2.0);
        let vx = velocity.vx().abs() * away * self.config.speed_up;
        let vy = relative_y * self.config.ball_speed * 0.8 * self.config.speed_up;
        velocity.set(vx, vy);

        let speed = velocity.speed();
        let max_speed = self.config.max_ball_speed();
        if speed > max_speed {
            velocity.linear *= max_speed / speed;
        }
        log::debug!("Ball hit paddle {}, speed {:.0}", paddle, velocity.speed());
    }
}

/// Scores a point when the ball leaves the field and serves again
pub struct ScoreSystem {
    config: PongConfig,
    rng: StdRng,
}

impl ScoreSystem {
    /// Create the system with an entropy-seeded serve direction
    pub fn new(config: PongConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create the system with a fixed random source
    pub fn with_rng(config: PongConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    fn serve(&mut self, world: &mut World, ball: Entity) {
        let angle = self
            .rng
            .gen_range(-std::f32::consts::FRAC_PI_6..std::f32::consts::FRAC_PI_6);
        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };

        if let Some(transform) = world.get_mut::<Transform>(ball) {
            transform.set_position(self.config.width / 2.0, self.config.height / 2.0);
        }
        if let Some(velocity) = world.get_mut::<Velocity>(ball) {
            velocity.set(
                self.config.ball_speed * direction,
                self.config.ball_speed * angle.sin(),
            );
        }
    }
}

impl System for ScoreSystem {
    fn name(&self) -> &str {
        "ScoreSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputState,
        _delta_time: f32,
    ) -> Result<(), SystemError> {
        for ball in world.query::<(Transform, Ball)>() {
            let Some(x) = world.get::<Transform>(ball).map(Transform::x) else {
                continue;
            };
            let player_scored = if x < 0.0 {
                false
            } else if x > self.config.width {
                true
            } else {
                continue;
            };

            for label in world.query::<(Score, Text)>() {
                let Some(score) = world.get_mut::<Score>(label) else {
                    continue;
                };
                if player_scored {
                    score.player += 1;
                } else {
                    score.ai += 1;
                }
                let text = score.label();
                log::info!("Score {}", text);
                if let Some(label_text) = world.get_mut::<Text>(label) {
                    label_text.set_text(text);
                }
            }

            self.serve(world, ball);
        }
        Ok(())
    }
}
