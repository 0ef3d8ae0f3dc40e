//! Headless Pong
//!
//! Runs the game loop on the engine thread while the main thread plays the
//! host: it feeds keyboard input for the left paddle and presents published
//! frames into a [`CommandRecorder`]. Set `RUST_LOG=debug` to watch paddle
//! hits.

mod components;
mod config;
mod systems;

use std::time::{Duration, Instant};

use hero_engine::prelude::*;

use crate::components::{AiPaddle, Ball, PlayerPaddle, Score};
use crate::config::PongConfig;
use crate::systems::{
    AiControlSystem, BallBounceSystem, PaddleRebound, PlayerControlSystem, ScoreSystem,
};

fn spawn_entities(engine: &Engine, config: &PongConfig) {
    let (width, height) = (config.width, config.height);

    engine.spawn((
        Transform::new(30.0, height / 2.0),
        Sprite::new(config.paddle_width, config.paddle_height, Color::WHITE),
        Velocity::default(),
        BoxCollider::new(config.paddle_width, config.paddle_height),
        PlayerPaddle,
    ));

    engine.spawn((
        Transform::new(width - 30.0, height / 2.0),
        Sprite::new(config.paddle_width, config.paddle_height, Color::WHITE),
        Velocity::default(),
        BoxCollider::new(config.paddle_width, config.paddle_height),
        AiPaddle,
    ));

    engine.spawn((
        Transform::new(width / 2.0, height / 2.0),
        Sprite::new(config.ball_size, config.ball_size, Color::WHITE).with_z_order(1),
        Velocity::new(config.ball_speed, config.ball_speed * 0.5),
        BoxCollider::new(config.ball_size, config.ball_size),
        Ball,
    ));

    // Center line
    let mut y = 10.0;
    while y < height {
        engine.spawn((
            Transform::new(width / 2.0, y),
            Sprite::new(4.0, 10.0, Color::rgb(100, 100, 100)).with_z_order(-1),
        ));
        y += 20.0;
    }

    engine.spawn((
        Transform::new(width / 2.0, 50.0),
        Text::new("0  :  0").with_font(Font::new("SansSerif", 40.0, true)),
        Score::default(),
    ));
}

/// Press Up/Down so the left paddle trails the ball
fn autopilot(engine: &Engine) {
    let (ball_y, paddle_y) = {
        let world = engine.world();
        let ball_y = world
            .query::<(Transform, Ball)>()
            .first()
            .and_then(|ball| world.get::<Transform>(*ball))
            .map(Transform::y);
        let paddle_y = world
            .query::<(Transform, PlayerPaddle)>()
            .first()
            .and_then(|paddle| world.get::<Transform>(*paddle))
            .map(Transform::y);
        (ball_y, paddle_y)
    };
    let (Some(ball_y), Some(paddle_y)) = (ball_y, paddle_y) else {
        return;
    };

    let mut input = engine.input();
    input.handle_key_input(KeyCode::Up, ball_y < paddle_y - 20.0);
    input.handle_key_input(KeyCode::Down, ball_y > paddle_y + 20.0);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    hero_engine::foundation::logging::init();

    let config = PongConfig::load_or_default("pong.toml")?;
    let mut engine = Engine::new(EngineConfig {
        window: WindowConfig {
            title: "Pong".to_string(),
            width: config.width as u32,
            height: config.height as u32,
        },
        ..EngineConfig::default()
    })?;

    engine.add_system(MovementSystem::new());
    engine.add_system(PlayerControlSystem::new(config.clone()));
    engine.add_system(AiControlSystem::new(config.clone()));
    engine.add_system(BallBounceSystem::new(config.clone()));
    engine.add_system(CollisionSystem::with_handler(PaddleRebound::new(config.clone())));
    engine.add_system(ScoreSystem::new(config.clone()));
    let renderer = engine.render_system();
    engine.add_system(renderer);

    spawn_entities(&engine, &config);
    engine.start()?;

    let mut recorder = CommandRecorder::new();
    let mut frames = 0u64;
    let started = Instant::now();
    let mut next_report = Duration::from_secs(1);
    let run_for = Duration::from_secs_f32(config.run_seconds.max(0.0));

    while started.elapsed() < run_for {
        autopilot(&engine);

        if engine.frame_ready() {
            recorder.clear();
            if engine.present(&mut recorder) {
                frames += 1;
            }
        }

        if started.elapsed() >= next_report {
            log::info!("{} frames presented, {} draw calls in the last one", frames, recorder.len());
            next_report += Duration::from_secs(1);
        }

        std::thread::sleep(Duration::from_millis(8));
    }

    engine.stop();

    let final_score = engine.world().iter::<Score>().next().map(|(_, score)| *score);
    if let Some(score) = final_score {
        log::info!("Final score {}", score.label());
    }
    Ok(())
}
