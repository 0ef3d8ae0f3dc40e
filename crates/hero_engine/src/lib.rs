//! # Hero Engine
//!
//! A small 2D entity-component engine.
//!
//! ## Features
//!
//! - **ECS Architecture**: type-keyed component storage with deferred entity lifecycle
//! - **Fixed-Step Loop**: a dedicated simulation thread driving ordered systems
//! - **AABB Collision**: all-pairs overlap detection with a pluggable reaction hook
//! - **Scene Compositing**: z-ordered sprites and images with translate/rotate/scale transforms
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hero_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     hero_engine::foundation::logging::init();
//!
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     engine.add_system(MovementSystem::new());
//!     engine.add_system(CollisionSystem::new());
//!     let renderer = engine.render_system();
//!     engine.add_system(renderer);
//!
//!     engine.spawn((
//!         Transform::new(100.0, 100.0),
//!         Velocity::new(40.0, 0.0),
//!         Sprite::new(16.0, 16.0, Color::WHITE),
//!     ));
//!
//!     engine.start()?;
//!     std::thread::sleep(std::time::Duration::from_secs(1));
//!     engine.stop();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError, TickPolicy, WindowConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData},
        config::Config,
        ecs::components::{BoxCollider, Color, Font, ImageSprite, Sprite, Text, Transform, Velocity},
        ecs::systems::{CollisionHandler, CollisionSystem, MovementSystem, RenderSystem},
        ecs::{Component, Entity, System, SystemError, World},
        foundation::math::{Mat3, Vec2},
        input::{InputState, KeyCode, MouseButton},
        render::{CommandRecorder, Rasterizer, SceneCompositor},
        Engine, EngineConfig, EngineError, TickPolicy, WindowConfig,
    };
}
