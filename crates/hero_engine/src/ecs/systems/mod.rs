//! ECS Systems module

pub mod collision_system;
pub mod movement_system;
pub mod rendering_system;

pub use collision_system::{CollisionHandler, CollisionPair, CollisionSystem, NoCollisionResponse};
pub use movement_system::MovementSystem;
pub use rendering_system::RenderSystem;
