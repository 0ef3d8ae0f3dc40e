//! Physics module for collision detection
//!
//! Axis-aligned bounding boxes derived from entity transforms and box
//! colliders. Response is left to the collision handler of the
//! [`crate::ecs::systems::CollisionSystem`].

pub mod collision;

pub use collision::Aabb;
