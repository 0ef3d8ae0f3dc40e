//! ECS Components module
//!
//! Plain data attached to entities. Behavior lives in systems.

pub mod collision;
pub mod movement;
pub mod renderable;
pub mod transform;

pub use collision::BoxCollider;
pub use movement::Velocity;
pub use renderable::{Color, Drawable, Font, ImageSprite, Sprite, Text};
pub use transform::Transform;
