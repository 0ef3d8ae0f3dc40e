//! Entity-Component-System implementation
//!
//! Provides entity storage, deferred lifecycle, queries, and ordered system
//! execution for game logic.

pub mod component;
pub mod components;
pub mod entity;
pub mod query;
pub mod scheduler;
pub mod storage;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentBundle};
pub use entity::Entity;
pub use query::Query;
pub use scheduler::SystemScheduler;
pub use system::{System, SystemError};
pub use world::World;
