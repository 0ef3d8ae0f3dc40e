//! System trait and implementations

use thiserror::Error;

use crate::assets::AssetError;
use crate::ecs::World;
use crate::input::InputState;

/// System trait for processing entities and components
///
/// Systems hold no entity data of their own. Anything they need from the
/// world is re-resolved by query on every update.
pub trait System: Send {
    /// System name, used for logging and for enabling/disabling by name
    fn name(&self) -> &str;

    /// Called once when the system is attached to a scheduler
    fn init(&mut self, _world: &mut World) -> Result<(), SystemError> {
        Ok(())
    }

    /// Run the system for one tick
    fn update(
        &mut self,
        world: &mut World,
        input: &InputState,
        delta_time: f32,
    ) -> Result<(), SystemError>;

    /// Called once when the engine stops
    fn shutdown(&mut self) {}
}

/// Errors reported by a system
///
/// A failing system is logged and skipped for the tick; the remaining
/// systems still run.
#[derive(Error, Debug)]
pub enum SystemError {
    /// Asset loading failed inside a system
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Custom system error
    #[error("System error: {0}")]
    Custom(String),
}
