//! System scheduling
//!
//! Systems run sequentially on the simulation thread in registration order.
//! Each registered system carries an enabled flag that is checked before
//! every update.

use super::{System, World};
use crate::input::InputState;

struct SystemEntry {
    system: Box<dyn System>,
    enabled: bool,
}

/// Ordered list of systems driven once per tick
#[derive(Default)]
pub struct SystemScheduler {
    systems: Vec<SystemEntry>,
}

impl SystemScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system and run its `init` hook
    ///
    /// A failing `init` is logged; the system is still registered.
    pub fn add_system(&mut self, mut system: Box<dyn System>, world: &mut World) {
        if let Err(e) = system.init(world) {
            log::warn!("System '{}' failed to initialize: {}", system.name(), e);
        }
        log::debug!("Registered system '{}' at position {}", system.name(), self.systems.len());
        self.systems.push(SystemEntry {
            system,
            enabled: true,
        });
    }

    /// Run every enabled system once, in registration order
    pub fn run_tick(&mut self, world: &mut World, input: &InputState, delta_time: f32) {
        for entry in &mut self.systems {
            if !entry.enabled {
                continue;
            }
            if let Err(e) = entry.system.update(world, input, delta_time) {
                log::warn!("System '{}' update failed: {}", entry.system.name(), e);
            }
        }
    }

    /// Call `shutdown` on every system, in registration order
    pub fn shutdown_all(&mut self) {
        for entry in &mut self.systems {
            log::debug!("Shutting down system '{}'", entry.system.name());
            entry.system.shutdown();
        }
    }

    /// Enable or disable every system with the given name
    ///
    /// Returns `false` if no system matched.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut found = false;
        for entry in self.systems.iter_mut().filter(|entry| entry.system.name() == name) {
            entry.enabled = enabled;
            found = true;
        }
        found
    }

    /// Enabled flag of the first system with the given name
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.systems
            .iter()
            .find(|entry| entry.system.name() == name)
            .map(|entry| entry.enabled)
    }

    /// Names of the registered systems in execution order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|entry| entry.system.name()).collect()
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
