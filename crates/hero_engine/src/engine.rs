//! Core engine implementation
//!
//! The engine owns the world, the system scheduler, and the input state,
//! and drives them from a dedicated loop thread. One tick is:
//!
//! 1. `world.refresh()`
//! 2. every enabled system's `update`, in registration order
//! 3. `input.clear_edges()`
//!
//! The three are locked in that order for the whole tick. Hosts render from
//! the snapshot published by [`RenderSystem`] through [`Engine::present`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::ecs::systems::RenderSystem;
use crate::ecs::{ComponentBundle, Entity, System, SystemScheduler, World};
use crate::foundation::time::FixedStepClock;
use crate::input::InputState;
use crate::render::{Rasterizer, SceneCompositor, SnapshotBuffer};

pub use crate::foundation::time::TickPolicy;

/// State shared with the loop thread
#[derive(Default)]
struct Shared {
    world: Mutex<World>,
    scheduler: Mutex<SystemScheduler>,
    input: Mutex<InputState>,
    running: AtomicBool,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("{} lock poisoned by a panicked thread; recovering", what);
        poisoned.into_inner()
    })
}

impl Shared {
    fn tick(&self, delta_time: f32) {
        let mut world = lock(&self.world, "World");
        let mut scheduler = lock(&self.scheduler, "Scheduler");
        let mut input = lock(&self.input, "Input");

        world.refresh();
        scheduler.run_tick(&mut world, &input, delta_time);
        input.clear_edges();

        log::trace!("Tick dt={:.4}s, {} entities", delta_time, world.entity_count());
    }

    fn run_loop(&self, mut clock: FixedStepClock, sleep: Duration) {
        log::info!("Game loop started at {} ticks/s", clock.tick_rate());
        let mut last = Instant::now();

        while self.running.load(Ordering::Acquire) {
            let now = Instant::now();
            let elapsed = now - last;
            last = now;

            for delta_time in clock.advance(elapsed) {
                self.tick(delta_time);
            }

            thread::sleep(sleep);
        }

        log::info!("Game loop exited after {} ticks", clock.tick_count());
    }
}

/// Main engine struct
///
/// Dropping the engine stops the loop.
pub struct Engine {
    config: EngineConfig,
    shared: Arc<Shared>,
    snapshots: Arc<SnapshotBuffer>,
    loop_thread: Option<JoinHandle<()>>,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine '{}' ({}x{}, {} ticks/s, {:?})",
            config.window.title,
            config.window.width,
            config.window.height,
            config.tick_rate,
            config.tick_policy
        );

        Ok(Self {
            config,
            shared: Arc::new(Shared::default()),
            snapshots: Arc::new(SnapshotBuffer::new()),
            loop_thread: None,
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stage a new entity; it becomes visible at the start of the next tick
    ///
    /// Locks the world, so do not call while holding a guard from
    /// [`Engine::world`].
    pub fn spawn<B: ComponentBundle>(&self, bundle: B) -> Entity {
        self.world().spawn(bundle)
    }

    /// Stage an entity for removal at the start of the next tick
    ///
    /// Locks the world, so do not call while holding a guard from
    /// [`Engine::world`].
    pub fn despawn(&self, entity: Entity) -> bool {
        self.world().despawn(entity)
    }

    /// Append a system and run its `init` hook
    ///
    /// Locks the world and the scheduler, so do not call while holding a
    /// guard from [`Engine::world`] or [`Engine::scheduler`].
    pub fn add_system<S: System + 'static>(&self, system: S) {
        let mut world = lock(&self.shared.world, "World");
        let mut scheduler = lock(&self.shared.scheduler, "Scheduler");
        scheduler.add_system(Box::new(system), &mut world);
    }

    /// Lock the world
    ///
    /// Blocks the loop thread while held.
    pub fn world(&self) -> MutexGuard<'_, World> {
        lock(&self.shared.world, "World")
    }

    /// Lock the system scheduler
    pub fn scheduler(&self) -> MutexGuard<'_, SystemScheduler> {
        lock(&self.shared.scheduler, "Scheduler")
    }

    /// Lock the input state, e.g. to feed host events in
    pub fn input(&self) -> MutexGuard<'_, InputState> {
        lock(&self.shared.input, "Input")
    }

    /// Run one tick on the calling thread
    ///
    /// Do not call while holding a guard from [`Engine::world`],
    /// [`Engine::scheduler`] or [`Engine::input`].
    pub fn tick(&self, delta_time: f32) {
        self.shared.tick(delta_time);
    }

    /// Start the loop thread; does nothing if it is already running
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.loop_thread.is_some() {
            log::debug!("Engine already running");
            return Ok(());
        }

        self.shared.running.store(true, Ordering::Release);
        let shared = Arc::clone(&self.shared);
        let clock = FixedStepClock::new(self.config.tick_rate, self.config.tick_policy);
        let sleep = Duration::from_millis(self.config.loop_sleep_ms);

        let handle = thread::Builder::new()
            .name("hero-engine-loop".to_string())
            .spawn(move || shared.run_loop(clock, sleep))
            .map_err(|e| {
                self.shared.running.store(false, Ordering::Release);
                EngineError::ThreadSpawn(e)
            })?;

        self.loop_thread = Some(handle);
        Ok(())
    }

    /// Stop the loop thread, wait for it, then shut every system down
    ///
    /// Does nothing if the loop is not running.
    pub fn stop(&mut self) {
        let Some(handle) = self.loop_thread.take() else {
            return;
        };

        self.shared.running.store(false, Ordering::Release);
        if handle.join().is_err() {
            log::warn!("Game loop thread panicked");
        }

        self.scheduler().shutdown_all();
        log::info!("Engine stopped");
    }

    /// Whether the loop thread is running
    pub fn is_running(&self) -> bool {
        self.loop_thread.is_some()
    }

    /// A render system publishing into this engine's snapshot buffer
    pub fn render_system(&self) -> RenderSystem {
        RenderSystem::new(Arc::clone(&self.snapshots))
    }

    /// The snapshot buffer shared with render systems
    pub fn snapshots(&self) -> &Arc<SnapshotBuffer> {
        &self.snapshots
    }

    /// Whether a snapshot was published since the last [`Engine::present`]
    pub fn frame_ready(&self) -> bool {
        self.snapshots.is_dirty()
    }

    /// Draw the newest published snapshot
    ///
    /// Returns `false` if nothing has been published yet. The dirty flag is
    /// cleared before the snapshot is read, so a publish racing this call
    /// leaves [`Engine::frame_ready`] set.
    pub fn present(&self, rasterizer: &mut dyn Rasterizer) -> bool {
        self.snapshots.take_dirty();
        let Some(snapshot) = self.snapshots.latest() else {
            return false;
        };
        SceneCompositor::render(&snapshot, rasterizer);
        true
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Window description handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hero Engine".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Simulation ticks per second
    pub tick_rate: f64,

    /// Sleep between loop iterations, in milliseconds
    pub loop_sleep_ms: u64,

    /// How accumulated time becomes ticks
    pub tick_policy: TickPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            tick_rate: 60.0,
            loop_sleep_ms: 1,
            tick_policy: TickPolicy::default(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Check the values the engine relies on
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if let TickPolicy::FixedCatchUp { max_steps: 0 } = self.tick_policy {
            return Err(EngineError::InvalidConfig(
                "FixedCatchUp needs max_steps >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration values rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Loop thread could not be created
    #[error("Failed to spawn game loop thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
