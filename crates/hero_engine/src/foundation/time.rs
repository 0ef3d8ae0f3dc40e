//! Time management utilities
//!
//! [`FixedStepClock`] turns measured wall-clock time into simulation ticks.
//! It is driven by explicit [`Duration`]s so the loop thread owns the only
//! `Instant` and the conversion stays deterministic under test.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How accumulated time is converted into ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickPolicy {
    /// Run at most one tick per loop iteration once a full tick has
    /// accumulated. The tick's delta time covers the whole backlog
    /// (`accumulator / tick_rate`) and the accumulator restarts at zero.
    #[default]
    BacklogSingleTick,

    /// Conventional fixed step: drain the accumulator one whole tick at a
    /// time, each with `delta_time = 1 / tick_rate`. Backlog beyond
    /// `max_steps` in a single iteration is dropped.
    FixedCatchUp {
        /// Upper bound on ticks run per loop iteration
        max_steps: u32,
    },
}

/// Accumulates elapsed time in units of ticks
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    tick_rate: f64,
    accumulator: f64,
    policy: TickPolicy,
    tick_count: u64,
}

impl FixedStepClock {
    /// Create a clock running `tick_rate` ticks per second
    ///
    /// `tick_rate` must be positive; [`crate::Engine::new`] validates it.
    pub fn new(tick_rate: f64, policy: TickPolicy) -> Self {
        Self {
            tick_rate,
            accumulator: 0.0,
            policy,
            tick_count: 0,
        }
    }

    /// Feed the real time elapsed since the previous call
    ///
    /// Returns the delta times (seconds) of the ticks to run now, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<f32> {
        self.accumulator += elapsed.as_secs_f64() * self.tick_rate;

        let steps = match self.policy {
            TickPolicy::BacklogSingleTick => {
                if self.accumulator >= 1.0 {
                    let delta_time = (self.accumulator / self.tick_rate) as f32;
                    self.accumulator = 0.0;
                    vec![delta_time]
                } else {
                    Vec::new()
                }
            }
            TickPolicy::FixedCatchUp { max_steps } => {
                let step = (1.0 / self.tick_rate) as f32;
                let mut steps = Vec::new();
                while self.accumulator >= 1.0 && steps.len() < max_steps as usize {
                    self.accumulator -= 1.0;
                    steps.push(step);
                }
                if self.accumulator >= 1.0 {
                    log::warn!(
                        "Dropping {:.1} ticks of backlog (max {} per iteration)",
                        self.accumulator.floor(),
                        max_steps
                    );
                    self.accumulator = self.accumulator.fract();
                }
                steps
            }
        };

        self.tick_count += steps.len() as u64;
        steps
    }

    /// Fraction of a tick currently accumulated
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Total ticks produced since creation
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Ticks per second
    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }
}
