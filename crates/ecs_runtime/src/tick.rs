//! Fixed-timestep tick driver.
//!
//! The core never drives itself: callers invoke [`Ecs::update`] once per
//! frame from whatever outer loop they own. For headless use (tools, demos,
//! tests) this module provides a minimal fixed-rate loop that sleeps off the
//! remaining budget each tick and warns when a tick overruns it.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::ecs::Ecs;

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// A fixed-timestep driver for an [`Ecs`] container.
#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: TickConfig,
}

impl TickLoop {
    /// Create a new tick loop with the given configuration.
    #[must_use]
    pub fn new(config: TickConfig) -> Self {
        Self { tick_id: 0, config }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Run one tick and advance the counter.
    pub fn tick(&mut self, ecs: &mut Ecs) {
        self.tick_id += 1;
        debug!(tick_id = self.tick_id, "tick start");
        ecs.update();
    }

    /// Run the loop at the configured rate until `max_ticks` is reached
    /// (forever when `max_ticks` is 0).
    pub fn run(&mut self, ecs: &mut Ecs) {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            self.tick(ecs);

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}
