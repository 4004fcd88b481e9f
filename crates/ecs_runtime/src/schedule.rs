//! The system schedule — an ordered list run once per tick.
//!
//! There is no dependency analysis and no parallelism: systems run strictly
//! in registration order, each to completion, and each observes the fully
//! settled state left by every system that ran before it in the same tick.

use tracing::trace;

use crate::registry::Registry;
use crate::system::System;

/// An ordered list of system instances.
///
/// Systems are added at setup and live for the schedule's lifetime; there is
/// no removal or reordering after registration.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<Box<dyn System>>,
}

impl Schedule {
    /// Create an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Append a system. It will run after every system added before it.
    ///
    /// Returns a mutable reference for further configuration by the caller.
    pub fn add<S: System>(&mut self, system: S) -> &mut S {
        self.systems.push(Box::new(system));
        self.systems
            .last_mut()
            .and_then(|boxed| boxed.downcast_mut())
            .expect("just-pushed system has its own type")
    }

    /// Number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every system exactly once, in registration order.
    pub fn run(&mut self, registry: &mut Registry) {
        for system in &mut self.systems {
            trace!(system = system.name(), "system update");
            system.update(registry);
        }
    }
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schedule")
            .field("systems", &self.systems.len())
            .finish()
    }
}
