//! The ECS container — one registry plus one schedule.

use ecs_component::{Component, Entity};

use crate::error::EcsError;
use crate::registry::Registry;
use crate::schedule::Schedule;
use crate::system::System;

/// The top-level container: all component tables, all systems, one tick
/// entry point.
///
/// Storage and scheduling live in separate owners so the schedule can hand
/// each system exclusive access to the registry without borrowing itself.
#[derive(Default)]
pub struct Ecs {
    registry: Registry,
    schedule: Schedule,
}

impl Ecs {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            schedule: Schedule::new(),
        }
    }

    /// Register component type `T`. Must precede any typed operation on `T`.
    pub fn register_component<T: Component>(&mut self) {
        self.registry.register_component::<T>();
    }

    /// Append a system to the schedule. Systems run in registration order.
    ///
    /// Returns a mutable reference for further configuration by the caller.
    pub fn register_system<S: System>(&mut self, system: S) -> &mut S {
        self.schedule.add(system)
    }

    /// Allocate a new entity with no components.
    pub fn spawn(&mut self) -> Entity {
        self.registry.spawn()
    }

    /// Destroy an entity, clearing its footprint from every table.
    ///
    /// # Errors
    ///
    /// [`EcsError::Entity`] if the entity is not live.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.registry.despawn(entity)
    }

    /// Run one tick: every registered system, once, in order.
    pub fn update(&mut self) {
        self.schedule.run(&mut self.registry);
    }

    /// The underlying registry, for setup and inspection.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The underlying registry, mutably, for setup code.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.schedule.len()
    }
}
