//! The component registry — entity allocation plus one table per type.
//!
//! The [`Registry`] owns the entity allocator and a map from
//! [`ComponentTypeId`] to a type-erased table. Tables are created once at
//! registration and live for the registry's lifetime. All typed access goes
//! through the registry, which downcasts the erased table back to its
//! concrete `ComponentTable<T>`.

use std::collections::HashMap;

use tracing::{debug, warn};

use ecs_component::{AnyTable, Component, ComponentTable, ComponentTypeId, Entity, EntityAllocator};

use crate::error::EcsError;

/// Owns all component tables and the entity allocator.
///
/// Not thread-safe by design: one registry instance is reached from exactly
/// one logical thread per tick, and every component borrow is tied to a
/// registry borrow, so a reference can never outlive a structural mutation.
#[derive(Default)]
pub struct Registry {
    allocator: EntityAllocator,
    tables: HashMap<ComponentTypeId, Box<dyn AnyTable>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            tables: HashMap::new(),
        }
    }

    // -- Component type registration --

    /// Register component type `T`, creating its table.
    ///
    /// Must be called before any typed operation involving `T`. Registering
    /// the same type twice replaces the table and drops all stored
    /// components; that is a usage error and is logged as a warning.
    pub fn register_component<T: Component>(&mut self) {
        let type_id = T::component_type_id();
        let previous = self
            .tables
            .insert(type_id, Box::new(ComponentTable::<T>::new()));
        if previous.is_some() {
            warn!(
                component = T::type_name(),
                "component registered twice; existing table replaced"
            );
        } else {
            debug!(component = T::type_name(), ?type_id, "component registered");
        }
    }

    /// Returns `true` if component type `T` has been registered.
    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.tables.contains_key(&T::component_type_id())
    }

    /// Typed access to `T`'s table.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn table<T: Component>(&self) -> Result<&ComponentTable<T>, EcsError> {
        self.tables
            .get(&T::component_type_id())
            .and_then(|table| table.as_any().downcast_ref())
            .ok_or(EcsError::UnregisteredComponent(T::type_name()))
    }

    /// Typed mutable access to `T`'s table.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn table_mut<T: Component>(&mut self) -> Result<&mut ComponentTable<T>, EcsError> {
        self.tables
            .get_mut(&T::component_type_id())
            .and_then(|table| table.as_any_mut().downcast_mut())
            .ok_or(EcsError::UnregisteredComponent(T::type_name()))
    }

    // -- Entity lifecycle --

    /// Allocate a new entity with no components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        debug!(%entity, "entity spawned");
        entity
    }

    /// Destroy an entity: release its ID and remove its component from every
    /// registered table.
    ///
    /// This is the only path that guarantees an entity's footprint is fully
    /// cleared. Per-table removal is a no-op where the entity holds nothing.
    ///
    /// # Errors
    ///
    /// [`EcsError::Entity`] if the entity is not live (double despawn or a
    /// stale handle).
    pub fn despawn(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.allocator.release(entity)?;
        for table in self.tables.values_mut() {
            table.remove(entity);
        }
        debug!(%entity, "entity despawned");
        Ok(())
    }

    /// Returns `true` if the handle refers to a currently live entity.
    #[must_use]
    pub fn is_live(&self, entity: Entity) -> bool {
        self.allocator.is_live(entity)
    }

    /// Number of currently live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.allocator.live_count()
    }

    // -- Component access --

    /// Get `entity`'s component of type `T`, or `None` if absent.
    ///
    /// Never creates. An unregistered `T` also yields `None`: for lookups,
    /// absence is never an error.
    #[must_use]
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.table::<T>().ok().and_then(|table| table.get(entity))
    }

    /// Get `entity`'s component of type `T` mutably, or `None` if absent.
    /// Never creates.
    #[must_use]
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.table_mut::<T>()
            .ok()
            .and_then(|table| table.get_mut(entity))
    }

    /// Get `entity`'s component of type `T`, creating a default one if
    /// absent.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn get_or_insert<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        Ok(self.table_mut::<T>()?.get_or_insert(entity))
    }

    /// Attach a default-initialised component of type `T` to `entity`,
    /// resetting any component already present.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn insert<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        Ok(self.table_mut::<T>()?.insert(entity))
    }

    /// Remove `entity`'s component of type `T`. Returns `true` if one was
    /// removed.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<bool, EcsError> {
        Ok(self.table_mut::<T>()?.remove(entity))
    }

    /// Returns `true` if `entity` has a component of type `T`.
    ///
    /// `false` for unregistered types.
    #[must_use]
    pub fn contains<T: Component>(&self, entity: Entity) -> bool {
        self.table::<T>()
            .map(|table| table.contains(entity))
            .unwrap_or(false)
    }

    // -- Iteration helpers for systems --

    /// Apply `f` to every component of type `T` with its owning entity.
    ///
    /// Borrows the registry for the duration, so the closure cannot add or
    /// remove components of any type while the dense sequence is walked.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn for_each<T, F>(&self, mut f: F) -> Result<(), EcsError>
    where
        T: Component,
        F: FnMut(Entity, &T),
    {
        for (entity, component) in self.table::<T>()?.iter() {
            f(entity, component);
        }
        Ok(())
    }

    /// Apply `f` mutably to every component of type `T` with its owner.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub fn for_each_mut<T, F>(&mut self, mut f: F) -> Result<(), EcsError>
    where
        T: Component,
        F: FnMut(Entity, &mut T),
    {
        for (entity, component) in self.table_mut::<T>()?.iter_mut() {
            f(entity, component);
        }
        Ok(())
    }

    /// Snapshot the owners of every component of type `T`.
    ///
    /// For systems that walk `T` but must resolve *other* component types
    /// per entity: iterate the snapshot and re-resolve through the registry,
    /// instead of holding a table borrow across the lookups. Empty if `T`
    /// was never registered.
    #[must_use]
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.table::<T>()
            .map(|table| table.entities().to_vec())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.allocator.live_count())
            .field("tables", &self.tables.len())
            .finish()
    }
}
