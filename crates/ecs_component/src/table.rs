//! Dense component tables and their type-erased interface.
//!
//! A [`ComponentTable`] stores every component of one type in a contiguous
//! vector with no holes, plus an index map from owning entity to slot.
//! Removal is swap-and-pop: the last element moves into the vacated slot and
//! the moved element's map entry is patched, so removal is O(1) and the
//! array stays dense at the cost of iteration order stability.
//!
//! [`AnyTable`] is the object-safe capability interface the registry stores,
//! so tables of different component types live uniformly in one map.

use std::any::Any;
use std::collections::HashMap;

use crate::component::{Component, ComponentTypeId};
use crate::entity::Entity;

/// Dense storage for all components of a single type.
///
/// Invariant: `slots` is exactly the inverse of the slot → entity assignment
/// in `entities`, and `components[i]` is owned by `entities[i]` for every
/// occupied slot `i`.
#[derive(Debug)]
pub struct ComponentTable<T: Component> {
    /// Dense component storage. Order is arbitrary, not entity order.
    components: Vec<T>,
    /// `entities[i]` owns `components[i]`.
    entities: Vec<Entity>,
    /// Owner → slot index.
    slots: HashMap<Entity, usize>,
}

impl<T: Component> ComponentTable<T> {
    /// Create a new, empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entities: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Insert a default-initialised component for `entity` and return it.
    ///
    /// If the entity already has a component in this table, the existing
    /// component is reset to `T::default()` in place — no duplicate slot is
    /// created. The returned borrow is valid only until the next structural
    /// mutation of this table.
    pub fn insert(&mut self, entity: Entity) -> &mut T {
        if let Some(&slot) = self.slots.get(&entity) {
            self.components[slot] = T::default();
            return &mut self.components[slot];
        }
        self.push_default(entity)
    }

    /// Get the component for `entity`, creating a default one if absent.
    ///
    /// Unlike [`ComponentTable::insert`], an existing component is returned
    /// untouched.
    pub fn get_or_insert(&mut self, entity: Entity) -> &mut T {
        if let Some(&slot) = self.slots.get(&entity) {
            return &mut self.components[slot];
        }
        self.push_default(entity)
    }

    fn push_default(&mut self, entity: Entity) -> &mut T {
        let slot = self.components.len();
        self.components.push(T::default());
        self.entities.push(entity);
        self.slots.insert(entity, slot);
        &mut self.components[slot]
    }

    /// Get the component for `entity`, or `None` if absent. Never creates.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(&entity).map(|&slot| &self.components[slot])
    }

    /// Get the component for `entity` mutably, or `None` if absent.
    /// Never creates.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.slots.get(&entity) {
            Some(&slot) => Some(&mut self.components[slot]),
            None => None,
        }
    }

    /// Remove the component for `entity` using swap-and-pop.
    ///
    /// The last element in the dense array moves into the vacated slot
    /// (unless the vacated slot is the last) and its map entry is updated.
    /// Returns `false` without touching the table if the entity has no
    /// component here.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(slot) = self.slots.remove(&entity) else {
            return false;
        };
        let last = self.components.len() - 1;
        self.components.swap_remove(slot);
        self.entities.swap_remove(slot);
        if slot != last {
            // Patch the moved element's map entry to its new slot.
            let moved = self.entities[slot];
            self.slots.insert(moved, slot);
        }
        true
    }

    /// Returns `true` if `entity` has a component in this table.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Returns the number of components stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the table holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The entities owning a component in this table, in slot order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate the dense sequence as `(owner, component)` pairs.
    ///
    /// Order is arbitrary and changes under removal; do not add or remove
    /// components of this type while iterating.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterate the dense sequence mutably as `(owner, component)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities
            .iter()
            .copied()
            .zip(self.components.iter_mut())
    }
}

impl<T: Component> Default for ComponentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased table interface.
///
/// The registry stores every table behind this trait so it can hold tables
/// of different component types in one map and clear an entity's footprint
/// without knowing the concrete types.
pub trait AnyTable: Any + Send + Sync {
    /// The table as `Any`, for downcasting to `ComponentTable<T>`.
    fn as_any(&self) -> &dyn Any;

    /// The table as mutable `Any`, for downcasting to `ComponentTable<T>`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Remove the component for `entity`, if present.
    fn remove(&mut self, entity: Entity) -> bool;

    /// Returns `true` if `entity` has a component in this table.
    fn contains(&self, entity: Entity) -> bool;

    /// Number of components stored.
    fn len(&self) -> usize;

    /// Returns `true` if the table holds no components.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored component type's identifier.
    fn component_type_id(&self) -> ComponentTypeId;

    /// The stored component type's declared name.
    fn type_name(&self) -> &'static str;
}

impl<T: Component> AnyTable for ComponentTable<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove(&mut self, entity: Entity) -> bool {
        ComponentTable::remove(self, entity)
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentTable::contains(self, entity)
    }

    fn len(&self) -> usize {
        ComponentTable::len(self)
    }

    fn component_type_id(&self) -> ComponentTypeId {
        T::component_type_id()
    }

    fn type_name(&self) -> &'static str {
        T::type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Marker {
        value: i32,
    }

    impl Component for Marker {
        fn type_name() -> &'static str {
            "Marker"
        }
    }

    fn entity(index: u32) -> Entity {
        Entity::from_parts(index, 0)
    }

    /// The slot map must be exactly the inverse of the slot → entity
    /// assignment, with no stale or orphaned entries.
    fn assert_dense_invariant(table: &ComponentTable<Marker>) {
        assert_eq!(table.components.len(), table.entities.len());
        assert_eq!(table.slots.len(), table.entities.len());
        for (slot, owner) in table.entities.iter().enumerate() {
            assert_eq!(table.slots.get(owner), Some(&slot));
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = ComponentTable::<Marker>::new();
        let e = entity(1);
        table.insert(e).value = 7;
        assert_eq!(table.get(e), Some(&Marker { value: 7 }));
        assert_eq!(table.len(), 1);
        assert_dense_invariant(&table);
    }

    #[test]
    fn test_insert_existing_overwrites_in_place() {
        let mut table = ComponentTable::<Marker>::new();
        let e = entity(1);
        table.insert(e).value = 7;
        table.insert(e);
        // Reset to default, and still exactly one slot.
        assert_eq!(table.get(e), Some(&Marker::default()));
        assert_eq!(table.len(), 1);
        assert_dense_invariant(&table);
    }

    #[test]
    fn test_get_never_creates() {
        let mut table = ComponentTable::<Marker>::new();
        let e = entity(1);
        assert!(table.get(e).is_none());
        assert!(table.get_mut(e).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_get_or_insert_creates_then_finds() {
        let mut table = ComponentTable::<Marker>::new();
        let e = entity(1);
        assert!(table.get(e).is_none());

        let created = table.get_or_insert(e);
        assert_eq!(*created, Marker::default());
        created.value = 3;

        // A later non-creating lookup sees the same component.
        assert_eq!(table.get(e), Some(&Marker { value: 3 }));
        // And get_or_insert does not reset it.
        assert_eq!(table.get_or_insert(e).value, 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut table = ComponentTable::<Marker>::new();
        table.insert(entity(1)).value = 1;
        assert!(!table.remove(entity(9)));
        assert_eq!(table.len(), 1);
        assert_dense_invariant(&table);
    }

    #[test]
    fn test_swap_remove_keeps_survivors() {
        let mut table = ComponentTable::<Marker>::new();
        let (a, b, c) = (entity(1), entity(2), entity(3));
        table.insert(a).value = 10;
        table.insert(b).value = 20;
        table.insert(c).value = 30;

        // Removing the first slot moves the last element into it.
        assert!(table.remove(a));
        assert_eq!(table.len(), 2);
        assert!(!table.contains(a));
        assert_eq!(table.get(b), Some(&Marker { value: 20 }));
        assert_eq!(table.get(c), Some(&Marker { value: 30 }));
        assert_dense_invariant(&table);
    }

    #[test]
    fn test_remove_last_slot() {
        let mut table = ComponentTable::<Marker>::new();
        let (a, b) = (entity(1), entity(2));
        table.insert(a).value = 1;
        table.insert(b).value = 2;

        assert!(table.remove(b));
        assert_eq!(table.get(a), Some(&Marker { value: 1 }));
        assert_dense_invariant(&table);
    }

    #[test]
    fn test_density_after_mixed_mutations() {
        let mut table = ComponentTable::<Marker>::new();
        for i in 0..8 {
            table.insert(entity(i)).value = i as i32;
        }
        table.remove(entity(0));
        table.remove(entity(4));
        table.insert(entity(8)).value = 8;
        table.remove(entity(7));

        assert_eq!(table.len(), 6);
        assert_dense_invariant(&table);
        for (owner, comp) in table.iter() {
            assert_eq!(comp.value, owner.index() as i32);
        }
    }

    #[test]
    fn test_iter_mut_visits_every_component() {
        let mut table = ComponentTable::<Marker>::new();
        for i in 0..4 {
            table.insert(entity(i));
        }
        for (_, comp) in table.iter_mut() {
            comp.value += 1;
        }
        assert!(table.iter().all(|(_, c)| c.value == 1));
    }

    #[test]
    fn test_stale_generation_misses() {
        let mut table = ComponentTable::<Marker>::new();
        let current = Entity::from_parts(5, 1);
        table.insert(current).value = 9;

        let stale = Entity::from_parts(5, 0);
        assert!(table.get(stale).is_none());
        assert!(!table.contains(stale));
    }

    #[test]
    fn test_any_table_erasure() {
        let mut table = ComponentTable::<Marker>::new();
        let e = entity(1);
        table.insert(e);

        let erased: &mut dyn AnyTable = &mut table;
        assert_eq!(erased.type_name(), "Marker");
        assert_eq!(erased.component_type_id(), Marker::component_type_id());
        assert!(erased.contains(e));
        assert!(erased.remove(e));
        assert!(erased.is_empty());

        let concrete = erased
            .as_any()
            .downcast_ref::<ComponentTable<Marker>>()
            .unwrap();
        assert!(concrete.is_empty());
    }
}
