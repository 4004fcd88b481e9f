//! Entity type and allocation utilities.
//!
//! An [`Entity`] is a lightweight `u64` identifier with no inherent data.
//! The low 32 bits are a slot index, the high 32 bits a generation counter
//! that is bumped every time the slot is released, so a handle retained
//! across a release goes stale instead of silently aliasing the recycled ID.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Entities are pure identifiers — they carry no data of their own. Components
/// are attached to entities to give them meaning.
///
/// The identifier packs a slot index (low 32 bits) and a generation (high
/// 32 bits). Two handles are equal only when both parts match, so a handle
/// from before a release never matches the entity that reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(u64::MAX);

    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Build an entity from its slot index and generation.
    #[must_use]
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns the slot index part of the identifier.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation part of the identifier.
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns `true` if this is not the invalid sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u64::MAX
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}v{})", self.index(), self.generation())
    }
}

/// Errors from entity lifecycle operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntityError {
    /// The entity is not live: it was never allocated, was already
    /// released, or the handle's generation is stale.
    #[error("entity {0} is not live")]
    NotLive(Entity),
}

/// Per-slot allocator state.
#[derive(Debug, Clone, Copy)]
struct SlotState {
    /// Generation the slot will carry on its next (or current) issue.
    generation: u32,
    /// Whether the slot is currently issued.
    live: bool,
}

/// Issues and recycles entity identifiers.
///
/// Released slot indices are reused in LIFO order: the most recently
/// released index is the next one handed out, paired with a bumped
/// generation. Fresh indices are issued only when the free stack is empty.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    slots: Vec<SlotState>,
    /// Released slot indices, most recent on top.
    free: Vec<u32>,
    live_count: usize,
}

impl EntityAllocator {
    /// Creates a new allocator with no entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live_count: 0,
        }
    }

    /// Allocates an entity ID.
    ///
    /// Reuses the most recently released slot if one exists, otherwise
    /// issues the next never-used index at generation 0.
    pub fn allocate(&mut self) -> Entity {
        self.live_count += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.live = true;
            return Entity::from_parts(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).expect("entity slot index overflow");
        self.slots.push(SlotState {
            generation: 0,
            live: true,
        });
        Entity::from_parts(index, 0)
    }

    /// Releases an entity ID, making its slot eligible for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotLive`] if the entity was never allocated,
    /// was already released, or the handle's generation is stale. Double
    /// release is rejected rather than corrupting the free stack.
    pub fn release(&mut self, entity: Entity) -> Result<(), EntityError> {
        if !self.is_live(entity) {
            return Err(EntityError::NotLive(entity));
        }
        let index = entity.index();
        let slot = &mut self.slots[index as usize];
        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live_count -= 1;
        Ok(())
    }

    /// Returns `true` if the handle refers to a currently issued entity.
    #[must_use]
    pub fn is_live(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index() as usize)
            .is_some_and(|slot| slot.live && slot.generation == entity.generation())
    }

    /// Returns the number of currently live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_parts_roundtrip() {
        let e = Entity::from_parts(42, 7);
        assert_eq!(e.index(), 42);
        assert_eq!(e.generation(), 7);
        assert_eq!(e, Entity::from_raw(e.id()));
        assert!(e.is_valid());
    }

    #[test]
    fn test_entity_invalid() {
        assert!(!Entity::INVALID.is_valid());
    }

    #[test]
    fn test_allocator_produces_unique_ids() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        let e3 = alloc.allocate();
        assert_ne!(e1, e2);
        assert_ne!(e2, e3);
        assert_ne!(e1, e3);
        assert_eq!(alloc.live_count(), 3);
    }

    #[test]
    fn test_release_makes_entity_dead() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        assert!(alloc.is_live(e));
        alloc.release(e).unwrap();
        assert!(!alloc.is_live(e));
        assert_eq!(alloc.live_count(), 0);
    }

    #[test]
    fn test_lifo_reuse_order() {
        let mut alloc = EntityAllocator::new();
        let entities: Vec<Entity> = (0..6).map(|_| alloc.allocate()).collect();

        // Release index 5, then index 3.
        alloc.release(entities[5]).unwrap();
        alloc.release(entities[3]).unwrap();

        // Allocation pops the free stack: 3 first, then 5.
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!(a.index(), entities[3].index());
        assert_eq!(b.index(), entities[5].index());
    }

    #[test]
    fn test_reused_slot_gets_new_generation() {
        let mut alloc = EntityAllocator::new();
        let old = alloc.allocate();
        alloc.release(old).unwrap();
        let new = alloc.allocate();

        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        // The stale handle must not pass for the new entity.
        assert!(!alloc.is_live(old));
        assert!(alloc.is_live(new));
    }

    #[test]
    fn test_double_release_rejected() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        alloc.release(e).unwrap();
        assert_eq!(alloc.release(e), Err(EntityError::NotLive(e)));
    }

    #[test]
    fn test_release_never_allocated_rejected() {
        let mut alloc = EntityAllocator::new();
        let forged = Entity::from_parts(12, 0);
        assert_eq!(alloc.release(forged), Err(EntityError::NotLive(forged)));
    }

    #[test]
    fn test_no_two_live_ids_equal() {
        let mut alloc = EntityAllocator::new();
        let mut live = Vec::new();
        for _ in 0..4 {
            live.push(alloc.allocate());
        }
        alloc.release(live.remove(1)).unwrap();
        live.push(alloc.allocate());
        live.push(alloc.allocate());

        for (i, a) in live.iter().enumerate() {
            for b in &live[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
