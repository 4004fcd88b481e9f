//! Core [`Component`] trait and type identity.
//!
//! Every piece of data stored in the ECS must implement [`Component`]. The
//! trait requires `Send + Sync + 'static` so tables can be stored behind a
//! type-erased interface, and `Default` because tables default-initialise a
//! component when one is created for an entity.
//!
//! ## Type Identity
//!
//! [`ComponentTypeId`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. Unlike an address-based ID, the result
//! is deterministic: the same name produces the same ID in every run, which
//! keeps diagnostics and any future persistence stable.

use serde::{Deserialize, Serialize};

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name using
    /// the FNV-1a 64-bit hash algorithm.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `T`.
    ///
    /// This calls `T::type_name()` and hashes it with FNV-1a, producing the
    /// same result as [`ComponentTypeId::from_name`] with the same string.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// The core component trait.
///
/// Components are plain data attached to entities. They carry no references
/// to other components; cross-component relationships are expressed as
/// [`Entity`](crate::Entity) values and resolved through the registry at use
/// time, because dense storage reorders under removal.
///
/// # Examples
///
/// ```rust
/// use ecs_component::Component;
///
/// #[derive(Debug, Clone, Default)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static + Default {
    /// A human-readable name for this component type.
    ///
    /// The name must be unique across all registered component types; it is
    /// the sole input to [`ComponentTypeId`].
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[test]
    fn test_component_type_id_is_stable() {
        let id1 = Health::component_type_id();
        let id2 = Health::component_type_id();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_component_type_id_matches_from_name() {
        // The trait method and the standalone function must produce the same ID.
        let from_trait = Health::component_type_id();
        let from_name = ComponentTypeId::from_name("Health");
        assert_eq!(from_trait, from_name);
    }

    #[test]
    fn test_component_type_id_differs_between_types() {
        #[derive(Debug, Clone, Default)]
        struct Velocity {
            x: f32,
            y: f32,
        }
        impl Component for Velocity {
            fn type_name() -> &'static str {
                "Velocity"
            }
        }

        let _ = Velocity { x: 0.0, y: 0.0 };
        assert_ne!(Health::component_type_id(), Velocity::component_type_id());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of empty string is the offset basis itself.
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
    }
}
