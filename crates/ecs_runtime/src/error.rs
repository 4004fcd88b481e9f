//! Runtime error types.
//!
//! Absence of a component or entity is a normal outcome signalled with
//! `Option`, never an error. Errors are reserved for contract violations:
//! operating on an unregistered component type, or releasing an entity
//! that is not live.

use ecs_component::EntityError;

/// Errors from registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EcsError {
    /// A typed operation named a component type that was never registered.
    #[error("component type '{0}' is not registered")]
    UnregisteredComponent(&'static str),

    /// An entity lifecycle violation (double despawn, stale handle).
    #[error(transparent)]
    Entity(#[from] EntityError),
}
