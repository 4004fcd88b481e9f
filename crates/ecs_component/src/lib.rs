//! # ecs_component
//!
//! The "E" and "C" in ECS — entity identity and dense component storage.
//!
//! This crate provides:
//!
//! - [`Entity`] — lightweight `u64` entity identifiers with generations.
//! - [`EntityAllocator`] — recycling ID allocator with LIFO slot reuse.
//! - [`Component`] trait — the contract all ECS data must satisfy.
//! - [`ComponentTable`] — dense per-type storage with swap-and-pop removal.
//! - [`AnyTable`] — the type-erased interface the registry holds tables by.

pub mod component;
pub mod entity;
pub mod table;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator, EntityError};
pub use table::{AnyTable, ComponentTable};
