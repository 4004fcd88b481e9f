//! # ecs_runtime
//!
//! The ECS container and scheduling layer.
//!
//! This crate provides:
//!
//! - [`Registry`] — owns the entity allocator and one dense table per
//!   registered component type, exposing all typed access.
//! - [`System`] trait — per-tick behavior receiving exclusive registry access.
//! - [`Schedule`] — the ordered system list, run once per tick.
//! - [`Ecs`] — registry + schedule behind a single setup/update surface.
//! - [`TickLoop`] — an optional fixed-timestep driver for headless use.
//!
//! ## Usage
//!
//! ```rust
//! use ecs_runtime::{Component, Ecs, Registry, System};
//!
//! #[derive(Debug, Default)]
//! struct Clock {
//!     ticks: u64,
//! }
//!
//! impl Component for Clock {
//!     fn type_name() -> &'static str { "Clock" }
//! }
//!
//! struct ClockSystem;
//!
//! impl System for ClockSystem {
//!     fn name(&self) -> &'static str { "clock" }
//!     fn update(&mut self, registry: &mut Registry) {
//!         registry.for_each_mut::<Clock, _>(|_, c| c.ticks += 1).unwrap();
//!     }
//! }
//!
//! let mut ecs = Ecs::new();
//! ecs.register_component::<Clock>();
//! ecs.register_system(ClockSystem);
//!
//! let entity = ecs.spawn();
//! ecs.registry_mut().get_or_insert::<Clock>(entity).unwrap();
//! ecs.update();
//!
//! assert_eq!(ecs.registry().component::<Clock>(entity).unwrap().ticks, 1);
//! ```

pub mod ecs;
pub mod error;
pub mod registry;
pub mod schedule;
pub mod system;
pub mod tick;

pub use ecs::Ecs;
pub use error::EcsError;
pub use registry::Registry;
pub use schedule::Schedule;
pub use system::System;
pub use tick::{TickConfig, TickLoop};

// Re-export the storage primitives so downstream crates need one import.
pub use ecs_component::{Component, ComponentTable, ComponentTypeId, Entity};
