//! The system contract.

use std::any::Any;

use crate::registry::Registry;

/// A unit of per-tick behavior.
///
/// Systems hold no entity or component data of their own; all state they
/// operate on lives in the [`Registry`], which they receive exclusively for
/// the duration of each update. That exclusivity is what makes the
/// single-threaded execution model safe: no component borrow can survive
/// into the next system's update.
///
/// Systems walking one component type while resolving others should snapshot
/// the owners first:
///
/// ```rust,ignore
/// fn update(&mut self, registry: &mut Registry) {
///     for entity in registry.entities_with::<Spinner>() {
///         let speed = registry.component::<Spinner>(entity).unwrap().speed;
///         if let Some(transform) = registry.component_mut::<Transform2D>(entity) {
///             transform.angle += speed;
///         }
///     }
/// }
/// ```
pub trait System: Any {
    /// A short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Run this system for one tick. Must run to completion synchronously;
    /// there is no yield or pause primitive.
    fn update(&mut self, registry: &mut Registry);
}

impl dyn System {
    /// Downcast a type-erased system back to its concrete type.
    pub fn downcast_mut<S: System>(&mut self) -> Option<&mut S> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }
}
