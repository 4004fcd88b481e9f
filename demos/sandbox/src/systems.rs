//! Example systems for the sandbox demo.
//!
//! Each system owns its configuration (the fixed timestep, report interval)
//! and reads or writes entity data only through the registry it receives per
//! tick. Systems that walk one component type while resolving others take an
//! owner snapshot first, then re-resolve per entity.

use glam::Vec2;
use tracing::{info, warn};

use components::{ColorFade, Lifetime, Spinner, Transform2D};
use ecs_runtime::{Registry, System};

/// Rotates the transform of every entity that has a [`Spinner`].
pub struct SpinnerSystem {
    /// Fixed timestep in seconds.
    pub dt: f32,
}

impl System for SpinnerSystem {
    fn name(&self) -> &'static str {
        "spinner"
    }

    fn update(&mut self, registry: &mut Registry) {
        for entity in registry.entities_with::<Spinner>() {
            let Some(speed) = registry.component::<Spinner>(entity).map(|s| s.speed) else {
                continue;
            };
            // Entities without a transform simply don't spin.
            if let Some(transform) = registry.component_mut::<Transform2D>(entity) {
                transform.angle = (transform.angle + speed * self.dt) % 360.0;
            }
        }
    }
}

/// Advances every [`ColorFade`] by one timestep.
pub struct ColorFadeSystem {
    /// Fixed timestep in seconds.
    pub dt: f32,
}

impl System for ColorFadeSystem {
    fn name(&self) -> &'static str {
        "color_fade"
    }

    fn update(&mut self, registry: &mut Registry) {
        let dt = self.dt;
        if let Err(err) = registry.for_each_mut::<ColorFade, _>(|_, fade| fade.advance(dt)) {
            warn!(%err, "color fade skipped");
        }
    }
}

/// Keeps child transforms orbiting their parent.
///
/// The parent link is an entity ID resolved through the registry each tick;
/// a despawned parent makes the lookup miss and the child stays put.
pub struct ParentFollowSystem {
    /// Orbit distance from the parent, in world units.
    pub orbit: f32,
}

impl System for ParentFollowSystem {
    fn name(&self) -> &'static str {
        "parent_follow"
    }

    fn update(&mut self, registry: &mut Registry) {
        for entity in registry.entities_with::<Transform2D>() {
            let Some(parent) = registry
                .component::<Transform2D>(entity)
                .and_then(|t| t.parent)
            else {
                continue;
            };
            let Some(anchor) = registry.component::<Transform2D>(parent) else {
                continue;
            };
            let offset = Vec2::from_angle(anchor.angle.to_radians()) * self.orbit;
            let position = anchor.position + offset;
            if let Some(transform) = registry.component_mut::<Transform2D>(entity) {
                transform.position = position;
            }
        }
    }
}

/// Counts down every [`Lifetime`] and despawns expired entities.
pub struct LifetimeSystem {
    /// Fixed timestep in seconds.
    pub dt: f32,
}

impl System for LifetimeSystem {
    fn name(&self) -> &'static str {
        "lifetime"
    }

    fn update(&mut self, registry: &mut Registry) {
        for entity in registry.entities_with::<Lifetime>() {
            let expired = match registry.component_mut::<Lifetime>(entity) {
                Some(lifetime) => {
                    lifetime.remaining -= self.dt;
                    lifetime.remaining <= 0.0
                }
                None => false,
            };
            if expired {
                info!(%entity, "lifetime expired");
                if let Err(err) = registry.despawn(entity) {
                    warn!(%entity, %err, "despawn failed");
                }
            }
        }
    }
}

/// Periodically logs the world state.
pub struct ReportSystem {
    interval: u64,
    tick: u64,
}

impl ReportSystem {
    /// Report every `interval` ticks.
    #[must_use]
    pub fn every(interval: u64) -> Self {
        Self { interval, tick: 0 }
    }
}

impl System for ReportSystem {
    fn name(&self) -> &'static str {
        "report"
    }

    fn update(&mut self, registry: &mut Registry) {
        self.tick += 1;
        if self.tick % self.interval != 0 {
            return;
        }
        info!(
            tick = self.tick,
            entities = registry.entity_count(),
            "world report"
        );
        let result = registry.for_each::<Transform2D, _>(|entity, transform| {
            info!(
                %entity,
                x = transform.position.x,
                y = transform.position.y,
                angle = transform.angle,
                "transform"
            );
        });
        if let Err(err) = result {
            warn!(%err, "report skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecs_runtime::Ecs;

    fn world() -> Ecs {
        let mut ecs = Ecs::new();
        ecs.register_component::<Transform2D>();
        ecs.register_component::<Spinner>();
        ecs.register_component::<ColorFade>();
        ecs.register_component::<Lifetime>();
        ecs
    }

    #[test]
    fn test_spinner_rotates_transform() {
        let mut ecs = world();
        ecs.register_system(SpinnerSystem { dt: 1.0 });

        let e = ecs.spawn();
        ecs.registry_mut().get_or_insert::<Transform2D>(e).unwrap();
        ecs.registry_mut().get_or_insert::<Spinner>(e).unwrap().speed = 90.0;

        ecs.update();
        let angle = ecs.registry().component::<Transform2D>(e).unwrap().angle;
        assert!((angle - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spinner_skips_entities_without_transform() {
        let mut ecs = world();
        ecs.register_system(SpinnerSystem { dt: 1.0 });

        let e = ecs.spawn();
        ecs.registry_mut().get_or_insert::<Spinner>(e).unwrap();
        ecs.update();
        assert!(ecs.registry().component::<Transform2D>(e).is_none());
    }

    #[test]
    fn test_lifetime_despawns_expired() {
        let mut ecs = world();
        ecs.register_system(LifetimeSystem { dt: 0.5 });

        let doomed = ecs.spawn();
        let keeper = ecs.spawn();
        ecs.registry_mut()
            .get_or_insert::<Lifetime>(doomed)
            .unwrap()
            .remaining = 0.4;
        ecs.registry_mut()
            .get_or_insert::<Lifetime>(keeper)
            .unwrap()
            .remaining = 5.0;

        ecs.update();
        assert!(!ecs.registry().is_live(doomed));
        assert!(ecs.registry().is_live(keeper));
    }

    #[test]
    fn test_orbit_follows_parent_and_survives_parent_despawn() {
        let mut ecs = world();
        ecs.register_system(ParentFollowSystem { orbit: 10.0 });

        let parent = ecs.spawn();
        let child = ecs.spawn();
        ecs.registry_mut()
            .get_or_insert::<Transform2D>(parent)
            .unwrap()
            .position = Vec2::new(100.0, 0.0);
        ecs.registry_mut()
            .get_or_insert::<Transform2D>(child)
            .unwrap()
            .parent = Some(parent);

        ecs.update();
        let pos = ecs
            .registry()
            .component::<Transform2D>(child)
            .unwrap()
            .position;
        assert!((pos - Vec2::new(110.0, 0.0)).length() < 1e-4);

        // A stale parent handle makes the lookup miss; the child stays put.
        ecs.despawn(parent).unwrap();
        ecs.update();
        let after = ecs
            .registry()
            .component::<Transform2D>(child)
            .unwrap()
            .position;
        assert_eq!(after, pos);
    }
}
