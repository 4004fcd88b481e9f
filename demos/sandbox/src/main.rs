//! # sandbox — headless ECS demo
//!
//! Wires the runtime together the way a game would, minus rendering and
//! input: register component types, register systems in execution order,
//! spawn a few entities, then drive a bounded fixed-timestep loop.

mod systems;

use anyhow::Result;
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use components::{Circle, ColorFade, Lifetime, Rect, Spinner, Transform2D};
use ecs_runtime::{Ecs, TickConfig, TickLoop};
use systems::{ColorFadeSystem, LifetimeSystem, ParentFollowSystem, ReportSystem, SpinnerSystem};

const TICK_RATE: f64 = 60.0;
const DT: f32 = 1.0 / TICK_RATE as f32;

const RED: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
const FADED_PURPLE: [f32; 4] = [0.5, 0.0, 0.5, 0.25];

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sandbox=info".parse()?))
        .init();

    info!("sandbox starting");

    let mut ecs = Ecs::new();

    // Set up component types before any entity touches them.
    ecs.register_component::<Transform2D>();
    ecs.register_component::<ColorFade>();
    ecs.register_component::<Circle>();
    ecs.register_component::<Rect>();
    ecs.register_component::<Spinner>();
    ecs.register_component::<Lifetime>();

    // Systems run in registration order, once per tick.
    ecs.register_system(SpinnerSystem { dt: DT });
    ecs.register_system(ColorFadeSystem { dt: DT });
    ecs.register_system(ParentFollowSystem { orbit: 60.0 });
    ecs.register_system(LifetimeSystem { dt: DT });
    ecs.register_system(ReportSystem::every(60));

    // A spinning, color-cycling block.
    let block = ecs.spawn();
    {
        let registry = ecs.registry_mut();
        registry.get_or_insert::<Transform2D>(block)?.position = Vec2::new(400.0, 300.0);
        *registry.get_or_insert::<ColorFade>(block)? = ColorFade::new(RED, FADED_PURPLE, 1.0);
        *registry.get_or_insert::<Rect>(block)? = Rect {
            offset: Vec2::new(-50.0, -50.0),
            size: Vec2::new(100.0, 100.0),
        };
        registry.get_or_insert::<Spinner>(block)?.speed = 90.0;
    }

    // A short-lived satellite orbiting the block.
    let satellite = ecs.spawn();
    {
        let registry = ecs.registry_mut();
        registry.get_or_insert::<Transform2D>(satellite)?.parent = Some(block);
        registry.get_or_insert::<Circle>(satellite)?.radius = 12.0;
        registry.get_or_insert::<Lifetime>(satellite)?.remaining = 2.5;
    }

    // A static obstacle.
    let obstacle = ecs.spawn();
    {
        let registry = ecs.registry_mut();
        registry.get_or_insert::<Transform2D>(obstacle)?.position = Vec2::new(300.0, 400.0);
        *registry.get_or_insert::<Rect>(obstacle)? = Rect {
            offset: Vec2::new(-40.0, -40.0),
            size: Vec2::new(80.0, 80.0),
        };
    }

    info!(entities = ecs.registry().entity_count(), "world populated");

    let mut tick_loop = TickLoop::new(TickConfig {
        tick_rate: TICK_RATE,
        max_ticks: 240,
    });
    tick_loop.run(&mut ecs);

    info!(
        ticks = tick_loop.tick_id(),
        entities = ecs.registry().entity_count(),
        "sandbox shut down"
    );
    Ok(())
}
