//! Example component definitions for the ECS runtime.
//!
//! These demonstrate how to define components that satisfy the
//! [`Component`] trait requirements: `Send + Sync + 'static + Default`,
//! plus a unique declared name. Payloads are opaque to the core — the
//! runtime never looks inside them.

use ecs_component::{Component, Entity};
use glam::Vec2;

/// A 2D spatial component: position, rotation, optional parent.
///
/// The parent link is an [`Entity`], never a reference: dense storage
/// reorders under removal, so relationships are resolved through the
/// registry at use time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// World position.
    pub position: Vec2,
    /// Rotation in degrees.
    pub angle: f32,
    /// Parent entity, if this transform is attached to another.
    pub parent: Option<Entity>,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            parent: None,
        }
    }
}

impl Transform2D {
    /// Create a transform at the given position.
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Component for Transform2D {
    fn type_name() -> &'static str {
        "Transform2D"
    }
}

/// Rotates the owner's transform at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    /// Rotation speed in degrees per second.
    pub speed: f32,
}

impl Default for Spinner {
    fn default() -> Self {
        Self { speed: 180.0 }
    }
}

impl Component for Spinner {
    fn type_name() -> &'static str {
        "Spinner"
    }
}

/// An RGBA color, components in `0.0..=1.0`.
pub type Rgba = [f32; 4];

/// Fades between two colors, bouncing back and forth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFade {
    /// Color at fade parameter 0.
    pub from: Rgba,
    /// Color at fade parameter 1.
    pub to: Rgba,
    /// Seconds for a full one-way fade; 0 disables fading.
    pub speed: f32,
    /// Current fade parameter in `0.0..=1.0`.
    param: f32,
}

impl Default for ColorFade {
    fn default() -> Self {
        Self {
            from: [1.0, 1.0, 1.0, 1.0],
            to: [0.5, 0.0, 0.5, 1.0],
            speed: 0.0,
            param: 0.0,
        }
    }
}

impl ColorFade {
    /// Create a fade between two colors over `speed` seconds each way.
    #[must_use]
    pub fn new(from: Rgba, to: Rgba, speed: f32) -> Self {
        Self {
            from,
            to,
            speed,
            param: 0.0,
        }
    }

    /// Advance the fade by `dt` seconds, reversing direction at either end.
    pub fn advance(&mut self, dt: f32) {
        if self.speed == 0.0 {
            return;
        }
        self.param += dt / self.speed;
        if self.param >= 1.0 {
            self.param = 1.0;
            self.speed = -self.speed;
        } else if self.param <= 0.0 {
            self.param = 0.0;
            self.speed = -self.speed;
        }
    }

    /// The current interpolated color.
    #[must_use]
    pub fn current(&self) -> Rgba {
        let t = self.param;
        [
            self.from[0] + (self.to[0] - self.from[0]) * t,
            self.from[1] + (self.to[1] - self.from[1]) * t,
            self.from[2] + (self.to[2] - self.from[2]) * t,
            self.from[3] + (self.to[3] - self.from[3]) * t,
        ]
    }
}

impl Component for ColorFade {
    fn type_name() -> &'static str {
        "ColorFade"
    }
}

/// A circle shape centred on the owner's transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    /// Radius in world units.
    pub radius: f32,
}

impl Component for Circle {
    fn type_name() -> &'static str {
        "Circle"
    }
}

/// An axis-aligned rectangle relative to the owner's transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Offset of the rectangle's corner from the transform.
    pub offset: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Component for Rect {
    fn type_name() -> &'static str {
        "Rect"
    }
}

/// Despawns the owner when it expires.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lifetime {
    /// Seconds remaining.
    pub remaining: f32,
}

impl Component for Lifetime {
    fn type_name() -> &'static str {
        "Lifetime"
    }
}
