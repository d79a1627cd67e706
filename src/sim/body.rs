//! A single circular body and its integration step

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::consts::AIR_FRICTION;

/// One circular particle
///
/// `radius` and `color` are fixed at construction; position and velocity
/// are mutated in place by [`Body::integrate`] and by collision resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    /// RGBA, render-only
    color: [f32; 4],
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// True if position, velocity and radius are all finite and the radius positive
    pub fn is_valid(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }

    /// Advance one step inside the unit viewport
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        self.integrate_within(dt, gravity, &Bounds::UNIT);
    }

    /// Advance one step inside arbitrary walls
    ///
    /// Order is fixed: accelerate, damp, move, reflect off any wall the
    /// unclamped position crossed, then clamp back inside. A zero or
    /// negative `dt` is accepted and just yields no or reversed motion.
    pub fn integrate_within(&mut self, dt: f32, gravity: Vec2, bounds: &Bounds) {
        self.vel += gravity * dt;
        self.vel *= AIR_FRICTION;

        self.pos += self.vel * dt;

        // Axes are independent: a corner hit flips both components
        if bounds.crosses_x(self.pos, self.radius) {
            self.vel.x = -self.vel.x;
        }
        if bounds.crosses_y(self.pos, self.radius) {
            self.vel.y = -self.vel.y;
        }

        self.pos = bounds.clamp_body(self.pos, self.radius);
    }

    /// True if `point` lies within `scale * radius` of the center
    pub fn hit_test(&self, point: Vec2, scale: f32) -> bool {
        self.pos.distance(point) < self.radius * scale
    }
}
