//! Axis-aligned wall rectangle the bodies bounce inside

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Wall rectangle in normalized device space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Bounds {
    /// The full viewport, [-1, 1] on both axes
    pub const UNIT: Bounds = Bounds {
        left: -1.0,
        right: 1.0,
        bottom: -1.0,
        top: 1.0,
    };

    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// True if a circle of `radius` at `pos` pokes through the left or right wall
    #[inline]
    pub fn crosses_x(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius < self.left || pos.x + radius > self.right
    }

    /// True if a circle of `radius` at `pos` pokes through the bottom or top wall
    #[inline]
    pub fn crosses_y(&self, pos: Vec2, radius: f32) -> bool {
        pos.y - radius < self.bottom || pos.y + radius > self.top
    }

    /// Pull a circle center back inside the walls
    ///
    /// Written as max-then-min so a circle wider than the rectangle
    /// still lands on a finite position instead of panicking in `clamp`.
    #[inline]
    pub fn clamp_body(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            (self.left + radius).max((self.right - radius).min(pos.x)),
            (self.bottom + radius).max((self.top - radius).min(pos.y)),
        )
    }

    /// True if the whole circle lies inside the walls
    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        !self.crosses_x(pos, radius) && !self.crosses_y(pos, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_bounds_dimensions() {
        let b = Bounds::default();
        assert_eq!(b, Bounds::UNIT);
        assert_eq!(b.width(), 2.0);
        assert_eq!(b.height(), 2.0);
    }

    #[test]
    fn test_crossing_checks_each_axis() {
        let b = Bounds::UNIT;
        assert!(b.crosses_x(Vec2::new(0.95, 0.0), 0.1));
        assert!(!b.crosses_y(Vec2::new(0.95, 0.0), 0.1));
        assert!(b.crosses_y(Vec2::new(0.0, -0.95), 0.1));
        assert!(b.contains(Vec2::new(0.5, 0.5), 0.1));
    }

    #[test]
    fn test_clamp_body_pulls_inside() {
        let b = Bounds::UNIT;
        let clamped = b.clamp_body(Vec2::new(1.5, -3.0), 0.1);
        assert!((clamped.x - 0.9).abs() < 1e-6);
        assert!((clamped.y + 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_body_oversized_circle_is_finite() {
        let b = Bounds::new(-0.1, 0.1, -0.1, 0.1);
        let clamped = b.clamp_body(Vec2::new(0.05, 0.0), 0.5);
        assert!(clamped.is_finite());
    }
}
