//! Tilt Bounce - bouncing circles driven by device tilt
//!
//! Core modules:
//! - `sim`: Physics core (bodies, pairwise collisions, scene tick)
//! - `renderer`: Plain-old-data snapshot handed to the drawing layer
//! - `settings`: Persisted configuration
//! - `error`: Error type for the configuration/scene surface

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Per-tick velocity damping applied to both axes
    pub const AIR_FRICTION: f32 = 0.99;
    /// Restitution used by the scene unless configured otherwise
    pub const DEFAULT_RESTITUTION: f32 = 0.9;
    /// Collision radius scale (1.0 = collide at the drawn radius)
    pub const DEFAULT_COLLISION_RADIUS_SCALE: f32 = 1.0;
    /// Pointer hit radius as a fraction of the drawn radius
    pub const PICK_RADIUS_SCALE: f32 = 0.7;

    /// Bodies created on scene reset
    pub const DEFAULT_BODY_COUNT: usize = 50;
    /// Upper bound on the configured body count (pair pass is O(n²))
    pub const MAX_BODIES: usize = 500;

    /// Random body radius range [min, max)
    pub const SPAWN_RADIUS_MIN: f32 = 0.02;
    pub const SPAWN_RADIUS_MAX: f32 = 0.07;
    /// Random spawn speed per axis, range [-max, max)
    pub const SPAWN_SPEED_MAX: f32 = 0.25;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal frame delta for headless runs (60 Hz)
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
}

/// Convert a canvas-relative pixel position to normalized device coordinates
///
/// Canvas y grows downward, NDC y grows upward.
#[inline]
pub fn canvas_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, 1.0 - y / height * 2.0)
}
