//! Per-frame simulation pass
//!
//! One tick resolves every unordered pair once (in index order), then
//! integrates every body once. With three or more bodies overlapping at the
//! same time the outcome depends on that pair order.

use glam::Vec2;

use super::scene::Scene;

/// Inputs for a single tick, read once at tick start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Elapsed time in seconds
    pub dt: f32,
    /// Gravity snapshot for this tick
    pub gravity: Vec2,
}

impl TickInput {
    pub fn new(dt: f32, gravity: Vec2) -> Self {
        Self { dt, gravity }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pairs that received an impulse (drives the collision sound cue)
    pub collisions: u32,
}

impl TickReport {
    pub fn any_collision(&self) -> bool {
        self.collisions > 0
    }
}

/// Advance the scene by one frame
pub fn tick(scene: &mut Scene, input: &TickInput) -> TickReport {
    let collisions = resolve_collisions(scene);
    integrate_all(scene, input.dt, input.gravity);
    scene.time_ticks += 1;

    if collisions > 0 {
        log::debug!("tick {}: {} collisions", scene.time_ticks, collisions);
    }

    TickReport { collisions }
}

/// Resolve every unordered pair once, returning how many collided
pub fn resolve_collisions(scene: &mut Scene) -> u32 {
    let resolver = scene.resolver;
    let restitution = scene.restitution;
    let bodies = &mut scene.bodies;

    let mut collisions = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolver.resolve(a, b, restitution) {
                collisions += 1;
            }
        }
    }
    collisions
}

/// Integrate every body inside the scene walls
pub fn integrate_all(scene: &mut Scene, dt: f32, gravity: Vec2) {
    let bounds = scene.bounds;
    for body in &mut scene.bodies {
        body.integrate_within(dt, gravity, &bounds);
    }
}
