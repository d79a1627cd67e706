//! Scene state: the set of bodies plus the parameters they share
//!
//! The scene is the explicit simulation context owned by the frame loop.
//! Nothing here is global; gravity is handed in per tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;
use super::bounds::Bounds;
use super::collision::CollisionResolver;
use crate::consts::*;
use crate::error::Error;
use crate::renderer::CircleInstance;
use crate::settings::Settings;

/// All bodies and the shared collision parameters
#[derive(Debug, Clone)]
pub struct Scene {
    /// Seed of the last reset
    pub seed: u64,
    /// Ticks advanced since the last reset
    pub time_ticks: u64,
    /// Walls
    pub bounds: Bounds,
    /// Pairwise collision response
    pub resolver: CollisionResolver,
    /// Restitution passed to every resolve call
    pub restitution: f32,
    /// Bodies in insertion order (pair order follows this order)
    pub(crate) bodies: Vec<Body>,
    /// Bodies created on reset
    body_count: usize,
    rng: Pcg32,
}

impl Scene {
    /// Build a scene from validated settings and populate it
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, Error> {
        settings.validate()?;

        let mut scene = Self {
            seed,
            time_ticks: 0,
            bounds: settings.bounds,
            resolver: CollisionResolver::new(settings.collision_radius_scale),
            restitution: settings.restitution,
            bodies: Vec::with_capacity(settings.body_count),
            body_count: settings.body_count,
            rng: Pcg32::seed_from_u64(seed),
        };
        scene.populate();
        Ok(scene)
    }

    /// An empty scene with default parameters (bodies added by hand)
    pub fn empty() -> Self {
        Self {
            seed: 0,
            time_ticks: 0,
            bounds: Bounds::UNIT,
            resolver: CollisionResolver::default(),
            restitution: DEFAULT_RESTITUTION,
            bodies: Vec::new(),
            body_count: 0,
            rng: Pcg32::seed_from_u64(0),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Discard every body and repopulate from a new seed
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(seed);
        self.bodies.clear();
        self.populate();
        log::info!("Scene reset with seed {} ({} bodies)", seed, self.bodies.len());
    }

    /// Apply new collision/wall parameters without touching the bodies
    ///
    /// The body count only takes effect on the next reset.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<(), Error> {
        settings.validate()?;
        self.bounds = settings.bounds;
        self.resolver = CollisionResolver::new(settings.collision_radius_scale);
        self.restitution = settings.restitution;
        self.body_count = settings.body_count;
        Ok(())
    }

    fn populate(&mut self) {
        for _ in 0..self.body_count {
            let pos = Vec2::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
            );
            let body = self.random_body(pos);
            self.bodies.push(body);
        }
    }

    fn random_body(&mut self, pos: Vec2) -> Body {
        let radius = self.rng.random_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
        let vel = Vec2::new(
            self.rng.random_range(-SPAWN_SPEED_MAX..SPAWN_SPEED_MAX),
            self.rng.random_range(-SPAWN_SPEED_MAX..SPAWN_SPEED_MAX),
        );
        let color = [
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            1.0,
        ];
        Body::new(pos, vel, radius, color)
    }

    /// True once the scene holds `MAX_BODIES` bodies
    pub fn is_full(&self) -> bool {
        self.bodies.len() >= MAX_BODIES
    }

    /// Add a body, rejecting non-finite state, a non-positive radius, or a full scene
    pub fn add_body(&mut self, body: Body) -> Result<usize, Error> {
        if self.is_full() {
            log::warn!("Scene full, rejected body at {:?}", body.pos);
            return Err(Error::SceneFull {
                capacity: MAX_BODIES,
            });
        }
        if !body.is_valid() {
            log::warn!("Rejected body {:?}", body);
            return Err(Error::InvalidBody(format!(
                "radius {} at {:?} moving {:?}",
                body.radius(),
                body.pos,
                body.vel
            )));
        }
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Spawn a random body centered on `pos` (pointer click)
    ///
    /// Returns `None` once the scene is full.
    pub fn spawn_at(&mut self, pos: Vec2) -> Option<usize> {
        if self.is_full() {
            log::warn!("Scene full ({} bodies), ignoring spawn at {:?}", MAX_BODIES, pos);
            return None;
        }
        let body = self.random_body(pos);
        self.bodies.push(body);
        log::debug!("Spawned body {} at {:?}", self.bodies.len() - 1, pos);
        Some(self.bodies.len() - 1)
    }

    /// Index of the first body whose hit circle contains `point`
    pub fn pick(&self, point: Vec2) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.hit_test(point, PICK_RADIUS_SCALE))
    }

    /// Move a held body to `point` and stop it
    pub fn drag_to(&mut self, index: usize, point: Vec2) {
        if !point.is_finite() {
            return;
        }
        if let Some(body) = self.bodies.get_mut(index) {
            body.pos = point;
            body.vel = Vec2::ZERO;
        }
    }

    /// Render snapshot of every body, in body order
    pub fn snapshot(&self) -> Vec<CircleInstance> {
        self.bodies.iter().map(CircleInstance::from).collect()
    }
}
