//! Pairwise circle collision detection and response
//!
//! Detection produces a [`Contact`] (normal + penetration); the resolver then
//! applies an equal-mass impulse along the normal and splits the positional
//! correction evenly between both bodies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::DEFAULT_COLLISION_RADIUS_SCALE;

/// Geometric overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body's center toward the second's
    pub normal: Vec2,
    /// Center distance
    pub distance: f32,
    /// How far the (scaled) circles interpenetrate
    pub penetration: f32,
}

/// Check whether two bodies overlap
///
/// `radius_scale` shrinks or grows the collision radius relative to the
/// drawn radius. Coincident centers have no usable normal and report no
/// contact.
pub fn contact(a: &Body, b: &Body, radius_scale: f32) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let distance = delta.length();

    if distance <= 0.0 || !distance.is_finite() {
        return None;
    }

    let reach = (a.radius() + b.radius()) * radius_scale;
    if distance >= reach {
        return None;
    }

    Some(Contact {
        normal: delta / distance,
        distance,
        penetration: reach - distance,
    })
}

/// Relative velocity of `b` with respect to `a` along `normal`
///
/// Positive means the bodies are moving apart.
#[inline]
pub fn closing_speed(a: &Body, b: &Body, normal: Vec2) -> f32 {
    (b.vel - a.vel).dot(normal)
}

/// Stateless pairwise collision response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResolver {
    /// Collision radius as a multiple of the drawn radius
    pub radius_scale: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            radius_scale: DEFAULT_COLLISION_RADIUS_SCALE,
        }
    }
}

impl CollisionResolver {
    pub fn new(radius_scale: f32) -> Self {
        Self { radius_scale }
    }

    /// Resolve a collision between two bodies
    ///
    /// Returns `true` only if an impulse was applied. Overlapping bodies that
    /// are already separating are left untouched and report `false`, as are
    /// coincident or non-overlapping pairs.
    ///
    /// Both bodies are treated as unit mass, so the impulse is split in half.
    pub fn resolve(&self, a: &mut Body, b: &mut Body, restitution: f32) -> bool {
        let Some(hit) = contact(a, b, self.radius_scale) else {
            return false;
        };

        let speed = closing_speed(a, b, hit.normal);
        if speed > 0.0 {
            return false;
        }

        let impulse = hit.normal * (-(1.0 + restitution) * speed / 2.0);
        a.vel -= impulse;
        b.vel += impulse;

        let correction = hit.normal * (hit.penetration * 0.5);
        a.pos -= correction;
        b.pos += correction;

        true
    }
}

/// Resolve with the default collision radius scale
pub fn collide_bodies(a: &mut Body, b: &mut Body, restitution: f32) -> bool {
    CollisionResolver::default().resolve(a, b, restitution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    fn body(x: f32, y: f32, vx: f32, vy: f32, r: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), r, RED)
    }

    #[test]
    fn test_head_on_elastic_swaps_velocities() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 0.1);
        let mut b = body(0.15, 0.0, -1.0, 0.0, 0.1);

        assert!(collide_bodies(&mut a, &mut b, 1.0));
        assert!((a.vel.x + 1.0).abs() < 1e-6);
        assert!((b.vel.x - 1.0).abs() < 1e-6);
        assert!(a.vel.y.abs() < 1e-6);
        assert!(b.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_positional_correction_splits_overlap() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 0.1);
        let mut b = body(0.15, 0.0, -1.0, 0.0, 0.1);

        collide_bodies(&mut a, &mut b, 0.9);
        // Overlap 0.05, each body moves 0.025 apart
        assert!((a.pos.x + 0.025).abs() < 1e-6);
        assert!((b.pos.x - 0.175).abs() < 1e-6);
        assert!((a.pos.distance(b.pos) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_inelastic_restitution_zero() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 0.1);
        let mut b = body(0.15, 0.0, -1.0, 0.0, 0.1);

        assert!(collide_bodies(&mut a, &mut b, 0.0));
        // Normal components meet in the middle
        assert!(a.vel.x.abs() < 1e-6);
        assert!(b.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_separating_pair_untouched() {
        let mut a = body(0.0, 0.0, -1.0, 0.0, 0.1);
        let mut b = body(0.15, 0.0, 1.0, 0.0, 0.1);
        let (a0, b0) = (a.clone(), b.clone());

        assert!(!collide_bodies(&mut a, &mut b, 0.9));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_coincident_bodies_rejected() {
        let mut a = body(0.3, 0.3, 1.0, 0.0, 0.1);
        let mut b = body(0.3, 0.3, -1.0, 0.0, 0.1);
        let (a0, b0) = (a.clone(), b.clone());

        assert!(!collide_bodies(&mut a, &mut b, 0.9));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
        assert!(a.is_valid() && b.is_valid());
    }

    #[test]
    fn test_disjoint_bodies_noop() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 0.1);
        let mut b = body(0.2, 0.0, -1.0, 0.0, 0.1);
        let (a0, b0) = (a.clone(), b.clone());

        // Exactly touching is not a collision
        assert!(!collide_bodies(&mut a, &mut b, 0.9));
        assert_eq!(a, a0);
        assert_eq!(b, b0);

        let mut c = body(0.5, 0.5, 0.0, 0.0, 0.1);
        assert!(!collide_bodies(&mut a, &mut c, 0.9));
    }

    #[test]
    fn test_radius_scale_shrinks_hitbox() {
        let resolver = CollisionResolver::new(0.7);
        let mut a = body(0.0, 0.0, 1.0, 0.0, 0.1);
        let mut b = body(0.15, 0.0, -1.0, 0.0, 0.1);

        // 0.15 >= 0.7 * 0.2
        assert!(!resolver.resolve(&mut a, &mut b, 0.9));

        let mut c = body(0.12, 0.0, -1.0, 0.0, 0.1);
        assert!(resolver.resolve(&mut a, &mut c, 0.9));
        // Correction uses the scaled reach
        assert!((a.pos.distance(c.pos) - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_tangential_velocity_preserved() {
        let mut a = body(0.0, 0.0, 1.0, 0.5, 0.1);
        let mut b = body(0.15, 0.0, -1.0, -0.25, 0.1);

        assert!(collide_bodies(&mut a, &mut b, 1.0));
        assert!((a.vel.y - 0.5).abs() < 1e-6);
        assert!((b.vel.y + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_resting_contact_still_corrected() {
        // Zero closing speed: zero impulse, but overlap is pushed apart
        let mut a = body(0.0, 0.0, 0.0, 0.0, 0.1);
        let mut b = body(0.1, 0.0, 0.0, 0.0, 0.1);

        assert!(collide_bodies(&mut a, &mut b, 0.9));
        assert_eq!(a.vel, Vec2::ZERO);
        assert!((a.pos.distance(b.pos) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_contact_reports_normal() {
        let a = body(0.0, 0.0, 0.0, 0.0, 0.1);
        let b = body(0.0, 0.1, 0.0, 0.0, 0.1);
        let hit = contact(&a, &b, 1.0).expect("bodies overlap");
        assert!((hit.normal - Vec2::Y).length() < 1e-6);
        assert!((hit.penetration - 0.1).abs() < 1e-6);
        assert!((hit.distance - 0.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_swapped_arguments_mirror(
            ax in -0.5f32..0.5, ay in -0.5f32..0.5,
            dx in -0.15f32..0.15, dy in -0.15f32..0.15,
            avx in -2.0f32..2.0, avy in -2.0f32..2.0,
            bvx in -2.0f32..2.0, bvy in -2.0f32..2.0,
            e in 0.0f32..=1.0,
        ) {
            let a = body(ax, ay, avx, avy, 0.1);
            let b = body(ax + dx, ay + dy, bvx, bvy, 0.1);

            let (mut a1, mut b1) = (a.clone(), b.clone());
            let hit1 = collide_bodies(&mut a1, &mut b1, e);
            let (mut b2, mut a2) = (b.clone(), a.clone());
            let hit2 = collide_bodies(&mut b2, &mut a2, e);

            prop_assert_eq!(hit1, hit2);
            prop_assert!((a1.vel - a2.vel).length() < 1e-4);
            prop_assert!((b1.vel - b2.vel).length() < 1e-4);

            // Equal mass: momentum is conserved
            let dva = a1.vel - a.vel;
            let dvb = b1.vel - b.vel;
            prop_assert!((dva + dvb).length() < 1e-4);

            prop_assert!(a1.is_valid() && b1.is_valid());
        }

        #[test]
        fn prop_never_adds_closing_energy(
            dx in -0.19f32..0.19, dy in -0.19f32..0.19,
            avx in -2.0f32..2.0, avy in -2.0f32..2.0,
            bvx in -2.0f32..2.0, bvy in -2.0f32..2.0,
            e in 0.0f32..=1.0,
        ) {
            let mut a = body(0.0, 0.0, avx, avy, 0.1);
            let mut b = body(dx, dy, bvx, bvy, 0.1);
            let before = (b.vel - a.vel).length_squared();
            collide_bodies(&mut a, &mut b, e);
            let after = (b.vel - a.vel).length_squared();
            prop_assert!(after <= before + 1e-4);
        }
    }
}
