//! Physics core
//!
//! Bodies, pairwise collision response and the per-frame tick. This module
//! has no rendering or platform dependencies:
//! - Gravity arrives as a per-tick snapshot
//! - Seeded RNG only
//! - Stable pair order (by body index)

pub mod body;
pub mod bounds;
pub mod collision;
pub mod gravity;
pub mod scene;
pub mod tick;

pub use body::Body;
pub use bounds::Bounds;
pub use collision::{CollisionResolver, Contact, closing_speed, collide_bodies, contact};
pub use gravity::{
    DEFAULT_GRAVITY, GravityReceiver, GravitySender, gravity_channel, gravity_from_orientation,
};
pub use scene::Scene;
pub use tick::{TickInput, TickReport, integrate_all, resolve_collisions, tick};
