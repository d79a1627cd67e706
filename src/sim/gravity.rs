//! Gravity input
//!
//! The input side (static setting or device-orientation callback) writes the
//! latest gravity vector; the simulation reads it once at the start of each
//! tick. Both components travel together in one atomic word so a reader can
//! never observe x from one write and y from another.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

/// Gravity used before any sensor reading arrives
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -1.0);

/// Tilt (degrees) that maps to one unit of gravity
pub const ORIENTATION_FULL_TILT: f32 = 90.0;

#[inline]
fn pack(v: Vec2) -> u64 {
    ((v.x.to_bits() as u64) << 32) | v.y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

/// Write half of the gravity channel
#[derive(Debug)]
pub struct GravitySender {
    slot: Arc<AtomicU64>,
}

/// Read half of the gravity channel
#[derive(Debug)]
pub struct GravityReceiver {
    slot: Arc<AtomicU64>,
}

/// Create a latest-value gravity channel seeded with `initial`
pub fn gravity_channel(initial: Vec2) -> (GravitySender, GravityReceiver) {
    let slot = Arc::new(AtomicU64::new(pack(initial)));
    (
        GravitySender { slot: slot.clone() },
        GravityReceiver { slot },
    )
}

impl GravitySender {
    /// Publish a new gravity vector, replacing any unread one
    ///
    /// Non-finite vectors are dropped so a bad sensor sample cannot poison
    /// every body on the next tick.
    pub fn send(&self, gravity: Vec2) {
        if !gravity.is_finite() {
            log::warn!("Ignoring non-finite gravity {:?}", gravity);
            return;
        }
        self.slot.store(pack(gravity), Ordering::Release);
    }
}

impl GravityReceiver {
    /// Latest published gravity vector
    pub fn latest(&self) -> Vec2 {
        unpack(self.slot.load(Ordering::Acquire))
    }
}

/// Map device orientation angles to a gravity vector
///
/// `beta` is front-back tilt, `gamma` left-right tilt, both in degrees.
/// Browsers report `null` for either when no sensor is present.
pub fn gravity_from_orientation(beta: Option<f64>, gamma: Option<f64>) -> Option<Vec2> {
    let (beta, gamma) = (beta? as f32, gamma? as f32);
    if !beta.is_finite() || !gamma.is_finite() {
        return None;
    }
    let beta = beta.clamp(-ORIENTATION_FULL_TILT, ORIENTATION_FULL_TILT);
    Some(Vec2::new(
        gamma / ORIENTATION_FULL_TILT,
        -beta / ORIENTATION_FULL_TILT,
    ))
}
