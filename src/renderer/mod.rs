//! Render-side data
//!
//! The drawing layer lives outside the physics core; this module only
//! defines the snapshot it consumes.

pub mod instance;

pub use instance::{CircleInstance, as_floats, colors, css_rgba};
