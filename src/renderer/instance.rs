//! Per-body instance data for the drawing layer

use bytemuck::{Pod, Zeroable};

use crate::sim::Body;

/// One drawn circle: center, radius and RGBA color
///
/// Tightly packed so a snapshot crosses into JS as one `Float32Array`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    pub const fn new(center: [f32; 2], radius: f32, color: [f32; 4]) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    /// Floats per instance when viewed as a flat `f32` slice
    pub const FLOATS: usize = std::mem::size_of::<CircleInstance>() / std::mem::size_of::<f32>();
}

impl From<&Body> for CircleInstance {
    fn from(body: &Body) -> Self {
        Self::new(body.pos.to_array(), body.radius(), body.color())
    }
}

/// View a snapshot as a flat float slice
pub fn as_floats(instances: &[CircleInstance]) -> &[f32] {
    bytemuck::cast_slice(instances)
}

/// Convert a color channel in [0, 1] to a CSS byte
#[inline]
pub fn channel_to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// CSS `rgba()` string for a color
pub fn css_rgba(color: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        channel_to_byte(color[0]),
        channel_to_byte(color[1]),
        channel_to_byte(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Colors for scene elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.05, 0.05, 0.1, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 28);
        assert_eq!(CircleInstance::FLOATS, 7);
    }

    #[test]
    fn test_from_body_and_flatten() {
        let body = Body::new(Vec2::new(0.25, -0.5), Vec2::ONE, 0.05, [0.1, 0.2, 0.3, 1.0]);
        let instances = [CircleInstance::from(&body)];
        let floats = as_floats(&instances);
        assert_eq!(floats, &[0.25, -0.5, 0.05, 0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_flat_view_strides_by_instance() {
        let instances = [
            CircleInstance::new([0.1, 0.2], 0.03, [1.0, 0.0, 0.0, 1.0]),
            CircleInstance::new([-0.4, 0.5], 0.06, [0.0, 1.0, 0.0, 0.5]),
        ];
        let floats = as_floats(&instances);
        assert_eq!(floats.len(), 2 * CircleInstance::FLOATS);

        let second = &floats[CircleInstance::FLOATS..];
        assert_eq!(&second[..3], &[-0.4, 0.5, 0.06]);
        assert_eq!(second[6], 0.5);
    }

    #[test]
    fn test_css_rgba() {
        assert_eq!(css_rgba([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1.000)");
        assert_eq!(css_rgba([2.0, -1.0, 0.0, 0.5]), "rgba(255, 0, 0, 0.500)");
    }
}
