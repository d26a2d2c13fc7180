//! Drawing surface abstraction
//!
//! Simulations paint through this trait so the same update/draw code runs
//! against a browser canvas or a recording surface in tests. Coordinates are
//! CSS pixels; the viewport adapter installs the device-pixel scale.

use glam::Vec2;

use super::color::Rgba;

/// A gradient stop: offset in 0..=1 and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Two-circle radial gradient (canvas `createRadialGradient` semantics)
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: [ColorStop; 2],
}

impl RadialGradient {
    /// Concentric gradient from `from` at the center to `to` at `outer_radius`
    pub fn concentric(center: Vec2, inner_radius: f32, outer_radius: f32, from: Rgba, to: Rgba) -> Self {
        Self {
            inner_center: center,
            inner_radius,
            outer_center: center,
            outer_radius,
            stops: [
                ColorStop { offset: 0.0, color: from },
                ColorStop { offset: 1.0, color: to },
            ],
        }
    }
}

/// 2D drawing target
pub trait Surface {
    /// Set the backing-store resolution in device pixels
    fn set_backing_size(&mut self, width: u32, height: u32);
    /// Restore the identity transform
    fn reset_transform(&mut self);
    /// Multiply the current transform by a uniform scale
    fn scale(&mut self, factor: f64);
    /// Clear a `width` x `height` region from the origin
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Fill a circle of `radius` around `center` with a radial gradient
    fn fill_circle_gradient(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba);
    fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgba);
    /// Draw text centered on `at`
    fn text(&mut self, text: &str, at: Vec2, size_px: f32, color: Rgba);
}
