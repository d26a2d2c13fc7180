//! Viewport adapter
//!
//! Keeps a surface's backing store at CSS size x device pixel ratio and
//! installs a matching scale so drawing code works in CSS pixels.

use glam::Vec2;

use crate::paint::Surface;

/// Visible size of a surface and the display's pixel density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible size in CSS pixels
    pub css_size: Vec2,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f32, css_height: f32, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            css_size: Vec2::new(css_width.max(0.0), css_height.max(0.0)),
            pixel_ratio,
        }
    }

    /// Backing-store resolution in device pixels (at least 1x1)
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.css_size.x as f64 * self.pixel_ratio) as u32;
        let h = (self.css_size.y as f64 * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }

    /// Size the surface and reset its transform to the pixel-ratio scale.
    ///
    /// Safe to call repeatedly: the previous scale is discarded first.
    pub fn apply(&self, surface: &mut dyn Surface) {
        let (w, h) = self.backing_size();
        surface.set_backing_size(w, h);
        surface.reset_transform();
        surface.scale(self.pixel_ratio);
        log::debug!(
            "Viewport {}x{} css @ {}x -> {}x{} px",
            self.css_size.x,
            self.css_size.y,
            self.pixel_ratio,
            w,
            h
        );
    }
}
