//! Colors for configuration and painting

use serde::{Deserialize, Serialize};

/// Opaque palette color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Attach an alpha value (clamped to 0..=1)
    pub fn alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.0,
            g: self.1,
            b: self.2,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Mix toward white by `amount` (0 = unchanged, 1 = white)
    pub fn lighten(self, amount: f32) -> Rgb {
        let t = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * t).round() as u8;
        Rgb(mix(self.0), mix(self.1), mix(self.2))
    }
}

/// Paint color with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 1.0,
    };

    /// CSS color string, e.g. `rgba(99,102,241,0.5)`
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}
