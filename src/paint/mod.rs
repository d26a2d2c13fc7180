//! Painting: colors and the surfaces simulations draw onto

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;
pub mod recording;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use color::{Rgb, Rgba};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{ColorStop, RadialGradient, Surface};
