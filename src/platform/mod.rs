//! Platform layer
//!
//! Browser bindings for the effects:
//! - Canvas lookup (a missing canvas disables that effect)
//! - `requestAnimationFrame` scheduling
//! - Resize and pointer events

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Canvas element id for the hero particle field
pub const PARTICLE_CANVAS_ID: &str = "hero-particles";
/// Canvas element id for the skills constellation
pub const CONSTELLATION_CANVAS_ID: &str = "skills-canvas";
