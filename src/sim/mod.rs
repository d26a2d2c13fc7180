//! Effect simulations
//!
//! Each simulation owns its entities and paints them onto whatever surface
//! the render driver hands it:
//! - No platform dependencies (surfaces and pointer state are injected)
//! - Stable iteration order (creation order) for update and draw
//! - Seeded RNG so tests can reproduce a run

pub mod orb;
pub mod particle;
pub mod pointer;

pub use orb::{Orb, OrbConstellation, link_alpha};
pub use particle::{Particle, ParticleField};
pub use pointer::SharedPointer;

use glam::Vec2;
use rand::Rng;

use crate::paint::Surface;

/// A per-frame effect driven by the render loop
pub trait Simulation {
    /// Surface size changed (CSS pixels)
    fn resize(&mut self, bounds: Vec2);

    /// Current surface size (CSS pixels)
    fn bounds(&self) -> Vec2;

    /// Update every entity and paint it. `now_ms` is the frame timestamp.
    fn tick(&mut self, surface: &mut dyn Surface, now_ms: f64);
}

/// Uniform sample in `lo..hi`, or `lo` when the range is empty
#[inline]
pub(crate) fn sample(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
