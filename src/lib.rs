//! Portfolio FX - canvas effects for a static portfolio page
//!
//! Core modules:
//! - `sim`: Particle field and orb constellation (update + draw per entity)
//! - `paint`: Drawing surface abstraction and colors
//! - `driver`: Self-rescheduling render loop with a stop token
//! - `viewport`: Backing-store sizing for high-DPI surfaces
//! - `settings`: Tunable configuration loaded from the page
//! - `platform`: Browser bindings (canvas, animation frames, events)

pub mod driver;
pub mod paint;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use driver::{FrameScheduler, ManualScheduler, Stage, StopToken};
pub use paint::{RecordingSurface, Rgb, Rgba, Surface};
pub use settings::Settings;
pub use sim::{OrbConstellation, ParticleField, SharedPointer, Simulation};
pub use viewport::Viewport;

/// Effect tuning constants
pub mod consts {
    // === Particle field ===

    /// Number of particles in the arena
    pub const PARTICLE_COUNT: usize = 80;
    /// Largest arena a config may ask for
    pub const MAX_PARTICLE_COUNT: usize = 10_000;
    /// Opacity at which a fading particle respawns
    pub const OPACITY_FLOOR: f32 = 0.05;
    /// Opacity at which a growing particle starts fading
    pub const OPACITY_CEILING: f32 = 0.6;
    /// Lower bound of the opacity a particle is (re)born with
    pub const SPAWN_OPACITY_MIN: f32 = 0.15;
    /// Off-surface tolerance before a particle is recycled
    pub const PARTICLE_EDGE_MARGIN: f32 = 10.0;
    /// Fraction of the surface height (from the bottom) used for respawns
    pub const RESPAWN_BAND: f32 = 0.4;
    pub const PARTICLE_SIZE_RANGE: (f32, f32) = (0.5, 2.5);
    pub const PARTICLE_SPEED_X_RANGE: (f32, f32) = (-0.15, 0.15);
    pub const PARTICLE_SPEED_Y_RANGE: (f32, f32) = (-0.3, -0.05);
    pub const PARTICLE_FADE_RANGE: (f32, f32) = (0.002, 0.008);
    /// Glow circle radius relative to the core
    pub const GLOW_SCALE: f32 = 3.0;
    /// Glow opacity relative to the core
    pub const GLOW_ALPHA: f32 = 0.15;

    // === Orb constellation ===

    /// Pointer pull only applies inside this distance
    pub const ATTRACTION_RADIUS: f32 = 250.0;
    /// Pull strength numerator (force = k / distance)
    pub const ATTRACTION_FORCE: f32 = 0.5;
    /// Per-tick velocity multiplier
    pub const DAMPING: f32 = 0.985;
    /// Velocity multiplier on wall contact (inverts and attenuates)
    pub const WALL_RESTITUTION: f32 = -0.6;
    /// Orbs closer than this are linked
    pub const LINK_DISTANCE: f32 = 180.0;
    /// Link alpha at zero distance
    pub const LINK_ALPHA: f32 = 0.12;
    /// Pulse amplitude in pixels
    pub const PULSE_AMPLITUDE: f32 = 4.0;
    /// Pulse period divisor (ms)
    pub const PULSE_PERIOD_MS: f64 = 1200.0;
    pub const ORB_RADIUS_RANGE: (f32, f32) = (26.0, 38.0);
    pub const ORB_INITIAL_SPEED: f32 = 0.6;
    /// Halo radius relative to the orb radius
    pub const HALO_SCALE: f32 = 2.2;
    /// Label font size relative to the orb radius
    pub const LABEL_SCALE: f32 = 0.32;
}

