//! Ambient particle field
//!
//! A fixed arena of glow points drifting upward. Each particle fades in to
//! the opacity ceiling, fades back out, and is respawned in place near the
//! bottom of the surface once it reaches the floor or drifts off-screen.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Simulation, sample};
use crate::consts::*;
use crate::paint::{Rgb, Surface};
use crate::settings::FieldConfig;

/// Where a (re)spawned particle is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnRegion {
    /// Anywhere on the surface (initial seeding)
    Anywhere,
    /// Lower band of the surface (respawns)
    Bottom,
}

/// A single glow point
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Core radius
    pub size: f32,
    pub opacity: f32,
    /// Opacity change per tick
    pub fade_speed: f32,
    /// Fading in (true) or out (false)
    pub growing: bool,
}

impl Particle {
    fn spawn(rng: &mut impl Rng, bounds: Vec2, region: SpawnRegion, config: &FieldConfig) -> Self {
        let y_min = match region {
            SpawnRegion::Anywhere => 0.0,
            SpawnRegion::Bottom => bounds.y * (1.0 - RESPAWN_BAND),
        };
        let spawn_opacity = SPAWN_OPACITY_MIN.max(config.opacity_floor).min(config.opacity_ceiling);

        Self {
            pos: Vec2::new(sample(rng, 0.0, bounds.x), sample(rng, y_min, bounds.y)),
            vel: Vec2::new(
                sample(rng, PARTICLE_SPEED_X_RANGE.0, PARTICLE_SPEED_X_RANGE.1),
                sample(rng, PARTICLE_SPEED_Y_RANGE.0, PARTICLE_SPEED_Y_RANGE.1),
            ),
            size: sample(rng, PARTICLE_SIZE_RANGE.0, PARTICLE_SIZE_RANGE.1),
            opacity: sample(rng, spawn_opacity, config.opacity_ceiling),
            fade_speed: sample(rng, PARTICLE_FADE_RANGE.0, PARTICLE_FADE_RANGE.1),
            growing: rng.random_bool(0.5),
        }
    }

    /// Reinitialize in place near the bottom of the surface
    pub fn reset(&mut self, rng: &mut impl Rng, bounds: Vec2, config: &FieldConfig) {
        *self = Self::spawn(rng, bounds, SpawnRegion::Bottom, config);
    }

    /// Whether the particle left the surface (top, left or right)
    pub fn is_off_surface(&self, bounds: Vec2) -> bool {
        self.pos.y < -PARTICLE_EDGE_MARGIN
            || self.pos.x < -PARTICLE_EDGE_MARGIN
            || self.pos.x > bounds.x + PARTICLE_EDGE_MARGIN
    }

    /// Advance one tick. Returns true if the particle was respawned.
    pub fn update(&mut self, rng: &mut impl Rng, bounds: Vec2, config: &FieldConfig) -> bool {
        self.pos += self.vel;

        let mut respawned = false;
        if self.growing {
            self.opacity += self.fade_speed;
            if self.opacity >= config.opacity_ceiling {
                self.opacity = config.opacity_ceiling;
                self.growing = false;
            }
        } else {
            self.opacity -= self.fade_speed;
            if self.opacity <= config.opacity_floor {
                self.reset(rng, bounds, config);
                respawned = true;
            }
        }

        if self.is_off_surface(bounds) {
            self.reset(rng, bounds, config);
            respawned = true;
        }
        respawned
    }

    /// Core dot plus a faint 3x glow around it
    pub fn draw(&self, surface: &mut dyn Surface, color: Rgb) {
        surface.fill_circle(self.pos, self.size, color.alpha(self.opacity));
        surface.fill_circle(
            self.pos,
            self.size * GLOW_SCALE,
            color.alpha(self.opacity * GLOW_ALPHA),
        );
    }
}

/// Fixed-size arena of particles
pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
    bounds: Vec2,
    rng: Pcg32,
}

impl ParticleField {
    /// Seed `config.count` particles uniformly over `bounds`
    pub fn new(config: FieldConfig, bounds: Vec2, seed: u64) -> Self {
        let config = config.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..config.count)
            .map(|_| Particle::spawn(&mut rng, bounds, SpawnRegion::Anywhere, &config))
            .collect();
        Self {
            particles,
            config,
            bounds,
            rng,
        }
    }

    /// Build from explicit particles (respawns still use the seeded RNG)
    pub fn from_particles(particles: Vec<Particle>, config: FieldConfig, bounds: Vec2, seed: u64) -> Self {
        Self {
            particles,
            config: config.sanitized(),
            bounds,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Update every particle without drawing. Returns the number respawned.
    pub fn update(&mut self) -> usize {
        let Self {
            particles,
            config,
            bounds,
            rng,
        } = self;
        let mut respawned = 0;
        for particle in particles.iter_mut() {
            if particle.update(rng, *bounds, config) {
                respawned += 1;
            }
        }
        respawned
    }
}

impl Simulation for ParticleField {
    fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Vec2 {
        self.bounds
    }

    fn tick(&mut self, surface: &mut dyn Surface, _now_ms: f64) {
        let Self {
            particles,
            config,
            bounds,
            rng,
        } = self;
        for particle in particles.iter_mut() {
            particle.update(rng, *bounds, config);
            particle.draw(surface, config.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCommand, RecordingSurface};

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn rising(opacity: f32, fade_speed: f32, growing: bool) -> Particle {
        Particle {
            pos: Vec2::new(400.0, 500.0),
            vel: Vec2::new(0.0, -0.2),
            size: 1.0,
            opacity,
            fade_speed,
            growing,
        }
    }

    #[test]
    fn test_arena_size() {
        let field = ParticleField::new(FieldConfig::default(), BOUNDS, 7);
        assert_eq!(field.len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_arena_size_is_constant() {
        let mut field = ParticleField::new(FieldConfig::default(), BOUNDS, 7);
        for _ in 0..2000 {
            field.update();
        }
        assert_eq!(field.len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_spawn_attributes_in_range() {
        let field = ParticleField::new(FieldConfig::default(), BOUNDS, 11);
        for p in field.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x < BOUNDS.x);
            assert!(p.pos.y >= 0.0 && p.pos.y < BOUNDS.y);
            assert!(p.size >= 0.5 && p.size < 2.5);
            assert!(p.vel.y < -0.05 + f32::EPSILON && p.vel.y >= -0.3);
            assert!(p.opacity >= SPAWN_OPACITY_MIN && p.opacity < OPACITY_CEILING);
        }
    }

    #[test]
    fn test_flip_to_fading_at_ceiling() {
        let config = FieldConfig::default();
        let mut field = ParticleField::from_particles(vec![rising(0.15, 0.01, true)], config.clone(), BOUNDS, 1);

        // Replay the accumulation to find the first tick at or above the ceiling
        let mut expected_opacity = 0.15_f32;
        let mut expected_tick = 0;
        while expected_opacity < config.opacity_ceiling {
            expected_opacity += 0.01;
            expected_tick += 1;
        }

        for tick in 1..=expected_tick {
            field.update();
            let p = &field.particles()[0];
            if tick < expected_tick {
                assert!(p.growing, "flipped early at tick {tick}");
                assert!(p.opacity < config.opacity_ceiling);
            }
        }
        let p = &field.particles()[0];
        assert!(!p.growing);
        assert_eq!(p.opacity, config.opacity_ceiling);
        assert!((45..=46).contains(&expected_tick));
    }

    #[test]
    fn test_respawn_at_floor() {
        let config = FieldConfig::default();
        let mut field = ParticleField::from_particles(vec![rising(0.055, 0.01, false)], config, BOUNDS, 3);
        assert_eq!(field.update(), 1);

        let p = &field.particles()[0];
        assert!(p.opacity >= SPAWN_OPACITY_MIN);
        // Respawns land in the bottom band
        assert!(p.pos.y >= BOUNDS.y * (1.0 - RESPAWN_BAND));
    }

    #[test]
    fn test_respawn_when_off_top() {
        let mut p = rising(0.3, 0.001, true);
        p.pos = Vec2::new(100.0, -9.9);
        let mut field = ParticleField::from_particles(vec![p], FieldConfig::default(), BOUNDS, 5);
        assert_eq!(field.update(), 1);
        assert!(field.particles()[0].pos.y >= 0.0);
    }

    #[test]
    fn test_respawn_when_off_sides() {
        let mut left = rising(0.3, 0.001, true);
        left.pos = Vec2::new(-10.0, 300.0);
        left.vel = Vec2::new(-0.1, 0.0);
        let mut right = rising(0.3, 0.001, true);
        right.pos = Vec2::new(BOUNDS.x + 10.0, 300.0);
        right.vel = Vec2::new(0.1, 0.0);
        let mut inside = rising(0.3, 0.001, true);
        inside.pos = Vec2::new(-9.0, 300.0);
        inside.vel = Vec2::ZERO;

        let mut field =
            ParticleField::from_particles(vec![left, right, inside.clone()], FieldConfig::default(), BOUNDS, 5);
        assert_eq!(field.update(), 2);
        assert_eq!(field.particles()[2].pos, inside.pos);
    }

    #[test]
    fn test_opacity_stays_in_bounds() {
        let config = FieldConfig::default();
        let mut field = ParticleField::new(config.clone(), BOUNDS, 42);
        for _ in 0..5000 {
            field.update();
            for p in field.particles() {
                assert!(p.opacity >= config.opacity_floor && p.opacity <= config.opacity_ceiling);
            }
        }
    }

    #[test]
    fn test_draw_core_then_glow() {
        let p = rising(0.4, 0.01, true);
        let mut surface = RecordingSurface::new();
        p.draw(&mut surface, Rgb(99, 102, 241));

        assert_eq!(surface.commands.len(), 2);
        match (&surface.commands[0], &surface.commands[1]) {
            (
                DrawCommand::Circle { radius: r0, color: c0, .. },
                DrawCommand::Circle { radius: r1, color: c1, .. },
            ) => {
                assert_eq!(*r0, 1.0);
                assert_eq!(*r1, 3.0);
                assert_eq!(c0.a, 0.4);
                assert!((c1.a - 0.06).abs() < 1e-6);
                assert_eq!((c0.r, c0.g, c0.b), (99, 102, 241));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_tick_draws_every_particle() {
        let mut field = ParticleField::new(FieldConfig::default(), BOUNDS, 9);
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface, 0.0);
        assert_eq!(surface.commands.len(), PARTICLE_COUNT * 2);
    }

    #[test]
    fn test_zero_sized_surface_does_not_panic() {
        let mut field = ParticleField::new(FieldConfig::default(), Vec2::ZERO, 1);
        for _ in 0..100 {
            field.update();
        }
        assert_eq!(field.len(), PARTICLE_COUNT);
    }
    #[test]
    fn test_inverted_opacity_bounds_are_repaired() {
        let config = FieldConfig {
            opacity_floor: 0.7,
            opacity_ceiling: 0.2,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config, BOUNDS, 1);
        assert_eq!(field.len(), PARTICLE_COUNT);
        for _ in 0..200 {
            field.update();
            for p in field.particles() {
                assert!(p.opacity >= OPACITY_FLOOR && p.opacity <= OPACITY_CEILING);
            }
        }
    }

    #[test]
    fn test_oversized_arena_is_capped() {
        let config = FieldConfig {
            count: usize::MAX,
            ..FieldConfig::default()
        };
        let field = ParticleField::new(config, BOUNDS, 1);
        assert_eq!(field.len(), MAX_PARTICLE_COUNT);
    }
}
