//! Skills constellation
//!
//! One labeled orb per skill. Orbs drift under damped velocity, are pulled
//! toward the pointer, bounce off the surface edges, and are linked to
//! nearby orbs by lines that fade with distance.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{SharedPointer, Simulation, sample};
use crate::consts::*;
use crate::paint::{ColorStop, RadialGradient, Rgb, Rgba, Surface};
use crate::settings::{ConstellationConfig, DEFAULT_PALETTE};

/// Link line color
const LINK_COLOR: Rgb = Rgb(165, 180, 252);

/// A labeled orb
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub label: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_radius: f32,
    /// Pulsed radius for the current tick
    pub radius: f32,
    pub color: Rgb,
    /// Pulse phase offset (radians)
    pub phase: f32,
}

impl Orb {
    pub fn new(label: impl Into<String>, pos: Vec2, base_radius: f32, color: Rgb) -> Self {
        Self {
            label: label.into(),
            pos,
            vel: Vec2::ZERO,
            base_radius,
            radius: base_radius,
            color,
            phase: 0.0,
        }
    }

    /// Radius at time `now_ms`
    pub fn pulse_radius(&self, now_ms: f64) -> f32 {
        let wave = (now_ms / PULSE_PERIOD_MS + self.phase as f64).sin() as f32;
        self.base_radius + PULSE_AMPLITUDE * wave
    }

    /// Advance one tick: drift, pulse, pointer pull, damping, wall bounce
    pub fn update(&mut self, pointer: Vec2, bounds: Vec2, now_ms: f64, config: &ConstellationConfig) {
        self.pos += self.vel;
        self.radius = self.pulse_radius(now_ms);

        let to_pointer = pointer - self.pos;
        let dist = to_pointer.length();
        if dist > 0.0 && dist < config.attraction_radius {
            self.vel += to_pointer / dist * (config.attraction_force / dist);
        }

        self.vel *= config.damping;

        reflect(&mut self.pos.x, &mut self.vel.x, self.radius, bounds.x - self.radius);
        reflect(&mut self.pos.y, &mut self.vel.y, self.radius, bounds.y - self.radius);
    }

    /// Halo, body, ring, label
    pub fn draw(&self, surface: &mut dyn Surface) {
        let r = self.radius.max(0.0);

        let halo_radius = r * HALO_SCALE;
        let halo = RadialGradient::concentric(
            self.pos,
            r * 0.5,
            halo_radius,
            self.color.alpha(0.25),
            self.color.alpha(0.0),
        );
        surface.fill_circle_gradient(self.pos, halo_radius, &halo);

        let body = RadialGradient {
            inner_center: self.pos - Vec2::splat(r * 0.3),
            inner_radius: r * 0.1,
            outer_center: self.pos,
            outer_radius: r,
            stops: [
                ColorStop {
                    offset: 0.0,
                    color: self.color.lighten(0.45).alpha(0.95),
                },
                ColorStop {
                    offset: 1.0,
                    color: self.color.alpha(0.8),
                },
            ],
        };
        surface.fill_circle_gradient(self.pos, r, &body);

        surface.stroke_circle(self.pos, r, 1.5, self.color.lighten(0.3).alpha(0.6));
        surface.text(&self.label, self.pos, r * LABEL_SCALE, Rgba::WHITE);
    }
}

/// Clamp one axis into `min..=max`, bouncing the velocity on contact.
/// A surface narrower than the orb pins it to the middle.
fn reflect(pos: &mut f32, vel: &mut f32, min: f32, max: f32) {
    if max < min {
        *pos = (min + max) * 0.5;
    } else if *pos < min {
        *pos = min;
        *vel *= WALL_RESTITUTION;
    } else if *pos > max {
        *pos = max;
        *vel *= WALL_RESTITUTION;
    }
}

/// Link alpha for two orbs `distance` apart, `None` when too far to link
pub fn link_alpha(distance: f32, config: &ConstellationConfig) -> Option<f32> {
    if distance < config.link_distance {
        Some(config.link_alpha * (1.0 - distance / config.link_distance))
    } else {
        None
    }
}

/// All orbs plus the pointer they are drawn toward
pub struct OrbConstellation {
    orbs: Vec<Orb>,
    pointer: SharedPointer,
    config: ConstellationConfig,
    bounds: Vec2,
}

impl OrbConstellation {
    /// One orb per configured skill, scattered over `bounds`
    pub fn new(config: ConstellationConfig, pointer: SharedPointer, bounds: Vec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let palette_len = config.palette.len();

        let orbs = config
            .skills
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let base_radius = sample(&mut rng, ORB_RADIUS_RANGE.0, ORB_RADIUS_RANGE.1);
                let color = if palette_len > 0 {
                    config.palette[i % palette_len]
                } else {
                    DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()]
                };
                let mut orb = Orb::new(label.clone(), Vec2::ZERO, base_radius, color);
                orb.pos = Vec2::new(
                    sample(&mut rng, base_radius, bounds.x - base_radius),
                    sample(&mut rng, base_radius, bounds.y - base_radius),
                );
                orb.vel = Vec2::new(
                    sample(&mut rng, -ORB_INITIAL_SPEED, ORB_INITIAL_SPEED),
                    sample(&mut rng, -ORB_INITIAL_SPEED, ORB_INITIAL_SPEED),
                );
                orb.phase = sample(&mut rng, 0.0, TAU);
                orb
            })
            .collect();

        Self {
            orbs,
            pointer,
            config,
            bounds,
        }
    }

    /// Build from explicit orbs
    pub fn from_orbs(orbs: Vec<Orb>, config: ConstellationConfig, pointer: SharedPointer, bounds: Vec2) -> Self {
        Self {
            orbs,
            pointer,
            config,
            bounds,
        }
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn pointer(&self) -> &SharedPointer {
        &self.pointer
    }

    /// Update every orb without drawing
    pub fn update(&mut self, now_ms: f64) {
        let target = self.pointer.resolve(self.bounds);
        for orb in &mut self.orbs {
            orb.update(target, self.bounds, now_ms, &self.config);
        }
    }

    /// Lines between every pair of orbs closer than the link distance
    pub fn draw_links(&self, surface: &mut dyn Surface) {
        for (i, a) in self.orbs.iter().enumerate() {
            for b in &self.orbs[i + 1..] {
                if let Some(alpha) = link_alpha(a.pos.distance(b.pos), &self.config) {
                    surface.line(a.pos, b.pos, 1.0, LINK_COLOR.alpha(alpha));
                }
            }
        }
    }
}

impl Simulation for OrbConstellation {
    fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Vec2 {
        self.bounds
    }

    fn tick(&mut self, surface: &mut dyn Surface, now_ms: f64) {
        self.update(now_ms);
        self.draw_links(surface);
        for orb in &self.orbs {
            orb.draw(surface);
        }
    }
}
