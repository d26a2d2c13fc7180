//! Effect settings
//!
//! Read once at startup from a JSON block embedded in the page
//! (`<script type="application/json" id="fx-config">`). Every field is
//! optional; anything missing falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::paint::Rgb;

/// Skill labels shown in the constellation, one orb each
pub const DEFAULT_SKILLS: [&str; 18] = [
    "Rust",
    "TypeScript",
    "Python",
    "React",
    "Node.js",
    "WebAssembly",
    "PostgreSQL",
    "Redis",
    "Docker",
    "Kubernetes",
    "AWS",
    "GraphQL",
    "Linux",
    "Git",
    "CI/CD",
    "Go",
    "TensorFlow",
    "Figma",
];

/// Orb palette, assigned by index modulo length
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb(99, 102, 241),  // indigo
    Rgb(168, 85, 247),  // purple
    Rgb(34, 211, 238),  // cyan
    Rgb(236, 72, 153),  // pink
    Rgb(16, 185, 129),  // emerald
    Rgb(245, 158, 11),  // amber
];

/// Particle field tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Arena size
    pub count: usize,
    /// Respawn when a fading particle reaches this opacity
    pub opacity_floor: f32,
    /// Start fading when a growing particle reaches this opacity
    pub opacity_ceiling: f32,
    /// Particle hue
    pub color: Rgb,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            opacity_floor: OPACITY_FLOOR,
            opacity_ceiling: OPACITY_CEILING,
            color: Rgb(99, 102, 241),
        }
    }
}

impl FieldConfig {
    /// Repair opacity bounds and cap the arena size
    pub fn sanitized(mut self) -> Self {
        if !(self.opacity_floor.is_finite() && self.opacity_ceiling.is_finite())
            || self.opacity_floor < 0.0
            || self.opacity_ceiling > 1.0
            || self.opacity_floor >= self.opacity_ceiling
        {
            log::warn!(
                "Invalid opacity bounds {}..{}, using defaults",
                self.opacity_floor,
                self.opacity_ceiling
            );
            self.opacity_floor = OPACITY_FLOOR;
            self.opacity_ceiling = OPACITY_CEILING;
        }
        if self.count > MAX_PARTICLE_COUNT {
            log::warn!(
                "Particle count {} capped at {}",
                self.count,
                MAX_PARTICLE_COUNT
            );
            self.count = MAX_PARTICLE_COUNT;
        }
        self
    }
}

/// Orb constellation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub skills: Vec<String>,
    pub palette: Vec<Rgb>,
    pub attraction_radius: f32,
    pub attraction_force: f32,
    pub damping: f32,
    pub link_distance: f32,
    pub link_alpha: f32,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            palette: DEFAULT_PALETTE.to_vec(),
            attraction_radius: ATTRACTION_RADIUS,
            attraction_force: ATTRACTION_FORCE,
            damping: DAMPING,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
        }
    }
}

/// All effect settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub particles: FieldConfig,
    pub constellation: ConstellationConfig,
}

impl Settings {
    /// Element id of the embedded JSON block
    pub const CONFIG_ELEMENT_ID: &'static str = "fx-config";

    /// Parse from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Repair values that would break the simulations
    pub fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        self.particles = self.particles.sanitized();

        let c = &mut self.constellation;
        if c.palette.is_empty() {
            c.palette = defaults.constellation.palette.clone();
        }
        if !(c.damping.is_finite() && (0.0..=1.0).contains(&c.damping)) {
            c.damping = defaults.constellation.damping;
        }
        if !(c.attraction_radius.is_finite() && c.attraction_radius >= 0.0) {
            c.attraction_radius = defaults.constellation.attraction_radius;
        }
        if !c.attraction_force.is_finite() {
            c.attraction_force = defaults.constellation.attraction_force;
        }
        if !(c.link_distance.is_finite() && c.link_distance > 0.0) {
            c.link_distance = defaults.constellation.link_distance;
        }
        c.link_alpha = if c.link_alpha.is_finite() {
            c.link_alpha.clamp(0.0, 1.0)
        } else {
            defaults.constellation.link_alpha
        };

        self
    }

    /// Load from the page's config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring #{}: {}", Self::CONFIG_ELEMENT_ID, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
