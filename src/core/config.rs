//! Tunables for the particle field, the reveal tracker and the pointer follower
//!
//! Every field has a default, so a partial JSON object (or none at all) is a
//! valid configuration.

use serde::{Deserialize, Serialize};

/// Upper bound on `particle_count`; a frame is O(N²)
pub const MAX_PARTICLES: usize = 2000;

/// Top-level configuration passed to `mount` / read by the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub field: FieldConfig,
    pub reveal: RevealConfig,
    pub pointer: PointerConfig,
}

impl EffectsConfig {
    /// Parse and normalise a JSON config
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn sanitized(self) -> Self {
        Self {
            field: self.field.sanitized(),
            reveal: self.reveal.sanitized(),
            pointer: self.pointer.sanitized(),
        }
    }
}

/// Particle field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Fixed number of particles
    pub particle_count: usize,
    /// Disc radius range [radius_min, radius_max)
    pub radius_min: f64,
    pub radius_max: f64,
    /// Velocity components are drawn from [-max_speed, max_speed)
    pub max_speed: f64,
    /// Pairs closer than this are linked
    pub link_distance: f64,
    /// Link opacity at distance 0
    pub link_max_alpha: f64,
    pub link_width: f64,
    /// Fixed seed for reproducible fields; entropy when unset
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            radius_min: 1.0,
            radius_max: 3.0,
            max_speed: 0.25,
            link_distance: 150.0,
            link_max_alpha: 0.1,
            link_width: 0.5,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn sanitized(self) -> Self {
        let (radius_min, radius_max) =
            ordered(non_negative(self.radius_min), non_negative(self.radius_max));
        Self {
            particle_count: self.particle_count.min(MAX_PARTICLES),
            radius_min,
            radius_max,
            max_speed: non_negative(self.max_speed),
            link_distance: non_negative(self.link_distance),
            link_max_alpha: unit(self.link_max_alpha),
            link_width: non_negative(self.link_width),
            ..self
        }
    }

    /// Number of pair checks one frame performs
    pub fn pairs_per_frame(&self) -> usize {
        let n = self.particle_count;
        n.saturating_mul(n.saturating_sub(1)) / 2
    }
}

/// Scroll-reveal parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must sit inside the viewport box
    pub threshold: f64,
    /// The viewport box is shrunk by this much from the bottom edge
    pub bottom_margin: f64,
    pub transition_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 100.0,
            transition_ms: 1000,
        }
    }
}

impl RevealConfig {
    pub fn sanitized(self) -> Self {
        Self {
            threshold: unit(self.threshold),
            ..self
        }
    }

    /// IntersectionObserver `rootMargin` for this config
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", -self.bottom_margin)
    }
}

/// Cursor follower and sticky nav parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub hover_scale: f64,
    /// Nav bar condenses once the page scrolls past this offset
    pub nav_scroll_threshold: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            hover_scale: 2.0,
            nav_scroll_threshold: 50.0,
        }
    }
}

impl PointerConfig {
    pub fn sanitized(self) -> Self {
        Self {
            hover_scale: if self.hover_scale.is_finite() && self.hover_scale > 0.0 {
                self.hover_scale
            } else {
                1.0
            },
            ..self
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
