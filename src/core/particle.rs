//! A single background particle and how it is spawned and moved

use rand::Rng;

use super::config::FieldConfig;
use crate::theme::{colors, Color};

/// A moving disc in viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Units per frame
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    /// Fixed at spawn
    pub color: Color,
}

impl Particle {
    /// Random particle inside a `width` x `height` box
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        config: &FieldConfig,
        width: f64,
        height: f64,
    ) -> Self {
        let hue = colors::PARTICLE_HUE_MIN + sample(rng, 0.0, colors::PARTICLE_HUE_SPAN);
        let alpha = colors::PARTICLE_ALPHA_MIN + sample(rng, 0.0, colors::PARTICLE_ALPHA_SPAN);

        Self {
            x: sample(rng, 0.0, width),
            y: sample(rng, 0.0, height),
            vx: sample(rng, -config.max_speed, config.max_speed),
            vy: sample(rng, -config.max_speed, config.max_speed),
            radius: sample(rng, config.radius_min, config.radius_max),
            color: Color::hsla(hue, colors::PARTICLE_SATURATION, colors::PARTICLE_LIGHTNESS, alpha),
        }
    }

    /// Advance one frame and reflect off the `width` x `height` box.
    ///
    /// Returns true if a velocity component changed sign.
    pub fn advance(&mut self, width: f64, height: f64) -> bool {
        self.x += self.vx;
        self.y += self.vy;

        let before = (self.vx, self.vy);
        self.vx = reflect(self.x, self.vx, width);
        self.vy = reflect(self.y, self.vy, height);
        before != (self.vx, self.vy)
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Point the velocity back inside [0, extent]; no damping, no clamping.
fn reflect(pos: f64, vel: f64, extent: f64) -> f64 {
    if pos < 0.0 {
        vel.abs()
    } else if pos > extent {
        -vel.abs()
    } else {
        vel
    }
}

/// Uniform sample from [lo, hi); degenerate ranges collapse to `lo`.
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
            color: colors::LINK,
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::default();
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, &config, 1024.0, 768.0);
            assert!((0.0..1024.0).contains(&p.x));
            assert!((0.0..768.0).contains(&p.y));
            assert!((-0.25..0.25).contains(&p.vx));
            assert!((-0.25..0.25).contains(&p.vy));
            assert!((1.0..3.0).contains(&p.radius));
            match p.color {
                Color::Hsla { h, s, l, a } => {
                    assert!((260.0..320.0).contains(&h), "hue {} out of violet band", h);
                    assert_eq!((s, l), (70.0, 60.0));
                    assert!((0.1..0.4).contains(&a), "alpha {} out of range", a);
                }
                other => panic!("unexpected particle colour {:?}", other),
            }
        }
    }

    #[test]
    fn spawn_in_zero_sized_box_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(2);
        let p = Particle::spawn(&mut rng, &FieldConfig::default(), 0.0, 0.0);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn crossing_right_edge_flips_once_and_keeps_speed() {
        let mut p = still(99.9, 50.0, 0.2, 0.1);
        let speed = p.speed();

        assert!(p.advance(100.0, 100.0));
        assert!(p.x > 100.0);
        assert_eq!(p.vx, -0.2);
        assert_eq!(p.speed(), speed);

        // back inside on the next step, no second flip
        assert!(!p.advance(100.0, 100.0));
        assert!(p.x <= 100.0);
        assert_eq!(p.vx, -0.2);
    }

    #[test]
    fn crossing_top_edge_flips_vy() {
        let mut p = still(50.0, 0.05, 0.0, -0.1);
        assert!(p.advance(100.0, 100.0));
        assert_eq!(p.vy, 0.1);
        assert!(!p.advance(100.0, 100.0));
        assert!(p.y >= 0.0);
    }

    #[test]
    fn particle_stranded_by_shrink_walks_back() {
        // Left far outside after a resize: must head inward every frame.
        let mut p = still(500.0, 50.0, 0.25, 0.0);
        let mut flips = 0;
        for _ in 0..10 {
            if p.advance(100.0, 100.0) {
                flips += 1;
            }
            assert!(p.vx < 0.0);
        }
        assert_eq!(flips, 1);
        assert!(p.x < 500.0);
    }
}
