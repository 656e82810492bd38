//! Particle network: a fixed set of drifting discs, linked when close
//!
//! One `step()` is one display frame: clear, then for each particle in
//! order move it, reflect it off the viewport edges, draw it, and link it to
//! every later particle within `link_distance`. Pairs are visited once
//! (i < j), so a frame performs exactly N(N-1)/2 distance checks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::config::FieldConfig;
use super::particle::Particle;
use super::surface::DrawSurface;
use crate::theme::colors;

/// Work done by one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub discs: usize,
    pub lines: usize,
    pub pair_checks: usize,
    /// Velocity components flipped this frame
    pub reflections: usize,
}

impl FrameStats {
    pub fn draw_calls(&self) -> usize {
        self.discs + self.lines
    }
}

/// The simulated field
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    frame: u64,
}

impl ParticleField {
    /// Spawn a field sized to `width` x `height`, seeded from the config or entropy
    pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, width, height, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        config: FieldConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Self {
        let config = config.sanitized();
        let width = width.max(0.0);
        let height = height.max(0.0);
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(rng, &config, width, height))
            .collect();

        debug!(count = config.particle_count, width, height, "Particle field spawned");

        Self {
            config,
            particles,
            width,
            height,
            frame: 0,
        }
    }

    /// Respawn every particle inside the current bounds
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        self.particles = (0..self.config.particle_count)
            .map(|_| Particle::spawn(rng, &self.config, width, height))
            .collect();
        self.frame = 0;
    }

    /// New bounds. Particles keep their positions; any left outside
    /// reflect back in on their own.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        debug!(width = self.width, height = self.height, "Particle field resized");
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Frames stepped since spawn or reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame and draw it
    pub fn step<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let (width, height) = (self.width, self.height);
        let link_distance = self.config.link_distance;
        let link_max_alpha = self.config.link_max_alpha;
        let link_width = self.config.link_width;
        let mut stats = FrameStats::default();

        surface.clear();

        for i in 0..self.particles.len() {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let p = &mut head[i];

            let (vx, vy) = (p.vx, p.vy);
            p.advance(width, height);
            stats.reflections += usize::from(vx != p.vx) + usize::from(vy != p.vy);

            surface.fill_circle(p.x, p.y, p.radius, p.color);
            stats.discs += 1;

            for q in tail.iter() {
                stats.pair_checks += 1;
                if let Some(alpha) = link_alpha(p.distance_to(q), link_distance, link_max_alpha) {
                    let color = colors::LINK.with_alpha(alpha);
                    surface.stroke_line((p.x, p.y), (q.x, q.y), color, link_width);
                    stats.lines += 1;
                }
            }
        }

        self.frame += 1;
        trace!(
            frame = self.frame,
            discs = stats.discs,
            lines = stats.lines,
            pairs = stats.pair_checks,
            "Frame stepped"
        );
        stats
    }

    /// Advance `frames` frames, returning the stats of the last one
    pub fn run<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, frames: u64) -> FrameStats {
        let mut last = FrameStats::default();
        for _ in 0..frames {
            last = self.step(surface);
        }
        last
    }
}

/// Link opacity for a pair `distance` apart: falls linearly from
/// `max_alpha` at 0 to 0 at `link_distance`. `None` when not linked.
pub fn link_alpha(distance: f64, link_distance: f64, max_alpha: f64) -> Option<f64> {
    if distance < link_distance {
        Some(max_alpha * (1.0 - distance / link_distance))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MAX_PARTICLES;
    use crate::core::surface::{DrawCall, FrameRecorder};

    fn seeded(count: usize, seed: u64, width: f64, height: f64) -> ParticleField {
        let config = FieldConfig {
            particle_count: count,
            seed: Some(seed),
            ..FieldConfig::default()
        };
        ParticleField::new(config, width, height)
    }

    fn assert_in_bounds(field: &ParticleField) {
        let (w, h) = field.size();
        let slack = field.config().max_speed;
        for (i, p) in field.particles().iter().enumerate() {
            assert!(
                p.x >= -slack && p.x <= w + slack,
                "particle {} x={} outside [0, {}]",
                i, p.x, w
            );
            assert!(
                p.y >= -slack && p.y <= h + slack,
                "particle {} y={} outside [0, {}]",
                i, p.y, h
            );
        }
    }

    #[test]
    fn link_alpha_fades_to_zero_at_threshold() {
        assert_eq!(link_alpha(0.0, 150.0, 0.1), Some(0.1));
        assert_eq!(link_alpha(75.0, 150.0, 0.1), Some(0.05));
        assert_eq!(link_alpha(150.0, 150.0, 0.1), None);
        assert_eq!(link_alpha(400.0, 150.0, 0.1), None);

        let mut prev = f64::MAX;
        for d in 0..150 {
            let a = link_alpha(d as f64, 150.0, 0.1).unwrap();
            assert!(a < prev, "alpha must decrease with distance (d={})", d);
            prev = a;
        }
        assert!(link_alpha(149.999, 150.0, 0.1).unwrap() < 1e-5);
    }

    #[test]
    fn pair_checks_cover_each_unordered_pair_once() {
        for n in [0usize, 1, 2, 7, 50] {
            let mut field = seeded(n, 3, 800.0, 600.0);
            let mut rec = FrameRecorder::new(800.0, 600.0);
            let stats = field.step(&mut rec);
            assert_eq!(stats.pair_checks, n * n.saturating_sub(1) / 2);
            assert_eq!(stats.discs, n);
        }
    }

    #[test]
    fn lines_only_join_close_pairs() {
        let mut field = seeded(50, 11, 600.0, 400.0);
        let mut rec = FrameRecorder::recording(600.0, 400.0);
        for _ in 0..20 {
            let stats = field.step(&mut rec);
            let mut lines = 0;
            for call in rec.calls() {
                if let DrawCall::Line { from, to, color, width } = call {
                    let d = (from.0 - to.0).hypot(from.1 - to.1);
                    assert!(d < 150.0, "linked pair {} apart", d);
                    let expected = 0.1 * (1.0 - d / 150.0);
                    assert!((color.alpha() - expected).abs() < 1e-9);
                    assert_eq!(*width, 0.5);
                    lines += 1;
                }
            }
            assert_eq!(lines, stats.lines);
        }
    }

    #[test]
    fn frame_starts_with_clear_and_draws_each_disc_once() {
        let mut field = seeded(5, 5, 300.0, 300.0);
        let mut rec = FrameRecorder::recording(300.0, 300.0);
        field.step(&mut rec);
        assert_eq!(rec.calls().first(), Some(&DrawCall::Clear));
        let discs = rec
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count();
        assert_eq!(discs, 5);
    }

    #[test]
    fn speed_is_conserved_over_many_frames() {
        let mut field = seeded(20, 9, 200.0, 150.0);
        let speeds: Vec<f64> = field.particles().iter().map(|p| p.speed()).collect();
        let mut rec = FrameRecorder::new(200.0, 150.0);
        let mut reflections = 0;
        for _ in 0..2000 {
            reflections += field.step(&mut rec).reflections;
        }
        assert!(reflections > 0, "small box should force reflections");
        for (p, s) in field.particles().iter().zip(speeds) {
            assert_eq!(p.speed(), s);
        }
    }

    #[test]
    fn thousand_frames_at_1024x768() {
        let mut field = seeded(50, 42, 1024.0, 768.0);
        let mut rec = FrameRecorder::new(1024.0, 768.0);
        let last = field.run(&mut rec, 1000);

        assert_eq!(field.frame(), 1000);
        assert_eq!(field.particles().len(), 50);
        assert_in_bounds(&field);
        assert_eq!(last.discs, 50);
        assert!(last.lines <= 1225);
        assert_eq!(last.draw_calls(), 50 + last.lines);
        assert_eq!(rec.draw_calls(), last.draw_calls());

        // same seed, same frame
        let mut twin = seeded(50, 42, 1024.0, 768.0);
        let twin_last = twin.run(&mut FrameRecorder::new(1024.0, 768.0), 1000);
        assert_eq!(last, twin_last);
        assert_eq!(field.particles(), twin.particles());
    }

    #[test]
    fn resize_keeps_positions_and_particles_drift_back() {
        let mut field = seeded(30, 8, 1000.0, 1000.0);
        let before: Vec<(f64, f64)> = field.particles().iter().map(|p| (p.x, p.y)).collect();
        field.resize(100.0, 100.0);
        let after: Vec<(f64, f64)> = field.particles().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(before, after);

        // every stranded particle now heads back toward the box
        let mut rec = FrameRecorder::new(100.0, 100.0);
        field.step(&mut rec);
        for p in field.particles() {
            if p.x > 100.0 {
                assert!(p.vx <= 0.0);
            }
            if p.y > 100.0 {
                assert!(p.vy <= 0.0);
            }
        }
    }

    #[test]
    fn reset_respawns_inside_current_bounds() {
        let mut field = seeded(10, 4, 1000.0, 1000.0);
        field.run(&mut FrameRecorder::new(1000.0, 1000.0), 10);
        field.resize(50.0, 40.0);
        field.reset(&mut StdRng::seed_from_u64(4));
        assert_eq!(field.frame(), 0);
        assert_eq!(field.particles().len(), 10);
        for p in field.particles() {
            assert!((0.0..50.0).contains(&p.x));
            assert!((0.0..40.0).contains(&p.y));
        }
    }

    #[test]
    fn oversized_particle_count_is_capped() {
        let config = FieldConfig {
            particle_count: usize::MAX,
            seed: Some(1),
            ..FieldConfig::default()
        };
        let field = ParticleField::new(config, 100.0, 100.0);
        assert_eq!(field.particles().len(), MAX_PARTICLES);
        assert_eq!(field.config().particle_count, MAX_PARTICLES);
    }

    #[test]
    fn zero_sized_viewport_degrades_quietly() {
        let mut field = seeded(10, 1, 0.0, 0.0);
        let stats = field.run(&mut FrameRecorder::new(0.0, 0.0), 50);
        assert_eq!(stats.discs, 10);
        assert_in_bounds(&field);
    }
}
