//! Platform-agnostic time utilities
//!
//! Provides elapsed milliseconds since app start and a frame-budget meter.

use std::collections::VecDeque;

/// One frame at 60 Hz
pub const FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_millis() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_millis() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Rolling frame-rate and budget meter
#[derive(Debug)]
pub struct FrameMeter {
    /// Frame start timestamps (ms), last `window` frames
    starts: VecDeque<f64>,
    window: usize,
    frames: u64,
    over_budget: u64,
    worst_ms: f64,
}

impl Default for FrameMeter {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameMeter {
    pub fn new(window: usize) -> Self {
        Self {
            starts: VecDeque::with_capacity(window.max(2)),
            window: window.max(2),
            frames: 0,
            over_budget: 0,
            worst_ms: 0.0,
        }
    }

    /// Record a frame that started at `start_ms` and whose work took `work_ms`.
    ///
    /// Returns true if the work overran the frame budget.
    pub fn record(&mut self, start_ms: f64, work_ms: f64) -> bool {
        self.starts.push_back(start_ms);
        if self.starts.len() > self.window {
            self.starts.pop_front();
        }
        self.frames += 1;
        self.worst_ms = self.worst_ms.max(work_ms);

        let over = work_ms > FRAME_BUDGET_MS;
        if over {
            self.over_budget += 1;
        }
        over
    }

    /// Frames per second over the window
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.starts.front(), self.starts.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.starts.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.starts.len() as f64 - 1.0) / (elapsed / 1000.0)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn over_budget(&self) -> u64 {
        self.over_budget
    }

    /// Slowest frame's work so far (ms)
    pub fn worst_ms(&self) -> f64 {
        self.worst_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_over_steady_sixty_hertz() {
        let mut meter = FrameMeter::new(60);
        for i in 0..120 {
            meter.record(i as f64 * FRAME_BUDGET_MS, 1.0);
        }
        assert!((meter.fps() - 60.0).abs() < 1e-6, "fps = {}", meter.fps());
        assert_eq!(meter.frames(), 120);
        assert_eq!(meter.over_budget(), 0);
    }

    #[test]
    fn slow_frames_are_counted() {
        let mut meter = FrameMeter::default();
        assert!(!meter.record(0.0, 5.0));
        assert!(meter.record(16.0, 30.0));
        assert_eq!(meter.over_budget(), 1);
        assert_eq!(meter.worst_ms(), 30.0);
    }

    #[test]
    fn fps_needs_two_frames() {
        let mut meter = FrameMeter::default();
        assert_eq!(meter.fps(), 0.0);
        meter.record(5.0, 1.0);
        assert_eq!(meter.fps(), 0.0);
    }

    #[test]
    fn clock_is_monotonic() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
    }
}
