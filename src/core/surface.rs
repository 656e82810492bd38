//! Drawing surface abstraction
//!
//! The particle field only needs three primitives. The browser canvas
//! implements them in `web::canvas`; `FrameRecorder` implements them in
//! memory for the CLI and tests.

use crate::theme::Color;

/// Minimal 2D drawing target
pub trait DrawSurface {
    /// Current pixel dimensions
    fn size(&self) -> (f64, f64);

    /// Clear the whole surface
    fn clear(&mut self);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

/// One recorded primitive
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle { x: f64, y: f64, radius: f64, color: Color },
    Line { from: (f64, f64), to: (f64, f64), color: Color, width: f64 },
}

/// In-memory surface that counts (and optionally keeps) draw calls.
///
/// Counters are per frame: `clear()` resets them.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    width: f64,
    height: f64,
    keep_calls: bool,
    calls: Vec<DrawCall>,
    clears: u64,
    circles: usize,
    lines: usize,
}

impl FrameRecorder {
    /// Count-only recorder
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Recorder that also keeps every call of the current frame
    pub fn recording(width: f64, height: f64) -> Self {
        Self {
            keep_calls: true,
            ..Self::new(width, height)
        }
    }

    /// Calls of the current frame (empty for count-only recorders)
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn circles(&self) -> usize {
        self.circles
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Total frames cleared so far
    pub fn frames(&self) -> u64 {
        self.clears
    }

    /// Draw calls of the current frame, excluding the clear
    pub fn draw_calls(&self) -> usize {
        self.circles + self.lines
    }
}

impl DrawSurface for FrameRecorder {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.circles = 0;
        self.lines = 0;
        self.calls.clear();
        if self.keep_calls {
            self.calls.push(DrawCall::Clear);
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.circles += 1;
        if self.keep_calls {
            self.calls.push(DrawCall::Circle { x, y, radius, color });
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
        self.lines += 1;
        if self.keep_calls {
            self.calls.push(DrawCall::Line { from, to, color, width });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::colors;

    #[test]
    fn clear_resets_per_frame_counters() {
        let mut rec = FrameRecorder::recording(10.0, 10.0);
        rec.clear();
        rec.fill_circle(1.0, 1.0, 1.0, colors::LINK);
        rec.stroke_line((0.0, 0.0), (1.0, 1.0), colors::LINK, 0.5);
        assert_eq!(rec.draw_calls(), 2);
        assert_eq!(rec.calls().len(), 3);

        rec.clear();
        assert_eq!(rec.draw_calls(), 0);
        assert_eq!(rec.calls(), &[DrawCall::Clear]);
        assert_eq!(rec.frames(), 2);
    }

    #[test]
    fn count_only_recorder_keeps_no_calls() {
        let mut rec = FrameRecorder::new(10.0, 10.0);
        rec.clear();
        rec.fill_circle(1.0, 1.0, 1.0, colors::LINK);
        assert_eq!(rec.circles(), 1);
        assert!(rec.calls().is_empty());
    }
}
