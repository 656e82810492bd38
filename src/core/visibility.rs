//! Scroll-reveal bookkeeping: which tagged elements are currently in view
//!
//! The browser (or the CLI's synthetic page) reports batches of
//! `IntersectionEntry`; the tracker turns them into membership of the
//! visible set and reports the transitions. Each entry is applied on its
//! own and the last one for an id wins. There is no debouncing.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::RevealConfig;
use super::lifecycle::Lifecycle;

/// Axis-aligned rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Same rect moved up by `scroll_y`: page coordinates to viewport coordinates
    pub fn scrolled(&self, scroll_y: f64) -> Rect {
        Rect { y: self.y - scroll_y, ..*self }
    }
}

/// The visible window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport box with the bottom edge pulled in by `bottom_margin`
    pub fn root_box(&self, bottom_margin: f64) -> Rect {
        Rect::new(0.0, 0.0, self.width, (self.height - bottom_margin).max(0.0))
    }

    /// Fraction of `target`'s area inside the root box, in [0, 1]
    pub fn intersection_ratio(&self, target: &Rect, bottom_margin: f64) -> f64 {
        let area = target.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.root_box(bottom_margin)
            .intersection(target)
            .map_or(0.0, |hit| (hit.area() / area).min(1.0))
    }
}

/// One reported intersection change
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub id: String,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(id: impl Into<String>, ratio: f64) -> Self {
        Self { id: id.into(), ratio }
    }

    /// Entry computed from layout instead of reported by the browser
    pub fn measure(
        id: impl Into<String>,
        target: &Rect,
        viewport: &Viewport,
        config: &RevealConfig,
    ) -> Self {
        Self::new(id, viewport.intersection_ratio(target, config.bottom_margin))
    }
}

/// A membership change produced by `apply`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub visible: bool,
}

/// Immutable view of the visible set handed to the view layer
pub type VisibleSnapshot = Arc<BTreeSet<String>>;

/// Tracks the visible set for observed ids
#[derive(Debug)]
pub struct VisibilityTracker {
    config: RevealConfig,
    observed: HashSet<String>,
    visible: BTreeSet<String>,
    state: Lifecycle,
}

impl VisibilityTracker {
    pub fn new(config: RevealConfig) -> Self {
        let mut state = Lifecycle::default();
        state.start();
        Self {
            config: config.sanitized(),
            observed: HashSet::new(),
            visible: BTreeSet::new(),
            state,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Visibility predicate on an intersection ratio
    pub fn passes(&self, ratio: f64) -> bool {
        ratio >= self.config.threshold && ratio > 0.0
    }

    /// Start tracking `id`. Returns false once disposed.
    pub fn observe(&mut self, id: impl Into<String>) -> bool {
        if self.state.is_disposed() {
            return false;
        }
        let id = id.into();
        trace!(id = %id, "Observing");
        self.observed.insert(id);
        true
    }

    /// Stop tracking `id` and drop it from the visible set
    pub fn unobserve(&mut self, id: &str) {
        self.observed.remove(id);
        self.visible.remove(id);
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    /// Apply a batch of entries, returning the ids whose membership changed.
    ///
    /// Entries for ids that are not observed, or arriving after `dispose`,
    /// are ignored.
    pub fn apply<'a, I>(&mut self, entries: I) -> Vec<Transition>
    where
        I: IntoIterator<Item = &'a IntersectionEntry>,
    {
        let mut transitions = Vec::new();
        if self.state.is_disposed() {
            return transitions;
        }

        for entry in entries {
            if !self.observed.contains(&entry.id) {
                continue;
            }
            let visible = self.passes(entry.ratio);
            let changed = if visible {
                self.visible.insert(entry.id.clone())
            } else {
                self.visible.remove(&entry.id)
            };
            if changed {
                debug!(id = %entry.id, visible, ratio = entry.ratio, "Visibility changed");
                transitions.push(Transition {
                    id: entry.id.clone(),
                    visible,
                });
            }
        }
        transitions
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn snapshot(&self) -> VisibleSnapshot {
        Arc::new(self.visible.clone())
    }

    pub fn is_disposed(&self) -> bool {
        self.state.is_disposed()
    }

    /// Forget every element and refuse further updates. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.state.dispose() {
            debug!(
                observed = self.observed.len(),
                visible = self.visible.len(),
                "Visibility tracker disposed"
            );
            self.observed.clear();
            self.visible.clear();
        }
    }
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}
