//! Cursor follower and scroll state

use super::config::PointerConfig;

/// Follower ring appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorVariant {
    #[default]
    Default,
    /// Over a link or button: ring grows
    Hover,
}

/// Mouse position, cursor variant and scroll offset
#[derive(Clone, Debug, Default)]
pub struct PointerState {
    config: PointerConfig,
    pub x: f64,
    pub y: f64,
    pub variant: CursorVariant,
    pub scroll_y: f64,
}

impl PointerState {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Default::default()
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Returns true if the variant changed
    pub fn set_variant(&mut self, variant: CursorVariant) -> bool {
        std::mem::replace(&mut self.variant, variant) != variant
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Follower ring scale for the current variant
    pub fn scale(&self) -> f64 {
        match self.variant {
            CursorVariant::Default => 1.0,
            CursorVariant::Hover => self.config.hover_scale,
        }
    }

    /// CSS `transform` centring the ring on the pointer
    pub fn follower_transform(&self) -> String {
        format!("translate(-50%, -50%) scale({})", self.scale())
    }

    /// Nav bar switches to its compact, blurred style
    pub fn nav_condensed(&self) -> bool {
        self.scroll_y > self.config.nav_scroll_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_doubles_ring() {
        let mut state = PointerState::new(PointerConfig::default());
        assert_eq!(state.scale(), 1.0);
        assert!(state.set_variant(CursorVariant::Hover));
        assert!(!state.set_variant(CursorVariant::Hover));
        assert_eq!(state.scale(), 2.0);
        assert_eq!(state.follower_transform(), "translate(-50%, -50%) scale(2)");
    }

    #[test]
    fn default_ring_is_centred_on_pointer() {
        let state = PointerState::new(PointerConfig::default());
        assert_eq!(state.variant, CursorVariant::Default);
        assert_eq!(state.follower_transform(), "translate(-50%, -50%) scale(1)");
    }

    #[test]
    fn nav_condenses_past_threshold() {
        let mut state = PointerState::new(PointerConfig::default());
        state.scroll_to(50.0);
        assert!(!state.nav_condensed());
        state.scroll_to(50.5);
        assert!(state.nav_condensed());
    }

    #[test]
    fn move_tracks_last_position() {
        let mut state = PointerState::default();
        state.move_to(10.0, 20.0);
        state.move_to(300.0, 40.0);
        assert_eq!((state.x, state.y), (300.0, 40.0));
    }
}
