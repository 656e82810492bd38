//! Enter animations keyed on visibility
//!
//! Each kind maps "hidden" to an offset, transparent pose and "visible" to
//! the resting pose. The page can either apply the utility classes or the
//! inline style.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Animation applied when an element is revealed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealKind {
    #[default]
    FadeUp,
    FadeLeft,
    FadeRight,
    Scale,
    Rotate,
}

impl RevealKind {
    pub const ALL: &'static [RevealKind] = &[
        RevealKind::FadeUp,
        RevealKind::FadeLeft,
        RevealKind::FadeRight,
        RevealKind::Scale,
        RevealKind::Rotate,
    ];

    /// Value used in `data-animate` attributes
    pub fn name(&self) -> &'static str {
        match self {
            RevealKind::FadeUp => "fade-up",
            RevealKind::FadeLeft => "fade-left",
            RevealKind::FadeRight => "fade-right",
            RevealKind::Scale => "scale",
            RevealKind::Rotate => "rotate",
        }
    }

    /// Pose for the given visibility
    pub fn style(&self, visible: bool) -> RevealStyle {
        if visible {
            return RevealStyle::RESTING;
        }
        let hidden = RevealStyle {
            opacity: 0.0,
            ..RevealStyle::RESTING
        };
        match self {
            RevealKind::FadeUp => RevealStyle { translate_y: 80.0, ..hidden },
            RevealKind::FadeLeft => RevealStyle { translate_x: -80.0, ..hidden },
            RevealKind::FadeRight => RevealStyle { translate_x: 80.0, ..hidden },
            RevealKind::Scale => RevealStyle { scale: 0.95, ..hidden },
            RevealKind::Rotate => RevealStyle { rotate_deg: -3.0, ..hidden },
        }
    }

    /// Utility classes for the pose, without the transition classes
    pub fn pose_classes(&self, visible: bool) -> &'static str {
        match (self, visible) {
            (RevealKind::FadeUp, true) => "opacity-100 translate-y-0",
            (RevealKind::FadeUp, false) => "opacity-0 translate-y-20",
            (RevealKind::FadeLeft | RevealKind::FadeRight, true) => "opacity-100 translate-x-0",
            (RevealKind::FadeLeft, false) => "opacity-0 -translate-x-20",
            (RevealKind::FadeRight, false) => "opacity-0 translate-x-20",
            (RevealKind::Scale, true) => "opacity-100 scale-100",
            (RevealKind::Scale, false) => "opacity-0 scale-95",
            (RevealKind::Rotate, true) => "opacity-100 rotate-0",
            (RevealKind::Rotate, false) => "opacity-0 -rotate-3",
        }
    }

    /// Full class list: transition easing plus the pose. The duration is
    /// set inline from `transition_duration`, so any value works.
    pub fn class_list(&self, visible: bool) -> String {
        format!("transition-all ease-out {}", self.pose_classes(visible))
    }
}

impl fmt::Display for RevealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RevealKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RevealKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| format!("unknown reveal kind '{}'", s))
    }
}

/// CSS `transition-duration` value shared by every reveal
pub fn transition_duration(transition_ms: u32) -> String {
    format!("{}ms", transition_ms)
}

/// Inline pose of a revealed element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    /// Pixels
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotate_deg: f64,
}

impl RevealStyle {
    pub const RESTING: RevealStyle = RevealStyle {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate_deg: 0.0,
    };

    /// CSS `transform` value
    pub fn transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            self.translate_x, self.translate_y, self.scale, self.rotate_deg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_pose_is_resting_for_every_kind() {
        for kind in RevealKind::ALL {
            assert_eq!(kind.style(true), RevealStyle::RESTING, "{}", kind);
            assert_eq!(kind.style(false).opacity, 0.0, "{}", kind);
            assert_ne!(kind.style(false), RevealStyle::RESTING, "{}", kind);
        }
    }

    #[test]
    fn hidden_offsets_point_the_right_way() {
        assert!(RevealKind::FadeUp.style(false).translate_y > 0.0);
        assert!(RevealKind::FadeLeft.style(false).translate_x < 0.0);
        assert!(RevealKind::FadeRight.style(false).translate_x > 0.0);
        assert!(RevealKind::Scale.style(false).scale < 1.0);
        assert!(RevealKind::Rotate.style(false).rotate_deg < 0.0);
    }

    #[test]
    fn class_list_carries_transition_and_pose() {
        assert_eq!(
            RevealKind::FadeUp.class_list(false),
            "transition-all ease-out opacity-0 translate-y-20"
        );
        assert_eq!(
            RevealKind::Rotate.class_list(true),
            "transition-all ease-out opacity-100 rotate-0"
        );
    }

    #[test]
    fn duration_is_inline_for_any_value() {
        assert_eq!(transition_duration(1000), "1000ms");
        assert_eq!(transition_duration(800), "800ms");
        for kind in RevealKind::ALL {
            assert!(!kind.class_list(true).contains("duration-"), "{}", kind);
        }
    }

    #[test]
    fn from_str_accepts_attribute_names() {
        for kind in RevealKind::ALL {
            assert_eq!(kind.name().parse::<RevealKind>(), Ok(*kind));
        }
        assert!("spin".parse::<RevealKind>().is_err());
    }

    #[test]
    fn transform_string() {
        assert_eq!(
            RevealKind::FadeLeft.style(false).transform(),
            "translate(-80px, 0px) scale(1) rotate(0deg)"
        );
    }
}
