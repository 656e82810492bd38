//! Violet-on-black palette shared by the particle field and the page chrome

use std::fmt;

/// A CSS colour the drawing surface understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// hue in degrees, saturation/lightness in percent, alpha in [0, 1]
    Hsla { h: f64, s: f64, l: f64, a: f64 },
    /// 8-bit channels, alpha in [0, 1]
    Rgba { r: u8, g: u8, b: u8, a: f64 },
}

impl Color {
    pub const fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Color::Hsla { h, s, l, a }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba { r, g, b, a }
    }

    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Hsla { a, .. } | Color::Rgba { a, .. } => a,
        }
    }

    /// Same colour with a different alpha
    pub fn with_alpha(self, alpha: f64) -> Self {
        match self {
            Color::Hsla { h, s, l, .. } => Color::Hsla { h, s, l, a: alpha },
            Color::Rgba { r, g, b, .. } => Color::Rgba { r, g, b, a: alpha },
        }
    }

    /// CSS string for `fillStyle` / `strokeStyle`
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Hsla { h, s, l, a } => write!(f, "hsla({h:.1}, {s:.0}%, {l:.0}%, {a:.3})"),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a:.4})"),
        }
    }
}

/// Palette constants
pub mod colors {
    use super::Color;

    // === Particles (translucent pastel violet) ===
    pub const PARTICLE_HUE_MIN: f64 = 260.0;   // violet
    pub const PARTICLE_HUE_SPAN: f64 = 60.0;   // up to 320, magenta
    pub const PARTICLE_SATURATION: f64 = 70.0;
    pub const PARTICLE_LIGHTNESS: f64 = 60.0;
    pub const PARTICLE_ALPHA_MIN: f64 = 0.1;
    pub const PARTICLE_ALPHA_SPAN: f64 = 0.3;

    // === Links ===
    pub const LINK: Color = Color::rgba(168, 85, 247, 1.0); // #A855F7 - purple-500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formats_match_canvas_syntax() {
        assert_eq!(Color::hsla(280.0, 70.0, 60.0, 0.25).css(), "hsla(280.0, 70%, 60%, 0.250)");
        assert_eq!(colors::LINK.with_alpha(0.05).css(), "rgba(168, 85, 247, 0.0500)");
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Color::hsla(300.0, 70.0, 60.0, 0.4).with_alpha(0.1);
        assert_eq!(c, Color::hsla(300.0, 70.0, 60.0, 0.1));
        assert_eq!(c.alpha(), 0.1);
    }
}
