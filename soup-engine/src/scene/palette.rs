// palette.rs - Broth and oil colours

use std::fmt;

/// Straight-alpha colour with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }
}

/// CSS `rgba(...)` form, as accepted by canvas style setters.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Golden broth.
pub const BROTH: Rgba = Rgba::new(0xF4, 0xC4, 0x30, 1.0);
/// Pale translucent oil.
pub const OIL_FILL: Rgba = Rgba::new(255, 245, 150, 0.4);
/// Darker rim around each droplet.
pub const OIL_STROKE: Rgba = Rgba::new(218, 165, 32, 0.6);
pub const HIGHLIGHT: Rgba = Rgba::new(255, 255, 255, 0.6);
pub const HIGHLIGHT_FADE: Rgba = Rgba::new(255, 255, 255, 0.0);

pub const RIM_WIDTH: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_css() {
        assert_eq!(OIL_FILL.to_string(), "rgba(255, 245, 150, 0.4)");
        assert_eq!(BROTH.to_string(), "rgba(244, 196, 48, 1)");
    }
}
