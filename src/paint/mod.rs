//! Per-pixel color algorithms
//!
//! A color algorithm stands in for a flat color in any draw call. It sees the
//! pixel position and the color already in the framebuffer and returns the
//! color to store. Implementations must be pure in those inputs so a draw can
//! be re-evaluated (redraw, undo) with identical results.

mod gradient;
mod texture;

pub use gradient::{ColorStops, LinearGradient, RadialGradient};
pub use texture::{Texture, TextureFill};

use crate::color::{round_channel, Color};

pub trait ColorAlgorithm {
    /// Color to store at (x, y) given the current `dest` color
    fn color_at(&self, x: i32, y: i32, dest: Color) -> Color;
}

impl<F> ColorAlgorithm for F
where
    F: Fn(i32, i32, Color) -> Color,
{
    #[inline]
    fn color_at(&self, x: i32, y: i32, dest: Color) -> Color {
        self(x, y, dest)
    }
}

// ============================================================================
// Blend modes
// ============================================================================

/// Linear blend of a source color over the destination, alpha included
///
/// `result = src * p + dest * (1 - p)` per channel.
#[derive(Debug, Clone, Copy)]
pub struct Blend {
    pub color: Color,
    p: f64,
}

impl Blend {
    /// `p` is clamped to [0, 1]; NaN counts as 0
    pub fn new(color: Color, p: f64) -> Self {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        Self { color, p }
    }

    /// Blend weight taken from the source color's own alpha
    pub fn from_alpha(color: Color) -> Self {
        Self::new(color, f64::from(color.a()) / 255.0)
    }

    pub fn weight(&self) -> f64 {
        self.p
    }
}

impl ColorAlgorithm for Blend {
    fn color_at(&self, _x: i32, _y: i32, dest: Color) -> Color {
        let p = self.p;
        let mix = |s: u8, d: u8| round_channel(f64::from(s) * p + f64::from(d) * (1.0 - p));
        Color::rgba(
            mix(self.color.r(), dest.r()),
            mix(self.color.g(), dest.g()),
            mix(self.color.b(), dest.b()),
            mix(self.color.a(), dest.a()),
        )
    }
}

/// RGB pre-scaled by the color's alpha
#[inline]
fn premultiplied(c: Color) -> (u8, u8, u8) {
    let k = f64::from(c.a()) / 255.0;
    (
        round_channel(f64::from(c.r()) * k),
        round_channel(f64::from(c.g()) * k),
        round_channel(f64::from(c.b()) * k),
    )
}

/// Saturating add of the alpha-scaled color; destination alpha kept
#[derive(Debug, Clone, Copy)]
pub struct Additive {
    rgb: (u8, u8, u8),
}

impl Additive {
    pub fn new(color: Color) -> Self {
        Self {
            rgb: premultiplied(color),
        }
    }
}

impl ColorAlgorithm for Additive {
    fn color_at(&self, _x: i32, _y: i32, dest: Color) -> Color {
        let (r, g, b) = self.rgb;
        Color::rgba(
            dest.r().saturating_add(r),
            dest.g().saturating_add(g),
            dest.b().saturating_add(b),
            dest.a(),
        )
    }
}

/// Saturating subtract of the alpha-scaled color; destination alpha kept
#[derive(Debug, Clone, Copy)]
pub struct Subtractive {
    rgb: (u8, u8, u8),
}

impl Subtractive {
    pub fn new(color: Color) -> Self {
        Self {
            rgb: premultiplied(color),
        }
    }
}

impl ColorAlgorithm for Subtractive {
    fn color_at(&self, _x: i32, _y: i32, dest: Color) -> Color {
        let (r, g, b) = self.rgb;
        Color::rgba(
            dest.r().saturating_sub(r),
            dest.g().saturating_sub(g),
            dest.b().saturating_sub(b),
            dest.a(),
        )
    }
}

/// Bitwise XOR of the packed ARGB values; applying it twice restores the pixel
#[derive(Debug, Clone, Copy)]
pub struct Xor {
    pub color: Color,
}

impl Xor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ColorAlgorithm for Xor {
    #[inline]
    fn color_at(&self, _x: i32, _y: i32, dest: Color) -> Color {
        Color(dest.0 ^ self.color.0)
    }
}
