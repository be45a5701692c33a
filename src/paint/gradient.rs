use super::ColorAlgorithm;
use crate::color::{round_channel, Color};
use crate::error::RasterError;

/// Ordered color stops over [0, end]
///
/// Stops at 0 and `end` always exist. Extra stops are merged by position;
/// stops outside [0, end] are kept but lookups clamp into the bracket, so
/// they never contribute to a color.
#[derive(Debug, Clone)]
pub struct ColorStops {
    stops: Vec<(f64, Color)>,
    end: f64,
}

impl ColorStops {
    pub fn new(start: Color, finish: Color, end: f64) -> Self {
        Self {
            stops: vec![(0.0, start), (end, finish)],
            end,
        }
    }

    /// Merge a stop by position
    ///
    /// A stop landing exactly on 0 or `end` is ignored so the boundary
    /// colors stay exact. NaN positions are ignored.
    pub fn insert(&mut self, position: f64, color: Color) {
        if position.is_nan() || position == 0.0 || position == self.end {
            return;
        }
        let at = self.stops.partition_point(|s| s.0 <= position);
        self.stops.insert(at, (position, color));
    }

    pub fn stops(&self) -> &[(f64, Color)] {
        &self.stops
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Color at parameter `t`, clamped to [0, end]
    pub fn color_at(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, self.end) };
        // The stop at 0 satisfies `<= t`, so `i >= 1`
        let i = self.stops.partition_point(|s| s.0 <= t);
        let (p0, c0) = self.stops[i - 1];
        if p0 == t || i == self.stops.len() {
            return c0;
        }
        let (p1, c1) = self.stops[i];
        let f = (t - p0) / (p1 - p0);
        let lerp = |a: u8, b: u8| round_channel(f64::from(a) + (f64::from(b) - f64::from(a)) * f);
        Color::rgba(
            lerp(c0.r(), c1.r()),
            lerp(c0.g(), c1.g()),
            lerp(c0.b(), c1.b()),
            lerp(c0.a(), c1.a()),
        )
    }
}

// ============================================================================
// Linear
// ============================================================================

/// Gradient along the segment `from` -> `to`
///
/// Each pixel is projected onto the segment direction: t = 0 at `from`,
/// t = 1 at `to`, clamped beyond either end.
#[derive(Debug, Clone)]
pub struct LinearGradient {
    from: (f64, f64),
    dir: (f64, f64),
    len_sq: f64,
    stops: ColorStops,
}

impl LinearGradient {
    pub fn new(from: (i32, i32), to: (i32, i32), from_color: Color, to_color: Color) -> Self {
        let dx = f64::from(to.0) - f64::from(from.0);
        let dy = f64::from(to.1) - f64::from(from.1);
        Self {
            from: (f64::from(from.0), f64::from(from.1)),
            dir: (dx, dy),
            len_sq: dx * dx + dy * dy,
            stops: ColorStops::new(from_color, to_color, 1.0),
        }
    }

    /// Add intermediate stops, positions in [0, 1]
    pub fn with_stops(mut self, stops: &[(f64, Color)]) -> Self {
        for &(position, color) in stops {
            self.stops.insert(position, color);
        }
        self
    }

    pub fn stops(&self) -> &ColorStops {
        &self.stops
    }

    /// Projection parameter for pixel (x, y); 0 everywhere when from == to
    #[inline]
    pub fn parameter(&self, x: i32, y: i32) -> f64 {
        if self.len_sq == 0.0 {
            return 0.0;
        }
        let px = f64::from(x) - self.from.0;
        let py = f64::from(y) - self.from.1;
        (px * self.dir.0 + py * self.dir.1) / self.len_sq
    }
}

impl ColorAlgorithm for LinearGradient {
    fn color_at(&self, x: i32, y: i32, _dest: Color) -> Color {
        self.stops.color_at(self.parameter(x, y))
    }
}

// ============================================================================
// Radial
// ============================================================================

/// Gradient by distance from a center, `inner` at the center and `outer`
/// at `radius` and beyond
#[derive(Debug, Clone)]
pub struct RadialGradient {
    center: (f64, f64),
    stops: ColorStops,
}

impl RadialGradient {
    pub fn new(
        center: (i32, i32),
        radius: f64,
        inner: Color,
        outer: Color,
    ) -> Result<Self, RasterError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RasterError::InvalidGradient(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }
        Ok(Self {
            center: (f64::from(center.0), f64::from(center.1)),
            stops: ColorStops::new(inner, outer, radius),
        })
    }

    /// Add intermediate stops, positions are distances in [0, radius]
    pub fn with_stops(mut self, stops: &[(f64, Color)]) -> Self {
        for &(position, color) in stops {
            self.stops.insert(position, color);
        }
        self
    }

    pub fn radius(&self) -> f64 {
        self.stops.end()
    }

    pub fn stops(&self) -> &ColorStops {
        &self.stops
    }
}

impl ColorAlgorithm for RadialGradient {
    fn color_at(&self, x: i32, y: i32, _dest: Color) -> Color {
        let dx = f64::from(x) - self.center.0;
        let dy = f64::from(y) - self.center.1;
        self.stops.color_at((dx * dx + dy * dy).sqrt())
    }
}
