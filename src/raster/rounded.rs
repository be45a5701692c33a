//! Rounded rectangles and ellipses
//!
//! An ellipse is a rounded rectangle whose radii are half its extent, so the
//! straight edges shrink to nothing and only the four arcs remain.

use super::pen::Pen;
use crate::clip::Rect;
use crate::display::FrameBuffer;

/// Keeps the implicit form finite for zero radii
const RADIUS_EPSILON: f64 = 1e-6;

/// One quarter arc from (0, ry) to (rx, 0), as offsets from a corner center
///
/// Each step moves right, down or diagonally to whichever candidate best
/// satisfies dx²/rx² + dy²/ry² = 1. Offsets are monotonic: dx never
/// decreases and dy never increases.
struct ArcSteps {
    dx: i64,
    dy: i64,
    rx: i64,
    cx: f64,
    cy: f64,
    done: bool,
}

impl ArcSteps {
    fn new(rx: i64, ry: i64) -> Self {
        let (fx, fy) = (rx as f64, ry as f64);
        Self {
            dx: 0,
            dy: ry,
            rx,
            cx: 1.0 / (fx * fx + RADIUS_EPSILON),
            cy: 1.0 / (fy * fy + RADIUS_EPSILON),
            done: false,
        }
    }

    #[inline]
    fn error(&self, dx: i64, dy: i64) -> f64 {
        let (fx, fy) = (dx as f64, dy as f64);
        (fx * fx * self.cx + fy * fy * self.cy - 1.0).abs()
    }
}

impl Iterator for ArcSteps {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        if self.done {
            return None;
        }
        let here = (self.dx, self.dy);
        if self.dx == self.rx && self.dy == 0 {
            self.done = true;
        } else if self.dx == self.rx {
            self.dy -= 1;
        } else if self.dy == 0 {
            self.dx += 1;
        } else {
            let right = self.error(self.dx + 1, self.dy);
            let diagonal = self.error(self.dx + 1, self.dy - 1);
            let down = self.error(self.dx, self.dy - 1);
            if diagonal <= right && diagonal <= down {
                self.dx += 1;
                self.dy -= 1;
            } else if right < down {
                self.dx += 1;
            } else {
                self.dy -= 1;
            }
        }
        Some(here)
    }
}

/// Normalized box, clamped radii and the four corner-arc centers
struct Corners {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    rx: i64,
    ry: i64,
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
}

impl Corners {
    fn new(x1: i32, y1: i32, x2: i32, y2: i32, rx: i32, ry: i32) -> Option<Self> {
        if rx < 0 || ry < 0 {
            return None;
        }
        let r = Rect::new(x1, y1, x2, y2);
        let (x1, y1) = (i64::from(r.left), i64::from(r.top));
        let (x2, y2) = (i64::from(r.right), i64::from(r.bottom));
        let rx = i64::from(rx).min((x2 - x1) / 2);
        let ry = i64::from(ry).min((y2 - y1) / 2);
        Some(Self {
            x1,
            y1,
            x2,
            y2,
            rx,
            ry,
            left: x1 + rx,
            right: x2 - rx,
            top: y1 + ry,
            bottom: y2 - ry,
        })
    }

    fn overlaps(&self, clip: &Rect) -> bool {
        !clip.is_empty()
            && self.x1 <= i64::from(clip.right)
            && self.x2 >= i64::from(clip.left)
            && self.y1 <= i64::from(clip.bottom)
            && self.y2 >= i64::from(clip.top)
    }
}

/// Coordinates inside the box always fit, they came from i32 corners
#[inline]
fn narrow(v: i64) -> i32 {
    v as i32
}

impl FrameBuffer {
    /// Outline of a rectangle with elliptical corners of radii (rx, ry)
    ///
    /// Radii larger than half the box are clamped; a negative radius draws
    /// nothing. Every outline pixel is visited once.
    pub fn draw_rounded_rectangle<'p>(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        rx: i32,
        ry: i32,
        pen: impl Into<Pen<'p>>,
    ) {
        let mut pen = pen.into();
        if let Some(c) = Corners::new(x1, y1, x2, y2, rx, ry) {
            if c.overlaps(&self.clip()) {
                self.rounded_outline(&c, &mut pen);
            }
        }
        self.finish(&mut pen);
    }

    /// Filled rounded rectangle, one span per row
    pub fn fill_rounded_rectangle<'p>(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        rx: i32,
        ry: i32,
        pen: impl Into<Pen<'p>>,
    ) {
        let mut pen = pen.into();
        if let Some(c) = Corners::new(x1, y1, x2, y2, rx, ry) {
            if c.overlaps(&self.clip()) {
                self.rounded_fill(&c, &mut pen);
            }
        }
        self.finish(&mut pen);
    }

    /// Ellipse outline centered on (cx, cy)
    pub fn draw_ellipse<'p>(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, pen: impl Into<Pen<'p>>) {
        if rx < 0 || ry < 0 {
            return;
        }
        self.draw_rounded_rectangle(
            cx.saturating_sub(rx),
            cy.saturating_sub(ry),
            cx.saturating_add(rx),
            cy.saturating_add(ry),
            rx,
            ry,
            pen,
        );
    }

    pub fn fill_ellipse<'p>(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, pen: impl Into<Pen<'p>>) {
        if rx < 0 || ry < 0 {
            return;
        }
        self.fill_rounded_rectangle(
            cx.saturating_sub(rx),
            cy.saturating_sub(ry),
            cx.saturating_add(rx),
            cy.saturating_add(ry),
            rx,
            ry,
            pen,
        );
    }

    fn rounded_outline(&mut self, c: &Corners, pen: &mut Pen<'_>) {
        // Straight edges strictly between the arcs
        if c.left + 1 <= c.right - 1 {
            let (a, b) = (narrow(c.left + 1), narrow(c.right - 1));
            self.scan_line(a, b, narrow(c.y1), pen);
            if c.y2 != c.y1 {
                self.scan_line(a, b, narrow(c.y2), pen);
            }
        }
        if c.top + 1 <= c.bottom - 1 {
            let (a, b) = (narrow(c.top + 1), narrow(c.bottom - 1));
            self.vertical_line(narrow(c.x1), a, b, pen);
            if c.x2 != c.x1 {
                self.vertical_line(narrow(c.x2), a, b, pen);
            }
        }

        for (dx, dy) in ArcSteps::new(c.rx, c.ry) {
            let (xr, xl) = (c.right + dx, c.left - dx);
            let (yt, yb) = (c.top - dy, c.bottom + dy);
            self.plot(narrow(xr), narrow(yt), pen);
            if xl != xr {
                self.plot(narrow(xl), narrow(yt), pen);
            }
            if yb != yt {
                self.plot(narrow(xr), narrow(yb), pen);
                if xl != xr {
                    self.plot(narrow(xl), narrow(yb), pen);
                }
            }
        }
    }

    fn rounded_fill(&mut self, c: &Corners, pen: &mut Pen<'_>) {
        // The arc visits every dy from ry down to 0; the widest offset on a
        // row is the last one seen before dy changes.
        let mut row: Option<(i64, i64)> = None;
        for (dx, dy) in ArcSteps::new(c.rx, c.ry) {
            if let Some((prev_dy, width)) = row {
                if prev_dy != dy {
                    self.rounded_rows(c, prev_dy, width, pen);
                }
            }
            row = Some((dy, dx));
        }
        if let Some((dy, width)) = row {
            self.rounded_rows(c, dy, width, pen);
        }

        let clip = self.clip();
        let first = (c.top + 1).max(i64::from(clip.top));
        let last = (c.bottom - 1).min(i64::from(clip.bottom));
        for y in first..=last {
            self.scan_line(narrow(c.x1), narrow(c.x2), narrow(y), pen);
        }
    }

    /// The mirrored pair of spans at arc offset `dy`
    fn rounded_rows(&mut self, c: &Corners, dy: i64, width: i64, pen: &mut Pen<'_>) {
        let (a, b) = (narrow(c.left - width), narrow(c.right + width));
        let (yt, yb) = (c.top - dy, c.bottom + dy);
        self.scan_line(a, b, narrow(yt), pen);
        if yb != yt {
            self.scan_line(a, b, narrow(yb), pen);
        }
    }
}
