//! Clipping of lines, spans and boxes against an inclusive rectangle
//!
//! Every function here is total: any integer input, including zero-length
//! segments and empty boxes, yields a defined answer without overflow or
//! division by zero.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with inclusive edges
///
/// A rectangle with `right < left` or `bottom < top` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Contains nothing; every clip against it fails
    pub const EMPTY: Rect = Rect {
        left: 0,
        top: 0,
        right: -1,
        bottom: -1,
    };

    /// Rectangle spanning both corners, in either order
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    /// Rectangle of `width` x `height` pixels with its top-left at (x, y)
    pub fn from_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::EMPTY;
        }
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width as i32 - 1),
            bottom: y.saturating_add(height as i32 - 1),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right < self.left || self.bottom < self.top
    }

    #[inline]
    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.right) - i64::from(self.left) + 1) as u32
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.bottom) - i64::from(self.top) + 1) as u32
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Overlap of two rectangles, `None` if they are disjoint or either is empty
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let r = Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        if r.is_empty() {
            None
        } else {
            Some(r)
        }
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

#[inline]
fn outcode(x: i64, y: i64, b: &Rect) -> u8 {
    let mut code = INSIDE;
    if x < i64::from(b.left) {
        code |= LEFT;
    } else if x > i64::from(b.right) {
        code |= RIGHT;
    }
    if y < i64::from(b.top) {
        code |= TOP;
    } else if y > i64::from(b.bottom) {
        code |= BOTTOM;
    }
    code
}

/// `a * b / c` without intermediate overflow; the quotient always fits since
/// `|b| <= |c|` whenever it is called
#[inline]
fn muldiv(a: i64, b: i64, c: i64) -> i64 {
    (i128::from(a) * i128::from(b) / i128::from(c)) as i64
}

/// Cohen-Sutherland line clipping
///
/// Returns the clipped endpoints, or `None` when no part of the segment is
/// inside `b`. Endpoint order is preserved.
pub fn clip_line(x1: i32, y1: i32, x2: i32, y2: i32, b: &Rect) -> Option<(i32, i32, i32, i32)> {
    // Converges in at most 4 rounds for valid input; the cap guards degenerate
    // cases produced by integer rounding at corners.
    const MAX_ITERATIONS: u32 = 16;

    if b.is_empty() {
        return None;
    }

    let (mut x0, mut y0) = (i64::from(x1), i64::from(y1));
    let (mut x1, mut y1) = (i64::from(x2), i64::from(y2));
    let (left, top) = (i64::from(b.left), i64::from(b.top));
    let (right, bottom) = (i64::from(b.right), i64::from(b.bottom));

    let mut code0 = outcode(x0, y0, b);
    let mut code1 = outcode(x1, y1, b);

    for _ in 0..MAX_ITERATIONS {
        if (code0 | code1) == 0 {
            return Some((x0 as i32, y0 as i32, x1 as i32, y1 as i32));
        }
        if (code0 & code1) != 0 {
            return None;
        }

        let code_out = if code0 != 0 { code0 } else { code1 };
        let dx = x1 - x0;
        let dy = y1 - y0;
        let (x, y);

        if (code_out & BOTTOM) != 0 {
            if dy == 0 {
                return None;
            }
            x = x0 + muldiv(dx, bottom - y0, dy);
            y = bottom;
        } else if (code_out & TOP) != 0 {
            if dy == 0 {
                return None;
            }
            x = x0 + muldiv(dx, top - y0, dy);
            y = top;
        } else if (code_out & RIGHT) != 0 {
            if dx == 0 {
                return None;
            }
            y = y0 + muldiv(dy, right - x0, dx);
            x = right;
        } else {
            if dx == 0 {
                return None;
            }
            y = y0 + muldiv(dy, left - x0, dx);
            x = left;
        }

        if code_out == code0 {
            x0 = x;
            y0 = y;
            code0 = outcode(x0, y0, b);
        } else {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1, b);
        }
    }

    None
}

/// Clip a horizontal span; the result is ordered low to high
pub fn clip_scan_line(x1: i32, x2: i32, y: i32, b: &Rect) -> Option<(i32, i32)> {
    if b.is_empty() || y < b.top || y > b.bottom {
        return None;
    }
    let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    let lo = lo.max(b.left);
    let hi = hi.min(b.right);
    if lo > hi {
        None
    } else {
        Some((lo, hi))
    }
}

/// Clip a vertical span; the result is ordered low to high
pub fn clip_vertical_line(x: i32, y1: i32, y2: i32, b: &Rect) -> Option<(i32, i32)> {
    if b.is_empty() || x < b.left || x > b.right {
        return None;
    }
    let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
    let lo = lo.max(b.top);
    let hi = hi.min(b.bottom);
    if lo > hi {
        None
    } else {
        Some((lo, hi))
    }
}

/// Normalize both rectangles and intersect them
pub fn clip_box(a: &Rect, b: &Rect) -> Option<Rect> {
    let a = Rect::new(a.left, a.top, a.right, a.bottom);
    let b = Rect::new(b.left, b.top, b.right, b.bottom);
    a.intersect(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;

    fn random_box(rng: &mut Rng) -> Rect {
        let x = rng.range_i32(-50, 250);
        let y = rng.range_i32(-50, 250);
        Rect::from_size(x, y, rng.range_i32(1, 120) as u32, rng.range_i32(1, 120) as u32)
    }

    #[test]
    fn test_inside_line_unchanged() {
        let b = Rect::new(0, 0, 99, 99);
        assert_eq!(clip_line(10, 20, 30, 40, &b), Some((10, 20, 30, 40)));
    }

    #[test]
    fn test_line_clipped_to_edges() {
        let b = Rect::new(0, 0, 99, 99);
        assert_eq!(clip_line(-50, 10, 150, 10, &b), Some((0, 10, 99, 10)));
        assert_eq!(clip_line(5, -20, 5, 200, &b), Some((5, 0, 5, 99)));
    }

    #[test]
    fn test_zero_length_line() {
        let b = Rect::new(0, 0, 9, 9);
        assert_eq!(clip_line(3, 3, 3, 3, &b), Some((3, 3, 3, 3)));
        assert_eq!(clip_line(30, 3, 30, 3, &b), None);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let b = Rect::new(0, 0, 639, 479);
        let clipped = clip_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, &b);
        if let Some((x1, y1, x2, y2)) = clipped {
            assert!(b.contains(x1, y1) && b.contains(x2, y2));
        }
        assert_eq!(clip_line(i32::MIN, 5, i32::MIN, 9, &b), None);
    }

    #[test]
    fn test_empty_box_rejects_everything() {
        assert_eq!(clip_line(0, 0, 0, 0, &Rect::EMPTY), None);
        assert_eq!(clip_scan_line(-5, 5, 0, &Rect::EMPTY), None);
        assert_eq!(clip_vertical_line(0, -5, 5, &Rect::EMPTY), None);
    }

    #[test]
    fn test_random_segments_against_random_boxes() {
        let mut rng = Rng::new(0x5eed);
        let boxes: Vec<Rect> = (0..10).map(|_| random_box(&mut rng)).collect();
        for _ in 0..50 {
            let (x1, y1) = (rng.range_i32(-300, 500), rng.range_i32(-300, 500));
            let (x2, y2) = (rng.range_i32(-300, 500), rng.range_i32(-300, 500));
            let bbox = Rect::new(x1, y1, x2, y2);
            for b in &boxes {
                let clipped = clip_line(x1, y1, x2, y2, b);
                if bbox.intersect(b).is_none() {
                    assert_eq!(clipped, None, "disjoint segment {:?} vs {:?}", bbox, b);
                }
                if let Some((cx1, cy1, cx2, cy2)) = clipped {
                    assert!(b.contains(cx1, cy1), "start outside {:?}", b);
                    assert!(b.contains(cx2, cy2), "end outside {:?}", b);
                }
            }
        }
    }

    #[test]
    fn test_segment_through_box_is_visible() {
        // Both endpoints outside, but the segment crosses the middle
        let b = Rect::new(10, 10, 20, 20);
        let (x1, y1, x2, y2) = clip_line(0, 0, 30, 30, &b).unwrap();
        assert_eq!((x1, y1, x2, y2), (10, 10, 20, 20));
    }

    #[test]
    fn test_scan_line_sorted_and_clamped() {
        let b = Rect::new(0, 0, 9, 9);
        assert_eq!(clip_scan_line(20, -3, 4, &b), Some((0, 9)));
        assert_eq!(clip_scan_line(7, 2, 4, &b), Some((2, 7)));
        assert_eq!(clip_scan_line(2, 7, 10, &b), None);
        assert_eq!(clip_scan_line(12, 17, 4, &b), None);
    }

    #[test]
    fn test_vertical_line_sorted_and_clamped() {
        let b = Rect::new(0, 0, 9, 9);
        assert_eq!(clip_vertical_line(3, 15, 5, &b), Some((5, 9)));
        assert_eq!(clip_vertical_line(-1, 0, 5, &b), None);
        assert_eq!(clip_vertical_line(4, 4, 4, &b), Some((4, 4)));
    }

    #[test]
    fn test_clip_box_normalizes() {
        let a = Rect {
            left: 10,
            top: 10,
            right: 0,
            bottom: 0,
        };
        let b = Rect::new(5, 5, 20, 20);
        assert_eq!(clip_box(&a, &b), Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(clip_box(&Rect::new(0, 0, 4, 4), &b), None);
    }

    #[test]
    fn test_rect_size_helpers() {
        let r = Rect::from_size(2, 3, 4, 5);
        assert_eq!((r.width(), r.height()), (4, 5));
        assert_eq!(r.right, 5);
        assert!(Rect::from_size(0, 0, 0, 5).is_empty());
        assert_eq!(Rect::EMPTY.width(), 0);
    }
}
