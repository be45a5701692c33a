//! Integer polygon hit-testing
//!
//! Independent of any framebuffer. All tests use exact integer cross
//! products, so results never depend on floating-point rounding.

mod polygon;

pub use polygon::Polygon;

use serde::{Deserialize, Serialize};

/// A pixel-space point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Sign of the cross product (q - p) x (r - p)
#[inline]
fn orientation(p: Point, q: Point, r: Point) -> i32 {
    let cross = (i128::from(q.x) - i128::from(p.x)) * (i128::from(r.y) - i128::from(p.y))
        - (i128::from(q.y) - i128::from(p.y)) * (i128::from(r.x) - i128::from(p.x));
    cross.signum() as i32
}

#[inline]
fn spans_overlap(a1: i32, a2: i32, b1: i32, b2: i32) -> bool {
    a1.min(a2).max(b1.min(b2)) <= a1.max(a2).min(b1.max(b2))
}

/// Crossing-count point-in-polygon test
///
/// The polygon is closed implicitly. A point on a vertex, on a horizontal
/// edge, or exactly on any other edge counts as inside. With fewer than 3
/// points only those boundary cases can match.
pub fn is_in_polygon(x: i32, y: i32, points: &[Point]) -> bool {
    let (px, py) = (i128::from(x), i128::from(y));
    let n = points.len();
    let mut crossings_left = 0u32;

    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let (ax, ay) = (i128::from(a.x), i128::from(a.y));
        let (bx, by) = (i128::from(b.x), i128::from(b.y));

        if ax == px && ay == py {
            return true;
        }
        if ay == by {
            if ay == py && px >= ax.min(bx) && px <= ax.max(bx) {
                return true;
            }
            continue;
        }
        if (ay > py) != (by > py) {
            let cross = (px - ax) * (by - ay) - (py - ay) * (bx - ax);
            if cross == 0 {
                return true;
            }
            // edge crosses the row left of the point
            if (cross > 0) == (by > ay) {
                crossings_left += 1;
            }
        }
    }

    crossings_left % 2 == 1
}

/// Segment-segment test; touching counts as intersecting
///
/// Collinear segments intersect only when their extents overlap.
pub fn lines_intersect(a: (Point, Point), b: (Point, Point)) -> bool {
    let d1 = orientation(b.0, b.1, a.0);
    let d2 = orientation(b.0, b.1, a.1);
    let d3 = orientation(a.0, a.1, b.0);
    let d4 = orientation(a.0, a.1, b.1);

    if d1 == 0 && d2 == 0 && d3 == 0 && d4 == 0 {
        return spans_overlap(a.0.x, a.1.x, b.0.x, b.1.x) && spans_overlap(a.0.y, a.1.y, b.0.y, b.1.y);
    }
    d1 * d2 <= 0 && d3 * d4 <= 0
}

#[inline]
pub fn point_intersects_polygon(p: Point, polygon: &[Point]) -> bool {
    is_in_polygon(p.x, p.y, polygon)
}

/// True if either endpoint is inside `polygon` or the segment crosses an edge
pub fn segment_intersects_polygon(a: Point, b: Point, polygon: &[Point]) -> bool {
    if polygon.is_empty() {
        return false;
    }
    if point_intersects_polygon(a, polygon) || point_intersects_polygon(b, polygon) {
        return true;
    }
    let n = polygon.len();
    (0..n).any(|i| lines_intersect((a, b), (polygon[i], polygon[(i + 1) % n])))
}

/// True if any edge of `p1` touches `p2`
///
/// This catches `p1` inside `p2` (its vertices are inside) but not `p2`
/// wholly inside `p1`; test both orders when that matters.
pub fn polygons_intersect(p1: &[Point], p2: &[Point]) -> bool {
    match p1.len() {
        0 => false,
        1 => point_intersects_polygon(p1[0], p2),
        n => (0..n).any(|i| segment_intersects_polygon(p1[i], p1[(i + 1) % n], p2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    fn square() -> Vec<Point> {
        pts(&[(0, 0), (10, 0), (10, 10), (0, 10)])
    }

    #[test]
    fn test_square_inside_outside() {
        let sq = square();
        assert!(is_in_polygon(5, 5, &sq));
        assert!(!is_in_polygon(11, 5, &sq));
        assert!(!is_in_polygon(-1, 5, &sq));
        assert!(!is_in_polygon(5, 11, &sq));
    }

    #[test]
    fn test_boundary_counts_as_inside() {
        let sq = square();
        assert!(is_in_polygon(0, 0, &sq));
        assert!(is_in_polygon(5, 0, &sq));
        assert!(is_in_polygon(5, 10, &sq));
        assert!(is_in_polygon(10, 7, &sq));
        assert!(is_in_polygon(0, 3, &sq));
    }

    #[test]
    fn test_diagonal_edge_exact() {
        let tri = pts(&[(0, 0), (10, 10), (0, 10)]);
        assert!(is_in_polygon(4, 4, &tri));
        assert!(is_in_polygon(1, 5, &tri));
        assert!(!is_in_polygon(5, 4, &tri));
    }

    #[test]
    fn test_concave_notch() {
        // U shape open at the top
        let u = pts(&[(0, 0), (3, 0), (3, 7), (7, 7), (7, 0), (10, 0), (10, 10), (0, 10)]);
        assert!(!is_in_polygon(5, 3, &u));
        assert!(is_in_polygon(1, 3, &u));
        assert!(is_in_polygon(5, 9, &u));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(!is_in_polygon(0, 0, &[]));
        let single = pts(&[(3, 4)]);
        assert!(is_in_polygon(3, 4, &single));
        assert!(!is_in_polygon(3, 5, &single));
        let seg = pts(&[(0, 0), (4, 8)]);
        assert!(is_in_polygon(2, 4, &seg));
        assert!(!is_in_polygon(2, 3, &seg));
    }

    #[test]
    fn test_extreme_coordinates() {
        let big = pts(&[(i32::MIN, i32::MIN), (i32::MAX, i32::MIN), (i32::MAX, i32::MAX), (i32::MIN, i32::MAX)]);
        assert!(is_in_polygon(0, 0, &big));
        assert!(is_in_polygon(i32::MAX, 0, &big));
    }

    #[test]
    fn test_lines_cross_and_touch() {
        let p = Point::new;
        assert!(lines_intersect((p(0, 0), p(10, 10)), (p(0, 10), p(10, 0))));
        // T junction
        assert!(lines_intersect((p(0, 5), p(10, 5)), (p(5, 5), p(5, 9))));
        // shared endpoint
        assert!(lines_intersect((p(0, 0), p(4, 4)), (p(4, 4), p(9, 0))));
        assert!(!lines_intersect((p(0, 0), p(4, 4)), (p(5, 0), p(9, 0))));
        // on the extension of the other segment
        assert!(!lines_intersect((p(5, 0), p(5, 5)), (p(0, 0), p(3, 0))));
    }

    #[test]
    fn test_collinear_overlap_only() {
        let p = Point::new;
        assert!(lines_intersect((p(0, 0), p(5, 0)), (p(3, 0), p(9, 0))));
        assert!(lines_intersect((p(0, 0), p(5, 5)), (p(5, 5), p(9, 9))));
        assert!(!lines_intersect((p(0, 0), p(2, 0)), (p(3, 0), p(9, 0))));
        assert!(!lines_intersect((p(0, 0), p(2, 2)), (p(3, 3), p(9, 9))));
    }

    #[test]
    fn test_degenerate_segments() {
        let p = Point::new;
        assert!(lines_intersect((p(2, 2), p(2, 2)), (p(0, 0), p(4, 4))));
        assert!(!lines_intersect((p(2, 3), p(2, 3)), (p(0, 0), p(4, 4))));
        assert!(lines_intersect((p(1, 1), p(1, 1)), (p(1, 1), p(1, 1))));
    }

    #[test]
    fn test_segment_against_polygon() {
        let sq = square();
        let p = Point::new;
        assert!(segment_intersects_polygon(p(5, 5), p(50, 50), &sq));
        assert!(segment_intersects_polygon(p(-5, 5), p(15, 5), &sq));
        assert!(!segment_intersects_polygon(p(-5, -5), p(-5, 15), &sq));
        assert!(!segment_intersects_polygon(p(0, 0), p(1, 1), &[]));
    }

    #[test]
    fn test_polygons_intersect_cases() {
        let sq = square();
        let overlapping = pts(&[(8, 8), (20, 8), (20, 20)]);
        let far = pts(&[(30, 30), (40, 30), (40, 40)]);
        let inner = pts(&[(3, 3), (6, 3), (6, 6)]);
        assert!(polygons_intersect(&sq, &overlapping));
        assert!(polygons_intersect(&overlapping, &sq));
        assert!(!polygons_intersect(&sq, &far));
        assert!(polygons_intersect(&inner, &sq));
        // outer edges never reach the inner polygon
        assert!(!polygons_intersect(&sq, &inner));
        assert!(!polygons_intersect(&[], &sq));
        assert!(polygons_intersect(&pts(&[(5, 5)]), &sq));
    }

    #[test]
    fn test_vertex_order_does_not_matter() {
        let mut rng = Rng::new(77);
        let shapes = [
            square(),
            pts(&[(0, 0), (3, 0), (3, 7), (7, 7), (7, 0), (10, 0), (10, 10), (0, 10)]),
            pts(&[(2, 0), (12, 4), (6, 11), (-3, 7)]),
        ];
        for shape in &shapes {
            let mut reversed = shape.clone();
            reversed.reverse();
            for _ in 0..200 {
                let (x, y) = (rng.range_i32(-3, 14), rng.range_i32(-3, 14));
                assert_eq!(is_in_polygon(x, y, shape), is_in_polygon(x, y, &reversed), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_inside_count_matches_area_for_convex() {
        // 11 x 11 lattice points including the boundary
        let sq = square();
        let mut count = 0;
        for y in -2..13 {
            for x in -2..13 {
                if is_in_polygon(x, y, &sq) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 121);
    }
}
