use super::{is_in_polygon, polygons_intersect, segment_intersects_polygon, Point};
use crate::clip::Rect;
use serde::{Deserialize, Serialize};

/// A simple polygon defined by vertices, closed implicitly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn add_vertex(&mut self, x: i32, y: i32) {
        self.vertices.push(Point::new(x, y));
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 3
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        is_in_polygon(x, y, &self.vertices)
    }

    /// Edge-based overlap test, see `polygons_intersect`
    pub fn intersects(&self, other: &Polygon) -> bool {
        polygons_intersect(&self.vertices, &other.vertices)
    }

    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        segment_intersects_polygon(a, b, &self.vertices)
    }

    /// Inclusive bounding box
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.vertices.first()?;
        Some(self.vertices.iter().fold(Rect::new(first.x, first.y, first.x, first.y), |r, v| {
            r.union(&Rect::new(v.x, v.y, v.x, v.y))
        }))
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v.offset(dx, dy)).collect(),
        }
    }

    /// Edges as segments, including the closing one
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.vertices
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::from_vertices(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::from_vertices(vec![Point::new(0, 0), Point::new(8, 0), Point::new(0, 6)])
    }

    #[test]
    fn test_bounds_and_translate() {
        let t = triangle();
        assert_eq!(t.bounds(), Some(Rect::new(0, 0, 8, 6)));
        let moved = t.translated(5, -2);
        assert_eq!(moved.bounds(), Some(Rect::new(5, -2, 13, 4)));
        assert!(moved.contains(6, 0));
        assert!(!t.contains(6, 5));
        assert_eq!(Polygon::new().bounds(), None);
    }

    #[test]
    fn test_edges_close_the_loop() {
        let edges: Vec<_> = triangle().edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], (Point::new(0, 6), Point::new(0, 0)));
    }

    #[test]
    fn test_closed_needs_three_vertices() {
        let mut p = Polygon::new();
        p.add_vertex(1, 1);
        p.add_vertex(4, 1);
        assert!(!p.is_closed());
        p.add_vertex(4, 4);
        assert!(p.is_closed());
    }

    #[test]
    fn test_intersects_methods() {
        let t = triangle();
        assert!(t.intersects(&t.translated(3, 1)));
        assert!(!t.intersects(&t.translated(30, 0)));
        assert!(t.intersects_segment(Point::new(-5, 3), Point::new(20, 3)));
        assert!(!t.intersects_segment(Point::new(-5, 10), Point::new(20, 10)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&triangle()).unwrap();
        assert!(json.contains("\"vertices\""));
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, triangle());
    }
}
