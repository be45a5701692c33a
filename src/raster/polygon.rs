//! Closed polygon outlines

use super::pen::Pen;
use crate::display::FrameBuffer;
use crate::geometry::Point;

impl FrameBuffer {
    /// Outline through `points`, closing back to the first
    ///
    /// Edges are half-open so shared vertices are drawn by exactly one edge.
    /// Fewer than two points draws nothing; two points draw one line.
    pub fn draw_polygon<'p>(&mut self, points: &[Point], pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        match points {
            [] | [_] => {},
            [a, b] => self.line(a.x, a.y, b.x, b.y, false, &mut pen),
            [first, ..] if points.iter().all(|p| p == first) => {
                self.plot(first.x, first.y, &mut pen);
            },
            _ => {
                let n = points.len();
                for i in 0..n {
                    let (a, b) = (points[i], points[(i + 1) % n]);
                    self.line(a.x, a.y, b.x, b.y, true, &mut pen);
                }
            },
        }
        self.finish(&mut pen);
    }
}
