//! Lines, spans and rectangles

use super::pen::Pen;
use crate::clip::{clip_box, clip_line, clip_scan_line, clip_vertical_line, Rect};
use crate::display::FrameBuffer;

/// Round half up, as every minor-axis coordinate is
#[inline]
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

impl FrameBuffer {
    pub fn draw_pixel<'p>(&mut self, x: i32, y: i32, pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        self.plot(x, y, &mut pen);
        self.finish(&mut pen);
    }

    /// Straight line between two inclusive endpoints
    ///
    /// One pixel per step along the major axis. A zero-length line is a
    /// single pixel.
    pub fn draw_line<'p>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        self.line(x1, y1, x2, y2, false, &mut pen);
        self.finish(&mut pen);
    }

    /// Horizontal span, visited left to right whatever the argument order
    pub fn draw_scan_line<'p>(&mut self, x1: i32, x2: i32, y: i32, pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        self.scan_line(x1, x2, y, &mut pen);
        self.finish(&mut pen);
    }

    /// Vertical span, visited top to bottom whatever the argument order
    pub fn draw_vertical_line<'p>(&mut self, x: i32, y1: i32, y2: i32, pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        self.vertical_line(x, y1, y2, &mut pen);
        self.finish(&mut pen);
    }

    /// Rectangle outline through both corners; each border pixel once
    pub fn draw_rectangle<'p>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        let r = Rect::new(x1, y1, x2, y2);
        self.scan_line(r.left, r.right, r.top, &mut pen);
        if r.bottom != r.top {
            self.scan_line(r.left, r.right, r.bottom, &mut pen);
        }
        if i64::from(r.bottom) - i64::from(r.top) >= 2 {
            self.vertical_line(r.left, r.top + 1, r.bottom - 1, &mut pen);
            if r.right != r.left {
                self.vertical_line(r.right, r.top + 1, r.bottom - 1, &mut pen);
            }
        }
        self.finish(&mut pen);
    }

    /// Solid rectangle, one scan line per row top to bottom
    pub fn fill_rectangle<'p>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, pen: impl Into<Pen<'p>>) {
        let mut pen = pen.into();
        if let Some(r) = clip_box(&Rect::new(x1, y1, x2, y2), &self.clip()) {
            for y in r.top..=r.bottom {
                self.scan_line(r.left, r.right, y, &mut pen);
            }
        }
        self.finish(&mut pen);
    }

    // ========================================================================
    // Building blocks shared by the other primitives
    // ========================================================================

    /// DDA line; with `half_open` the end pixel is left for the next edge
    /// unless clipping moved it
    pub(crate) fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, half_open: bool, pen: &mut Pen<'_>) {
        let Some((sx, sy, ex, ey)) = clip_line(x1, y1, x2, y2, &self.clip()) else {
            return;
        };
        let dx = i64::from(ex) - i64::from(sx);
        let dy = i64::from(ey) - i64::from(sy);
        let steps = dx.abs().max(dy.abs());
        let skip_end = half_open && (ex, ey) == (x2, y2);
        let last = if skip_end { steps - 1 } else { steps };

        // Both clipped endpoints lie in the clip, and so does every point
        // rounded between them.
        for i in 0..=last {
            let (x, y) = if steps == 0 {
                (sx, sy)
            } else if dx.abs() >= dy.abs() {
                let t = (dy * i) as f64 / steps as f64;
                (sx + (dx.signum() * i) as i32, sy + round_half_up(t))
            } else {
                let t = (dx * i) as f64 / steps as f64;
                (sx + round_half_up(t), sy + (dy.signum() * i) as i32)
            };
            self.plot_unclipped(x as u32, y as u32, pen);
        }
    }

    pub(crate) fn scan_line(&mut self, x1: i32, x2: i32, y: i32, pen: &mut Pen<'_>) {
        let Some((lo, hi)) = clip_scan_line(x1, x2, y, &self.clip()) else {
            return;
        };
        if let Some(color) = pen.plain_color() {
            self.fill_run(lo as u32, hi as u32, y as u32, color);
            return;
        }
        for x in lo..=hi {
            self.plot_unclipped(x as u32, y as u32, pen);
        }
    }

    pub(crate) fn vertical_line(&mut self, x: i32, y1: i32, y2: i32, pen: &mut Pen<'_>) {
        let Some((lo, hi)) = clip_vertical_line(x, y1, y2, &self.clip()) else {
            return;
        };
        for y in lo..=hi {
            self.plot_unclipped(x as u32, y as u32, pen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::raster::UndoLog;

    fn lit(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.get_pixel(x, y) != Color::EMPTY {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_zero_length_line_is_one_pixel() {
        let mut fb = FrameBuffer::new(16, 16);
        let mut log = UndoLog::new();
        fb.draw_line(7, 3, 7, 3, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 1);
        assert_eq!(lit(&fb), vec![(7, 3)]);
    }

    #[test]
    fn test_line_pixel_count_is_major_axis_plus_one() {
        let mut fb = FrameBuffer::new(64, 64);
        let mut log = UndoLog::new();
        fb.draw_line(2, 5, 40, 17, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 39);
        assert_eq!(fb.get_pixel(2, 5), Color::WHITE);
        assert_eq!(fb.get_pixel(40, 17), Color::WHITE);
    }

    #[test]
    fn test_line_rounds_half_up() {
        // slope 1/2: x = 1 gives y = 0.5 which rounds to 1
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_line(0, 0, 2, 1, Color::WHITE);
        assert_eq!(lit(&fb), vec![(0, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_reversed_line_hits_endpoints() {
        let mut fb = FrameBuffer::new(32, 32);
        fb.draw_line(30, 2, 3, 29, Color::WHITE);
        assert_eq!(fb.get_pixel(30, 2), Color::WHITE);
        assert_eq!(fb.get_pixel(3, 29), Color::WHITE);
        assert_eq!(lit(&fb).len(), 28);
    }

    #[test]
    fn test_steep_line_one_pixel_per_row() {
        let mut fb = FrameBuffer::new(32, 32);
        fb.draw_line(4, 0, 9, 31, Color::WHITE);
        let pixels = lit(&fb);
        assert_eq!(pixels.len(), 32);
        for (row, (_, y)) in pixels.iter().enumerate() {
            assert_eq!(*y, row as i32);
        }
    }

    #[test]
    fn test_line_far_outside_draws_nothing() {
        let mut fb = FrameBuffer::new(16, 16);
        fb.draw_line(-1000, -5, 1000, -5, Color::WHITE);
        fb.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MIN, Color::WHITE);
        assert!(lit(&fb).is_empty());
    }

    #[test]
    fn test_extreme_line_through_raster() {
        let mut fb = FrameBuffer::new(16, 16);
        fb.draw_line(i32::MIN, 8, i32::MAX, 8, Color::WHITE);
        assert_eq!(lit(&fb).len(), 16);
    }

    #[test]
    fn test_scan_line_fast_path_matches_pen_path() {
        let mut fast = FrameBuffer::new(40, 4);
        let mut slow = FrameBuffer::new(40, 4);
        let mut log = UndoLog::new();
        fast.draw_scan_line(35, -3, 2, Color::RED);
        slow.draw_scan_line(35, -3, 2, Pen::solid(Color::RED).record(&mut log));
        assert_eq!(fast.as_bytes(), slow.as_bytes());
        assert_eq!(fast.dirty().as_slice(), slow.dirty().as_slice());
        assert_eq!(log.len(), 36);
    }

    #[test]
    fn test_vertical_line_clipped() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_vertical_line(3, 20, -20, Color::WHITE);
        assert_eq!(lit(&fb).len(), 8);
        fb.draw_vertical_line(9, 0, 7, Color::RED);
        assert_eq!(lit(&fb).len(), 8);
    }

    #[test]
    fn test_rectangle_outline_counts() {
        let mut fb = FrameBuffer::new(32, 32);
        let mut log = UndoLog::new();
        fb.draw_rectangle(10, 10, 1, 4, Pen::solid(Color::WHITE).record(&mut log));
        // 10 x 7 box: 2 * 10 + 2 * 5
        assert_eq!(log.len(), 30);
        assert_eq!(lit(&fb).len(), 30);
        assert_eq!(fb.get_pixel(5, 7), Color::EMPTY);
    }

    #[test]
    fn test_degenerate_rectangles() {
        let mut fb = FrameBuffer::new(16, 16);
        let mut log = UndoLog::new();
        fb.draw_rectangle(3, 3, 3, 3, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 1);

        log.clear();
        fb.draw_rectangle(1, 5, 9, 5, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 9);

        log.clear();
        fb.draw_rectangle(12, 0, 12, 9, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 10);

        log.clear();
        fb.draw_rectangle(0, 12, 4, 13, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 10);
    }

    #[test]
    fn test_fill_rectangle_clipped_rows() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.set_clip(Rect::new(2, 2, 5, 5));
        let mut log = UndoLog::new();
        fb.fill_rectangle(-100, -100, 100, 100, Pen::solid(Color::WHITE).record(&mut log));
        assert_eq!(log.len(), 16);
        assert_eq!(lit(&fb).first(), Some(&(2, 2)));
        assert_eq!(lit(&fb).last(), Some(&(5, 5)));
    }
}
