//! Rasterizer
//!
//! Primitives are methods on `FrameBuffer`. Each one walks its pixels in a
//! fixed order and hands every in-clip pixel to the pen, so the pixel count
//! and order of a draw depend only on geometry and clip. That is what lets
//! an undo log captured by one draw be replayed by the same draw later.

mod line;
mod pen;
mod polygon;
mod rounded;
mod undo;

pub use pen::Pen;
pub use undo::{CollisionProbe, UndoLog};

use crate::display::FrameBuffer;

impl FrameBuffer {
    /// Visit (x, y) with `pen` if it lies in the clip
    #[inline]
    pub(crate) fn plot(&mut self, x: i32, y: i32, pen: &mut Pen<'_>) {
        if self.in_clip(x, y) {
            self.plot_unclipped(x as u32, y as u32, pen);
        }
    }

    /// Visit a pixel already known to be inside the clip
    #[inline]
    pub(crate) fn plot_unclipped(&mut self, x: u32, y: u32, pen: &mut Pen<'_>) {
        let previous = self.peek(x, y);
        let Some(color) = pen.next_color(x as i32, y as i32, previous) else {
            return;
        };
        pen.observe(previous, color);
        if pen.defers_writes() {
            pen.defer(x, y, color);
        } else {
            self.put(x, y, color);
        }
    }

    /// Flush deferred writes at the end of a top-level primitive
    pub(crate) fn finish(&mut self, pen: &mut Pen<'_>) {
        for (x, y, color) in pen.take_pending().into_iter().rev() {
            self.put(x, y, color);
        }
    }
}
