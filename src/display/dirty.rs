//! Per-block dirty flags for partial presentation
//!
//! The raster is divided into square blocks of `block_size` pixels. Every
//! pixel write marks its block; the presenter uploads only marked blocks and
//! then clears them. Drawing code never clears a flag.

use crate::clip::Rect;

#[derive(Debug, Clone)]
pub struct DirtyBlockGrid {
    flags: Vec<bool>,
    block_size: u32,
    columns: u32,
    rows: u32,
    width: u32,
    height: u32,
}

impl DirtyBlockGrid {
    /// Grid covering a `width` x `height` raster; a zero block size is treated as 1
    pub fn new(width: u32, height: u32, block_size: u32) -> Self {
        let block_size = block_size.max(1);
        let columns = width.div_ceil(block_size);
        let rows = height.div_ceil(block_size);
        Self {
            flags: vec![false; (columns * rows) as usize],
            block_size,
            columns,
            rows,
            width,
            height,
        }
    }

    #[inline]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Row-major flags, `columns * rows` long
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Mark the block holding pixel (x, y); the caller guarantees it is in bounds
    #[inline]
    pub(crate) fn mark(&mut self, x: u32, y: u32) {
        let idx = (y / self.block_size) * self.columns + x / self.block_size;
        self.flags[idx as usize] = true;
    }

    /// Mark every block touched by the in-bounds span x1..=x2 on row y
    pub(crate) fn mark_span(&mut self, x1: u32, x2: u32, y: u32) {
        let row = (y / self.block_size) * self.columns;
        for bx in (x1 / self.block_size)..=(x2 / self.block_size) {
            self.flags[(row + bx) as usize] = true;
        }
    }

    pub fn mark_all(&mut self) {
        self.flags.fill(true);
    }

    #[inline]
    pub fn is_dirty(&self, bx: u32, by: u32) -> bool {
        bx < self.columns && by < self.rows && self.flags[(by * self.columns + bx) as usize]
    }

    pub fn dirty_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    pub fn any_dirty(&self) -> bool {
        self.flags.contains(&true)
    }

    pub fn clear(&mut self) {
        self.flags.fill(false);
    }

    pub fn clear_block(&mut self, bx: u32, by: u32) {
        if bx < self.columns && by < self.rows {
            self.flags[(by * self.columns + bx) as usize] = false;
        }
    }

    /// Pixel rectangle covered by block (bx, by), clamped to the raster
    pub fn block_rect(&self, bx: u32, by: u32) -> Rect {
        let x = bx * self.block_size;
        let y = by * self.block_size;
        let w = self.block_size.min(self.width.saturating_sub(x));
        let h = self.block_size.min(self.height.saturating_sub(y));
        Rect::from_size(x as i32, y as i32, w, h)
    }

    /// Coordinates of every dirty block, row by row
    pub fn dirty_blocks(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let columns = self.columns;
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &f)| f)
            .map(move |(i, _)| (i as u32 % columns, i as u32 / columns))
    }

    /// Dirty regions with horizontally adjacent blocks in a row merged
    ///
    /// Fewer, wider rectangles mean fewer texture uploads for the presenter.
    pub fn dirty_spans(&self) -> Vec<Rect> {
        let mut spans = Vec::new();
        for by in 0..self.rows {
            let mut bx = 0;
            while bx < self.columns {
                if !self.is_dirty(bx, by) {
                    bx += 1;
                    continue;
                }
                let start = bx;
                while bx < self.columns && self.is_dirty(bx, by) {
                    bx += 1;
                }
                let first = self.block_rect(start, by);
                let last = self.block_rect(bx - 1, by);
                spans.push(first.union(&last));
            }
        }
        spans
    }
}
