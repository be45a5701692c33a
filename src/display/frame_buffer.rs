use super::dirty::DirtyBlockGrid;
use super::DEFAULT_BLOCK_SIZE;
use crate::clip::Rect;
use crate::color::Color;
use crate::config::RasterConfig;
use crate::error::RasterError;

// ============================================================================
// Pixel byte helpers
// ============================================================================

/// Read an RGBA8 pixel from a 4-byte slice
#[inline]
fn read_pixel(src: &[u8]) -> Color {
    Color::rgba(src[0], src[1], src[2], src[3])
}

/// Write a color as RGBA8 bytes
#[inline]
fn write_pixel(dest: &mut [u8], c: Color) {
    dest[0] = c.r();
    dest[1] = c.g();
    dest[2] = c.b();
    dest[3] = c.a();
}

// ============================================================================
// FrameBuffer
// ============================================================================

/// RGBA8 software raster with a clip rectangle and dirty-block tracking
///
/// Everything the rasterizer draws lands here. Size is fixed for the life of
/// the buffer; a display mode change means building a new one.
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    clip: Rect,
    dirty: DirtyBlockGrid,
}

impl FrameBuffer {
    /// Transparent black raster with the default dirty block size
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_block_size(width, height, DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(width: u32, height: u32, block_size: u32) -> Self {
        tracing::debug!(
            "creating {}x{} framebuffer, dirty block {}",
            width,
            height,
            block_size
        );
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
            clip: Rect::from_size(0, 0, width, height),
            dirty: DirtyBlockGrid::new(width, height, block_size),
        }
    }

    /// Build from a validated config and clear to its clear color
    pub fn from_config(config: &RasterConfig) -> Result<Self, RasterError> {
        config.validate()?;
        let mut fb = Self::with_block_size(config.width, config.height, config.block_size);
        fb.clear(config.clear_color);
        Ok(fb)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full raster extent
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(0, 0, self.width, self.height)
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Byte offset of pixel (x, y); caller guarantees bounds
    #[inline]
    pub(crate) fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    // ========================================================================
    // Clip rectangle
    // ========================================================================

    #[inline]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Restrict writes to `rect`, intersected with the raster
    ///
    /// A rectangle entirely off the raster leaves an empty clip and every
    /// write becomes a no-op until the clip is reset.
    pub fn set_clip(&mut self, rect: Rect) {
        let requested = Rect::new(rect.left, rect.top, rect.right, rect.bottom);
        self.clip = requested.intersect(&self.bounds()).unwrap_or(Rect::EMPTY);
        tracing::debug!("clip set to {:?}", self.clip);
    }

    pub fn reset_clip(&mut self) {
        self.clip = self.bounds();
    }

    #[inline]
    pub(crate) fn in_clip(&self, x: i32, y: i32) -> bool {
        self.clip.contains(x, y)
    }

    // ========================================================================
    // Pixel access
    // ========================================================================

    /// Color at (x, y), or `Color::EMPTY` outside the raster
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            read_pixel(&self.pixels[idx..idx + 4])
        } else {
            Color::EMPTY
        }
    }

    /// Write one pixel, honoring the clip; marks its block dirty
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_clip(x, y) {
            self.put(x as u32, y as u32, color);
        }
    }

    /// Unclipped write of an in-bounds pixel
    #[inline]
    pub(crate) fn put(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.pixel_index(x, y);
        write_pixel(&mut self.pixels[idx..idx + 4], color);
        self.dirty.mark(x, y);
    }

    /// Unclipped read of an in-bounds pixel
    #[inline]
    pub(crate) fn peek(&self, x: u32, y: u32) -> Color {
        let idx = self.pixel_index(x, y);
        read_pixel(&self.pixels[idx..idx + 4])
    }

    /// Fill an in-bounds horizontal run with one color
    pub(crate) fn fill_run(&mut self, x1: u32, x2: u32, y: u32, color: Color) {
        let bytes = [color.r(), color.g(), color.b(), color.a()];
        let start = self.pixel_index(x1, y);
        let end = self.pixel_index(x2, y) + 4;
        for px in self.pixels[start..end].chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.dirty.mark_span(x1, x2, y);
    }

    /// Fill the whole raster, ignoring the clip, and mark every block dirty
    pub fn clear(&mut self, color: Color) {
        let bytes = [color.r(), color.g(), color.b(), color.a()];
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.dirty.mark_all();
    }

    // ========================================================================
    // Presentation interface
    // ========================================================================

    /// Raw RGBA8 bytes, row-major, `width * 4` bytes per row
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    /// Bytes starting at the top-left pixel of `rect`, plus the row pitch
    ///
    /// This is the shape partial texture uploads want: the consumer reads
    /// `rect.width() * 4` bytes from each row, stepping by the pitch.
    /// Returns `None` if `rect` does not overlap the raster.
    pub fn rect_bytes(&self, rect: &Rect) -> Option<(Rect, &[u8], usize)> {
        let r = rect.intersect(&self.bounds())?;
        let start = self.pixel_index(r.left as u32, r.top as u32);
        Some((r, &self.pixels[start..], self.pitch()))
    }

    #[inline]
    pub fn dirty(&self) -> &DirtyBlockGrid {
        &self.dirty
    }

    /// Mutable grid access for the presenter, which owns flag clearing
    #[inline]
    pub fn dirty_mut(&mut self) -> &mut DirtyBlockGrid {
        &mut self.dirty
    }
}
