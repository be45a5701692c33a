//! Texture tiling fill

use super::ColorAlgorithm;
use crate::color::Color;
use crate::error::RasterError;

/// RGBA8 texel grid used as a fill pattern
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // R, G, B, A per texel
}

impl Texture {
    /// Take ownership of raw RGBA bytes
    ///
    /// Fails for a zero dimension or when `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(RasterError::InvalidTexture {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: data,
        })
    }

    /// Two-color checkerboard with square tiles
    pub fn checkerboard(size: u32, tile: u32, c1: Color, c2: Color) -> Result<Self, RasterError> {
        let tile = tile.max(1);
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let c = if ((x / tile) + (y / tile)) % 2 == 0 { c1 } else { c2 };
                data.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
            }
        }
        Self::from_rgba(size, size, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at (x, y), wrapping in both directions
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> Color {
        let tx = x.rem_euclid(i64::from(self.width)) as usize;
        let ty = y.rem_euclid(i64::from(self.height)) as usize;
        let idx = (ty * self.width as usize + tx) * 4;
        Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }
}

/// Tiles a texture across the raster, anchored so texel (0, 0) lands on
/// `origin`
#[derive(Debug, Clone)]
pub struct TextureFill {
    texture: Texture,
    origin: (i32, i32),
}

impl TextureFill {
    pub fn new(texture: Texture, origin: (i32, i32)) -> Self {
        Self { texture, origin }
    }

    /// Convenience for callers holding raw bytes
    pub fn from_rgba(
        width: u32,
        height: u32,
        data: Vec<u8>,
        origin: (i32, i32),
    ) -> Result<Self, RasterError> {
        Ok(Self::new(Texture::from_rgba(width, height, data)?, origin))
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

impl ColorAlgorithm for TextureFill {
    fn color_at(&self, x: i32, y: i32, _dest: Color) -> Color {
        self.texture.texel(
            i64::from(x) - i64::from(self.origin.0),
            i64::from(y) - i64::from(self.origin.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_2x2() -> Texture {
        Texture::from_rgba(
            2,
            2,
            vec![
                1, 0, 0, 255, //
                2, 0, 0, 255, //
                3, 0, 0, 255, //
                4, 0, 0, 255,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Texture::from_rgba(0, 4, vec![]).is_err());
        let err = Texture::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::InvalidTexture {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_tiles_with_origin() {
        let fill = TextureFill::new(ramp_2x2(), (10, 20));
        assert_eq!(fill.color_at(10, 20, Color::EMPTY).r(), 1);
        assert_eq!(fill.color_at(11, 20, Color::EMPTY).r(), 2);
        assert_eq!(fill.color_at(10, 21, Color::EMPTY).r(), 3);
        assert_eq!(fill.color_at(13, 23, Color::EMPTY).r(), 4);
    }

    #[test]
    fn test_negative_offsets_wrap() {
        let fill = TextureFill::new(ramp_2x2(), (0, 0));
        assert_eq!(fill.color_at(-1, -1, Color::EMPTY).r(), 4);
        assert_eq!(fill.color_at(-2, 0, Color::EMPTY).r(), 1);
    }

    #[test]
    fn test_checkerboard() {
        let tex = Texture::checkerboard(4, 2, Color::WHITE, Color::BLACK).unwrap();
        assert_eq!(tex.texel(0, 0), Color::WHITE);
        assert_eq!(tex.texel(2, 0), Color::BLACK);
        assert_eq!(tex.texel(2, 2), Color::WHITE);
    }
}
