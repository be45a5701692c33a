//! Software raster engine for small 2D games
//!
//! A `FrameBuffer` owns an RGBA8 pixel store, a clip rectangle and a grid of
//! dirty blocks. Drawing primitives (lines, rectangles, rounded rectangles,
//! ellipses, polygon outlines) are methods on it and take a `Pen`: a flat
//! color, a per-pixel `ColorAlgorithm`, or a replay of an `UndoLog`, with
//! optional undo capture and collision probing in the same pass.
//!
//! ```
//! use rasterkit::{Color, FrameBuffer, LinearGradient, Pen, UndoLog};
//!
//! let mut fb = FrameBuffer::new(320, 200);
//! let sky = LinearGradient::new((0, 0), (0, 199), Color::BLUE, Color::BLACK);
//! fb.fill_rectangle(0, 0, 319, 199, &sky);
//!
//! let mut undo = UndoLog::new();
//! fb.draw_ellipse(160, 100, 40, 25, Pen::solid(Color::WHITE).record(&mut undo));
//! fb.draw_ellipse(160, 100, 40, 25, Pen::restore(&undo));
//! ```

pub mod clip;
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod raster;
pub mod util;

pub use clip::Rect;
pub use color::Color;
pub use config::RasterConfig;
pub use display::{DirtyBlockGrid, FrameBuffer};
pub use error::RasterError;
pub use geometry::{Point, Polygon};
pub use paint::{
    Additive, Blend, ColorAlgorithm, LinearGradient, RadialGradient, Subtractive, Texture, TextureFill, Xor,
};
pub use raster::{CollisionProbe, Pen, UndoLog};
