//! Construction-time errors
//!
//! Drawing never fails: out-of-range geometry is a no-op and out-of-bounds
//! pixels are clipped. Only building things (textures, gradients, configs,
//! the window presenter) can report an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("invalid texture: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidTexture {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("SDL error: {0}")]
    Sdl(String),
}
