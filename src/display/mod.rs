mod dirty;
mod frame_buffer;
#[cfg(feature = "sdl")]
mod present;

pub use dirty::DirtyBlockGrid;
pub use frame_buffer::FrameBuffer;
#[cfg(feature = "sdl")]
pub use present::{Display, InputEvent, RenderTarget};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
/// Edge length of a dirty-tracking block in pixels
pub const DEFAULT_BLOCK_SIZE: u32 = 32;
