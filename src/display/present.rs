//! SDL2 window presenter
//!
//! Consumes a `FrameBuffer` between ticks: uploads the dirty spans to a
//! streaming texture, clears the flags, and flips the window.

use super::FrameBuffer;
use crate::error::RasterError;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
}

fn sdl_err(e: impl ToString) -> RasterError {
    RasterError::Sdl(e.to_string())
}

impl Display {
    /// Open a centered window
    /// vsync=true locks presentation to the monitor refresh
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), RasterError> {
        let sdl_context = sdl2::init().map_err(sdl_err)?;
        let video_subsystem = sdl_context.video().map_err(sdl_err)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(sdl_err)?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(sdl_err)?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(sdl_err)?;
        tracing::info!("SDL2 display opened: {}x{} vsync={}", width, height, vsync);

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Upload dirty blocks, clear their flags, and present
    ///
    /// Returns how many spans were uploaded. A clean buffer still re-presents
    /// the texture from the previous tick.
    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &mut FrameBuffer,
    ) -> Result<usize, RasterError> {
        if (buffer.width(), buffer.height()) != (target.width, target.height) {
            return Err(RasterError::Sdl(format!(
                "render target is {}x{} but framebuffer is {}x{}",
                target.width,
                target.height,
                buffer.width(),
                buffer.height()
            )));
        }

        let spans = buffer.dirty().dirty_spans();
        for span in &spans {
            if let Some((r, bytes, pitch)) = buffer.rect_bytes(span) {
                let rect = sdl2::rect::Rect::new(r.left, r.top, r.width(), r.height());
                target
                    .texture
                    .update(rect, bytes, pitch)
                    .map_err(sdl_err)?;
            }
        }
        buffer.dirty_mut().clear();

        self.canvas.copy(&target.texture, None, None).map_err(sdl_err)?;
        self.canvas.present();
        Ok(spans.len())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the framebuffer's RGBA8 byte order
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, RasterError> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, width, height)
            .map_err(sdl_err)?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}
