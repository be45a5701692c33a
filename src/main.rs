//! rasterkit-demo: drifting asteroids erased and redrawn through undo logs
//!
//! Nothing is cleared between frames. Every shape records what it covered
//! and is restored from that log before anything moves, newest first.

use rasterkit::display::{Display, InputEvent, RenderTarget};
use rasterkit::geometry::polygons_intersect;
use rasterkit::util::{FrameTimer, Rng};
use rasterkit::{
    Color, CollisionProbe, FrameBuffer, LinearGradient, Pen, Point, RadialGradient, RasterConfig, RasterError,
    Rect, UndoLog, Xor,
};
use sdl2::keyboard::Keycode;
use std::collections::HashSet;
use std::f32::consts::TAU;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ASTEROID_COUNT: usize = 9;
const FRAME_MARGIN: i32 = 14;
const SHIP_SPEED: f32 = 170.0;
const STATS_EVERY: u64 = 300;

struct Options {
    config: RasterConfig,
    vsync: bool,
}

fn print_help() {
    let defaults = RasterConfig::default();
    println!("Usage: rasterkit-demo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --width W, -w W       Set window width (default: {})", defaults.width);
    println!("  --height H, -h H      Set window height (default: {})", defaults.height);
    println!("  --block B, -b B       Dirty block edge in pixels (default: {})", defaults.block_size);
    println!("  --config FILE, -c FILE  Load a JSON raster config; flags above override it");
    println!("  --no-vsync            Disable VSync for uncapped framerate");
    println!("  --help                Show this help message");
}

/// Parse command line arguments on top of an optional config file
fn parse_args() -> Result<Options, RasterError> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = None;
    let mut width = None;
    let mut height = None;
    let mut block = None;
    let mut vsync = true;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--no-vsync" => vsync = false,
            "--width" | "-w" => {
                width = value.and_then(|v| v.parse::<u32>().ok());
                i += 1;
            },
            "--height" | "-h" => {
                height = value.and_then(|v| v.parse::<u32>().ok());
                i += 1;
            },
            "--block" | "-b" => {
                block = value.and_then(|v| v.parse::<u32>().ok());
                i += 1;
            },
            "--config" | "-c" => {
                config_path = value.cloned();
                i += 1;
            },
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => warn!("ignoring unknown argument {}", other),
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => RasterConfig::load(path)?,
        None => RasterConfig::default(),
    };
    if let Some(w) = width {
        config.width = w;
    }
    if let Some(h) = height {
        config.height = h;
    }
    if let Some(b) = block {
        config.block_size = b;
    }
    config.validate()?;

    Ok(Options { config, vsync })
}

// ============================================================================
// Scene objects
// ============================================================================

/// An outline drawn last frame plus what it covered
#[derive(Default)]
struct Sprite {
    outline: Vec<Point>,
    undo: UndoLog,
}

impl Sprite {
    fn erase(&self, fb: &mut FrameBuffer) {
        fb.draw_polygon(&self.outline, Pen::restore(&self.undo));
    }

    fn draw(&mut self, fb: &mut FrameBuffer, outline: Vec<Point>, pen: Pen<'_>) {
        self.outline = outline;
        self.undo.clear();
        fb.draw_polygon(&self.outline, pen.record(&mut self.undo));
    }
}

struct Asteroid {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    angle: f32,
    spin: f32,
    radii: Vec<f32>,
    color: Color,
    sprite: Sprite,
}

impl Asteroid {
    fn spawn(rng: &mut Rng, field: &Rect) -> Self {
        let unit = |rng: &mut Rng| rng.next_f64() as f32;
        let vertices = 7 + (rng.next_u32() % 5) as usize;
        let size = 10.0 + unit(rng) * 24.0;
        let heading = unit(rng) * TAU;
        let speed = 20.0 + unit(rng) * 60.0;
        let shade = 128 + rng.next_u8() / 2;

        Self {
            x: rng.range_i32(field.left, field.right) as f32,
            y: rng.range_i32(field.top, field.bottom) as f32,
            vx: heading.cos() * speed,
            vy: heading.sin() * speed,
            angle: 0.0,
            spin: (unit(rng) - 0.5) * 2.0,
            radii: (0..vertices).map(|_| size * (0.65 + 0.35 * unit(rng))).collect(),
            color: Color::rgb(shade, shade - 20, shade - 50),
            sprite: Sprite::default(),
        }
    }

    fn update(&mut self, dt: f32, field: &Rect) {
        self.x = wrap(self.x + self.vx * dt, field.left, field.right);
        self.y = wrap(self.y + self.vy * dt, field.top, field.bottom);
        self.angle = (self.angle + self.spin * dt) % TAU;
    }

    fn outline(&self) -> Vec<Point> {
        let step = TAU / self.radii.len() as f32;
        self.radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let a = self.angle + step * i as f32;
                Point::new((self.x + a.cos() * r).round() as i32, (self.y + a.sin() * r).round() as i32)
            })
            .collect()
    }
}

struct Ship {
    x: f32,
    y: f32,
    heading: f32,
    sprite: Sprite,
}

impl Ship {
    fn outline(&self) -> Vec<Point> {
        [(14.0, 0.0), (-9.0, 8.0), (-5.0, 0.0), (-9.0, -8.0)]
            .iter()
            .map(|&(fx, fy): &(f32, f32)| {
                let (s, c) = self.heading.sin_cos();
                Point::new(
                    (self.x + fx * c - fy * s).round() as i32,
                    (self.y + fx * s + fy * c).round() as i32,
                )
            })
            .collect()
    }

    fn steer(&mut self, held: &HashSet<Keycode>, dt: f32, field: &Rect) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if held.contains(&Keycode::Left) {
            dx -= 1.0;
        }
        if held.contains(&Keycode::Right) {
            dx += 1.0;
        }
        if held.contains(&Keycode::Up) {
            dy -= 1.0;
        }
        if held.contains(&Keycode::Down) {
            dy += 1.0;
        }
        if dx != 0.0 || dy != 0.0 {
            self.heading = f32::atan2(dy, dx);
            self.x = (self.x + dx * SHIP_SPEED * dt).clamp(field.left as f32, field.right as f32);
            self.y = (self.y + dy * SHIP_SPEED * dt).clamp(field.top as f32, field.bottom as f32);
        }
    }
}

fn wrap(v: f32, lo: i32, hi: i32) -> f32 {
    let (lo, hi) = (lo as f32, hi as f32);
    if v < lo {
        v + (hi - lo)
    } else if v > hi {
        v - (hi - lo)
    } else {
        v
    }
}

/// Gradient frame around a black, rounded playfield; returns the playfield
fn paint_backdrop(fb: &mut FrameBuffer) -> Result<Rect, RasterError> {
    let (w, h) = (fb.width() as i32, fb.height() as i32);
    let frame = LinearGradient::new((0, 0), (w - 1, h - 1), Color::rgb(20, 40, 120), Color::rgb(120, 20, 90))
        .with_stops(&[(0.5, Color::rgb(10, 10, 30))]);
    fb.fill_rectangle(0, 0, w - 1, h - 1, &frame);

    let field = Rect::new(FRAME_MARGIN, FRAME_MARGIN, w - 1 - FRAME_MARGIN, h - 1 - FRAME_MARGIN);
    fb.fill_rounded_rectangle(field.left, field.top, field.right, field.bottom, 18, 18, Color::BLACK);

    let glow = RadialGradient::new((w / 2, h / 2), f64::from(w.min(h)) / 2.0, Color::WHITE, Color::rgb(40, 40, 60))?;
    fb.draw_rounded_rectangle(field.left, field.top, field.right, field.bottom, 18, 18, &glow);
    Ok(field)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("rasterkit-demo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RasterError> {
    let Options { config, vsync } = parse_args()?;
    let (width, height) = (config.width, config.height);

    let (mut display, texture_creator) = Display::with_options("rasterkit", width, height, vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = FrameBuffer::from_config(&config)?;

    let field = paint_backdrop(&mut buffer)?;
    // moving shapes stay off the frame; clipping keeps their undo logs short
    buffer.set_clip(Rect::new(field.left + 1, field.top + 1, field.right - 1, field.bottom - 1));

    let mut rng = Rng::new(0x5EED_CAFE);
    let mut asteroids: Vec<Asteroid> = (0..ASTEROID_COUNT).map(|_| Asteroid::spawn(&mut rng, &field)).collect();
    let mut ship = Ship {
        x: (field.left + field.right) as f32 / 2.0,
        y: (field.top + field.bottom) as f32 / 2.0,
        heading: 0.0,
        sprite: Sprite::default(),
    };

    let mut timer = FrameTimer::new(60);
    let mut held: HashSet<Keycode> = HashSet::new();
    let mut paused = false;
    let mut touching = false;
    let pause_marker = Xor::new(Color::rgb(255, 255, 0));
    let mut frame: u64 = 0;
    let mut uploads = 0usize;

    println!("=== rasterkit demo ===");
    println!("Resolution: {}x{}, dirty blocks of {}", width, height, config.block_size);
    if vsync {
        println!("VSync: ON (60fps locked). Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  Arrows     - Fly");
    println!("  Space      - Pause");
    println!("  Escape     - Quit");

    'main: loop {
        let (dt, avg_fps) = timer.tick();
        let dt = dt.min(0.1);

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::Space) => {
                    paused = !paused;
                    // XOR twice restores, so the same call shows and hides it
                    buffer.fill_rectangle(field.left + 8, field.top + 8, field.left + 20, field.top + 20, &pause_marker);
                },
                InputEvent::KeyDown(key) => {
                    held.insert(key);
                },
                InputEvent::KeyUp(key) => {
                    held.remove(&key);
                },
            }
        }

        if !paused {
            ship.sprite.erase(&mut buffer);
            for a in asteroids.iter().rev() {
                a.sprite.erase(&mut buffer);
            }

            for a in &mut asteroids {
                a.update(dt, &field);
            }
            ship.steer(&held, dt, &field);

            for a in &mut asteroids {
                let outline = a.outline();
                let color = a.color;
                a.sprite.draw(&mut buffer, outline, Pen::solid(color));
            }

            let outline = ship.outline();
            let overlaps = asteroids
                .iter()
                .any(|a| polygons_intersect(&outline, &a.sprite.outline) || polygons_intersect(&a.sprite.outline, &outline));
            let mut probe = CollisionProbe::new(Color::BLACK);
            let color = if touching { Color::RED } else { Color::WHITE };
            ship.sprite.draw(&mut buffer, outline, Pen::solid(color).probe(&mut probe));

            if probe.hit() != touching {
                touching = probe.hit();
                if touching {
                    info!("contact (outlines intersect: {})", overlaps);
                }
            }
        }

        uploads += display.present(&mut target, &mut buffer)?;
        frame += 1;
        if frame % STATS_EVERY == 0 {
            info!(
                "{:.1} fps avg, {:.2} ms/frame, {:.1} spans uploaded per frame",
                avg_fps,
                timer.avg_frame_time_ms(),
                uploads as f64 / STATS_EVERY as f64
            );
            uploads = 0;
        }
    }

    Ok(())
}
