//! Small helpers shared by the demo loop and randomized tests

use std::collections::VecDeque;
use std::time::Instant;

/// Deterministic xorshift64 generator
///
/// Reproducible scenes and property tests without pulling in an RNG crate.
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Zero would lock xorshift at zero forever, so it is bumped to 1
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max]; returns `min` when the range is empty
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        (i64::from(min) + (self.next_u64() % span) as i64) as i32
    }
}

/// Frame timing with a rolling average over the last `window` frames
pub struct FrameTimer {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    window: usize,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(window),
            last_frame: Instant::now(),
            window: window.max(1),
        }
    }

    /// Call once per tick; returns (delta seconds, average fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.window {
            self.frame_times.pop_front();
        }

        let avg = self.average_dt();
        (dt, if avg > 0.0 { 1.0 / avg } else { 0.0 })
    }

    pub fn avg_frame_time_ms(&self) -> f32 {
        self.average_dt() * 1000.0
    }

    pub fn frame_count(&self) -> usize {
        self.frame_times.len()
    }

    fn average_dt(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_zero_seed_progresses() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_range_i32_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range_i32(-3, 3);
            assert!((-3..=3).contains(&v));
        }
        assert_eq!(rng.range_i32(5, 5), 5);
        assert_eq!(rng.range_i32(9, 2), 9);
        // Full-width range must not overflow the span computation
        let _ = rng.range_i32(i32::MIN, i32::MAX);
    }

    #[test]
    fn test_next_f64_unit_range() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_frame_timer_window() {
        let mut timer = FrameTimer::new(3);
        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(timer.frame_count(), 3);
        assert!(timer.avg_frame_time_ms() >= 0.0);
    }
}
