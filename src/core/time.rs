//! Frame timing

use std::time::{Duration, Instant};

/// Largest frame delta handed to the simulation, in seconds.
///
/// A stalled frame (window drag, breakpoint, tab switch) would otherwise
/// teleport particles and skip most of a night-mode transition in one step.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Clamp a raw frame delta into `[0, max]`.
#[inline]
pub fn clamp_delta(raw: f32, max: f32) -> f32 {
    if raw.is_finite() { raw.clamp(0.0, max) } else { 0.0 }
}

/// Tracks wall-clock frame timing and a once-per-second FPS estimate
pub struct FrameTimer {
    last_frame: Instant,
    raw_delta: Duration,
    max_delta: f32,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a timer clamping deltas to [`MAX_FRAME_DELTA`]
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA)
    }

    /// Create a timer with a custom delta clamp
    pub fn with_max_delta(max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            raw_delta: Duration::ZERO,
            max_delta,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame. Returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.raw_delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        let fps_elapsed = now - self.fps_timer;
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        self.delta_secs()
    }

    /// Clamped delta of the last tick, in seconds
    pub fn delta_secs(&self) -> f32 {
        clamp_delta(self.raw_delta.as_secs_f32(), self.max_delta)
    }

    /// Unclamped delta of the last tick
    pub fn raw_delta(&self) -> Duration {
        self.raw_delta
    }

    /// Current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
