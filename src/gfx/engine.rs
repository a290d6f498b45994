//! # Engine Handle
//!
//! The engine is the host-side context an assignment receives: it reports the
//! frame delta, the render target size, and drives the render loop.
//!
//! Two implementations exist:
//!
//! - [`WindowEngine`] - wall-clock timing, used by the windowed runner
//! - [`HeadlessEngine`] - fixed-step timing with no display surface, used by
//!   tests and batch runs
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use xr_scenes::gfx::engine::{Engine, HeadlessEngine};
//!
//! let mut engine = HeadlessEngine::new(800, 600).with_fixed_step(Duration::from_millis(10));
//! let mut frames = 0;
//! engine.run_render_loop(3, |engine| {
//!     assert_eq!(engine.delta_time(), Duration::from_millis(10));
//!     frames += 1;
//! });
//! assert_eq!(frames, 3);
//! ```

use std::time::{Duration, Instant};

/// Host rendering context handed to scene bootstrap and update code
pub trait Engine {
    /// Time elapsed between the previous frame and the current one
    fn delta_time(&self) -> Duration;

    /// Width and height of the render target in pixels
    fn render_size(&self) -> (u32, u32);

    /// Number of frames started so far
    fn frame_count(&self) -> u64;

    /// Whether this engine renders to a display surface
    fn is_headless(&self) -> bool;

    /// Frame delta in seconds
    fn delta_seconds(&self) -> f32 {
        self.delta_time().as_secs_f32()
    }

    /// Render target aspect ratio, `1.0` while the height is zero
    fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.render_size();
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}

/// Measures per-frame deltas
///
/// Deltas are never negative: a `now` earlier than the previous tick yields a
/// zero delta. The first tick always yields zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Starts a frame at `now`, measuring the delta from the previous tick
    pub fn tick(&mut self, now: Instant) -> Duration {
        let delta = match self.last_tick {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now);
        self.record(delta)
    }

    /// Starts a frame exactly `delta` after the previous one
    pub fn advance(&mut self, delta: Duration) -> Duration {
        if let Some(last) = self.last_tick {
            self.last_tick = last.checked_add(delta);
        }
        self.record(delta)
    }

    fn record(&mut self, delta: Duration) -> Duration {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        delta
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine without a display surface
///
/// Time only moves when the caller steps it, which makes every frame
/// reproducible. A freshly created engine reports a zero delta.
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    clock: FrameClock,
    width: u32,
    height: u32,
    fixed_step: Duration,
}

impl HeadlessEngine {
    /// Default simulated frame length (roughly 60 frames per second)
    pub const DEFAULT_STEP: Duration = Duration::from_millis(16);

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            clock: FrameClock::new(),
            width,
            height,
            fixed_step: Self::DEFAULT_STEP,
        }
    }

    /// Builder pattern: Set the frame length used by [`step`](Self::step)
    pub fn with_fixed_step(mut self, step: Duration) -> Self {
        self.fixed_step = step;
        self
    }

    pub fn fixed_step(&self) -> Duration {
        self.fixed_step
    }

    /// Advances one fixed step
    pub fn step(&mut self) -> Duration {
        self.clock.advance(self.fixed_step)
    }

    /// Advances one frame of arbitrary length
    pub fn step_by(&mut self, delta: Duration) -> Duration {
        self.clock.advance(delta)
    }

    /// Changes the simulated render target size; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Total simulated time
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Runs `frames` iterations of the render loop
    ///
    /// Each iteration advances the clock by the fixed step and then invokes
    /// `on_frame` once.
    pub fn run_render_loop<F>(&mut self, frames: u64, mut on_frame: F)
    where
        F: FnMut(&HeadlessEngine),
    {
        for _ in 0..frames {
            self.step();
            on_frame(self);
        }
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl Engine for HeadlessEngine {
    fn delta_time(&self) -> Duration {
        self.clock.delta()
    }

    fn render_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    fn is_headless(&self) -> bool {
        true
    }
}

/// Engine bound to a window, timed by the wall clock
#[derive(Debug, Clone)]
pub struct WindowEngine {
    clock: FrameClock,
    width: u32,
    height: u32,
}

impl WindowEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            clock: FrameClock::new(),
            width,
            height,
        }
    }

    /// Starts a new frame, measuring the delta with the wall clock
    pub fn begin_frame(&mut self) -> Duration {
        self.clock.tick(Instant::now())
    }

    /// Records a new surface size; zero sizes (minimised windows) are ignored
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

impl Engine for WindowEngine {
    fn delta_time(&self) -> Duration {
        self.clock.delta()
    }

    fn render_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    fn is_headless(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Instant::now()), Duration::ZERO);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_tick_never_goes_backwards() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        let later = start + Duration::from_millis(20);

        clock.tick(later);
        assert_eq!(clock.tick(start), Duration::ZERO);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_tick_measures_delta() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);
        let delta = clock.tick(start + Duration::from_millis(33));
        assert_eq!(delta, Duration::from_millis(33));
        assert_eq!(clock.elapsed(), Duration::from_millis(33));
    }

    #[test]
    fn test_new_headless_engine_reports_zero_delta() {
        let engine = HeadlessEngine::new(640, 480);
        assert_eq!(engine.delta_time(), Duration::ZERO);
        assert_eq!(engine.delta_seconds(), 0.0);
        assert_eq!(engine.frame_count(), 0);
        assert!(engine.is_headless());
    }

    #[test]
    fn test_render_loop_advances_fixed_steps() {
        let mut engine = HeadlessEngine::new(640, 480).with_fixed_step(Duration::from_millis(10));
        let mut seen = Vec::new();
        engine.run_render_loop(4, |engine| seen.push(engine.frame_count()));

        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(engine.elapsed(), Duration::from_millis(40));
    }

    #[test]
    fn test_resize_ignores_zero_sizes() {
        let mut engine = HeadlessEngine::new(800, 400);
        assert_eq!(engine.aspect_ratio(), 2.0);

        assert!(!engine.resize(0, 300));
        assert_eq!(engine.render_size(), (800, 400));

        assert!(engine.resize(300, 300));
        assert_eq!(engine.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_window_engine_aspect_ratio() {
        let mut engine = WindowEngine::new(1200, 800);
        assert!((engine.aspect_ratio() - 1.5).abs() < f32::EPSILON);
        engine.begin_frame();
        assert_eq!(engine.delta_time(), Duration::ZERO);
        assert!(!engine.is_headless());
    }
}
