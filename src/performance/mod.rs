//! # Performance Metrics
//!
//! Rolling frame-time statistics for the runner. Windowed runs log a summary
//! every few seconds and show a small FPS overlay; headless runs log one
//! summary when they finish.
//!
//! ```rust
//! use std::time::Duration;
//! use xr_scenes::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//! monitor.record_frame(Duration::from_millis(16));
//! assert_eq!(monitor.metrics().frame_count, 1);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame statistics over the sample window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    /// Frames recorded since creation or the last reset
    pub frame_count: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            frame_count: 0,
        }
    }
}

pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    frame_start: Option<Instant>,
    current_metrics: PerformanceMetrics,
    last_report: Instant,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_capacity(120) // ~2 seconds at 60fps
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            current_metrics: PerformanceMetrics::default(),
            last_report: Instant::now(),
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame; ignored without a matching `begin_frame`
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record_frame(start.elapsed());
        }
    }

    /// Adds a frame time sample measured elsewhere
    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.current_metrics.frame_count += 1;
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms = total_time.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) = (self.frame_times.iter().min(), self.frame_times.iter().max()) {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.frame_start = None;
        self.last_report = Instant::now();
    }

    pub fn log_summary(&self, label: &str) {
        let m = &self.current_metrics;
        log::info!(
            "{}: {} frames, {:.1} fps (avg {:.2}ms, min {:.2}ms, max {:.2}ms)",
            label,
            m.frame_count,
            m.fps,
            m.frame_time_ms,
            m.min_frame_time_ms,
            m.max_frame_time_ms
        );
    }

    /// Logs a summary if at least `interval` passed since the last one
    pub fn report_every(&mut self, interval: Duration, label: &str) -> bool {
        if self.last_report.elapsed() < interval || self.current_metrics.frame_count == 0 {
            return false;
        }
        self.log_summary(label);
        self.last_report = Instant::now();
        true
    }

    /// Render a compact FPS overlay in the top-right corner
    pub fn render_overlay(&self, ui: &imgui::Ui) {
        let display_size = ui.io().display_size;
        let metrics = &self.current_metrics;

        ui.window("FPS")
            .size([120.0, 60.0], imgui::Condition::Always)
            .position([display_size[0] - 130.0, 10.0], imgui::Condition::Always)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.3)
            .build(|| {
                ui.text(format!("FPS: {:.0}", metrics.fps));
                ui.text(format!("{:.1}ms", metrics.frame_time_ms));
            });
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_extremes() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(10));
        monitor.record_frame(Duration::from_millis(20));
        monitor.record_frame(Duration::from_millis(30));

        let m = monitor.metrics();
        assert_eq!(m.frame_count, 3);
        assert!((m.frame_time_ms - 20.0).abs() < 1e-3);
        assert!((m.fps - 50.0).abs() < 1e-2);
        assert!((m.min_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((m.max_frame_time_ms - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_window_drops_oldest_samples() {
        let mut monitor = PerformanceMonitor::with_capacity(2);
        monitor.record_frame(Duration::from_millis(100));
        monitor.record_frame(Duration::from_millis(10));
        monitor.record_frame(Duration::from_millis(10));

        let m = monitor.metrics();
        assert_eq!(m.frame_count, 3);
        assert!((m.max_frame_time_ms - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_end_frame_without_begin_is_ignored() {
        let mut monitor = PerformanceMonitor::new();
        monitor.end_frame();
        assert_eq!(monitor.metrics().frame_count, 0);

        monitor.begin_frame();
        monitor.end_frame();
        assert_eq!(monitor.metrics().frame_count, 1);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(16));
        monitor.reset();
        assert_eq!(*monitor.metrics(), PerformanceMetrics::default());
        assert!(!monitor.report_every(Duration::ZERO, "test"));
    }
}
