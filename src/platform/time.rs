//! Frame timing
//!
//! FPS is derived from capture timestamps rather than the wall clock, so a
//! replayed session reports the same numbers it did live.

use std::time::{Duration, Instant};

use super::input::{CapturedFrame, FrameSource};

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    recorded: usize,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            recorded: 0,
            fps: 0.0,
        }
    }

    /// Record a frame captured at `time` seconds; returns the updated FPS
    pub fn record(&mut self, time: f64) -> f32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.recorded = (self.recorded + 1).min(FPS_WINDOW);

        // Oldest sample in the window (the slot about to be overwritten when full)
        let oldest_idx = if self.recorded == FPS_WINDOW {
            self.frame_index
        } else {
            0
        };
        let elapsed = time - self.frame_times[oldest_idx];
        if self.recorded > 1 && elapsed > 0.0 {
            self.fps = ((self.recorded - 1) as f64 / elapsed) as f32;
        }
        self.fps
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Sleeps so frames are released at a fixed real-time cadence
#[derive(Debug)]
pub struct FramePacer {
    frame_duration: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64),
            next_deadline: Instant::now(),
        }
    }

    /// Block until the next frame slot. Late frames do not accumulate debt.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame_duration;
        } else {
            self.next_deadline = now + self.frame_duration;
        }
    }
}

/// Releases frames from an inner source no faster than the tick rate
#[derive(Debug)]
pub struct PacedSource<S> {
    inner: S,
    pacer: FramePacer,
}

impl<S: FrameSource> PacedSource<S> {
    pub fn new(inner: S, tick_rate: u32) -> Self {
        Self {
            inner,
            pacer: FramePacer::new(tick_rate),
        }
    }
}

impl<S: FrameSource> FrameSource for PacedSource<S> {
    fn next_frame(&mut self) -> Option<CapturedFrame> {
        self.pacer.wait();
        self.inner.next_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_timestamps() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.record(0.0), 0.0);
        for i in 1..200 {
            fps.record(i as f64 / 30.0);
        }
        assert!((fps.fps() - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_fps_partial_window() {
        let mut fps = FpsCounter::new();
        for i in 0..5 {
            fps.record(i as f64 * 0.05);
        }
        assert!((fps.fps() - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_pacer_waits_roughly_one_frame() {
        let mut pacer = FramePacer::new(100);
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
