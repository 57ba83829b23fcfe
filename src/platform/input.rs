//! Frame sources
//!
//! The hand-landmark estimator is modelled purely as something that yields
//! one [`FrameInput`] per captured frame. The loop polls it; nothing here
//! calls back into the game.

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::{Command, FrameInput, HandSample};

/// One frame from the capture side
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub input: FrameInput,
    /// Capture time (seconds since the source started)
    pub timestamp: f64,
}

/// Anything that can deliver frames to the game loop.
///
/// `next_frame` is the loop's only blocking point. Returning `None` means the
/// source is exhausted (camera closed) and ends the session.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<CapturedFrame>;
}

/// Replays a fixed list of frames at a nominal tick rate
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    frames: VecDeque<FrameInput>,
    tick_rate: u32,
    emitted: u64,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>, tick_rate: u32) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            tick_rate: tick_rate.max(1),
            emitted: 0,
        }
    }

    /// Frames not yet delivered
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<CapturedFrame> {
        let input = self.frames.pop_front()?;
        let timestamp = self.emitted as f64 / self.tick_rate as f64;
        self.emitted += 1;
        Some(CapturedFrame { input, timestamp })
    }
}

/// Deterministic stand-in for a camera plus landmark estimator.
///
/// The index fingertip traces a Lissajous curve over the frame; the thumb
/// closes onto it for `pinch_frames` out of every `period_frames`. The hand
/// drops out for a few frames at the end of each period, and a restart is
/// requested every `restart_every` frames when set.
#[derive(Debug, Clone)]
pub struct SyntheticHand {
    frame: u64,
    max_frames: u64,
    tick_rate: u32,
    period_frames: u64,
    pinch_frames: u64,
    dropout_frames: u64,
    restart_every: Option<u64>,
}

impl SyntheticHand {
    pub fn new(max_frames: u64, tick_rate: u32) -> Self {
        Self {
            frame: 0,
            max_frames,
            tick_rate: tick_rate.max(1),
            period_frames: 24,
            pinch_frames: 8,
            dropout_frames: 2,
            restart_every: None,
        }
    }

    /// Request a restart every `frames` frames
    pub fn with_restart_every(mut self, frames: u64) -> Self {
        self.restart_every = (frames > 0).then_some(frames);
        self
    }

    fn sample(&self) -> Option<HandSample> {
        let phase = self.frame % self.period_frames;
        if phase >= self.period_frames - self.dropout_frames {
            return None;
        }

        let t = self.frame as f32 / self.tick_rate as f32;
        let index_tip = Vec2::new(0.5 + 0.35 * (t * 0.9).sin(), 0.5 + 0.3 * (t * 1.3).cos());
        let gap = if phase < self.pinch_frames { 0.02 } else { 0.15 };
        Some(HandSample::new(index_tip + Vec2::new(gap, 0.0), index_tip))
    }
}

impl FrameSource for SyntheticHand {
    fn next_frame(&mut self) -> Option<CapturedFrame> {
        if self.frame >= self.max_frames {
            return None;
        }

        let mut input = FrameInput::new(self.sample());
        let restart_due = self
            .restart_every
            .is_some_and(|every| self.frame > 0 && self.frame % every == 0);
        if restart_due {
            input = input.with_command(Command::Restart);
        }
        if self.frame + 1 == self.max_frames {
            input = input.with_command(Command::Quit);
        }

        let timestamp = self.frame as f64 / self.tick_rate as f64;
        self.frame += 1;
        Some(CapturedFrame { input, timestamp })
    }
}
