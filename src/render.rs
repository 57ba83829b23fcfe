//! Render hand-off
//!
//! The game never draws pixels. Once per frame it builds a [`RenderSnapshot`]
//! and passes it to a [`RenderSink`] owned by whoever draws.

use std::io::{self, Write};

use glam::Vec2;
use serde::Serialize;

use crate::sim::{FrameReport, GameState, HitEvent, PinchState, RoundPhase, Slash};

/// Points sampled along the slash arc for drawing
const SLASH_ARC_POINTS: usize = 9;

/// A live target as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

/// Geometry of the active slash
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlashView {
    pub origin: Vec2,
    pub tip: Vec2,
    /// Radians
    pub direction: f32,
    pub length: f32,
    /// Radians
    pub angular_width: f32,
    pub remaining_frames: u32,
    /// Outer edge of the sweep, start to end
    pub arc: Vec<Vec2>,
}

impl SlashView {
    fn from_slash(slash: &Slash) -> Self {
        Self {
            origin: slash.origin(),
            tip: slash.sector.tip(),
            direction: slash.direction(),
            length: slash.length(),
            angular_width: slash.angular_width(),
            remaining_frames: slash.remaining_frames,
            arc: slash.sector.sample_arc(SLASH_ARC_POINTS),
        }
    }
}

/// Everything needed to draw one frame and its HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub round: u32,
    pub phase: RoundPhase,
    pub score: u64,
    pub time_remaining: f32,
    /// Best finished round of the session so far
    pub best_score: Option<u64>,
    pub pinch: PinchState,
    pub pinch_on: bool,
    pub pinch_distance: Option<f32>,
    pub fingertip: Option<Vec2>,
    pub fps: f32,
    pub targets: Vec<TargetView>,
    pub slash: Option<SlashView>,
    /// Hits landed this frame (for hit effects)
    pub hits: Vec<HitEvent>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, report: &FrameReport, fps: f32, best_score: Option<u64>) -> Self {
        Self {
            frame: state.round.frame,
            round: state.round_index,
            phase: state.round.phase,
            score: state.round.score,
            time_remaining: state.round.time_remaining,
            best_score,
            pinch: state.pinch.state(),
            pinch_on: state.pinch.state().is_on(),
            pinch_distance: state.pinch.last_distance(),
            fingertip: report.fingertip,
            fps,
            targets: state
                .targets
                .iter()
                .filter(|t| t.alive)
                .map(|t| TargetView {
                    id: t.id,
                    pos: t.pos,
                    radius: t.radius,
                })
                .collect(),
            slash: state.slashes.active().map(SlashView::from_slash),
            hits: report.hits.clone(),
        }
    }

    /// One-line HUD text
    pub fn hud_line(&self) -> String {
        let pinch = if self.pinch_on { "ON" } else { "OFF" };
        let dist = self
            .pinch_distance
            .map(|d| format!("{:.4}", d))
            .unwrap_or_else(|| "-".to_string());
        let mut line = format!(
            "Score: {} | Time: {:05.2}s | Pinch: {} | Dist: {} | FPS: {:05.2}",
            self.score, self.time_remaining, pinch, dist, self.fps
        );
        if self.phase == RoundPhase::Ended {
            line.push_str(&format!(" | TIME UP! Final Score: {}", self.score));
        }
        line
    }

    /// Round and gesture state in words, for logs
    pub fn status(&self) -> String {
        format!(
            "round {} {} | pinch {} | {} targets",
            self.round,
            self.phase.as_str(),
            self.pinch.as_str(),
            self.targets.len()
        )
    }
}

/// External drawing collaborator
pub trait RenderSink {
    fn present(&mut self, snapshot: &RenderSnapshot) -> io::Result<()>;
}

/// Streams each snapshot as one JSON line
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn present(&mut self, snapshot: &RenderSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")
    }
}

/// Logs the HUD line at debug level
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn present(&mut self, snapshot: &RenderSnapshot) -> io::Result<()> {
        log::debug!("[frame {}] {} | {}", snapshot.frame, snapshot.status(), snapshot.hud_line());
        Ok(())
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<RenderSnapshot>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, snapshot: &RenderSnapshot) -> io::Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }
}
