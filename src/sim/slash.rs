//! Slash (weapon sweep) lifecycle
//!
//! A pinch engage edge spawns a time-bounded sweep anchored at the fingertip.
//! At most one slash exists at a time; engage edges arriving while one is
//! active are dropped, not queued.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::Sector;
use super::pinch::PinchEdge;
use crate::consts::{DEFAULT_SLASH_ANGLE, MIN_SWIPE_DISTANCE, SLASH_HISTORY_FRAMES};
use crate::settings::Settings;

/// An active weapon sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slash {
    /// Swept region (origin, length, direction, width)
    pub sector: Sector,
    /// Frames left before the slash disappears
    pub remaining_frames: u32,
    /// Targets already hit by this activation
    #[serde(skip)]
    struck: Vec<u32>,
}

impl Slash {
    pub fn new(origin: Vec2, direction: f32, length: f32, angular_width: f32, frames: u32) -> Self {
        Self {
            sector: Sector::new(origin, length, direction, angular_width),
            remaining_frames: frames,
            struck: Vec::new(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.sector.origin
    }

    /// Direction of the sweep (radians)
    #[inline]
    pub fn direction(&self) -> f32 {
        self.sector.direction
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.sector.radius
    }

    #[inline]
    pub fn angular_width(&self) -> f32 {
        self.sector.half_width * 2.0
    }

    /// Whether this activation already scored on the target
    pub fn has_struck(&self, target_id: u32) -> bool {
        self.struck.contains(&target_id)
    }

    /// Remember a hit; returns false if the target was already struck
    pub fn record_strike(&mut self, target_id: u32) -> bool {
        if self.has_struck(target_id) {
            return false;
        }
        self.struck.push(target_id);
        true
    }
}

/// Owns the (at most one) active slash and the fingertip motion history
#[derive(Debug, Clone)]
pub struct SlashController {
    length: f32,
    angular_width: f32,
    active_frames: u32,
    active: Option<Slash>,
    /// Recent fingertip positions (newest last)
    history: VecDeque<Vec2>,
}

impl SlashController {
    pub fn new(length: f32, angular_width: f32, active_frames: u32) -> Self {
        Self {
            length,
            angular_width,
            active_frames: active_frames.max(1),
            active: None,
            history: VecDeque::with_capacity(SLASH_HISTORY_FRAMES),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.slash_length,
            settings.sweep_radians(),
            settings.slash_active_frames,
        )
    }

    #[inline]
    pub fn active(&self) -> Option<&Slash> {
        self.active.as_ref()
    }

    #[inline]
    pub fn active_mut(&mut self) -> Option<&mut Slash> {
        self.active.as_mut()
    }

    /// Last known fingertip position
    pub fn last_fingertip(&self) -> Option<Vec2> {
        self.history.back().copied()
    }

    /// Advance one frame: age the active slash, then react to the edge
    pub fn on_frame(&mut self, edge: Option<PinchEdge>, fingertip: Option<Vec2>) -> Option<&Slash> {
        if let Some(pos) = fingertip {
            self.record_fingertip(pos);
        }

        if let Some(slash) = self.active.as_mut() {
            slash.remaining_frames = slash.remaining_frames.saturating_sub(1);
            if slash.remaining_frames == 0 {
                log::debug!("Slash expired after striking {} targets", slash.struck.len());
                self.active = None;
            }
        }

        if edge == Some(PinchEdge::Engage) {
            if self.active.is_some() {
                log::debug!("Engage dropped: slash already active");
            } else if let Some(origin) = fingertip.or_else(|| self.last_fingertip()) {
                let direction = self.swipe_direction();
                log::debug!(
                    "Slash at ({:.1}, {:.1}) heading {:.1}°",
                    origin.x,
                    origin.y,
                    direction.to_degrees()
                );
                self.active = Some(Slash::new(
                    origin,
                    direction,
                    self.length,
                    self.angular_width,
                    self.active_frames,
                ));
            } else {
                log::warn!("Engage dropped: no fingertip position known");
            }
        }

        self.active.as_ref()
    }

    /// Direction of recent fingertip motion, or the default heading
    fn swipe_direction(&self) -> f32 {
        match (self.history.front(), self.history.back()) {
            (Some(oldest), Some(newest)) => {
                let motion = *newest - *oldest;
                if motion.length() >= MIN_SWIPE_DISTANCE {
                    motion.y.atan2(motion.x)
                } else {
                    DEFAULT_SLASH_ANGLE
                }
            }
            _ => DEFAULT_SLASH_ANGLE,
        }
    }

    fn record_fingertip(&mut self, pos: Vec2) {
        if self.history.len() == SLASH_HISTORY_FRAMES {
            self.history.pop_front();
        }
        self.history.push_back(pos);
    }

    /// Drop the active slash and forget the motion history
    pub fn reset(&mut self) {
        self.active = None;
        self.history.clear();
    }
}
