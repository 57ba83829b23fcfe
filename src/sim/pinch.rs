//! Debounced pinch detection
//!
//! Turns a noisy per-frame thumb/index distance into a stable engaged/released
//! state. A change is only accepted after a run of consecutive frames agreeing
//! on it, so a single bad landmark frame never produces an edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::PlayArea;

/// Landmarks for one detected hand, in normalized image coordinates [0, 1]²
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    pub thumb_tip: Vec2,
    pub index_tip: Vec2,
}

/// One frame of hand input: `None` when no hand was detected
pub type FingertipSample = Option<HandSample>;

impl HandSample {
    pub fn new(thumb_tip: Vec2, index_tip: Vec2) -> Self {
        Self { thumb_tip, index_tip }
    }

    /// Normalized thumb-index distance (the pinch signal)
    #[inline]
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip.distance(self.index_tip)
    }

    /// Flip horizontally, as if the camera image were mirrored
    pub fn mirrored(&self) -> Self {
        Self {
            thumb_tip: Vec2::new(1.0 - self.thumb_tip.x, self.thumb_tip.y),
            index_tip: Vec2::new(1.0 - self.index_tip.x, self.index_tip.y),
        }
    }

    /// Index fingertip in play-area pixels
    pub fn fingertip(&self, area: &PlayArea) -> Vec2 {
        self.index_tip * area.size()
    }
}

/// Debounced pinch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinchState {
    /// Hand open (or absent)
    #[default]
    Released,
    /// Closed frames accumulating, not yet confirmed
    Engaging,
    /// Pinch confirmed
    Engaged,
    /// Open frames accumulating, not yet confirmed
    Releasing,
}

impl PinchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinchState::Released => "released",
            PinchState::Engaging => "engaging",
            PinchState::Engaged => "engaged",
            PinchState::Releasing => "releasing",
        }
    }

    /// Whether the pinch counts as "on" (the HUD's ON/OFF)
    pub fn is_on(&self) -> bool {
        matches!(self, PinchState::Engaged | PinchState::Releasing)
    }
}

/// Edge events emitted when the debounced state flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinchEdge {
    Engage,
    Release,
}

/// Hysteresis filter over the per-frame pinch signal
#[derive(Debug, Clone)]
pub struct PinchDetector {
    threshold: f32,
    hold_frames: u32,
    release_frames: u32,
    state: PinchState,
    close_evidence: u32,
    open_evidence: u32,
    last_distance: Option<f32>,
}

impl PinchDetector {
    pub fn new(threshold: f32, hold_frames: u32, release_frames: u32) -> Self {
        Self {
            threshold,
            hold_frames: hold_frames.max(1),
            release_frames: release_frames.max(1),
            state: PinchState::Released,
            close_evidence: 0,
            open_evidence: 0,
            last_distance: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.pinch_threshold,
            settings.hold_frames,
            settings.release_frames,
        )
    }

    #[inline]
    pub fn state(&self) -> PinchState {
        self.state
    }

    /// Pinch distance measured on the latest frame (None if no hand)
    #[inline]
    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    /// Feed one frame of hand input. A missing hand counts as open.
    pub fn update(&mut self, sample: Option<&HandSample>) -> Option<PinchEdge> {
        self.last_distance = sample.map(HandSample::pinch_distance);
        let closed = self.last_distance.is_some_and(|d| d < self.threshold);
        self.update_closed(closed)
    }

    /// Feed one frame of an already-thresholded closeness flag.
    ///
    /// With a threshold of 1 the intermediate state is entered and left
    /// within the same call, so the visible state goes straight from
    /// Released to Engaged (or Engaged to Released) and the edge is
    /// emitted on that frame.
    pub fn update_closed(&mut self, closed: bool) -> Option<PinchEdge> {
        if closed {
            self.close_evidence = self.close_evidence.saturating_add(1);
            self.open_evidence = 0;
        } else {
            self.open_evidence = self.open_evidence.saturating_add(1);
            self.close_evidence = 0;
        }

        match (self.state, closed) {
            (PinchState::Released, true) => self.state = PinchState::Engaging,
            (PinchState::Engaging, false) => self.state = PinchState::Released,
            (PinchState::Engaged, false) => self.state = PinchState::Releasing,
            (PinchState::Releasing, true) => self.state = PinchState::Engaged,
            _ => {}
        }

        match self.state {
            PinchState::Engaging if self.close_evidence >= self.hold_frames => {
                self.state = PinchState::Engaged;
                log::debug!("Pinch engaged after {} frames", self.close_evidence);
                Some(PinchEdge::Engage)
            }
            PinchState::Releasing if self.open_evidence >= self.release_frames => {
                self.state = PinchState::Released;
                log::debug!("Pinch released after {} frames", self.open_evidence);
                Some(PinchEdge::Release)
            }
            _ => None,
        }
    }

    /// Back to Released with no accumulated evidence
    pub fn reset(&mut self) {
        self.state = PinchState::Released;
        self.close_evidence = 0;
        self.open_evidence = 0;
        self.last_distance = None;
    }
}
