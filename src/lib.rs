//! Pinch Ninja - a pinch-gesture slashing mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pinch debounce, slashes, targets, collisions)
//! - `platform`: Frame sources (scripted, synthetic hand) and frame timing
//! - `render`: Render snapshots handed to an external drawing collaborator
//! - `game`: The per-frame loop tying input, simulation and rendering together
//! - `settings`: Tuning knobs, loaded from JSON and validated at startup

pub mod error;
pub mod game;
pub mod history;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use game::Game;
pub use history::{RoundResult, SessionHistory};
pub use settings::Settings;

use glam::Vec2;

/// Default tuning values (the "edit here" zone)
pub mod consts {
    /// Normalized thumb-index distance below which a frame counts as pinched
    pub const PINCH_THRESHOLD: f32 = 0.07;
    /// Frames required to turn pinch ON
    pub const HOLD_FRAMES: u32 = 3;
    /// Frames required to turn pinch OFF
    pub const RELEASE_FRAMES: u32 = 3;

    /// Number of bouncing targets kept alive for the round
    pub const TARGET_COUNT: usize = 8;
    /// Target circle radius (pixels)
    pub const TARGET_RADIUS: f32 = 18.0;
    /// Min/max spawn speed (pixels per second; 3-6 px/frame at 30 Hz)
    pub const TARGET_SPEED_RANGE: (f32, f32) = (90.0, 180.0);

    /// Slash length from the fingertip (pixels)
    pub const SLASH_LENGTH: f32 = 140.0;
    /// Angular width of the slash arc (degrees)
    pub const SLASH_SWEEP_DEG: f32 = 80.0;
    /// Distance from the swept region that still counts as a hit (pixels)
    pub const HIT_RADIUS: f32 = 28.0;
    /// Frames a slash stays hit-testable, creation frame included
    pub const SLASH_ACTIVE_FRAMES: u32 = 6;

    /// Points per target hit
    pub const SCORE_PER_HIT: u64 = 10;
    /// Seconds per round
    pub const GAME_DURATION: f32 = 30.0;

    /// Fixed frame rate of the capture loop (Hz)
    pub const TICK_RATE: u32 = 30;
    /// Play area (camera frame) size in pixels
    pub const PLAY_WIDTH: f32 = 640.0;
    pub const PLAY_HEIGHT: f32 = 480.0;

    /// Fingertip positions remembered for slash direction
    pub const SLASH_HISTORY_FRAMES: usize = 5;
    /// Movement (pixels) over the history below which the default direction is used
    pub const MIN_SWIPE_DISTANCE: f32 = 12.0;
    /// Default slash direction: 20 degrees above the +x axis (screen y grows down)
    pub const DEFAULT_SLASH_ANGLE: f32 = -20.0 * std::f32::consts::PI / 180.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `theta`
#[inline]
pub fn direction_vector(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Convert polar (r, theta) about `origin` to cartesian
#[inline]
pub fn polar_to_cartesian(origin: Vec2, r: f32, theta: f32) -> Vec2 {
    origin + direction_vector(theta) * r
}

/// Absolute angular difference between two angles, in [0, π]
#[inline]
pub fn angle_difference(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(-PI - 0.1) - (PI - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_angle_difference_wraps() {
        let d = angle_difference(170.0_f32.to_radians(), -170.0_f32.to_radians());
        assert!((d - 20.0_f32.to_radians()).abs() < 1e-4);
    }
}
