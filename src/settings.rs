//! Game tuning knobs
//!
//! Injected once at startup and immutable for the lifetime of a round.
//! Values come from [`Settings::default`] or a JSON document; either way they
//! must pass [`Settings::validate`] before a game is built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::PlayArea;

/// Tuning knobs for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Pinch ===
    /// Normalized thumb-index distance that counts as "closed"
    pub pinch_threshold: f32,
    /// Consecutive closed frames before the pinch engages
    pub hold_frames: u32,
    /// Consecutive open frames before the pinch releases
    pub release_frames: u32,
    /// Mirror landmarks horizontally (selfie view)
    pub mirror: bool,

    // === Targets ===
    pub target_count: usize,
    /// Target radius (pixels)
    pub target_radius: f32,
    /// (min, max) spawn speed in pixels per second
    pub target_speed_range: (f32, f32),

    // === Slash ===
    /// Slash length (pixels)
    pub slash_length: f32,
    /// Slash arc width (degrees)
    pub slash_sweep_deg: f32,
    /// Hit tolerance around the swept region (pixels)
    pub hit_radius: f32,
    /// Frames a slash stays active
    pub slash_active_frames: u32,

    // === Round ===
    pub score_per_hit: u64,
    /// Round length (seconds)
    pub game_duration: f32,
    /// Frames per second of the capture loop
    pub tick_rate: u32,
    /// Play area width (pixels)
    pub width: f32,
    /// Play area height (pixels)
    pub height: f32,
    /// Seed for target spawning
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pinch_threshold: PINCH_THRESHOLD,
            hold_frames: HOLD_FRAMES,
            release_frames: RELEASE_FRAMES,
            mirror: true,

            target_count: TARGET_COUNT,
            target_radius: TARGET_RADIUS,
            target_speed_range: TARGET_SPEED_RANGE,

            slash_length: SLASH_LENGTH,
            slash_sweep_deg: SLASH_SWEEP_DEG,
            hit_radius: HIT_RADIUS,
            slash_active_frames: SLASH_ACTIVE_FRAMES,

            score_per_hit: SCORE_PER_HIT,
            game_duration: GAME_DURATION,
            tick_rate: TICK_RATE,
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            seed: 0x5EED_0F_B1ADE,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults.
    /// The result is validated.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would corrupt the simulation's invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.pinch_threshold > 0.0 && self.pinch_threshold < 1.0) {
            return Err(SettingsError::OutOfRange {
                name: "pinch_threshold",
                expected: "(0, 1)",
                value: self.pinch_threshold as f64,
            });
        }
        positive("hold_frames", self.hold_frames as f64)?;
        positive("release_frames", self.release_frames as f64)?;
        positive("target_count", self.target_count as f64)?;
        positive("target_radius", self.target_radius as f64)?;

        let (min, max) = self.target_speed_range;
        positive("target_speed_range.min", min as f64)?;
        positive("target_speed_range.max", max as f64)?;
        if min > max {
            return Err(SettingsError::InvertedRange {
                name: "target_speed_range",
                min: min as f64,
                max: max as f64,
            });
        }

        positive("slash_length", self.slash_length as f64)?;
        if !(self.slash_sweep_deg > 0.0 && self.slash_sweep_deg <= 360.0) {
            return Err(SettingsError::OutOfRange {
                name: "slash_sweep_deg",
                expected: "(0, 360]",
                value: self.slash_sweep_deg as f64,
            });
        }
        positive("hit_radius", self.hit_radius as f64)?;
        positive("slash_active_frames", self.slash_active_frames as f64)?;
        positive("score_per_hit", self.score_per_hit as f64)?;
        positive("game_duration", self.game_duration as f64)?;
        positive("tick_rate", self.tick_rate as f64)?;

        positive("width", self.width as f64)?;
        positive("height", self.height as f64)?;
        if self.width <= 2.0 * self.target_radius || self.height <= 2.0 * self.target_radius {
            return Err(SettingsError::PlayAreaTooSmall {
                width: self.width,
                height: self.height,
                radius: self.target_radius,
            });
        }

        Ok(())
    }

    /// Fixed timestep (seconds per frame)
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Slash arc width in radians
    #[inline]
    pub fn sweep_radians(&self) -> f32 {
        self.slash_sweep_deg.to_radians()
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.width, self.height)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError::NonFinite { name, value });
    }
    if value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let settings = Settings {
            target_speed_range: (6.0, 3.0),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvertedRange { name: "target_speed_range", .. })
        ));
    }

    #[test]
    fn test_infinite_speed_rejected() {
        let settings = Settings {
            target_speed_range: (90.0, f32::INFINITY),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonFinite { name: "target_speed_range.max", .. })
        ));
    }

    #[test]
    fn test_overflowing_json_floats_rejected() {
        // 1e39 does not fit in an f32 and parses as infinity
        assert!(matches!(
            Settings::from_json(r#"{ "target_speed_range": [90.0, 1e39] }"#),
            Err(SettingsError::NonFinite { .. })
        ));
        for field in [
            "width",
            "height",
            "target_radius",
            "slash_length",
            "hit_radius",
            "game_duration",
        ] {
            let json = format!(r#"{{ "{}": 1e39 }}"#, field);
            assert!(
                matches!(
                    Settings::from_json(&json),
                    Err(SettingsError::NonFinite { name, .. }) if name == field
                ),
                "{} accepted an infinite value",
                field
            );
        }
    }

    #[test]
    fn test_non_positive_knobs_rejected() {
        let settings = Settings {
            hold_frames: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositive { name: "hold_frames", .. })
        ));

        let settings = Settings {
            game_duration: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            target_radius: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_sweep_out_of_range_rejected() {
        let settings = Settings {
            slash_sweep_deg: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutOfRange { name: "slash_sweep_deg", .. })
        ));
    }

    #[test]
    fn test_tiny_play_area_rejected() {
        let settings = Settings {
            width: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::PlayAreaTooSmall { .. })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "target_count": 2, "score_per_hit": 5 }"#).unwrap();
        assert_eq!(settings.target_count, 2);
        assert_eq!(settings.score_per_hit, 5);
        assert_eq!(settings.hold_frames, HOLD_FRAMES);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            Settings::from_json(r#"{ "target_speed_range": [10.0, 1.0] }"#),
            Err(SettingsError::InvertedRange { .. })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
