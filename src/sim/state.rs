//! Round and game state
//!
//! Everything the frame loop mutates lives in explicitly owned objects here;
//! nothing is carried across frames in globals.

use serde::{Deserialize, Serialize};

use super::pinch::PinchDetector;
use super::slash::SlashController;
use super::target::{PlayArea, Target, TargetSpawner};
use crate::settings::Settings;

/// Remaining time at or below this counts as expired (seconds)
const TIMER_EPSILON: f32 = 1e-4;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Timer running, targets moving, slashes scoring
    #[default]
    Running,
    /// Time is up; simulation frozen until restart
    Ended,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Running => "running",
            RoundPhase::Ended => "ended",
        }
    }
}

/// Score and timer for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u64,
    /// Targets struck this round
    pub hits: u32,
    /// Seconds left on the clock
    pub time_remaining: f32,
    pub phase: RoundPhase,
    /// Frames processed this round, frozen frames after time up included
    pub frame: u64,
}

impl RoundState {
    pub fn new(duration: f32) -> Self {
        Self {
            score: 0,
            hits: 0,
            time_remaining: duration,
            phase: RoundPhase::Running,
            frame: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Add points for one hit
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
        self.hits += 1;
    }

    /// Run the clock down by `dt`. Returns true on the frame the round ends.
    pub fn advance_timer(&mut self, dt: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.time_remaining -= dt;
        // Absorb float drift from summing 1/tick_rate
        if self.time_remaining <= TIMER_EPSILON {
            self.time_remaining = 0.0;
            self.phase = RoundPhase::Ended;
            return true;
        }
        false
    }
}

/// Complete simulation state for a session
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub area: PlayArea,
    pub pinch: PinchDetector,
    pub slashes: SlashController,
    pub targets: Vec<Target>,
    pub spawner: TargetSpawner,
    pub round: RoundState,
    /// Rounds started this session (1-based)
    pub round_index: u32,
}

impl GameState {
    /// Build a fresh session. Settings are assumed validated.
    pub fn new(settings: Settings) -> Self {
        let mut spawner = TargetSpawner::from_settings(&settings);
        let targets = spawner.spawn_all(settings.target_count);
        Self {
            area: settings.play_area(),
            pinch: PinchDetector::from_settings(&settings),
            slashes: SlashController::from_settings(&settings),
            round: RoundState::new(settings.game_duration),
            targets,
            spawner,
            settings,
            round_index: 1,
        }
    }

    /// Start a new round: fresh score, timer, gesture state and targets.
    ///
    /// The spawner keeps its RNG stream, so successive rounds differ while
    /// the whole session stays reproducible from the seed.
    pub fn restart(&mut self) {
        self.round = RoundState::new(self.settings.game_duration);
        self.pinch.reset();
        self.slashes.reset();
        self.targets = self.spawner.spawn_all(self.settings.target_count);
        self.round_index += 1;
    }

    /// Number of live targets
    pub fn live_targets(&self) -> usize {
        self.targets.iter().filter(|t| t.alive).count()
    }
}
