//! Frame loop
//!
//! Polls a frame source, ticks the simulation, and hands a snapshot to the
//! renderer, strictly one frame at a time. Quit and restart only take effect
//! at frame boundaries.

use crate::error::SettingsError;
use crate::history::{RoundResult, SessionHistory};
use crate::platform::{CapturedFrame, FpsCounter, FrameSource};
use crate::render::{RenderSink, RenderSnapshot};
use crate::settings::Settings;
use crate::sim::{Command, FrameReport, GameState, tick};

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Frames processed
    pub frames: u64,
    /// Rounds started (including the one in progress)
    pub rounds: u32,
    /// Score of the last round when the session stopped
    pub last_score: u64,
    /// The loop stopped on a quit command (rather than source exhaustion)
    pub quit: bool,
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    fps: FpsCounter,
    history: SessionHistory,
    frames: u64,
}

impl Game {
    /// Build a game, rejecting invalid tuning values up front
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!(
            "Game initialized with seed {:#x}: {} targets, {:.0}s rounds at {} Hz",
            settings.seed,
            settings.target_count,
            settings.game_duration,
            settings.tick_rate
        );
        Ok(Self {
            state: GameState::new(settings),
            fps: FpsCounter::new(),
            history: SessionHistory::new(),
            frames: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get mutable game state (for testing)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[inline]
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Process one captured frame and present the result
    pub fn run_frame(&mut self, frame: &CapturedFrame, sink: &mut dyn RenderSink) -> FrameReport {
        let dt = self.state.settings.dt();
        let report = tick(&mut self.state, &frame.input, dt);
        self.frames += 1;

        if report.round_ended {
            let round = &self.state.round;
            let result = RoundResult {
                round: self.state.round_index,
                score: round.score,
                hits: round.hits,
                frames: round.frame,
            };
            if self.history.record(result) {
                log::info!("New session best: {} points in round {}", result.score, result.round);
            }
        }

        let fps = self.fps.record(frame.timestamp);
        let snapshot = RenderSnapshot::capture(&self.state, &report, fps, self.history.best_score());
        if let Err(e) = sink.present(&snapshot) {
            log::warn!("Render error: {}", e);
        }

        report
    }

    /// Run until the source is exhausted or a quit command arrives
    pub fn run(&mut self, source: &mut dyn FrameSource, sink: &mut dyn RenderSink) -> SessionSummary {
        let mut quit = false;
        while let Some(frame) = source.next_frame() {
            self.run_frame(&frame, sink);
            if frame.input.has(Command::Quit) {
                log::info!("Quit requested");
                quit = true;
                break;
            }
        }

        if !quit {
            log::info!("Frame source closed");
        }

        SessionSummary {
            frames: self.frames,
            rounds: self.state.round_index,
            last_score: self.state.round.score,
            quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ScriptedSource;
    use crate::render::RecordingSink;
    use crate::sim::{FrameInput, RoundPhase};

    fn short_round() -> Settings {
        Settings {
            game_duration: 0.5,
            tick_rate: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            target_speed_range: (5.0, 1.0),
            ..Default::default()
        };
        assert!(Game::new(settings).is_err());
    }

    #[test]
    fn test_quit_stops_between_frames() {
        let mut game = Game::new(short_round()).unwrap();
        let frames = vec![
            FrameInput::default(),
            FrameInput::default().with_command(Command::Quit),
            FrameInput::default(),
        ];
        let mut source = ScriptedSource::new(frames, 10);
        let mut sink = RecordingSink::default();
        let summary = game.run(&mut source, &mut sink);

        assert!(summary.quit);
        assert_eq!(summary.frames, 2);
        // The quitting frame is still rendered
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_round_ends_and_restarts() {
        let mut game = Game::new(short_round()).unwrap();
        let mut frames = vec![FrameInput::default(); 7];
        frames.push(FrameInput::default().with_command(Command::Restart));
        let mut source = ScriptedSource::new(frames, 10);
        let mut sink = RecordingSink::default();
        let summary = game.run(&mut source, &mut sink);

        assert!(!summary.quit);
        assert_eq!(summary.rounds, 2);
        // 0.5s at 10 Hz: the fifth frame ends the round
        assert_eq!(sink.frames[3].phase, RoundPhase::Running);
        assert_eq!(sink.frames[4].phase, RoundPhase::Ended);
        assert_eq!(sink.frames[4].time_remaining, 0.0);
        assert_eq!(sink.frames[6].phase, RoundPhase::Ended);
        assert_eq!(sink.frames[7].phase, RoundPhase::Running);
        assert_eq!(sink.frames[7].round, 2);
    }

    #[test]
    fn test_finished_rounds_are_recorded() {
        let mut game = Game::new(short_round()).unwrap();
        let mut frames = vec![FrameInput::default(); 6];
        // Abandoned after two frames: no result
        frames.push(FrameInput::default().with_command(Command::Restart));
        frames.push(FrameInput::default());
        frames.push(FrameInput::default().with_command(Command::Restart));
        frames.extend(vec![FrameInput::default(); 5]);
        let mut source = ScriptedSource::new(frames, 10);
        let mut sink = RecordingSink::default();
        let summary = game.run(&mut source, &mut sink);

        assert_eq!(summary.rounds, 3);
        let rounds: Vec<u32> = game.history().results().iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 3]);
        assert_eq!(game.history().results()[0].frames, 5);
        assert_eq!(game.history().best().map(|r| r.round), Some(1));
        // Best is visible from the frame the first round ends
        assert_eq!(sink.frames[3].best_score, None);
        assert_eq!(sink.frames[4].best_score, Some(0));
    }
}
