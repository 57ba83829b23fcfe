//! Fixed timestep frame tick
//!
//! Advances the simulation by exactly one captured frame, in a fixed order:
//! pinch update, slash update, target physics, hit resolution, timer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{HitEvent, resolve};
use super::pinch::{FingertipSample, PinchEdge};
use super::state::GameState;

/// Discrete commands delivered alongside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Stop the loop after this frame
    Quit,
    /// Reset the round at the start of this frame
    Restart,
}

/// Input for a single frame (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Hand landmarks, or None when no hand was detected
    pub sample: FingertipSample,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl FrameInput {
    pub fn new(sample: FingertipSample) -> Self {
        Self {
            sample,
            commands: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    #[inline]
    pub fn has(&self, command: Command) -> bool {
        self.commands.contains(&command)
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub edge: Option<PinchEdge>,
    /// Fingertip in play-area pixels, if a hand was seen
    pub fingertip: Option<Vec2>,
    pub hits: Vec<HitEvent>,
    /// The round was reset at the start of this frame
    pub restarted: bool,
    /// The timer ran out on this frame
    pub round_ended: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> FrameReport {
    let restarted = input.has(Command::Restart);
    if restarted {
        state.restart();
        log::info!("Round {} started", state.round_index);
    }

    let sample = input.sample.map(|s| {
        if state.settings.mirror {
            s.mirrored()
        } else {
            s
        }
    });

    // Gesture pipeline runs every frame, even after time is up
    let edge = state.pinch.update(sample.as_ref());
    let fingertip = sample.map(|s| s.fingertip(&state.area));
    state.slashes.on_frame(edge, fingertip);

    let mut hits = Vec::new();
    let mut round_ended = false;
    if state.round.is_running() {
        for target in &mut state.targets {
            target.step(dt, &state.area);
        }

        hits = resolve(
            state.slashes.active_mut(),
            &mut state.targets,
            &mut state.spawner,
            &mut state.round,
            state.settings.hit_radius,
            state.settings.score_per_hit,
        );

        round_ended = state.round.advance_timer(dt);
        if round_ended {
            log::info!(
                "Time up! Round {} final score: {} ({} hits)",
                state.round_index,
                state.round.score,
                state.round.hits
            );
        }
    }

    state.round.frame += 1;

    FrameReport {
        edge,
        fingertip,
        hits,
        restarted,
        round_ended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{HandSample, RoundPhase};

    fn settings() -> Settings {
        Settings {
            mirror: false,
            hold_frames: 2,
            release_frames: 2,
            ..Default::default()
        }
    }

    fn pinch_at(tip: Vec2) -> FrameInput {
        FrameInput::new(Some(HandSample::new(tip + Vec2::new(0.01, 0.0), tip)))
    }

    #[test]
    fn test_pinch_frames_produce_slash() {
        let settings = settings();
        let dt = settings.dt();
        let mut state = GameState::new(settings);
        let input = pinch_at(Vec2::new(0.5, 0.5));

        assert_eq!(tick(&mut state, &input, dt).edge, None);
        assert!(state.slashes.active().is_none());
        assert_eq!(tick(&mut state, &input, dt).edge, Some(PinchEdge::Engage));
        let slash = state.slashes.active().unwrap();
        assert_eq!(slash.origin(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_mirror_flips_fingertip() {
        let settings = Settings {
            mirror: true,
            hold_frames: 1,
            ..Default::default()
        };
        let dt = settings.dt();
        let mut state = GameState::new(settings);
        tick(&mut state, &pinch_at(Vec2::new(0.25, 0.5)), dt);
        let slash = state.slashes.active().unwrap();
        assert_eq!(slash.origin(), Vec2::new(480.0, 240.0));
    }

    #[test]
    fn test_targets_move_while_running() {
        let settings = settings();
        let dt = settings.dt();
        let mut state = GameState::new(settings);
        let before: Vec<Vec2> = state.targets.iter().map(|t| t.pos).collect();
        tick(&mut state, &FrameInput::default(), dt);
        let after: Vec<Vec2> = state.targets.iter().map(|t| t.pos).collect();
        assert_ne!(before, after);
        assert_eq!(state.round.frame, 1);
        assert!(state.round.time_remaining < state.settings.game_duration);
    }

    #[test]
    fn test_restart_command() {
        let settings = settings();
        let dt = settings.dt();
        let mut state = GameState::new(settings);
        state.round.award(30);
        state.round.phase = RoundPhase::Ended;

        let report = tick(
            &mut state,
            &FrameInput::default().with_command(Command::Restart),
            dt,
        );
        assert!(report.restarted);
        assert_eq!(state.round.score, 0);
        assert!(state.round.is_running());
        assert_eq!(state.round.frame, 1);
    }

    #[test]
    fn test_frame_counter_keeps_counting_after_time_up() {
        let settings = Settings {
            game_duration: 0.2,
            tick_rate: 10,
            ..settings()
        };
        let dt = settings.dt();
        let mut state = GameState::new(settings);
        let idle = FrameInput::default();

        tick(&mut state, &idle, dt);
        assert!(tick(&mut state, &idle, dt).round_ended);
        assert_eq!(state.round.frame, 2);

        tick(&mut state, &idle, dt);
        tick(&mut state, &idle, dt);
        assert_eq!(state.round.phase, RoundPhase::Ended);
        assert_eq!(state.round.frame, 4);

        let restart = FrameInput::default().with_command(Command::Restart);
        tick(&mut state, &restart, dt);
        assert_eq!(state.round.frame, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same settings should produce identical results
        let mut state1 = GameState::new(settings());
        let mut state2 = GameState::new(settings());
        let dt = state1.settings.dt();

        let inputs = [
            pinch_at(Vec2::new(0.3, 0.3)),
            pinch_at(Vec2::new(0.35, 0.32)),
            pinch_at(Vec2::new(0.4, 0.34)),
            FrameInput::default(),
            FrameInput::default(),
        ];

        for _ in 0..20 {
            for input in &inputs {
                tick(&mut state1, input, dt);
                tick(&mut state2, input, dt);
            }
        }

        assert_eq!(state1.round, state2.round);
        assert_eq!(state1.targets, state2.targets);
    }
}
