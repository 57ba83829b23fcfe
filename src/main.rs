//! Pinch Ninja demo entry point
//!
//! Runs the game against a synthetic hand and streams one JSON render
//! snapshot per frame to stdout. Environment:
//! - `PINCH_NINJA_SETTINGS`: path to a JSON settings file (optional)
//! - `PINCH_NINJA_FRAMES`: frames to simulate (default: two rounds)
//! - `PINCH_NINJA_REALTIME=1`: pace frames at the tick rate
//! - `PINCH_NINJA_OUTPUT=log`: log HUD lines instead of printing JSON
//! - `RUST_LOG`: log filter (env_logger)

use std::io::{self, BufWriter};

use anyhow::{Context, Result};

use pinch_ninja::platform::{FrameSource, PacedSource, SyntheticHand};
use pinch_ninja::render::{JsonLinesSink, LogSink, RenderSink};
use pinch_ninja::{Game, Settings};

fn main() {
    env_logger::init();
    log::info!("Pinch Ninja (native) starting...");

    if let Err(e) = run() {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = match std::env::var("PINCH_NINJA_SETTINGS") {
        Ok(path) => Settings::load_file(&path)
            .with_context(|| format!("invalid settings file {}", path))?,
        Err(_) => Settings::default(),
    };

    let round_frames = (settings.game_duration * settings.tick_rate as f32).ceil() as u64;
    let frames = match std::env::var("PINCH_NINJA_FRAMES") {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("PINCH_NINJA_FRAMES is not a frame count: {}", value))?,
        Err(_) => 2 * round_frames + settings.tick_rate as u64,
    };
    let realtime = std::env::var("PINCH_NINJA_REALTIME").is_ok_and(|v| v == "1");

    let tick_rate = settings.tick_rate;
    let mut game = Game::new(settings).context("rejected settings")?;

    // Restart one second after each round ends
    let hand = SyntheticHand::new(frames, tick_rate)
        .with_restart_every(round_frames + tick_rate as u64);
    let mut source: Box<dyn FrameSource> = if realtime {
        Box::new(PacedSource::new(hand, tick_rate))
    } else {
        Box::new(hand)
    };

    let log_only = std::env::var("PINCH_NINJA_OUTPUT").is_ok_and(|v| v == "log");
    let mut sink: Box<dyn RenderSink> = if log_only {
        Box::new(LogSink)
    } else {
        Box::new(JsonLinesSink::new(BufWriter::new(io::stdout().lock())))
    };
    let summary = game.run(source.as_mut(), sink.as_mut());
    drop(sink);

    log::info!(
        "Session over after {} frames and {} rounds (last score {})",
        summary.frames,
        summary.rounds,
        summary.last_score
    );
    for result in game.history().results() {
        log::info!(
            "Round {}: {} points ({} hits, {} frames)",
            result.round,
            result.score,
            result.hits,
            result.frames
        );
    }
    if let Some(best) = game.history().best() {
        log::info!("Session best: {} points (round {})", best.score, best.round);
    }

    Ok(())
}
