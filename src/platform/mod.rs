//! Platform abstraction layer
//!
//! Handles everything between the outside world and the simulation:
//! - Input: per-frame hand samples and commands (`FrameSource`)
//! - Time: capture timestamps, FPS measurement and real-time pacing

pub mod input;
pub mod time;

pub use input::{CapturedFrame, FrameSource, ScriptedSource, SyntheticHand};
pub use time::{FpsCounter, FramePacer, PacedSource};
