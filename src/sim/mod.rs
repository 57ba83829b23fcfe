//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (target slots never reorder)
//! - No capture, rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod pinch;
pub mod slash;
pub mod state;
pub mod target;
pub mod tick;

pub use arc::{Sector, point_segment_distance};
pub use collision::{HitEvent, resolve, slash_hits};
pub use pinch::{FingertipSample, HandSample, PinchDetector, PinchEdge, PinchState};
pub use slash::{Slash, SlashController};
pub use state::{GameState, RoundPhase, RoundState};
pub use target::{PlayArea, Target, TargetSpawner};
pub use tick::{Command, FrameInput, FrameReport, tick};
