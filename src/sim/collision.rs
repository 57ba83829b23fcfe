//! Slash-versus-target hit testing
//!
//! One predicate is applied to every live target on every frame a slash is
//! active: the target's center must lie within `hit_radius` of the swept
//! sector. A zero-width sweep reduces this to a point-to-segment test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::slash::Slash;
use super::state::RoundState;
use super::target::{Target, TargetSpawner};

/// A target struck by a slash this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    /// ID of the target that was struck
    pub target_id: u32,
    /// Where it was when struck
    pub pos: Vec2,
    /// ID of the target that replaced it
    pub replacement_id: u32,
    pub points: u64,
}

/// Check whether a target center is within `hit_radius` of the sweep
#[inline]
pub fn slash_hits(slash: &Slash, target_pos: Vec2, hit_radius: f32) -> bool {
    slash.sector.distance_to(target_pos) <= hit_radius
}

/// Test the active slash against all live targets.
///
/// Each struck target is marked dead, scored once, and its slot immediately
/// refilled from the spawner so the live count never changes.
pub fn resolve(
    slash: Option<&mut Slash>,
    targets: &mut [Target],
    spawner: &mut TargetSpawner,
    round: &mut RoundState,
    hit_radius: f32,
    score_per_hit: u64,
) -> Vec<HitEvent> {
    let Some(slash) = slash else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    for target in targets.iter_mut() {
        if !target.alive || slash.has_struck(target.id) {
            continue;
        }
        if !slash_hits(slash, target.pos, hit_radius) {
            continue;
        }

        slash.record_strike(target.id);
        target.alive = false;
        round.award(score_per_hit);

        let replacement = spawner.spawn();
        log::debug!(
            "Target {} hit at ({:.1}, {:.1}), replaced by {}",
            target.id,
            target.pos.x,
            target.pos.y,
            replacement.id
        );
        hits.push(HitEvent {
            target_id: target.id,
            pos: target.pos,
            replacement_id: replacement.id,
            points: score_per_hit,
        });
        *target = replacement;
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayArea;

    fn setup() -> (TargetSpawner, RoundState) {
        let spawner = TargetSpawner::new(3, 18.0, (90.0, 180.0), PlayArea::new(640.0, 480.0));
        (spawner, RoundState::new(30.0))
    }

    fn target_at(id: u32, pos: Vec2) -> Target {
        Target::new(id, pos, Vec2::ZERO, 18.0)
    }

    #[test]
    fn test_no_slash_no_hits() {
        let (mut spawner, mut round) = setup();
        let mut targets = vec![target_at(100, Vec2::new(100.0, 100.0))];
        let hits = resolve(None, &mut targets, &mut spawner, &mut round, 28.0, 10);
        assert!(hits.is_empty());
        assert_eq!(round.score, 0);
        assert_eq!(targets[0].id, 100);
    }

    #[test]
    fn test_hit_scores_and_respawns() {
        let (mut spawner, mut round) = setup();
        let mut slash = Slash::new(Vec2::new(100.0, 100.0), 0.0, 140.0, 80.0_f32.to_radians(), 3);
        let mut targets = vec![
            target_at(100, Vec2::new(200.0, 110.0)),
            target_at(101, Vec2::new(100.0, 400.0)),
        ];

        let hits = resolve(Some(&mut slash), &mut targets, &mut spawner, &mut round, 28.0, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target_id, 100);
        assert_eq!(hits[0].pos, Vec2::new(200.0, 110.0));
        assert_eq!(round.score, 10);
        assert_eq!(round.hits, 1);
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| t.alive));
        assert_eq!(targets[0].id, hits[0].replacement_id);
        assert_eq!(targets[1].id, 101);
    }

    #[test]
    fn test_hit_radius_tolerance() {
        let slash = Slash::new(Vec2::ZERO, 0.0, 100.0, 0.0, 3);
        assert!(slash_hits(&slash, Vec2::new(50.0, 28.0), 28.0));
        assert!(!slash_hits(&slash, Vec2::new(50.0, 29.0), 28.0));
        assert!(slash_hits(&slash, Vec2::new(127.0, 0.0), 28.0));
    }

    #[test]
    fn test_same_target_never_scored_twice_per_slash() {
        let (mut spawner, mut round) = setup();
        let mut slash = Slash::new(Vec2::new(100.0, 100.0), 0.0, 140.0, 1.0, 3);
        let mut targets = vec![target_at(100, Vec2::new(150.0, 100.0))];

        resolve(Some(&mut slash), &mut targets, &mut spawner, &mut round, 28.0, 10);
        assert_eq!(round.score, 10);

        // Put the original target back in the sweep; this activation already struck it
        targets[0] = target_at(100, Vec2::new(150.0, 100.0));
        let hits = resolve(Some(&mut slash), &mut targets, &mut spawner, &mut round, 28.0, 10);
        assert!(hits.is_empty());
        assert_eq!(round.score, 10);
    }

    #[test]
    fn test_dead_targets_are_skipped() {
        let (mut spawner, mut round) = setup();
        let mut slash = Slash::new(Vec2::ZERO, 0.0, 140.0, 1.0, 3);
        let mut dead = target_at(5, Vec2::new(50.0, 0.0));
        dead.alive = false;
        let mut targets = vec![dead];
        assert!(resolve(Some(&mut slash), &mut targets, &mut spawner, &mut round, 28.0, 10).is_empty());
    }
}
