//! Bouncing targets and their spawner
//!
//! Motion is pure: a target's trajectory depends only on its spawn state and
//! the dt sequence. All randomness lives in [`TargetSpawner`], which draws
//! from a seeded PCG stream so a whole round can be replayed from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::direction_vector;
use crate::settings::Settings;

/// Rectangular play area with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a circle lies fully inside the area
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x >= radius
            && center.x <= self.width - radius
            && center.y >= radius
            && center.y <= self.height - radius
    }
}

/// A bouncing circular target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            alive: true,
        }
    }

    /// Advance by `vel * dt`, bouncing elastically off the area borders
    pub fn step(&mut self, dt: f32, area: &PlayArea) {
        self.pos += self.vel * dt;

        let min = Vec2::splat(self.radius);
        let max = area.size() - Vec2::splat(self.radius);

        // Bounce horizontally
        if (self.pos.x <= min.x && self.vel.x < 0.0) || (self.pos.x >= max.x && self.vel.x > 0.0) {
            self.vel.x = -self.vel.x;
        }
        // Bounce vertically
        if (self.pos.y <= min.y && self.vel.y < 0.0) || (self.pos.y >= max.y && self.vel.y > 0.0) {
            self.vel.y = -self.vel.y;
        }

        self.pos = self.pos.clamp(min, max);
        debug_assert!(area.contains_circle(self.pos, self.radius));
    }
}

/// Area edges a target can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Angle of the normal pointing into the area (screen y grows down)
    fn inward_angle(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Edge::Top => FRAC_PI_2,
            Edge::Bottom => -FRAC_PI_2,
            Edge::Left => 0.0,
            Edge::Right => PI,
        }
    }
}

/// Maximum deviation of a spawn heading from the inward normal (60°)
const SPAWN_CONE_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

/// Seeded source of fresh targets
#[derive(Debug, Clone)]
pub struct TargetSpawner {
    rng: Pcg32,
    next_id: u32,
    radius: f32,
    speed_range: (f32, f32),
    area: PlayArea,
}

impl TargetSpawner {
    pub fn new(seed: u64, radius: f32, speed_range: (f32, f32), area: PlayArea) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            radius,
            speed_range,
            area,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.seed,
            settings.target_radius,
            settings.target_speed_range,
            settings.play_area(),
        )
    }

    /// Allocate a new target ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a target on a random edge, heading into the area
    pub fn spawn(&mut self) -> Target {
        let r = self.radius;
        let (w, h) = (self.area.width, self.area.height);

        let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
        let pos = match edge {
            Edge::Top => Vec2::new(self.rng.random_range(r..=w - r), r),
            Edge::Bottom => Vec2::new(self.rng.random_range(r..=w - r), h - r),
            Edge::Left => Vec2::new(r, self.rng.random_range(r..=h - r)),
            Edge::Right => Vec2::new(w - r, self.rng.random_range(r..=h - r)),
        };

        let (min_speed, max_speed) = self.speed_range;
        let speed = self.rng.random_range(min_speed..=max_speed);
        let heading = edge.inward_angle()
            + self
                .rng
                .random_range(-SPAWN_CONE_HALF_ANGLE..=SPAWN_CONE_HALF_ANGLE);

        let id = self.next_entity_id();
        Target::new(id, pos, direction_vector(heading) * speed, r)
    }

    /// Spawn a full set of targets
    pub fn spawn_all(&mut self, count: usize) -> Vec<Target> {
        (0..count).map(|_| self.spawn()).collect()
    }
}
