//! Circular sector geometry for the slash sweep
//!
//! A sector is defined by:
//! - origin: apex of the sweep (the fingertip)
//! - radius: how far the blade reaches
//! - direction: center angle of the sweep (radians)
//! - half_width: half the angular opening (radians)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{angle_difference, normalize_angle, polar_to_cartesian};

/// A filled circular sector (pie slice)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub origin: Vec2,
    pub radius: f32,
    /// Center angle (radians, normalized to [-π, π))
    pub direction: f32,
    /// Half the opening angle (radians, clamped to [0, π])
    pub half_width: f32,
}

impl Sector {
    pub fn new(origin: Vec2, radius: f32, direction: f32, angular_width: f32) -> Self {
        Self {
            origin,
            radius,
            direction: normalize_angle(direction),
            half_width: (angular_width / 2.0).clamp(0.0, std::f32::consts::PI),
        }
    }

    #[inline]
    pub fn theta_start(&self) -> f32 {
        self.direction - self.half_width
    }

    #[inline]
    pub fn theta_end(&self) -> f32 {
        self.direction + self.half_width
    }

    /// Check if an angle (about the origin) is within the opening
    pub fn contains_angle(&self, theta: f32) -> bool {
        angle_difference(theta, self.direction) <= self.half_width
    }

    /// Tip of the blade along the center direction
    pub fn tip(&self) -> Vec2 {
        polar_to_cartesian(self.origin, self.radius, self.direction)
    }

    /// Shortest distance from a point to the sector (0 when inside)
    pub fn distance_to(&self, point: Vec2) -> f32 {
        let offset = point - self.origin;
        let r = offset.length();
        if r == 0.0 {
            return 0.0;
        }

        let theta = offset.y.atan2(offset.x);
        if self.contains_angle(theta) {
            // Closest feature is the apex region or the outer arc
            return (r - self.radius).max(0.0);
        }

        // Outside the opening: nearest straight edge wins
        let start_edge = polar_to_cartesian(self.origin, self.radius, self.theta_start());
        let end_edge = polar_to_cartesian(self.origin, self.radius, self.theta_end());
        point_segment_distance(point, self.origin, start_edge)
            .min(point_segment_distance(point, self.origin, end_edge))
    }

    /// Sample points along the outer arc (for rendering)
    pub fn sample_arc(&self, num_points: usize) -> Vec<Vec2> {
        let span = self.half_width * 2.0;
        let start = self.theta_start();

        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                polar_to_cartesian(self.origin, self.radius, start + t * span)
            })
            .collect()
    }
}

/// Shortest distance from a point to a line segment
pub fn point_segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let line = end - start;
    let line_len_sq = line.length_squared();
    if line_len_sq == 0.0 {
        return point.distance(start);
    }
    let t = ((point - start).dot(line) / line_len_sq).clamp(0.0, 1.0);
    point.distance(start + line * t)
}
