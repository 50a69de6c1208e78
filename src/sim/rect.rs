//! Polar rectangle geometry for collision bounds
//!
//! In polar coordinates, a bounding rectangle is defined by:
//! - r: outer (top) edge radius
//! - height: radial extent (bottom edge = r - height)
//! - theta: angular start (left edge)
//! - width: angular extent in radians (right edge = theta + width)
//!
//! "Up" is away from the center and "right" is increasing theta.

use serde::{Deserialize, Serialize};

use super::polar::PolarCoord;
use crate::closest_theta;

/// A rectangle that is axis-aligned in polar space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarRect {
    /// Outer edge radius
    pub r: f32,
    /// Start angle (radians, unbounded)
    pub theta: f32,
    /// Radial extent (>= 0)
    pub height: f32,
    /// Angular extent in radians (>= 0)
    pub width: f32,
}

impl PolarRect {
    pub const fn new(r: f32, theta: f32, height: f32, width: f32) -> Self {
        Self {
            r,
            theta,
            height,
            width,
        }
    }

    /// Bounds standing on `anchor`: bottom edge at the anchor radius, centred
    /// angularly on the anchor.
    pub fn around(anchor: PolarCoord, height: f32, width: f32) -> Self {
        Self::new(anchor.r + height, anchor.theta - width / 2.0, height, width)
    }

    /// Outer edge radius
    #[inline]
    pub fn top(&self) -> f32 {
        self.r
    }

    /// Inner edge radius
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.r - self.height
    }

    #[inline]
    pub fn start_theta(&self) -> f32 {
        self.theta
    }

    #[inline]
    pub fn end_theta(&self) -> f32 {
        self.theta + self.width
    }

    #[inline]
    pub fn center_theta(&self) -> f32 {
        self.theta + self.width / 2.0
    }

    pub fn top_left(&self) -> PolarCoord {
        PolarCoord::new(self.top(), self.start_theta())
    }

    pub fn bottom_right(&self) -> PolarCoord {
        PolarCoord::new(self.bottom(), self.end_theta())
    }

    /// Midpoint of the rectangle in polar space
    pub fn center(&self) -> PolarCoord {
        PolarCoord::new(self.r - self.height / 2.0, self.center_theta())
    }

    pub fn contains_radius(&self, r: f32) -> bool {
        r >= self.bottom() && r <= self.top()
    }

    /// Check if an angle (on any wrap) falls within the angular span
    pub fn contains_theta(&self, theta: f32) -> bool {
        let theta = closest_theta(theta, self.center_theta());
        theta >= self.start_theta() && theta <= self.end_theta()
    }

    /// Check if a polar point is inside the rectangle (edges inclusive)
    pub fn contains(&self, point: PolarCoord) -> bool {
        self.contains_radius(point.r) && self.contains_theta(point.theta)
    }

    pub fn translated(&self, dr: f32, dtheta: f32) -> Self {
        Self::new(self.r + dr, self.theta + dtheta, self.height, self.width)
    }

    /// Field-wise comparison with tolerance
    pub fn approx_eq(&self, other: &PolarRect, epsilon: f32) -> bool {
        (self.r - other.r).abs() <= epsilon
            && (self.theta - other.theta).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
    }
}
