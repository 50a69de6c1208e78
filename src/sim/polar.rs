//! Polar coordinates
//!
//! A position on the ring is a radius from the center and an angle. The
//! angle is never folded automatically: an object that keeps walking in one
//! direction accumulates theta past 2π, and any comparison against another
//! angle goes through [`closest_theta`](crate::closest_theta).

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, polar_to_cartesian};

/// A point (or per-component rate) in polar space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarCoord {
    /// Distance from the ring center
    pub r: f32,
    /// Angle in radians (unbounded)
    pub theta: f32,
}

impl PolarCoord {
    pub const ZERO: Self = Self { r: 0.0, theta: 0.0 };

    pub const fn new(r: f32, theta: f32) -> Self {
        Self { r, theta }
    }

    pub fn from_cartesian(pos: Vec2) -> Self {
        let (r, theta) = cartesian_to_polar(pos);
        Self { r, theta }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.r * self.theta.cos()
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.r * self.theta.sin()
    }

    #[inline]
    pub fn to_cartesian(&self) -> Vec2 {
        polar_to_cartesian(self.r, self.theta)
    }

    /// Straight-line distance between the two projected points
    pub fn distance_to(&self, other: &PolarCoord) -> f32 {
        self.to_cartesian().distance(other.to_cartesian())
    }
}

// Component-wise arithmetic: velocities and accelerations are per-component
// rates (units/frame radially, radians/frame angularly).

impl Add for PolarCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.theta + rhs.theta)
    }
}

impl AddAssign for PolarCoord {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.theta += rhs.theta;
    }
}

impl Sub for PolarCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.theta - rhs.theta)
    }
}

impl Neg for PolarCoord {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.r, -self.theta)
    }
}

impl Mul<f32> for PolarCoord {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.theta * rhs)
    }
}
