//! Ringworld - polar collision and physics core
//!
//! Objects live on a ring: every position is a radius and an angle around a
//! fixed center instead of an x/y pair.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (polar geometry, collisions, frame stepping)
//! - `settings`: JSON-loadable simulation tuning
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::SimSettings;

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Simulation configuration constants
pub mod consts {
    /// Default upper bound for the per-frame lag factor
    pub const MAX_LAG_FACTOR: f32 = 4.0;

    /// Radius of the ground ring that the default scenario builds on
    pub const GROUND_RADIUS: f32 = 400.0;
    /// Radial thickness of a ground platform
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Radial pull applied to walkers every frame (toward the center)
    pub const GRAVITY: f32 = 0.5;

    /// Walker defaults
    pub const WALKER_HEIGHT: f32 = 32.0;
    pub const WALKER_WIDTH: f32 = 0.04; // radians
    pub const WALKER_HIT_POINTS: u32 = 3;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 6.0;
    pub const PROJECTILE_WIDTH: f32 = 0.01; // radians
    pub const PROJECTILE_DAMAGE: u32 = 1;

    /// Render layers (lower draws first)
    pub const DEPTH_TERRAIN: i32 = 0;
    pub const DEPTH_PICKUP: i32 = 5;
    pub const DEPTH_ACTOR: i32 = 10;
    pub const DEPTH_PROJECTILE: i32 = 20;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let folded = angle - TAU * (angle / TAU).round();
    // round() ties away from zero, so +π can survive the fold
    if folded >= PI { folded - TAU } else { folded }
}

/// The representative of `theta` (mod 2π) closest to `reference`.
///
/// Every comparison between two angles that may sit on different wraps of
/// the ring goes through here. The result lies in `[reference - π, reference + π]`.
#[inline]
pub fn closest_theta(theta: f32, reference: f32) -> f32 {
    reference + normalize_angle(theta - reference)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
