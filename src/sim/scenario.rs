//! Seeded world generation
//!
//! Builds a ring of ground platforms with a few raised ledges, then drops
//! walkers from both teams onto it and fires some projectiles. Same seed,
//! same world.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{Platform, Projectile, Walker};
use super::entity::Team;
use super::polar::PolarCoord;
use super::state::World;
use crate::consts::*;

/// Number of ground segments around the ring
pub const GROUND_SEGMENTS: u32 = 24;
/// Angular gap left between ground segments
pub const SEGMENT_GAP: f32 = 0.002;

/// What [`populate`] created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioStats {
    pub platforms: usize,
    pub walkers: usize,
    pub projectiles: usize,
}

/// Fill `world` with a deterministic scenario
pub fn populate(world: &mut World, seed: u64, walkers: usize) -> ScenarioStats {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut stats = ScenarioStats::default();
    let gravity = world.settings.gravity;

    // Ground ring
    let segment = TAU / GROUND_SEGMENTS as f32;
    for i in 0..GROUND_SEGMENTS {
        let theta = i as f32 * segment;
        world.spawn(Box::new(Platform::new(
            GROUND_RADIUS,
            theta,
            segment - SEGMENT_GAP,
        )));
        stats.platforms += 1;

        // Occasional ledge above the ground
        if rng.random_bool(0.25) {
            let lift = rng.random_range(60.0..140.0);
            let width = rng.random_range(0.05..segment * 0.8);
            world.spawn(Box::new(Platform::new(
                GROUND_RADIUS + lift,
                theta + (segment - width) / 2.0,
                width,
            )));
            stats.platforms += 1;
        }
    }

    for i in 0..walkers {
        let team = if i % 2 == 0 { Team::Player } else { Team::Enemy };
        let theta = rng.random_range(0.0..TAU);
        let height = rng.random_range(20.0..200.0);
        let pace = rng.random_range(0.001..0.006) * if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        world.spawn(Box::new(Walker::new(
            PolarCoord::new(GROUND_RADIUS + height, theta),
            team,
            pace,
            gravity,
        )));
        stats.walkers += 1;
    }

    // A volley per team, flying along the ring
    for i in 0..walkers / 2 {
        let team = if i % 2 == 0 { Team::Player } else { Team::Enemy };
        let theta = rng.random_range(0.0..TAU);
        let speed = rng.random_range(0.01..0.03) * if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        world.spawn(Box::new(Projectile::new(
            PolarCoord::new(GROUND_RADIUS + WALKER_HEIGHT / 2.0, theta),
            PolarCoord::new(0.0, speed),
            team,
        )));
        stats.projectiles += 1;
    }

    log::info!(
        "scenario seed={seed}: {} platforms, {} walkers, {} projectiles",
        stats.platforms,
        stats.walkers,
        stats.projectiles
    );

    stats
}
