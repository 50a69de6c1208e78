//! Reference object variants
//!
//! Terrain, walkers and projectiles with the smallest collision responses
//! that make a ring playable: walkers stand on terrain and turn around at
//! walls, projectiles damage whatever they hit on another team.

use super::collision::CollisionResult;
use super::entity::{Body, Entity, EntityKind, Team};
use super::polar::PolarCoord;
use crate::closest_theta;
use crate::consts::*;

/// Immovable slab of ground
#[derive(Debug, Clone)]
pub struct Platform {
    body: Body,
}

impl Platform {
    /// Platform whose top edge is at `top` spanning `[theta, theta + width]`
    pub fn new(top: f32, theta: f32, width: f32) -> Self {
        Self::with_height(top, theta, width, PLATFORM_HEIGHT)
    }

    pub fn with_height(top: f32, theta: f32, width: f32, height: f32) -> Self {
        let anchor = PolarCoord::new(top - height, theta + width / 2.0);
        Self {
            body: Body::new(anchor, height, width),
        }
    }
}

impl Entity for Platform {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Terrain
    }

    fn depth(&self) -> i32 {
        DEPTH_TERRAIN
    }

    fn movable(&self) -> bool {
        false
    }
}

/// A creature pacing around the ring under gravity
#[derive(Debug, Clone)]
pub struct Walker {
    body: Body,
    team: Team,
    /// Angular walking speed (radians/frame, sign is direction)
    pub pace: f32,
    pub gravity: f32,
    pub hit_points: u32,
    /// Standing on terrain as of the last contact
    pub grounded: bool,
}

impl Walker {
    pub fn new(position: PolarCoord, team: Team, pace: f32, gravity: f32) -> Self {
        Self {
            body: Body::new(position, WALKER_HEIGHT, WALKER_WIDTH),
            team,
            pace,
            gravity,
            hit_points: WALKER_HIT_POINTS,
            grounded: false,
        }
    }

    /// Resolve overlap with something that doesn't move
    fn push_out(&mut self, other: &dyn Entity, result: CollisionResult) {
        let wall = other.polar_bounds();
        let body = &mut self.body;

        if result.bottom {
            // Landed: feet onto the surface
            body.position.r = wall.top();
            body.velocity.r = body.velocity.r.max(0.0);
            self.grounded = true;
        } else if result.top {
            // Head hit a ceiling
            body.position.r = wall.bottom() - body.height;
            body.velocity.r = body.velocity.r.min(0.0);
        } else if result.right {
            let edge = closest_theta(wall.start_theta(), body.position.theta);
            body.position.theta = edge - body.width / 2.0;
            body.velocity.theta = 0.0;
            self.pace = -self.pace.abs();
        } else if result.left {
            let edge = closest_theta(wall.end_theta(), body.position.theta);
            body.position.theta = edge + body.width / 2.0;
            body.velocity.theta = 0.0;
            self.pace = self.pace.abs();
        }
    }
}

impl Entity for Walker {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Walker
    }

    fn team(&self) -> Team {
        self.team
    }

    fn depth(&self) -> i32 {
        DEPTH_ACTOR
    }

    fn update(&mut self, _lag: f32) {
        self.body.acceleration.r = -self.gravity;
        self.body.velocity.theta = self.pace;
        self.grounded = false;
    }

    fn collide(&mut self, other: &mut dyn Entity, result: CollisionResult) {
        if !other.movable() {
            self.push_out(other, result);
        }
    }

    fn take_damage(&mut self, amount: u32) {
        self.hit_points = self.hit_points.saturating_sub(amount);
        if self.hit_points == 0 {
            log::debug!("walker {} destroyed", self.body.id());
            self.body.kill();
        }
    }
}

/// A ballistic shot that dies on its first hit
///
/// Passes through other projectiles and its own team. Anything else,
/// terrain included, takes the damage and stops the shot.
#[derive(Debug, Clone)]
pub struct Projectile {
    body: Body,
    team: Team,
    pub damage: u32,
}

impl Projectile {
    pub fn new(position: PolarCoord, velocity: PolarCoord, team: Team) -> Self {
        Self {
            body: Body::new(position, PROJECTILE_SIZE, PROJECTILE_WIDTH).with_velocity(velocity),
            team,
            damage: PROJECTILE_DAMAGE,
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn team(&self) -> Team {
        self.team
    }

    fn depth(&self) -> i32 {
        DEPTH_PROJECTILE
    }

    fn collide(&mut self, other: &mut dyn Entity, result: CollisionResult) {
        if !result.middle || other.kind() == EntityKind::Projectile {
            return;
        }
        if other.team() == self.team && self.team != Team::Neutral {
            return;
        }
        other.take_damage(self.damage);
        self.body.kill();
    }
}
