//! Simulated objects
//!
//! Every object on the ring carries a [`Body`] (kinematic state plus
//! identity) and implements [`Entity`] to say how it takes part in
//! collisions and how it reacts to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::CollisionResult;
use super::polar::PolarCoord;
use super::rect::PolarRect;

/// Stable object identity, issued by the world at spawn and never reused
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an object is (read by gameplay collision responses, not by the stepper)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Terrain,
    Walker,
    Projectile,
    Pickup,
    Prop,
}

/// Allegiance for friendly-fire checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Neutral,
    Player,
    Enemy,
}

/// Kinematic state shared by every object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    id: ObjectId,
    alive: bool,
    pub position: PolarCoord,
    /// Position at the end of the previous frame
    pub previous_position: PolarCoord,
    pub velocity: PolarCoord,
    pub acceleration: PolarCoord,
    /// Radial extent of the default bounds
    pub height: f32,
    /// Angular extent of the default bounds (radians)
    pub width: f32,
}

impl Body {
    pub fn new(position: PolarCoord, height: f32, width: f32) -> Self {
        Self {
            id: ObjectId::default(),
            alive: true,
            position,
            previous_position: position,
            velocity: PolarCoord::ZERO,
            acceleration: PolarCoord::ZERO,
            height,
            width,
        }
    }

    pub fn with_velocity(mut self, velocity: PolarCoord) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: PolarCoord) -> Self {
        self.acceleration = acceleration;
        self
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark for removal at the end of the current frame
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Feet-anchored bounds around the current position
    pub fn bounds(&self) -> PolarRect {
        PolarRect::around(self.position, self.height, self.width)
    }

    /// One explicit Euler step scaled by the frame's lag factor
    pub fn integrate(&mut self, lag: f32) {
        self.velocity += self.acceleration * lag;
        self.position += self.velocity * lag;
    }

    pub(crate) fn assign_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

/// Capabilities an object exposes to the frame stepper
pub trait Entity: fmt::Debug {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn kind(&self) -> EntityKind;

    fn team(&self) -> Team {
        Team::Neutral
    }

    /// Render layer; lower layers sort first
    fn depth(&self) -> i32;

    /// Takes part in collision detection at all
    fn collidable(&self) -> bool {
        true
    }

    /// Can be displaced by collision responses. Two immovable objects are
    /// never tested against each other.
    fn movable(&self) -> bool {
        true
    }

    fn polar_bounds(&self) -> PolarRect {
        self.body().bounds()
    }

    /// Per-frame gameplay hook, run before integration
    fn update(&mut self, _lag: f32) {}

    /// React to touching `other`. `result` is from this object's point of view.
    fn collide(&mut self, _other: &mut dyn Entity, _result: CollisionResult) {}

    /// Damage dealt by another object's collision response
    fn take_damage(&mut self, _amount: u32) {}

    fn id(&self) -> ObjectId {
        self.body().id()
    }

    fn is_alive(&self) -> bool {
        self.body().is_alive()
    }
}
