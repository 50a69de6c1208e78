//! World state
//!
//! The live object set, the id allocator and last frame's collision history.
//! Objects are owned by the world in a render-ordered table; everything else
//! refers to them by [`ObjectId`].

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, ObjectId};
use super::history::CollisionHistory;
use super::polar::PolarCoord;
use crate::settings::SimSettings;

/// The simulated world
#[derive(Debug)]
pub struct World {
    pub settings: SimSettings,
    /// Live objects in render order after each tick
    pub(crate) objects: Vec<Box<dyn Entity>>,
    /// Bounds and pair results from the last completed frame
    pub(crate) history: CollisionHistory,
    /// Completed frames
    pub(crate) frame: u64,
    next_id: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimSettings::default())
    }
}

impl World {
    pub fn new(settings: SimSettings) -> Self {
        Self {
            settings,
            objects: Vec::new(),
            history: CollisionHistory::new(),
            frame: 0,
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    fn next_object_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an object to the live set and return its id
    ///
    /// The object joins the end of the table and takes its sorted place at
    /// the end of the next tick.
    pub fn spawn(&mut self, mut object: Box<dyn Entity>) -> ObjectId {
        let id = self.next_object_id();
        let body = object.body_mut();
        body.assign_id(id);
        body.previous_position = body.position;
        log::trace!("spawn {id} {:?} at {:?}", object.kind(), object.body().position);
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn Entity> {
        self.objects
            .iter()
            .find(|o| o.id() == id)
            .map(|o| o.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Box<dyn Entity>> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Mark an object dead from outside collision handling (damage systems)
    ///
    /// It is skipped by the next tick and removed at its end. Returns false
    /// for unknown ids.
    pub fn kill(&mut self, id: ObjectId) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                object.body_mut().kill();
                true
            }
            None => false,
        }
    }

    /// Live objects in render order
    pub fn objects(&self) -> impl Iterator<Item = &dyn Entity> {
        self.objects.iter().map(|o| o.as_ref())
    }

    /// Ids in render order
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of completed ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Collision history of the last completed frame
    pub fn history(&self) -> &CollisionHistory {
        &self.history
    }

    /// Serializable copy of everything observable about the world
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame: self.frame,
            objects: self
                .objects
                .iter()
                .map(|o| {
                    let body = o.body();
                    ObjectSnapshot {
                        id: body.id(),
                        kind: o.kind(),
                        depth: o.depth(),
                        alive: body.is_alive(),
                        position: body.position,
                        previous_position: body.previous_position,
                        velocity: body.velocity,
                    }
                })
                .collect(),
            history: self.history.clone(),
        }
    }
}

/// Observable state of one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub kind: EntityKind,
    pub depth: i32,
    pub alive: bool,
    pub position: PolarCoord,
    pub previous_position: PolarCoord,
    pub velocity: PolarCoord,
}

/// Observable state of the world after a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub objects: Vec<ObjectSnapshot>,
    pub history: CollisionHistory,
}
