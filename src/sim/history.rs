//! Per-frame collision memo
//!
//! One history is built while a frame runs and then frozen as "previous"
//! for the next frame, which reads last frame's bounds and pair results from
//! it to classify contacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::collision::CollisionResult;
use super::entity::ObjectId;
use super::rect::PolarRect;

/// Bounds per object and results per ordered pair for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HistoryRecord", into = "HistoryRecord")]
pub struct CollisionHistory {
    bounds: BTreeMap<ObjectId, PolarRect>,
    results: BTreeMap<(ObjectId, ObjectId), CollisionResult>,
}

impl CollisionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded bounds for an object, if it was collidable that frame
    pub fn bounds(&self, id: ObjectId) -> Option<PolarRect> {
        self.bounds.get(&id).copied()
    }

    /// Result recorded for the ordered pair (a, b); all-false if none
    pub fn result(&self, a: ObjectId, b: ObjectId) -> CollisionResult {
        self.results.get(&(a, b)).copied().unwrap_or_default()
    }

    pub fn record_bounds(&mut self, id: ObjectId, bounds: PolarRect) {
        self.bounds.insert(id, bounds);
    }

    pub fn record_result(&mut self, a: ObjectId, b: ObjectId, result: CollisionResult) {
        self.results.insert((a, b), result);
    }

    /// Record `result` for (a, b) and its reverse for (b, a)
    pub fn record_pair(&mut self, a: ObjectId, b: ObjectId, result: CollisionResult) {
        self.record_result(a, b, result);
        self.record_result(b, a, result.reverse());
    }

    pub fn len_bounds(&self) -> usize {
        self.bounds.len()
    }

    pub fn len_results(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty() && self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.bounds.clear();
        self.results.clear();
    }
}

/// Serialized form: JSON object keys must be strings, so pairs become rows
#[derive(Serialize, Deserialize)]
struct HistoryRecord {
    bounds: Vec<(ObjectId, PolarRect)>,
    results: Vec<(ObjectId, ObjectId, CollisionResult)>,
}

impl From<CollisionHistory> for HistoryRecord {
    fn from(history: CollisionHistory) -> Self {
        Self {
            bounds: history.bounds.into_iter().collect(),
            results: history
                .results
                .into_iter()
                .map(|((a, b), result)| (a, b, result))
                .collect(),
        }
    }
}

impl From<HistoryRecord> for CollisionHistory {
    fn from(record: HistoryRecord) -> Self {
        Self {
            bounds: record.bounds.into_iter().collect(),
            results: record
                .results
                .into_iter()
                .map(|(a, b, result)| ((a, b), result))
                .collect(),
        }
    }
}
