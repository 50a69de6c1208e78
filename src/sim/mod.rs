//! Deterministic simulation module
//!
//! All collision and physics logic lives here. This module must be pure and deterministic:
//! - Lag factor is an explicit tick argument, no hidden clocks
//! - Seeded RNG only
//! - Stable iteration order (render order, ties broken by object ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod entity;
pub mod history;
pub mod polar;
pub mod rect;
pub mod scenario;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, above, aside, intersect, test_collision};
pub use entities::{Platform, Projectile, Walker};
pub use entity::{Body, Entity, EntityKind, ObjectId, Team};
pub use history::CollisionHistory;
pub use polar::PolarCoord;
pub use rect::PolarRect;
pub use scenario::{ScenarioStats, populate};
pub use state::{ObjectSnapshot, World, WorldSnapshot};
pub use tick::{FrameSummary, render_order, tick};
