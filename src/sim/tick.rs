//! Frame stepping
//!
//! One call to [`tick`] advances the world by one rendered frame:
//! gameplay hooks, Euler integration, the pairwise collision sweep with
//! response dispatch, history bookkeeping, removal of the dead and the
//! render-order sort. Everything runs to completion before returning.

use std::cmp::Ordering;

use super::collision::{intersect, test_collision};
use super::entity::Entity;
use super::history::CollisionHistory;
use super::state::World;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSummary {
    /// Index of the frame that just completed (1-based)
    pub frame: u64,
    /// Lag factor actually applied after clamping
    pub lag: f32,
    /// Pairs that survived the broad phase and were classified
    pub pairs_tested: usize,
    /// Pairs whose responses were dispatched
    pub contacts: usize,
    /// Objects removed at the end of the frame
    pub removed: usize,
}

/// Render order: depth ascending, then radius descending, then id ascending
///
/// Total and deterministic, so ties between identical objects never depend
/// on their previous position in the table.
pub fn render_order(a: &dyn Entity, b: &dyn Entity) -> Ordering {
    a.depth()
        .cmp(&b.depth())
        .then_with(|| b.body().position.r.total_cmp(&a.body().position.r))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Advance the world by one frame
///
/// `lag` scales integration for frame-rate independence (1.0 = one nominal
/// frame) and is clamped to `[0, settings.max_lag_factor]`.
pub fn tick(world: &mut World, lag: f32) -> FrameSummary {
    let clamped = world.settings.clamp_lag(lag);
    if clamped != lag {
        log::debug!("lag factor {lag} clamped to {clamped}");
    }
    let lag = clamped;

    let mut summary = FrameSummary {
        frame: world.frame + 1,
        lag,
        ..Default::default()
    };

    // Gameplay hooks, then integration
    for object in world.objects.iter_mut().filter(|o| o.is_alive()) {
        object.update(lag);
    }
    for object in world.objects.iter_mut().filter(|o| o.is_alive()) {
        object.body_mut().integrate(lag);
    }

    // Current bounds for everything that can collide
    let mut current = CollisionHistory::new();
    let candidates: Vec<usize> = world
        .objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.is_alive() && o.collidable())
        .map(|(idx, _)| idx)
        .collect();
    for &idx in &candidates {
        let object = &world.objects[idx];
        current.record_bounds(object.id(), object.polar_bounds());
    }

    sweep(world, &candidates, &mut current, &mut summary);

    // Responses may have moved things; only movable objects can have changed
    for &idx in &candidates {
        let object = &world.objects[idx];
        if object.is_alive() && object.movable() {
            current.record_bounds(object.id(), object.polar_bounds());
        }
    }

    let before = world.objects.len();
    world.objects.retain(|o| o.is_alive());
    summary.removed = before - world.objects.len();

    world
        .objects
        .sort_by(|a, b| render_order(a.as_ref(), b.as_ref()));

    for object in world.objects.iter_mut() {
        let body = object.body_mut();
        body.previous_position = body.position;
    }

    world.history = current;
    world.frame = summary.frame;

    log::debug!(
        "frame {}: lag={:.3} live={} tested={} contacts={} removed={}",
        summary.frame,
        summary.lag,
        world.objects.len(),
        summary.pairs_tested,
        summary.contacts,
        summary.removed
    );

    summary
}

/// Test every eligible pair and dispatch responses
fn sweep(
    world: &mut World,
    candidates: &[usize],
    current: &mut CollisionHistory,
    summary: &mut FrameSummary,
) {
    let log_contacts = world.settings.log_contacts;

    for (n, &i) in candidates.iter().enumerate() {
        if !world.objects[i].is_alive() {
            continue;
        }

        for &j in &candidates[n + 1..] {
            let (a, b) = (&world.objects[i], &world.objects[j]);
            if !b.is_alive() {
                continue;
            }
            // Neither side could respond by moving
            if !a.movable() && !b.movable() {
                continue;
            }

            let (id_a, id_b) = (a.id(), b.id());
            let (Some(bounds_a), Some(bounds_b)) = (current.bounds(id_a), current.bounds(id_b))
            else {
                continue;
            };

            // Broad phase
            if !intersect(&bounds_a, &bounds_b) {
                continue;
            }

            let prev_a = world.history.bounds(id_a).unwrap_or(bounds_a);
            let prev_b = world.history.bounds(id_b).unwrap_or(bounds_b);
            let prev = world.history.result(id_a, id_b);
            let relative_velocity = b.body().velocity - a.body().velocity;

            let result = test_collision(
                &bounds_a,
                &bounds_b,
                &prev_a,
                &prev_b,
                prev,
                relative_velocity,
            );
            summary.pairs_tested += 1;

            if result.any() {
                if log_contacts {
                    log::trace!("contact {id_a} {result} {id_b}");
                }
                let (first, second) = pair_mut(&mut world.objects, i, j);
                first.collide(second.as_mut(), result);
                second.collide(first.as_mut(), result.reverse());
                summary.contacts += 1;
            }

            current.record_pair(id_a, id_b, result);

            // A dead object takes no part in the rest of the frame
            if !world.objects[i].is_alive() {
                break;
            }
        }
    }
}

/// Two distinct mutable slots of the object table, `i < j`
fn pair_mut<T>(objects: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j, "pair indices out of order: {i} >= {j}");
    let (head, tail) = objects.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::consts::*;
    use crate::settings::SimSettings;
    use crate::sim::collision::CollisionResult;
    use crate::sim::entities::{Platform, Walker};
    use crate::sim::entity::{Body, EntityKind, ObjectId, Team};
    use crate::sim::polar::PolarCoord;
    use crate::sim::rect::PolarRect;

    type ContactLog = Rc<RefCell<Vec<(ObjectId, ObjectId, CollisionResult)>>>;

    /// Test object that records every contact it is told about
    #[derive(Debug)]
    struct Recorder {
        body: Body,
        depth: i32,
        movable: bool,
        collidable: bool,
        kills_partner: bool,
        kills: Option<ObjectId>,
        log: ContactLog,
    }

    impl Recorder {
        fn new(log: &ContactLog, r: f32, theta: f32) -> Self {
            Self {
                body: Body::new(PolarCoord::new(r, theta), 20.0, 0.2),
                depth: DEPTH_ACTOR,
                movable: true,
                collidable: true,
                kills_partner: false,
                kills: None,
                log: Rc::clone(log),
            }
        }
    }

    impl Entity for Recorder {
        fn body(&self) -> &Body {
            &self.body
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.body
        }

        fn kind(&self) -> EntityKind {
            EntityKind::Prop
        }

        fn depth(&self) -> i32 {
            self.depth
        }

        fn collidable(&self) -> bool {
            self.collidable
        }

        fn movable(&self) -> bool {
            self.movable
        }

        fn collide(&mut self, other: &mut dyn Entity, result: CollisionResult) {
            self.log
                .borrow_mut()
                .push((self.body.id(), other.id(), result));
            if self.kills_partner || self.kills == Some(other.id()) {
                other.body_mut().kill();
            }
        }
    }

    fn contact_log() -> ContactLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_render_order_scenario() {
        let log = contact_log();
        let mut world = World::default();

        // Spread far apart so nothing touches
        let mut make = |depth: i32, r: f32, theta: f32| {
            let mut recorder = Recorder::new(&log, r, theta);
            recorder.depth = depth;
            world.spawn(Box::new(recorder))
        };
        let id1 = make(10, 150.0, 0.0);
        let id2 = make(5, 999.0, 2.0);
        let id3 = make(10, 200.0, 4.0);
        assert_eq!((id1, id2, id3), (ObjectId(1), ObjectId(2), ObjectId(3)));

        tick(&mut world, 0.0);
        assert_eq!(world.ids(), vec![ObjectId(2), ObjectId(3), ObjectId(1)]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_render_order_id_breaks_ties() {
        let log = contact_log();
        let mut world = World::default();
        for theta in [3.0, 2.0, 1.0] {
            let mut recorder = Recorder::new(&log, 300.0, theta);
            recorder.collidable = false;
            world.spawn(Box::new(recorder));
        }
        // Reverse the table so sorting has to restore it
        world.objects.reverse();
        tick(&mut world, 0.0);
        assert_eq!(world.ids(), vec![ObjectId(1), ObjectId(2), ObjectId(3)]);
    }

    #[test]
    fn test_contact_dispatched_to_both_sides() {
        let log = contact_log();
        let mut world = World::default();
        let a = world.spawn(Box::new(Recorder::new(&log, 100.0, 0.0)));
        let b = world.spawn(Box::new(Recorder::new(&log, 110.0, 0.1)));

        let summary = tick(&mut world, 1.0);
        assert_eq!(summary.pairs_tested, 1);
        assert_eq!(summary.contacts, 1);

        let entries = log.borrow();
        assert_eq!(entries.len(), 2);
        let (self_a, other_a, result_a) = entries[0];
        let (self_b, other_b, result_b) = entries[1];
        assert_eq!((self_a, other_a), (a, b));
        assert_eq!((self_b, other_b), (b, a));
        assert_eq!(result_b, result_a.reverse());
        assert!(result_a.middle);

        // Both directions are remembered for next frame
        assert_eq!(world.history().result(a, b), result_a);
        assert_eq!(world.history().result(b, a), result_b);
    }

    #[test]
    fn test_immovable_pairs_are_skipped() {
        let log = contact_log();
        let mut world = World::default();
        for theta in [0.0, 0.05] {
            let mut recorder = Recorder::new(&log, 100.0, theta);
            recorder.movable = false;
            world.spawn(Box::new(recorder));
        }

        let summary = tick(&mut world, 1.0);
        assert_eq!(summary.pairs_tested, 0);
        assert!(log.borrow().is_empty());
        assert_eq!(world.history().len_results(), 0);
        // Bounds are still recorded
        assert_eq!(world.history().len_bounds(), 2);
    }

    #[test]
    fn test_non_collidable_objects_are_ignored() {
        let log = contact_log();
        let mut world = World::default();
        world.spawn(Box::new(Recorder::new(&log, 100.0, 0.0)));
        let mut ghost = Recorder::new(&log, 100.0, 0.0);
        ghost.collidable = false;
        let ghost_id = world.spawn(Box::new(ghost));

        tick(&mut world, 1.0);
        assert!(log.borrow().is_empty());
        assert_eq!(world.history().bounds(ghost_id), None);
    }

    #[test]
    fn test_death_stops_further_pairing() {
        let log = contact_log();
        let mut world = World::default();

        // A overlaps both B and C; B and C do not overlap each other
        let a = world.spawn(Box::new(Recorder::new(&log, 100.0, 0.0)));
        let mut killer = Recorder::new(&log, 100.0, 0.15);
        killer.kills_partner = true;
        let b = world.spawn(Box::new(killer));
        let c = world.spawn(Box::new(Recorder::new(&log, 100.0, -0.15)));

        let summary = tick(&mut world, 0.0);

        let entries = log.borrow();
        assert!(entries.iter().any(|&(me, other, _)| me == b && other == a));
        assert!(
            !entries
                .iter()
                .any(|&(me, other, _)| (me == c && other == a) || (me == a && other == c))
        );
        assert_eq!(summary.removed, 1);
        assert!(world.get(a).is_none());
        assert_eq!(world.len(), 2);
        assert!(world.get(c).is_some());
    }

    fn paired(entries: &[(ObjectId, ObjectId, CollisionResult)], x: ObjectId, y: ObjectId) -> bool {
        entries
            .iter()
            .any(|&(me, other, _)| (me, other) == (x, y) || (me, other) == (y, x))
    }

    #[test]
    fn test_partner_killed_skips_its_own_row() {
        let log = contact_log();
        let mut world = World::default();

        // All three overlap; A takes out B on their contact
        let mut killer = Recorder::new(&log, 100.0, 0.0);
        killer.kills = Some(ObjectId(2));
        let a = world.spawn(Box::new(killer));
        let b = world.spawn(Box::new(Recorder::new(&log, 100.0, 0.05)));
        let c = world.spawn(Box::new(Recorder::new(&log, 100.0, 0.1)));

        let summary = tick(&mut world, 0.0);

        let entries = log.borrow();
        let pairs: Vec<_> = entries.iter().map(|&(me, other, _)| (me, other)).collect();
        assert_eq!(pairs, vec![(a, b), (b, a), (a, c), (c, a)]);
        assert!(!paired(&entries, b, c));
        assert_eq!(summary.pairs_tested, 2);
        assert_eq!(summary.removed, 1);
        assert_eq!(world.ids(), vec![a, c]);
    }

    #[test]
    fn test_partner_killed_skipped_by_later_rows() {
        let log = contact_log();
        let mut world = World::default();

        // All three overlap; A takes out C before B gets to it
        let mut killer = Recorder::new(&log, 100.0, 0.0);
        killer.kills = Some(ObjectId(3));
        let a = world.spawn(Box::new(killer));
        let b = world.spawn(Box::new(Recorder::new(&log, 100.0, 0.05)));
        let c = world.spawn(Box::new(Recorder::new(&log, 100.0, 0.1)));

        let summary = tick(&mut world, 0.0);

        let entries = log.borrow();
        assert!(paired(&entries, a, b));
        assert!(paired(&entries, a, c));
        assert!(!paired(&entries, b, c));
        assert_eq!(summary.pairs_tested, 2);
        assert_eq!(world.ids(), vec![a, b]);
    }

    #[test]
    fn test_externally_killed_objects_sit_out() {
        let log = contact_log();
        let mut world = World::default();
        let mut mover = Recorder::new(&log, 100.0, 0.0);
        mover.body.velocity = PolarCoord::new(5.0, 0.0);
        let a = world.spawn(Box::new(mover));
        world.spawn(Box::new(Recorder::new(&log, 100.0, 0.05)));

        assert!(world.kill(a));
        let summary = tick(&mut world, 1.0);
        assert_eq!(summary.pairs_tested, 0);
        assert_eq!(summary.removed, 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_integration_and_previous_position() {
        let log = contact_log();
        let mut world = World::default();
        let mut recorder = Recorder::new(&log, 100.0, 0.0);
        recorder.body.velocity = PolarCoord::new(1.0, 0.01);
        recorder.body.acceleration = PolarCoord::new(1.0, 0.0);
        let id = world.spawn(Box::new(recorder));

        tick(&mut world, 1.0);
        let body = world.get(id).map(|o| o.body().clone()).unwrap();
        assert_eq!(body.velocity, PolarCoord::new(2.0, 0.01));
        assert_eq!(body.position, PolarCoord::new(102.0, 0.01));
        assert_eq!(body.previous_position, body.position);
        assert_eq!(world.frame(), 1);
    }

    #[test]
    fn test_lag_is_clamped() {
        let log = contact_log();
        let mut world = World::new(SimSettings {
            max_lag_factor: 2.0,
            ..Default::default()
        });
        let mut recorder = Recorder::new(&log, 100.0, 0.0);
        recorder.body.velocity = PolarCoord::new(1.0, 0.0);
        let id = world.spawn(Box::new(recorder));

        let summary = tick(&mut world, 50.0);
        assert_eq!(summary.lag, 2.0);
        assert_eq!(world.get(id).map(|o| o.body().position.r), Some(102.0));
    }

    #[test]
    fn test_hysteresis_across_frames() {
        let log = contact_log();
        let mut world = World::default();
        let mut ground = Recorder::new(&log, 380.0, 0.0);
        ground.movable = false;
        let ground_id = world.spawn(Box::new(ground));

        // Falls steadily into the ground and never gets pushed out
        let mut faller = Recorder::new(&log, 410.0, 0.0);
        faller.body.velocity = PolarCoord::new(-4.0, 0.0);
        let faller_id = world.spawn(Box::new(faller));

        let mut first_top = None;
        for frame in 0..12 {
            tick(&mut world, 1.0);
            let result = world.history().result(ground_id, faller_id);
            if result.top && first_top.is_none() {
                first_top = Some(frame);
            }
            if first_top.is_some() {
                // Sunk deep enough that no positional test fires, still on top
                assert!(result.top, "lost top contact at frame {frame}");
                assert!(result.middle);
            }
        }
        assert!(first_top.is_some());
    }

    #[test]
    fn test_bounds_recorded_after_response() {
        let mut world = World::default();
        world.spawn(Box::new(Platform::new(GROUND_RADIUS, 0.0, 1.0)));
        let walker = world.spawn(Box::new(Walker::new(
            PolarCoord::new(GROUND_RADIUS + 10.0, 0.5),
            Team::Player,
            0.0,
            GRAVITY,
        )));
        if let Some(w) = world.get_mut(walker) {
            w.body_mut().velocity.r = -3.0;
        }

        // Two frames in the air, lands on the third
        for _ in 0..3 {
            tick(&mut world, 1.0);
        }
        let recorded = world.history().bounds(walker);
        let actual = world.get(walker).map(|w| w.polar_bounds());
        assert_eq!(recorded, actual);
        assert_eq!(recorded.map(|b| b.bottom()), Some(GROUND_RADIUS));
    }

    #[test]
    fn test_walker_rests_on_ground() {
        let mut world = World::default();
        world.spawn(Box::new(Platform::new(GROUND_RADIUS, 0.0, 1.0)));
        let walker = world.spawn(Box::new(Walker::new(
            PolarCoord::new(GROUND_RADIUS + 40.0, 0.5),
            Team::Player,
            0.001,
            GRAVITY,
        )));

        for _ in 0..200 {
            tick(&mut world, 1.0);
        }
        let body = world.get(walker).map(|w| w.body().clone()).unwrap();
        assert!((body.position.r - GROUND_RADIUS).abs() < 1.0);
        assert!(body.position.theta > 0.5);
    }

    #[test]
    fn test_spawned_object_uses_current_bounds_as_previous() {
        let log = contact_log();
        let mut world = World::default();
        let mut ground = Recorder::new(&log, 380.0, 0.0);
        ground.movable = false;
        world.spawn(Box::new(ground));
        tick(&mut world, 1.0);

        // Spawned already overlapping with no history: middle only
        world.spawn(Box::new(Recorder::new(&log, 390.0, 0.0)));
        tick(&mut world, 0.0);
        let entries = log.borrow();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].2,
            CollisionResult::new(false, false, false, false, true)
        );
    }

    #[test]
    fn test_same_inputs_same_outcome() {
        let run = || {
            let log = contact_log();
            let mut world = World::default();
            for (i, theta) in [0.0f32, 0.12, 0.3, 0.41].into_iter().enumerate() {
                let mut recorder = Recorder::new(&log, 100.0 + i as f32 * 7.0, theta);
                recorder.body.velocity = PolarCoord::new(-1.0 + i as f32 * 0.5, 0.01 * i as f32);
                world.spawn(Box::new(recorder));
            }
            for _ in 0..30 {
                tick(&mut world, 1.0);
            }
            let contacts = log.borrow().clone();
            (world.snapshot(), contacts)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_pair_mut_returns_distinct_slots() {
        let mut values = [1, 2, 3, 4];
        let (a, b) = pair_mut(&mut values, 1, 3);
        std::mem::swap(a, b);
        assert_eq!(values, [1, 4, 3, 2]);
    }

    #[test]
    fn test_rect_bounds_match_recorder() {
        let log = contact_log();
        let recorder = Recorder::new(&log, 100.0, 1.0);
        assert_eq!(
            recorder.polar_bounds(),
            PolarRect::around(PolarCoord::new(100.0, 1.0), 20.0, 0.2)
        );
    }
}
