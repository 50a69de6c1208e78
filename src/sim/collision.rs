//! Collision detection and side classification for polar rectangles
//!
//! The tricky part of the ring: frames are sampled discretely, so a fast
//! object can be half-way through another before the first overlapping frame
//! is seen. The side of contact is therefore decided from three signals:
//! where the pair was last frame, where each one is relative to the other's
//! previous bounds, and what the pair was classified as last frame (held for
//! as long as the relative velocity keeps them pressed together).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::polar::PolarCoord;
use super::rect::PolarRect;
use crate::closest_theta;

/// Which sides of object A touch object B
///
/// `middle` means the bounds intersect at all. The directional flags are
/// from A's point of view: `top` means B came down onto A's top edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionResult {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub middle: bool,
}

impl CollisionResult {
    /// No contact at all
    pub const NONE: Self = Self::new(false, false, false, false, false);

    pub const fn new(left: bool, right: bool, top: bool, bottom: bool, middle: bool) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            middle,
        }
    }

    /// Whether any flag is set
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom || self.middle
    }

    /// The same contact seen from B's side
    #[inline]
    pub fn reverse(&self) -> Self {
        Self::new(self.right, self.left, self.bottom, self.top, self.middle)
    }

    #[inline]
    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }

    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }
}

impl fmt::Display for CollisionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "[{}{}{}{}{}]",
            flag(self.left, 'L'),
            flag(self.right, 'R'),
            flag(self.top, 'T'),
            flag(self.bottom, 'B'),
            flag(self.middle, 'M'),
        )
    }
}

/// Check if two polar rectangles overlap (touching edges count)
///
/// Radially: some edge radius of one rectangle lies inside the other's band.
/// Angularly: some edge angle of one rectangle, moved onto the wrap nearest
/// the other's center, lies inside the other's span.
pub fn intersect(a: &PolarRect, b: &PolarRect) -> bool {
    let radial = a.contains_radius(b.top())
        || a.contains_radius(b.bottom())
        || b.contains_radius(a.top())
        || b.contains_radius(a.bottom());
    if !radial {
        return false;
    }

    a.contains_theta(b.start_theta())
        || a.contains_theta(b.end_theta())
        || b.contains_theta(a.start_theta())
        || b.contains_theta(a.end_theta())
}

/// Whether `upper` sits entirely on or above the top edge of `lower`
#[inline]
pub fn above(upper: &PolarRect, lower: &PolarRect) -> bool {
    upper.bottom() >= lower.top()
}

/// Whether `ahead` starts at or past the end of `behind` (increasing theta)
#[inline]
pub fn aside(ahead: &PolarRect, behind: &PolarRect) -> bool {
    let edge = behind.end_theta();
    closest_theta(ahead.start_theta(), edge) >= edge
}

/// Classify the contact between A and B for this frame
///
/// `prev_a`/`prev_b` are last frame's bounds (pass the current bounds when
/// there is no history), `prev` is last frame's result for the ordered pair
/// (A, B), and `relative_velocity` is B's velocity minus A's.
///
/// Top/bottom contacts win over left/right: when a vertical side is set the
/// horizontal flags are cleared.
pub fn test_collision(
    a: &PolarRect,
    b: &PolarRect,
    prev_a: &PolarRect,
    prev_b: &PolarRect,
    prev: CollisionResult,
    relative_velocity: PolarCoord,
) -> CollisionResult {
    if !intersect(a, b) {
        return CollisionResult::NONE;
    }

    let closing_r = relative_velocity.r;
    let closing_theta = relative_velocity.theta;

    let top = above(prev_b, a) || above(b, prev_a) || (prev.top && closing_r <= 0.0);
    let bottom = above(prev_a, b) || above(a, prev_b) || (prev.bottom && closing_r >= 0.0);
    let mut right =
        aside(prev_b, a) || aside(b, prev_a) || (prev.right && closing_theta <= 0.0);
    let mut left = aside(prev_a, b) || aside(a, prev_b) || (prev.left && closing_theta >= 0.0);

    if top || bottom {
        left = false;
        right = false;
    }

    CollisionResult::new(left, right, top, bottom, true)
}
