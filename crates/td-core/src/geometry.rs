//! Integer rectangle geometry and distance helpers.
//!
//! Rectangles are half-open: `min` is inclusive, `max` is exclusive.
//! All functions are pure.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle with its top-left corner at `origin` and the given size.
    pub fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Rectangle of the given size centered on `center` (truncating).
    pub fn centered_on(center: IVec2, size: IVec2) -> Self {
        Self::from_origin_size(center - size / 2, size)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Shift by an offset.
    pub fn translate(&self, offset: IVec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Pad every side by `amount` pixels.
    pub fn expand(&self, amount: i32) -> Self {
        let pad = IVec2::splat(amount);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Non-empty intersection. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Fully contained in `bounds`. An empty rect is within anything.
    pub fn within(&self, bounds: &Rect) -> bool {
        self.is_empty()
            || (bounds.min.x <= self.min.x
                && self.max.x <= bounds.max.x
                && bounds.min.y <= self.min.y
                && self.max.y <= bounds.max.y)
    }

    pub fn contains_point(&self, point: IVec2) -> bool {
        self.min.x <= point.x
            && point.x < self.max.x
            && self.min.y <= point.y
            && point.y < self.max.y
    }

    pub fn midpoint(&self) -> IVec2 {
        midpoint_rect(self)
    }
}

/// Integer center of a rectangle.
pub fn midpoint_rect(rect: &Rect) -> IVec2 {
    (rect.min + rect.max) / 2
}

/// Euclidean distance between two points.
pub fn distance_points(a: IVec2, b: IVec2) -> f64 {
    a.as_dvec2().distance(b.as_dvec2())
}

/// Center-to-center distance between two rectangles.
pub fn distance_rects(a: &Rect, b: &Rect) -> f64 {
    distance_points(midpoint_rect(a), midpoint_rect(b))
}

/// Clamp `value` into `[lo, hi]`. When the range is inverted, `lo` wins.
pub fn clamp_i32(value: i32, lo: i32, hi: i32) -> i32 {
    value.min(hi).max(lo)
}

/// Linear step toward `end` from `start` that covers `speed` pixels per tick.
/// Returns zero for a degenerate path.
pub fn step_along(start: IVec2, end: IVec2, speed: i32) -> IVec2 {
    let delta = (end - start).as_dvec2();
    let dist = delta.length();
    if dist == 0.0 {
        return IVec2::ZERO;
    }
    let ratio = dist / speed as f64;
    let step = DVec2::new((delta.x / ratio).ceil(), (delta.y / ratio).ceil());
    step.as_ivec2()
}
