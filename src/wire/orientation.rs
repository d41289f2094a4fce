//! horizontal and vertical layout rules

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::transforms::{PxPoint, PxRect, PxSize};

/// orientation specific geometry of a wire
#[enum_dispatch]
pub trait Layout {
    /// box covered by a wire from `start` to `end`. `offset` picks which endpoint anchors
    /// the box across the wire's direction.
    fn layout(&self, start: PxPoint, end: PxPoint, offset: bool, thickness: i32) -> PxRect;
    /// row (horizontal) or column (vertical) a rendered box sits on
    fn track(&self, rect: &PxRect) -> i32;
    /// rendered size across the wire's direction
    fn breadth(&self, rect: &PxRect) -> i32;
    /// endpoints covering both spans. the cross coordinates of `this` are kept.
    fn span(&self, this: (PxPoint, PxPoint), other: (PxPoint, PxPoint)) -> (PxPoint, PxPoint);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Horizontal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Vertical;

/// distance between two coordinates, saturating at i32::MAX
fn extent(a: i32, b: i32) -> i32 {
    i32::try_from(a.abs_diff(b)).unwrap_or(i32::MAX)
}

fn min_max(vals: [i32; 4]) -> (i32, i32) {
    vals.into_iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

impl Layout for Horizontal {
    fn layout(&self, start: PxPoint, end: PxPoint, offset: bool, thickness: i32) -> PxRect {
        let top = if offset { end.y } else { start.y };
        let left = start.x.min(end.x);
        let width = extent(start.x, end.x);
        PxRect::new(PxPoint::new(left, top), PxSize::new(width, thickness))
    }
    fn track(&self, rect: &PxRect) -> i32 {
        rect.origin.y
    }
    fn breadth(&self, rect: &PxRect) -> i32 {
        rect.size.height
    }
    fn span(&self, this: (PxPoint, PxPoint), other: (PxPoint, PxPoint)) -> (PxPoint, PxPoint) {
        let (lo, hi) = min_max([this.0.x, this.1.x, other.0.x, other.1.x]);
        (PxPoint::new(lo, this.0.y), PxPoint::new(hi, this.1.y))
    }
}

impl Layout for Vertical {
    fn layout(&self, start: PxPoint, end: PxPoint, offset: bool, thickness: i32) -> PxRect {
        let left = if offset { end.x } else { start.x };
        // unlike the horizontal row, the top does not follow `offset`
        let top = if end.y < start.y { end.y } else { start.y };
        let height = extent(start.y, end.y);
        PxRect::new(PxPoint::new(left, top), PxSize::new(thickness, height))
    }
    fn track(&self, rect: &PxRect) -> i32 {
        rect.origin.x
    }
    fn breadth(&self, rect: &PxRect) -> i32 {
        rect.size.width
    }
    fn span(&self, this: (PxPoint, PxPoint), other: (PxPoint, PxPoint)) -> (PxPoint, PxPoint) {
        let (lo, hi) = min_max([this.0.y, this.1.y, other.0.y, other.1.y]);
        (PxPoint::new(this.0.x, lo), PxPoint::new(this.1.x, hi))
    }
}

/// an enum to unify the two wire directions
#[enum_dispatch(Layout)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const HORIZONTAL: Orientation = Orientation::Horizontal(Horizontal);
    pub const VERTICAL: Orientation = Orientation::Vertical(Vertical);

    /// direction of the axis aligned segment `start`-`end`, None if oblique.
    /// zero length segments count as horizontal.
    pub fn between(start: PxPoint, end: PxPoint) -> Option<Orientation> {
        if start.y == end.y {
            Some(Orientation::HORIZONTAL)
        } else if start.x == end.x {
            Some(Orientation::VERTICAL)
        } else {
            None
        }
    }
}
