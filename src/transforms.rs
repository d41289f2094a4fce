//! types and constants facillitating wire geometry and grid snapping

use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote the i32 pixel space the surface lays boxes out in
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct PixelSpace;

/// PixelSpace Point
pub type PxPoint = euclid::Point2D<i32, PixelSpace>;
/// PixelSpace Vector
pub type PxVec = euclid::Vector2D<i32, PixelSpace>;
/// PixelSpace Size
pub type PxSize = euclid::Size2D<i32, PixelSpace>;
/// PixelSpace Rect, origin is (left, top), size is (width, height)
pub type PxRect = euclid::Rect<i32, PixelSpace>;

/// spacing of the editor grid in pixels
pub const GRID_UNIT: i32 = 20;

/// snap a raw (x, y) pair onto the editor grid
pub fn snap(x: f64, y: f64) -> PxPoint {
    snap_to(x, y, GRID_UNIT)
}

/// snap a raw (x, y) pair onto a grid of spacing `unit`, each axis independently.
/// halves round toward positive infinity. `unit` must be positive.
/// results are clamped to the outermost grid lines within half the i32 range.
pub fn snap_to(x: f64, y: f64, unit: i32) -> PxPoint {
    debug_assert!(unit > 0, "grid unit must be positive");
    let u = f64::from(unit);
    let limit = f64::from(i32::MAX / 2 / unit * unit);
    let round = |v: f64| ((v / u + 0.5).floor() * u).clamp(-limit, limit) as i32;
    PxPoint::new(round(x), round(y))
}
