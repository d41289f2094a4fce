use serde::{Deserialize, Serialize};

use super::Orientation;
use crate::transforms::PxPoint;

/// an axis aligned leg of a routed connection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Segment {
    pub orientation: Orientation,
    pub start: PxPoint,
    pub end: PxPoint,
}

/// split the connection `src`-`dst` into horizontal and vertical legs.
/// oblique connections go vertically first, turning at (src.x, dst.y).
pub fn route(src: PxPoint, dst: PxPoint) -> Vec<Segment> {
    match (src.x == dst.x, src.y == dst.y) {
        (true, true) => vec![],
        (false, true) => vec![Segment {
            orientation: Orientation::HORIZONTAL,
            start: src,
            end: dst,
        }],
        (true, false) => vec![Segment {
            orientation: Orientation::VERTICAL,
            start: src,
            end: dst,
        }],
        (false, false) => {
            let corner = PxPoint::new(src.x, dst.y);
            vec![
                Segment {
                    orientation: Orientation::VERTICAL,
                    start: src,
                    end: corner,
                },
                Segment {
                    orientation: Orientation::HORIZONTAL,
                    start: corner,
                    end: dst,
                },
            ]
        }
    }
}
