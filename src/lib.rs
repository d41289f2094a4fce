//! wire segments for the schematic editor: layout on a rendering surface,
//! hover voltage tooltips, keyboard deletion and merging of collinear wires.

pub mod config;
pub mod events;
pub mod manager;
pub mod surface;
pub mod transforms;
pub mod wire;

pub use config::{ConfigError, WireConfig};
pub use events::{EventKind, EventStatus, Key, WireEvent};
pub use manager::{WireId, WireManager, WireRegistry};
pub use surface::{HeadlessSurface, RcRSurface, RenderSurface};
pub use transforms::{snap, snap_to, PxPoint, PxRect};
pub use wire::{route, Orientation, Segment, Wire, WireContext, WireError, WireSnapshot};
