//! Core domain types: scroll zones and touch gestures.

pub mod touch;
pub mod zone;

pub use touch::{DragDirection, GesturePhase, TouchEvent};
pub use zone::{snap_target, SnapTarget, Zone, ZoneThresholds};
