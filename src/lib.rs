//! Parallax snap scroll controller.
//!
//! A scroll view whose top is a cover image snaps between three resting
//! positions (image expanded, image peeking, image collapsed) when a drag
//! ends inside the header, and refuses to fling back over the image.
//!
//! Pure core: [`model`] and [`controller`]. Impure shell: [`view`] with its
//! [`view_state`], plus [`config`] and [`logging`].

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod view;
pub mod view_state;

pub use controller::{
    downgrade_listener, ParallaxScrollController, ScrollListener, ScrollSurface, TouchResponse,
};
pub use model::{DragDirection, GesturePhase, SnapTarget, TouchEvent, Zone, ZoneThresholds};

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
