//! View-state layer of the terminal shell.
//!
//! The simulated scroll surface with its animations, and the host listener
//! whose state the status bar shows.

pub mod animation;
pub mod hud;
pub mod surface;

pub use animation::{Fling, ScrollAnimation, Tween};
pub use hud::{HudEvent, HudListener};
pub use surface::{ScrollChange, SimulatedSurface, SurfaceConfig};
