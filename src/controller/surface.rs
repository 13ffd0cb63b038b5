//! The scrollable surface driven by the controller.

use crate::model::TouchEvent;

/// Result of the surface's default touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchResponse {
    /// Whether the surface consumed the event.
    pub handled: bool,
    /// Release velocity (offset units per second) the surface wants to fling
    /// with. The controller routes this through its fling guard instead of
    /// letting the surface start momentum on its own.
    pub fling_velocity: Option<i32>,
}

impl TouchResponse {
    /// Event consumed, no fling.
    pub fn handled() -> Self {
        Self {
            handled: true,
            fling_velocity: None,
        }
    }

    /// Event not consumed.
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Event consumed and a fling requested.
    pub fn fling(velocity_y: i32) -> Self {
        Self {
            handled: true,
            fling_velocity: Some(velocity_y),
        }
    }
}

/// Platform scroll widget wrapped by the controller.
///
/// Implementations own the actual offset and its animations. The controller
/// only reads the offset and expresses intent through these calls.
pub trait ScrollSurface {
    /// Current vertical offset.
    fn scroll_y(&self) -> i32;

    /// Jump to `scroll_y` without animation.
    fn scroll_to(&mut self, scroll_y: i32);

    /// Animate to `scroll_y`.
    fn smooth_scroll_to(&mut self, scroll_y: i32);

    /// Start native momentum scrolling.
    fn fling(&mut self, velocity_y: i32);

    /// Stop momentum now and treat the next input as a fresh gesture.
    fn cancel_gesture(&mut self);

    /// Default interception decision for an event headed to the content.
    fn intercept_touch_event(&mut self, event: &TouchEvent) -> bool;

    /// Default drag handling for an event the controller did not consume.
    fn default_touch_event(&mut self, event: &TouchEvent) -> TouchResponse;
}
