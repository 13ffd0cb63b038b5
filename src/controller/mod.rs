//! Parallax scroll controller (pure core).
//!
//! Owns the gesture state machine of a scroll view whose top is a cover
//! image. The controller never touches a platform widget directly: it drives
//! a [`ScrollSurface`] and reports to an optional [`ScrollListener`]. A host
//! adapter forwards the platform's scroll, touch, fling and layout callbacks
//! into the `on_*` methods below.

pub mod listener;
pub mod surface;

pub use listener::{downgrade_listener, ScrollListener};
pub use surface::{ScrollSurface, TouchResponse};

use crate::model::{DragDirection, GesturePhase, TouchEvent, Zone, ZoneThresholds};
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Snap-to-position scroll controller.
///
/// Generic over the surface so hosts and tests can plug in their own.
/// Holds `Rc`/`Weak` state and is therefore confined to one thread.
pub struct ParallaxScrollController<S> {
    surface: S,
    thresholds: ZoneThresholds,
    listener: Option<Weak<dyn ScrollListener>>,
    /// Pointer Y recorded on gesture-down; cleared when the gesture ends.
    gesture_start_y: Option<f32>,
    /// Offset captured on the last touch event.
    last_touch_offset: i32,
    /// One-shot initial scroll, run after the first layout.
    pending_initial_scroll: Option<i32>,
}

impl<S> std::fmt::Debug for ParallaxScrollController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallaxScrollController")
            .field("thresholds", &self.thresholds)
            .field(
                "has_listener",
                &self.listener.as_ref().is_some_and(|l| l.strong_count() > 0),
            )
            .field("gesture_start_y", &self.gesture_start_y)
            .field("last_touch_offset", &self.last_touch_offset)
            .field("pending_initial_scroll", &self.pending_initial_scroll)
            .finish_non_exhaustive()
    }
}

impl<S: ScrollSurface> ParallaxScrollController<S> {
    /// Create a controller for a display `display_width` units wide.
    ///
    /// The initial scroll to the peek offset is deferred until the host
    /// reports its first layout via [`Self::on_layout_complete`], since the
    /// content height is unknown before then.
    pub fn new(surface: S, display_width: i32) -> Self {
        let thresholds = ZoneThresholds::from_display_width(display_width);
        debug!(
            display_width,
            image_full_height = thresholds.image_full_height(),
            image_height = thresholds.image_height(),
            "Parallax controller created"
        );
        Self {
            surface,
            thresholds,
            listener: None,
            gesture_start_y: None,
            last_touch_offset: 0,
            pending_initial_scroll: Some(thresholds.peek_offset()),
        }
    }

    /// Replace the listener. `None` clears the slot.
    pub fn set_listener(&mut self, listener: Option<Weak<dyn ScrollListener>>) {
        self.listener = listener;
    }

    /// Whether a live listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener().is_some()
    }

    fn listener(&self) -> Option<Rc<dyn ScrollListener>> {
        self.listener.as_ref().and_then(Weak::upgrade)
    }

    /// Run the deferred initial scroll. Returns true on the call that ran it.
    pub fn on_layout_complete(&mut self) -> bool {
        match self.pending_initial_scroll.take() {
            Some(target) => {
                debug!(target, "Applying initial scroll after first layout");
                self.surface.scroll_to(target);
                true
            }
            None => false,
        }
    }

    /// Handle a change of the surface offset from `old_scroll_y` to
    /// `new_scroll_y`.
    ///
    /// Momentum that carries the view from the content zone back over the
    /// image boundary is stopped here.
    pub fn on_scroll_changed(&mut self, new_scroll_y: i32, old_scroll_y: i32) {
        let Some(listener) = self.listener() else {
            return;
        };

        if self
            .thresholds
            .crosses_into_header(new_scroll_y, old_scroll_y)
        {
            debug!(new_scroll_y, old_scroll_y, "Stopping fling at image boundary");
            self.surface.cancel_gesture();
        }

        listener.on_scroll_changed(new_scroll_y);
    }

    /// Interception hook: remembers where a gesture started.
    ///
    /// Scrolling itself is left to the surface's default interception.
    pub fn on_intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        if self.has_listener() {
            match event.phase {
                GesturePhase::Down => self.gesture_start_y = Some(event.y),
                GesturePhase::Move | GesturePhase::Up | GesturePhase::Cancel => {}
            }
        }
        self.surface.intercept_touch_event(event)
    }

    /// Touch handling: snaps the offset when a gesture ends in the header.
    ///
    /// Returns true when the event was consumed. A snap always consumes the
    /// event; otherwise the surface's default handling decides.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        self.last_touch_offset = self.surface.scroll_y();

        let Some(listener) = self.listener() else {
            return self.dispatch_default_touch(event);
        };

        match event.phase {
            GesturePhase::Down => listener.on_down_motion_event(),
            GesturePhase::Move => {}
            GesturePhase::Up | GesturePhase::Cancel => {
                let snapped = self.settle_gesture(event);
                listener.on_up_or_cancel_motion_event();
                if snapped {
                    return true;
                }
            }
        }

        self.dispatch_default_touch(event)
    }

    /// Forward a fling to the surface only once past the image.
    ///
    /// Returns true if the fling was forwarded.
    pub fn fling(&mut self, velocity_y: i32) -> bool {
        let scroll_y = self.surface.scroll_y();
        if self.thresholds.allows_fling(scroll_y) {
            trace!(scroll_y, velocity_y, "Fling forwarded");
            self.surface.fling(velocity_y);
            true
        } else {
            trace!(scroll_y, velocity_y, "Fling swallowed inside header");
            false
        }
    }

    /// Pick and start the snap for a gesture ending with `event`.
    fn settle_gesture(&mut self, event: &TouchEvent) -> bool {
        let diff_y = match self.gesture_start_y.take() {
            Some(start_y) => event.y - start_y,
            None => {
                debug!(phase = ?event.phase, "Gesture ended without a recorded start");
                0.0
            }
        };
        let direction = DragDirection::from_delta(diff_y);
        let scroll_y = self.last_touch_offset;

        match self.thresholds.snap_offset(scroll_y, direction) {
            Some(target) => {
                debug!(
                    scroll_y,
                    diff_y,
                    zone = self.thresholds.classify(scroll_y).label(),
                    target,
                    "Snapping"
                );
                self.surface.smooth_scroll_to(target);
                true
            }
            None => false,
        }
    }

    fn dispatch_default_touch(&mut self, event: &TouchEvent) -> bool {
        let response = self.surface.default_touch_event(event);
        if let Some(velocity_y) = response.fling_velocity {
            self.fling(velocity_y);
        }
        response.handled
    }

    /// Zone thresholds, fixed at construction.
    pub fn thresholds(&self) -> ZoneThresholds {
        self.thresholds
    }

    /// Zone of the surface's current offset.
    pub fn zone(&self) -> Zone {
        self.thresholds.classify(self.surface.scroll_y())
    }

    /// Offset captured on the most recent touch event.
    pub fn last_touch_offset(&self) -> i32 {
        self.last_touch_offset
    }

    /// Pointer Y of the gesture in progress, if one was recorded.
    pub fn gesture_start_y(&self) -> Option<f32> {
        self.gesture_start_y
    }

    /// Target of the initial scroll while it is still pending.
    pub fn pending_initial_scroll(&self) -> Option<i32> {
        self.pending_initial_scroll
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The wrapped surface, mutably (for host-driven animation ticks).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
