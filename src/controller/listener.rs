//! Observer notified by the scroll controller.

use std::rc::{Rc, Weak};

/// Receives scroll and gesture notifications from a
/// [`ParallaxScrollController`](super::ParallaxScrollController).
///
/// Notifications are fire-and-forget. Methods take `&self` because the
/// controller only holds a weak reference; implementations needing mutation
/// use interior mutability.
pub trait ScrollListener {
    /// The scroll offset changed to `scroll_y`.
    fn on_scroll_changed(&self, scroll_y: i32);

    /// A gesture started.
    fn on_down_motion_event(&self);

    /// A gesture ended (lifted or cancelled).
    fn on_up_or_cancel_motion_event(&self);
}

/// Downgrade an owned listener into the weak handle the controller stores.
pub fn downgrade_listener<L>(listener: &Rc<L>) -> Weak<dyn ScrollListener>
where
    L: ScrollListener + 'static,
{
    let weak: Weak<L> = Rc::downgrade(listener);
    weak
}
