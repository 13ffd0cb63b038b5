//! Listener that collects notifications for the status bar.

use crate::controller::ScrollListener;
use std::cell::Cell;

/// Most recent listener notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HudEvent {
    /// Nothing received yet.
    #[default]
    None,
    /// Scroll offset changed.
    Scroll,
    /// Gesture started.
    Down,
    /// Gesture ended.
    UpOrCancel,
}

impl HudEvent {
    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            HudEvent::None => "-",
            HudEvent::Scroll => "scroll",
            HudEvent::Down => "down",
            HudEvent::UpOrCancel => "up",
        }
    }
}

/// Host-side listener the terminal shell registers with the controller.
#[derive(Debug, Default)]
pub struct HudListener {
    scroll_y: Cell<i32>,
    gestures: Cell<u32>,
    last_event: Cell<HudEvent>,
}

impl HudListener {
    /// Last offset reported.
    pub fn scroll_y(&self) -> i32 {
        self.scroll_y.get()
    }

    /// Number of gestures that have ended.
    pub fn gestures(&self) -> u32 {
        self.gestures.get()
    }

    /// Most recent notification.
    pub fn last_event(&self) -> HudEvent {
        self.last_event.get()
    }
}

impl ScrollListener for HudListener {
    fn on_scroll_changed(&self, scroll_y: i32) {
        self.scroll_y.set(scroll_y);
        self.last_event.set(HudEvent::Scroll);
    }

    fn on_down_motion_event(&self) {
        self.last_event.set(HudEvent::Down);
    }

    fn on_up_or_cancel_motion_event(&self) {
        self.gestures.set(self.gestures.get().saturating_add(1));
        self.last_event.set(HudEvent::UpOrCancel);
    }
}
