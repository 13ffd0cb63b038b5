//! Touch gesture events delivered to the scroll controller.

/// Phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// Finger (or pointer button) went down.
    Down,
    /// Pointer moved while down.
    Move,
    /// Finger lifted.
    Up,
    /// Gesture aborted by the host.
    Cancel,
}

/// A single touch event in surface coordinates.
///
/// `y` grows downward. `timestamp_ms` comes from a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Gesture phase.
    pub phase: GesturePhase,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create an event.
    pub fn new(phase: GesturePhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Down event at `(x, y)`.
    pub fn down(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(GesturePhase::Down, x, y, timestamp_ms)
    }

    /// Move event at `(x, y)`.
    pub fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(GesturePhase::Move, x, y, timestamp_ms)
    }

    /// Up event at `(x, y)`.
    pub fn up(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(GesturePhase::Up, x, y, timestamp_ms)
    }

    /// Cancel event at `(x, y)`.
    pub fn cancel(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(GesturePhase::Cancel, x, y, timestamp_ms)
    }

    /// True for up and cancel, the phases that end a gesture.
    pub fn ends_gesture(&self) -> bool {
        matches!(self.phase, GesturePhase::Up | GesturePhase::Cancel)
    }
}

/// Direction of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragDirection {
    /// Finger moved down the screen (`diff_y > 0`), pulling the header open.
    Down,
    /// Finger moved up or not at all (`diff_y <= 0`).
    Up,
}

impl DragDirection {
    /// Classify a vertical pointer delta. Zero counts as up.
    pub fn from_delta(diff_y: f32) -> Self {
        if diff_y > 0.0 {
            DragDirection::Down
        } else {
            DragDirection::Up
        }
    }
}
