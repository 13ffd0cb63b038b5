//! Terminal mouse events translated into touch gestures.

use crate::model::{GesturePhase, TouchEvent};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Wheel direction, in offset terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelScroll {
    /// Towards the top of the document.
    Up,
    /// Towards the end of the document.
    Down,
}

/// What a mouse event means to the scroll view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Left-button press, drag or release.
    Touch(TouchEvent),
    /// Mouse wheel notch.
    Wheel(WheelScroll),
}

/// Translate a mouse event at `now_ms`. Returns `None` for events the view
/// ignores (other buttons, plain moves).
pub fn pointer_input(mouse: &MouseEvent, now_ms: u64) -> Option<PointerInput> {
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => GesturePhase::Down,
        MouseEventKind::Drag(MouseButton::Left) => GesturePhase::Move,
        MouseEventKind::Up(MouseButton::Left) => GesturePhase::Up,
        MouseEventKind::ScrollUp => return Some(PointerInput::Wheel(WheelScroll::Up)),
        MouseEventKind::ScrollDown => return Some(PointerInput::Wheel(WheelScroll::Down)),
        _ => return None,
    };
    Some(PointerInput::Touch(TouchEvent::new(
        phase,
        f32::from(mouse.column),
        f32::from(mouse.row),
        now_ms,
    )))
}
