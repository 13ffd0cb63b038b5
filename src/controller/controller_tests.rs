//! Tests for the parallax scroll controller.
//!
//! A recording surface stands in for the platform widget so each test can
//! assert exactly which scroll requests the controller made.

use super::*;
use crate::model::TouchEvent;
use std::cell::RefCell;
use std::rc::Rc;

// ===== Test Doubles =====

#[derive(Debug, Clone, PartialEq)]
enum SurfaceCall {
    ScrollTo(i32),
    SmoothScrollTo(i32),
    Fling(i32),
    CancelGesture,
    Intercept(GesturePhase),
    DefaultTouch(GesturePhase),
}

#[derive(Debug, Default)]
struct RecordingSurface {
    scroll_y: i32,
    calls: Vec<SurfaceCall>,
    /// Response returned from default touch handling.
    response: TouchResponse,
}

impl RecordingSurface {
    fn at(scroll_y: i32) -> Self {
        Self {
            scroll_y,
            ..Self::default()
        }
    }
}

impl ScrollSurface for RecordingSurface {
    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn scroll_to(&mut self, scroll_y: i32) {
        self.scroll_y = scroll_y;
        self.calls.push(SurfaceCall::ScrollTo(scroll_y));
    }

    fn smooth_scroll_to(&mut self, scroll_y: i32) {
        self.calls.push(SurfaceCall::SmoothScrollTo(scroll_y));
    }

    fn fling(&mut self, velocity_y: i32) {
        self.calls.push(SurfaceCall::Fling(velocity_y));
    }

    fn cancel_gesture(&mut self) {
        self.calls.push(SurfaceCall::CancelGesture);
    }

    fn intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        self.calls.push(SurfaceCall::Intercept(event.phase));
        false
    }

    fn default_touch_event(&mut self, event: &TouchEvent) -> TouchResponse {
        self.calls.push(SurfaceCall::DefaultTouch(event.phase));
        self.response
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Notification {
    Scroll(i32),
    Down,
    UpOrCancel,
}

#[derive(Debug, Default)]
struct RecordingListener {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingListener {
    fn seen(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }
}

impl ScrollListener for RecordingListener {
    fn on_scroll_changed(&self, scroll_y: i32) {
        self.seen.borrow_mut().push(Notification::Scroll(scroll_y));
    }

    fn on_down_motion_event(&self) {
        self.seen.borrow_mut().push(Notification::Down);
    }

    fn on_up_or_cancel_motion_event(&self) {
        self.seen.borrow_mut().push(Notification::UpOrCancel);
    }
}

// ===== Helpers =====

/// Display width 400 gives image_full_height 600 and image_height 200.
const WIDTH: i32 = 400;

fn controller_at(scroll_y: i32) -> ParallaxScrollController<RecordingSurface> {
    ParallaxScrollController::new(RecordingSurface::at(scroll_y), WIDTH)
}

fn with_listener(
    scroll_y: i32,
) -> (
    ParallaxScrollController<RecordingSurface>,
    Rc<RecordingListener>,
) {
    let mut controller = controller_at(scroll_y);
    let listener = Rc::new(RecordingListener::default());
    controller.set_listener(Some(downgrade_listener(&listener)));
    (controller, listener)
}

/// Run a full down/up gesture that drags by `diff_y`, returning the up result.
fn drag(controller: &mut ParallaxScrollController<RecordingSurface>, diff_y: f32) -> bool {
    let down = TouchEvent::down(10.0, 100.0, 0);
    controller.on_intercept_touch_event(&down);
    controller.on_touch_event(&down);
    let up = TouchEvent::up(10.0, 100.0 + diff_y, 50);
    controller.on_intercept_touch_event(&up);
    controller.on_touch_event(&up)
}

fn smooth_scrolls(controller: &ParallaxScrollController<RecordingSurface>) -> Vec<i32> {
    controller
        .surface()
        .calls
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::SmoothScrollTo(y) => Some(*y),
            _ => None,
        })
        .collect()
}

// ===== Construction =====

#[test]
fn new_computes_thresholds_from_display_width() {
    let controller = controller_at(0);
    let thresholds = controller.thresholds();
    assert_eq!(thresholds.image_full_height(), 600);
    assert_eq!(thresholds.image_height(), 200);
}

#[test]
fn initial_scroll_is_deferred_until_layout() {
    let controller = controller_at(0);
    assert_eq!(controller.pending_initial_scroll(), Some(400));
    assert!(
        controller.surface().calls.is_empty(),
        "Constructor must not scroll before layout"
    );
}

#[test]
fn layout_complete_runs_initial_scroll_exactly_once() {
    let mut controller = controller_at(0);

    assert!(controller.on_layout_complete());
    assert!(!controller.on_layout_complete());
    assert!(!controller.on_layout_complete());

    assert_eq!(controller.surface().calls, vec![SurfaceCall::ScrollTo(400)]);
    assert_eq!(controller.surface().scroll_y(), 400);
    assert_eq!(controller.pending_initial_scroll(), None);
}

// ===== Snap Table =====

#[test]
fn reveal_zone_drag_down_snaps_to_top() {
    let (mut controller, _listener) = with_listener(100);
    assert!(drag(&mut controller, 5.0));
    assert_eq!(smooth_scrolls(&controller), vec![0]);
}

#[test]
fn reveal_zone_drag_up_snaps_to_peek() {
    let (mut controller, _listener) = with_listener(100);
    assert!(drag(&mut controller, -5.0));
    assert_eq!(smooth_scrolls(&controller), vec![400]);
}

#[test]
fn peek_zone_drag_down_snaps_to_top() {
    let (mut controller, _listener) = with_listener(500);
    assert!(drag(&mut controller, 5.0));
    assert_eq!(smooth_scrolls(&controller), vec![0]);
}

#[test]
fn peek_zone_drag_up_snaps_to_collapsed() {
    let (mut controller, _listener) = with_listener(500);
    assert!(drag(&mut controller, -5.0));
    assert_eq!(smooth_scrolls(&controller), vec![600]);
}

#[test]
fn zero_drag_counts_as_drag_up() {
    let (mut controller, _listener) = with_listener(500);
    assert!(drag(&mut controller, 0.0));
    assert_eq!(smooth_scrolls(&controller), vec![600]);
}

#[test]
fn content_zone_never_snaps_and_defers_to_surface() {
    for diff in [5.0, -5.0] {
        let (mut controller, _listener) = with_listener(700);
        let consumed = drag(&mut controller, diff);
        assert!(!consumed, "Default surface response is not handled");
        assert!(smooth_scrolls(&controller).is_empty());
        assert_eq!(
            controller.surface().calls.last(),
            Some(&SurfaceCall::DefaultTouch(GesturePhase::Up))
        );
    }
}

#[test]
fn zone_boundaries_pick_the_upper_zone() {
    let (mut controller, _listener) = with_listener(400);
    drag(&mut controller, -1.0);
    assert_eq!(smooth_scrolls(&controller), vec![600], "400 is in the peek zone");

    let (mut controller, _listener) = with_listener(600);
    drag(&mut controller, -1.0);
    assert!(smooth_scrolls(&controller).is_empty(), "600 is in the content zone");
}

#[test]
fn snap_consumes_event_without_default_handling() {
    let (mut controller, _listener) = with_listener(100);
    drag(&mut controller, 5.0);
    assert!(!controller
        .surface()
        .calls
        .contains(&SurfaceCall::DefaultTouch(GesturePhase::Up)));
}

#[test]
fn cancel_snaps_like_up() {
    let (mut controller, listener) = with_listener(500);
    let down = TouchEvent::down(0.0, 50.0, 0);
    controller.on_intercept_touch_event(&down);
    controller.on_touch_event(&down);
    let cancel = TouchEvent::cancel(0.0, 80.0, 10);
    assert!(controller.on_touch_event(&cancel));
    assert_eq!(smooth_scrolls(&controller), vec![0]);
    assert_eq!(listener.seen(), vec![Notification::Down, Notification::UpOrCancel]);
}

#[test]
fn snap_uses_offset_captured_at_touch_time() {
    let (mut controller, _listener) = with_listener(100);
    let down = TouchEvent::down(0.0, 50.0, 0);
    controller.on_intercept_touch_event(&down);
    controller.on_touch_event(&down);

    controller.surface_mut().scroll_y = 550;
    controller.on_touch_event(&TouchEvent::up(0.0, 40.0, 10));

    assert_eq!(controller.last_touch_offset(), 550);
    assert_eq!(smooth_scrolls(&controller), vec![600]);
}

// ===== Listener Notifications =====

#[test]
fn up_notifies_listener_in_every_zone() {
    for scroll_y in [100, 500, 700] {
        let (mut controller, listener) = with_listener(scroll_y);
        drag(&mut controller, -3.0);
        assert_eq!(
            listener.seen(),
            vec![Notification::Down, Notification::UpOrCancel],
            "scroll_y = {scroll_y}"
        );
    }
}

#[test]
fn move_events_do_not_notify() {
    let (mut controller, listener) = with_listener(100);
    controller.on_touch_event(&TouchEvent::moved(0.0, 10.0, 0));
    assert!(listener.seen().is_empty());
}

#[test]
fn scroll_change_notifies_listener_with_new_offset() {
    let (mut controller, listener) = with_listener(0);
    controller.on_scroll_changed(42, 40);
    controller.on_scroll_changed(44, 42);
    assert_eq!(
        listener.seen(),
        vec![Notification::Scroll(42), Notification::Scroll(44)]
    );
}

#[test]
fn set_listener_is_last_write_wins() {
    let mut controller = controller_at(0);
    let first = Rc::new(RecordingListener::default());
    let second = Rc::new(RecordingListener::default());

    controller.set_listener(Some(downgrade_listener(&first)));
    controller.set_listener(Some(downgrade_listener(&second)));
    controller.on_scroll_changed(10, 0);

    assert!(first.seen().is_empty());
    assert_eq!(second.seen(), vec![Notification::Scroll(10)]);
}

#[test]
fn set_listener_none_clears_slot() {
    let (mut controller, listener) = with_listener(0);
    controller.set_listener(None);
    controller.on_scroll_changed(10, 0);
    assert!(!controller.has_listener());
    assert!(listener.seen().is_empty());
}

#[test]
fn dropped_listener_counts_as_absent() {
    let (mut controller, listener) = with_listener(100);
    drop(listener);
    assert!(!controller.has_listener());
    assert!(!drag(&mut controller, 5.0));
    assert!(smooth_scrolls(&controller).is_empty());
}

// ===== Fling Guard =====

#[test]
fn fling_inside_header_is_swallowed() {
    for scroll_y in [0, 400, 599, 600] {
        let mut controller = controller_at(scroll_y);
        assert!(!controller.fling(1200), "scroll_y = {scroll_y}");
        assert!(controller.surface().calls.is_empty());
    }
}

#[test]
fn fling_past_image_is_forwarded() {
    let mut controller = controller_at(601);
    assert!(controller.fling(-900));
    assert_eq!(controller.surface().calls, vec![SurfaceCall::Fling(-900)]);
}

#[test]
fn fling_requested_by_default_touch_goes_through_guard() {
    let (mut controller, _listener) = with_listener(700);
    controller.surface_mut().response = TouchResponse::fling(800);
    drag(&mut controller, -10.0);
    assert!(controller.surface().calls.contains(&SurfaceCall::Fling(800)));

    let mut controller = controller_at(300);
    controller.surface_mut().response = TouchResponse::fling(800);
    controller.on_touch_event(&TouchEvent::up(0.0, 0.0, 0));
    assert!(!controller
        .surface()
        .calls
        .iter()
        .any(|c| matches!(c, SurfaceCall::Fling(_))));
}

// ===== Fling Stop =====

#[test]
fn crossing_back_over_image_cancels_gesture() {
    let (mut controller, listener) = with_listener(0);
    controller.on_scroll_changed(590, 610);
    assert_eq!(controller.surface().calls, vec![SurfaceCall::CancelGesture]);
    assert_eq!(listener.seen(), vec![Notification::Scroll(590)]);
}

#[test]
fn crossing_other_ways_does_not_cancel() {
    let (mut controller, _listener) = with_listener(0);
    controller.on_scroll_changed(610, 590);
    controller.on_scroll_changed(700, 650);
    controller.on_scroll_changed(100, 200);
    controller.on_scroll_changed(600, 610);
    controller.on_scroll_changed(590, 600);
    assert!(controller.surface().calls.is_empty());
}

// ===== Gesture Start Tracking =====

#[test]
fn intercept_records_start_only_on_down() {
    let (mut controller, _listener) = with_listener(0);
    controller.on_intercept_touch_event(&TouchEvent::moved(0.0, 12.0, 0));
    assert_eq!(controller.gesture_start_y(), None);
    controller.on_intercept_touch_event(&TouchEvent::down(0.0, 33.0, 0));
    assert_eq!(controller.gesture_start_y(), Some(33.0));
    controller.on_intercept_touch_event(&TouchEvent::moved(0.0, 50.0, 0));
    assert_eq!(controller.gesture_start_y(), Some(33.0));
}

#[test]
fn intercept_always_delegates_to_surface() {
    let mut controller = controller_at(0);
    controller.on_intercept_touch_event(&TouchEvent::down(0.0, 1.0, 0));
    assert_eq!(
        controller.surface().calls,
        vec![SurfaceCall::Intercept(GesturePhase::Down)]
    );
    assert_eq!(controller.gesture_start_y(), None, "No listener, no tracking");
}

#[test]
fn gesture_start_is_cleared_when_gesture_ends() {
    let (mut controller, _listener) = with_listener(100);
    drag(&mut controller, 5.0);
    assert_eq!(controller.gesture_start_y(), None);
}

#[test]
fn orphan_up_uses_zero_delta() {
    let (mut controller, listener) = with_listener(100);
    // Up without any down: treated as no movement, i.e. drag up.
    assert!(controller.on_touch_event(&TouchEvent::up(0.0, 999.0, 0)));
    assert_eq!(smooth_scrolls(&controller), vec![400]);
    assert_eq!(listener.seen(), vec![Notification::UpOrCancel]);
}

#[test]
fn stale_start_does_not_leak_into_next_gesture() {
    let (mut controller, _listener) = with_listener(100);
    drag(&mut controller, 50.0);
    // Second up without a new down must not reuse the previous start (100.0).
    controller.on_touch_event(&TouchEvent::up(0.0, 150.0, 0));
    assert_eq!(smooth_scrolls(&controller), vec![0, 400]);
}

// ===== No Listener =====

#[test]
fn every_entry_point_works_without_listener() {
    let mut controller = controller_at(500);
    controller.on_layout_complete();
    controller.on_scroll_changed(590, 610);
    controller.on_intercept_touch_event(&TouchEvent::down(0.0, 0.0, 0));
    controller.on_touch_event(&TouchEvent::down(0.0, 0.0, 0));
    controller.on_touch_event(&TouchEvent::moved(0.0, 5.0, 0));
    controller.on_touch_event(&TouchEvent::up(0.0, 10.0, 0));
    controller.on_touch_event(&TouchEvent::cancel(0.0, 10.0, 0));
    controller.fling(100);

    assert!(
        smooth_scrolls(&controller).is_empty(),
        "Snapping requires a listener"
    );
    assert!(
        !controller.surface().calls.contains(&SurfaceCall::CancelGesture),
        "Fling stop requires a listener"
    );
}

#[test]
fn zone_reflects_current_surface_offset() {
    let mut controller = controller_at(0);
    assert_eq!(controller.zone(), Zone::Reveal);
    controller.surface_mut().scroll_y = 450;
    assert_eq!(controller.zone(), Zone::Peek);
    controller.surface_mut().scroll_y = 600;
    assert_eq!(controller.zone(), Zone::Content);
}
