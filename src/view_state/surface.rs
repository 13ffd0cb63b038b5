//! Simulated scroll surface.
//!
//! Stands in for the platform scroll widget in the terminal shell. It owns
//! the offset, tracks drags, runs smooth-scroll and fling animations, and
//! records every offset change for the host to forward to the controller.

use super::animation::{Fling, ScrollAnimation, Tween};
use crate::controller::{ScrollSurface, TouchResponse};
use crate::model::{GesturePhase, TouchEvent};
use std::collections::VecDeque;
use tracing::trace;

/// Window of pointer samples used for release velocity.
const VELOCITY_WINDOW_MS: u64 = 100;

/// Tunables of the simulated surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Duration of a smooth scroll.
    pub smooth_scroll_ms: u64,
    /// Fraction of fling velocity kept per 16 ms frame.
    pub fling_friction: f64,
    /// Minimum release speed (rows per second) that starts a fling.
    pub min_fling_velocity: i32,
    /// Drag distance after which the surface intercepts a gesture.
    pub touch_slop: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            smooth_scroll_ms: 250,
            fling_friction: 0.9,
            min_fling_velocity: 20,
            touch_slop: 1.0,
        }
    }
}

/// A recorded offset change, to be fed to `on_scroll_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChange {
    /// Offset after the change.
    pub new_scroll_y: i32,
    /// Offset before the change.
    pub old_scroll_y: i32,
}

/// Pointer state of a drag in progress.
#[derive(Debug, Clone)]
struct DragTracker {
    start_y: f32,
    last_y: f32,
    /// Sub-row remainder not yet applied to the offset.
    carry: f32,
    samples: VecDeque<(u64, f32)>,
}

impl DragTracker {
    fn new(y: f32, timestamp_ms: u64) -> Self {
        let mut samples = VecDeque::new();
        samples.push_back((timestamp_ms, y));
        Self {
            start_y: y,
            last_y: y,
            carry: 0.0,
            samples,
        }
    }

    fn record(&mut self, y: f32, timestamp_ms: u64) {
        self.last_y = y;
        self.samples.push_back((timestamp_ms, y));
        while let Some(&(t, _)) = self.samples.front() {
            if timestamp_ms.saturating_sub(t) > VELOCITY_WINDOW_MS && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Pointer velocity in rows per second (positive = moving down).
    fn pointer_velocity(&self) -> f32 {
        let (Some(&(t0, y0)), Some(&(t1, y1))) = (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let dt = t1.saturating_sub(t0);
        if dt == 0 {
            return 0.0;
        }
        (y1 - y0) * 1000.0 / dt as f32
    }
}

/// In-process scroll surface with clamped offset and animations.
#[derive(Debug, Clone)]
pub struct SimulatedSurface {
    scroll_y: i32,
    content_height: i32,
    viewport_height: i32,
    config: SurfaceConfig,
    animation: Option<ScrollAnimation>,
    drag: Option<DragTracker>,
    now_ms: u64,
    changes: Vec<ScrollChange>,
    synthetic_events: Vec<TouchEvent>,
}

impl SimulatedSurface {
    /// Surface over `content_height` rows seen through `viewport_height` rows.
    pub fn new(content_height: i32, viewport_height: i32, config: SurfaceConfig) -> Self {
        Self {
            scroll_y: 0,
            content_height: content_height.max(0),
            viewport_height: viewport_height.max(0),
            config,
            animation: None,
            drag: None,
            now_ms: 0,
            changes: Vec::new(),
            synthetic_events: Vec::new(),
        }
    }

    /// Largest reachable offset. Overscroll is never allowed.
    pub fn max_scroll(&self) -> i32 {
        (self.content_height - self.viewport_height).max(0)
    }

    /// Total content height.
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    /// Visible height.
    pub fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    /// Update dimensions after a resize or relayout, re-clamping the offset.
    pub fn set_dimensions(&mut self, content_height: i32, viewport_height: i32) {
        self.content_height = content_height.max(0);
        self.viewport_height = viewport_height.max(0);
        let clamped = self.scroll_y;
        self.set_offset(clamped);
    }

    /// Last clock value seen.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Whether a smooth scroll or fling is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The running animation, if any.
    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    /// Whether a drag is being tracked.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Advance the clock and any running animation.
    ///
    /// Returns true while an animation is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = self.now_ms.max(now_ms);
        let Some(mut animation) = self.animation.take() else {
            return false;
        };

        let (offset, finished) = animation.step(self.now_ms);
        let before = self.scroll_y;
        self.set_offset(offset);
        let hit_edge = self.scroll_y != offset && self.scroll_y == before;

        if finished || hit_edge {
            trace!(scroll_y = self.scroll_y, "Animation finished");
        } else {
            self.animation = Some(animation);
        }
        self.animation.is_some()
    }

    /// Scroll by `delta` rows immediately (mouse wheel).
    pub fn scroll_by(&mut self, delta: i32) {
        self.animation = None;
        let target = self.scroll_y.saturating_add(delta);
        self.set_offset(target);
    }

    /// Drain recorded offset changes in the order they happened.
    pub fn take_scroll_changes(&mut self) -> Vec<ScrollChange> {
        std::mem::take(&mut self.changes)
    }

    /// Drain synthetic touch events queued by [`ScrollSurface::cancel_gesture`].
    pub fn take_synthetic_events(&mut self) -> Vec<TouchEvent> {
        std::mem::take(&mut self.synthetic_events)
    }

    fn set_offset(&mut self, scroll_y: i32) {
        let clamped = scroll_y.clamp(0, self.max_scroll());
        if clamped != self.scroll_y {
            self.changes.push(ScrollChange {
                new_scroll_y: clamped,
                old_scroll_y: self.scroll_y,
            });
            self.scroll_y = clamped;
        }
    }

    fn observe_clock(&mut self, timestamp_ms: u64) {
        self.now_ms = self.now_ms.max(timestamp_ms);
    }
}

impl ScrollSurface for SimulatedSurface {
    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn scroll_to(&mut self, scroll_y: i32) {
        self.animation = None;
        self.set_offset(scroll_y);
    }

    fn smooth_scroll_to(&mut self, scroll_y: i32) {
        // A snap ends whatever drag was in progress.
        self.drag = None;
        let target = scroll_y.clamp(0, self.max_scroll());
        if target == self.scroll_y {
            self.animation = None;
            return;
        }
        self.animation = Some(ScrollAnimation::Tween(Tween::new(
            self.scroll_y,
            target,
            self.now_ms,
            self.config.smooth_scroll_ms,
        )));
    }

    fn fling(&mut self, velocity_y: i32) {
        trace!(velocity_y, scroll_y = self.scroll_y, "Fling started");
        self.animation = Some(ScrollAnimation::Fling(Fling::new(
            self.scroll_y,
            velocity_y,
            self.now_ms,
            self.config.fling_friction,
        )));
    }

    fn cancel_gesture(&mut self) {
        self.animation = None;
        self.drag = None;
        let now = self.now_ms;
        self.synthetic_events.push(TouchEvent::up(0.0, 0.0, now));
        self.synthetic_events.push(TouchEvent::down(0.0, 0.0, now));
    }

    fn intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        match (event.phase, &self.drag) {
            (GesturePhase::Move, Some(drag)) => {
                (event.y - drag.start_y).abs() > self.config.touch_slop
            }
            _ => false,
        }
    }

    fn default_touch_event(&mut self, event: &TouchEvent) -> TouchResponse {
        self.observe_clock(event.timestamp_ms);
        match event.phase {
            GesturePhase::Down => {
                self.animation = None;
                self.drag = Some(DragTracker::new(event.y, event.timestamp_ms));
                TouchResponse::handled()
            }
            GesturePhase::Move => {
                let Some(mut drag) = self.drag.take() else {
                    return TouchResponse::ignored();
                };
                // Finger moving down pulls content down: offset decreases.
                let delta = drag.last_y - event.y + drag.carry;
                let whole = delta.trunc();
                drag.carry = delta - whole;
                drag.record(event.y, event.timestamp_ms);
                let target = self.scroll_y.saturating_add(whole as i32);
                self.drag = Some(drag);
                self.set_offset(target);
                TouchResponse::handled()
            }
            GesturePhase::Up => {
                let Some(mut drag) = self.drag.take() else {
                    return TouchResponse::ignored();
                };
                drag.record(event.y, event.timestamp_ms);
                let velocity = -drag.pointer_velocity().round() as i32;
                if velocity.abs() >= self.config.min_fling_velocity {
                    TouchResponse::fling(velocity)
                } else {
                    TouchResponse::handled()
                }
            }
            GesturePhase::Cancel => {
                if self.drag.take().is_some() {
                    TouchResponse::handled()
                } else {
                    TouchResponse::ignored()
                }
            }
        }
    }
}
