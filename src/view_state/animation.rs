//! Offset animations run by the simulated surface.
//!
//! Two kinds: a fixed-duration tween for smooth scrolls and a decaying
//! momentum for flings. Both are sampled with a monotonic millisecond clock.

/// Frame length the fling friction is expressed against.
const FRAME_MS: f64 = 16.0;

/// Speed (rows per second) under which a fling comes to rest.
/// Roughly one row per frame.
const FLING_STOP_VELOCITY: f64 = 60.0;

/// An animation in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAnimation {
    /// Smooth scroll towards a target offset.
    Tween(Tween),
    /// Momentum scroll.
    Fling(Fling),
}

impl ScrollAnimation {
    /// Advance to `now_ms`, returning the new offset and whether the
    /// animation is finished.
    pub fn step(&mut self, now_ms: u64) -> (i32, bool) {
        match self {
            ScrollAnimation::Tween(tween) => (tween.sample(now_ms), tween.is_done(now_ms)),
            ScrollAnimation::Fling(fling) => {
                let offset = fling.advance(now_ms);
                (offset, fling.is_settled())
            }
        }
    }
}

/// Smoothstep tween between two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    from: i32,
    to: i32,
    start_ms: u64,
    duration_ms: u64,
}

impl Tween {
    /// Tween from `from` to `to` starting at `start_ms`.
    pub fn new(from: i32, to: i32, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
        }
    }

    /// Target offset.
    pub fn target(&self) -> i32 {
        self.to
    }

    /// Whether the tween has reached its target at `now_ms`.
    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Offset at `now_ms`.
    pub fn sample(&self, now_ms: u64) -> i32 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0);
        let eased = smoothstep(t);
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        (from + (to - from) * eased).round() as i32
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Exponentially decaying momentum.
///
/// Positive velocity increases the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    position: f64,
    /// Rows per second.
    velocity: f64,
    last_ms: u64,
    /// Fraction of velocity kept per 16 ms frame.
    friction: f64,
}

impl Fling {
    /// Start a fling at `position` with `velocity` rows per second.
    pub fn new(position: i32, velocity: i32, start_ms: u64, friction: f64) -> Self {
        Self {
            position: f64::from(position),
            velocity: f64::from(velocity),
            last_ms: start_ms,
            friction: friction.clamp(0.0, 0.999),
        }
    }

    /// Current velocity in rows per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Move the fling forward to `now_ms`, returning the rounded offset.
    pub fn advance(&mut self, now_ms: u64) -> i32 {
        let dt = now_ms.saturating_sub(self.last_ms) as f64;
        self.last_ms = self.last_ms.max(now_ms);
        if dt > 0.0 {
            self.position += self.velocity * dt / 1000.0;
            self.velocity *= self.friction.powf(dt / FRAME_MS);
        }
        self.position.round() as i32
    }

    /// True once the momentum has decayed away.
    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < FLING_STOP_VELOCITY
    }
}
