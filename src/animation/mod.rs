pub mod icon;

use std::time::Duration;

/// Maps raw linear progress in [0, 1] to eased progress in [0, 1].
pub type Interpolator = fn(f32) -> f32;

/// Duration of a transition that should look instant. It still runs
/// through the animator and completes on the next tick.
pub const INSTANT: Duration = Duration::from_millis(1);

/// Linear interpolation
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t == 1.0 {
        // land exactly on the target
        return to;
    }
    from + (to - from) * t
}

/// Identity interpolator
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Material "fast out, slow in" curve: cubic bezier (0.4, 0.0, 0.2, 1.0).
pub fn fast_out_slow_in(t: f32) -> f32 {
    cubic_bezier(0.4, 0.0, 0.2, 1.0, t)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let axis = |p1: f32, p2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };

    // x(s) is monotonic for control points inside [0, 1]; bisect for s.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..24 {
        let mid = (lo + hi) / 2.0;
        if axis(x1, x2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    axis(y1, y2, (lo + hi) / 2.0).clamp(0.0, 1.0)
}

// ─── Tokens ──────────────────────────────────────────────────────────────

/// Identifies one started animation of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

/// Owns the "currently active animation" token for a single property.
///
/// Issuing a new token invalidates the previous one; a frame carrying a
/// stale token must not be applied.
#[derive(Debug, Default)]
pub struct TokenSlot {
    issued: u64,
    active: Option<AnimationToken>,
}

impl TokenSlot {
    pub fn issue(&mut self) -> AnimationToken {
        self.issued = self.issued.wrapping_add(1);
        let token = AnimationToken(self.issued);
        self.active = Some(token);
        token
    }

    pub fn is_active(&self, token: AnimationToken) -> bool {
        self.active == Some(token)
    }

    /// Drop the active token if it is `token`.
    pub fn release(&mut self, token: AnimationToken) {
        if self.is_active(token) {
            self.active = None;
        }
    }

    pub fn invalidate(&mut self) {
        self.active = None;
    }
}

// ─── Value animator ──────────────────────────────────────────────────────

/// One tick's output from a running animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub token: AnimationToken,
    /// Interpolated fraction; exactly 1.0 on the final frame.
    pub fraction: f32,
}

/// Time-driven 0→1 animator with an optional start delay.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    token: AnimationToken,
    start_delay: Duration,
    duration: Duration,
    elapsed: Duration,
    interpolator: Interpolator,
}

impl ValueAnimator {
    pub fn new(token: AnimationToken, duration: Duration) -> Self {
        Self {
            token,
            start_delay: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
            interpolator: linear,
        }
    }

    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn token(&self) -> AnimationToken {
        self.token
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.start_delay + self.duration
    }

    /// Advance by `dt`. Returns `None` while still inside the start delay.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationFrame> {
        self.elapsed = self.elapsed.saturating_add(dt);
        let running = self.elapsed.checked_sub(self.start_delay)?;
        let raw = (running.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        Some(AnimationFrame {
            token: self.token,
            fraction: (self.interpolator)(raw.clamp(0.0, 1.0)),
        })
    }
}

// ─── Animated scalar ─────────────────────────────────────────────────────

/// Output of [`AnimatedValue::tick`] after a frame was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    pub fraction: f32,
    pub value: f32,
    pub finished: bool,
}

/// A scalar property animated by at most one animator at a time.
#[derive(Debug, Default)]
pub struct AnimatedValue {
    value: f32,
    from: f32,
    to: f32,
    animator: Option<ValueAnimator>,
    slot: TokenSlot,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            from: value,
            to: value,
            ..Self::default()
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_some()
    }

    /// Jump to `value`, cancelling any running animation.
    pub fn set(&mut self, value: f32) {
        self.slot.invalidate();
        self.animator = None;
        self.value = value;
        self.from = value;
        self.to = value;
    }

    /// Start animating from the current value to `to`, superseding any
    /// animation already running on this property.
    pub fn animate_to(
        &mut self,
        to: f32,
        duration: Duration,
        delay: Duration,
        interpolator: Interpolator,
    ) -> AnimationToken {
        self.animate_between(self.value, to, duration, delay, interpolator)
    }

    pub fn animate_between(
        &mut self,
        from: f32,
        to: f32,
        duration: Duration,
        delay: Duration,
        interpolator: Interpolator,
    ) -> AnimationToken {
        let token = self.slot.issue();
        self.from = from;
        self.to = to;
        self.animator = Some(
            ValueAnimator::new(token, duration)
                .start_delay(delay)
                .interpolator(interpolator),
        );
        token
    }

    /// Apply a frame if its token is still the active one.
    pub fn apply(&mut self, frame: AnimationFrame) -> Option<f32> {
        if !self.slot.is_active(frame.token) {
            tracing::trace!("dropping stale animation frame {:?}", frame.token);
            return None;
        }
        self.value = lerp(self.from, self.to, frame.fraction);
        Some(self.value)
    }

    /// Advance the running animation, if any.
    pub fn tick(&mut self, dt: Duration) -> Option<Applied> {
        let animator = self.animator.as_mut()?;
        let frame = animator.tick(dt)?;
        let finished = animator.is_complete();
        let value = self.apply(frame)?;
        if finished {
            self.slot.release(frame.token);
            self.animator = None;
        }
        Some(Applied {
            fraction: frame.fraction,
            value,
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn interpolator_endpoints_are_exact() {
        assert_eq!(fast_out_slow_in(0.0), 0.0);
        assert_eq!(fast_out_slow_in(1.0), 1.0);
        assert_eq!(fast_out_slow_in(-3.0), 0.0);
        assert_eq!(fast_out_slow_in(2.0), 1.0);
    }

    #[test]
    fn interpolator_is_fast_out() {
        // At t=0.3 the curve is well ahead of linear
        assert!(fast_out_slow_in(0.3) > 0.3);
        // and monotonic
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = fast_out_slow_in(i as f32 / 100.0);
            assert!(v >= prev, "not monotonic at {i}");
            prev = v;
        }
    }

    #[test]
    fn issuing_a_token_invalidates_the_previous_one() {
        let mut slot = TokenSlot::default();
        let first = slot.issue();
        let second = slot.issue();
        assert!(!slot.is_active(first));
        assert!(slot.is_active(second));
        slot.release(first);
        assert!(slot.is_active(second));
        slot.release(second);
        assert!(!slot.is_active(second));
    }

    #[test]
    fn animator_waits_for_start_delay() {
        let mut slot = TokenSlot::default();
        let mut anim = ValueAnimator::new(slot.issue(), MS_100).start_delay(Duration::from_millis(25));
        assert!(anim.tick(Duration::from_millis(20)).is_none());
        let frame = anim.tick(Duration::from_millis(55)).expect("past delay");
        assert!((frame.fraction - 0.5).abs() < 1e-4);
        assert!(!anim.is_complete());
        let frame = anim.tick(MS_100).expect("running");
        assert_eq!(frame.fraction, 1.0);
        assert!(anim.is_complete());
    }

    #[test]
    fn animated_value_reaches_target_and_stops() {
        let mut v = AnimatedValue::new(10.0);
        v.animate_to(30.0, MS_100, Duration::ZERO, linear);
        let mid = v.tick(Duration::from_millis(50)).expect("frame");
        assert!((mid.value - 20.0).abs() < 1e-3);
        assert!(!mid.finished);
        let end = v.tick(MS_100).expect("frame");
        assert!(end.finished);
        assert_eq!(end.fraction, 1.0);
        assert_eq!(v.value(), 30.0);
        assert!(!v.is_running());
        assert!(v.tick(MS_100).is_none());
    }

    #[test]
    fn superseded_animation_cannot_write() {
        let mut v = AnimatedValue::new(0.0);
        let old = v.animate_to(100.0, MS_100, Duration::ZERO, linear);
        v.tick(Duration::from_millis(50));
        v.animate_to(0.0, MS_100, Duration::ZERO, linear);

        let stale = AnimationFrame {
            token: old,
            fraction: 1.0,
        };
        assert_eq!(v.apply(stale), None);
        assert!((v.value() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn set_cancels_running_animation() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(1.0, MS_100, Duration::ZERO, linear);
        v.set(0.25);
        assert!(!v.is_running());
        assert!(v.tick(MS_100).is_none());
        assert_eq!(v.value(), 0.25);
    }
}
