//! Time calculation utilities for animations
//!
//! The `_at` variants take the current instant explicitly so callers that
//! already sampled a frame time (and tests) stay deterministic.

use std::time::{Duration, Instant};

/// Progress (0.0 to 1.0) of an animation that started at `start`, measured at `now`
#[inline]
pub fn progress_at(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Progress measured against the wall clock
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    progress_at(start, Instant::now(), duration)
}

#[inline]
pub fn is_complete_at(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
