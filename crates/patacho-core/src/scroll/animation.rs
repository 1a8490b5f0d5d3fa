//! Animated scroll-to-section navigation
//!
//! Nav clicks call `scroll_to()` with the target section's top; the host then
//! calls `update()` once per frame and republishes the returned offset as a
//! scroll event.

use std::time::{Duration, Instant};

use crate::config::{EasingType, ScrollConfig};
use crate::motion::{is_complete_at, lerp, progress_at};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current: f64,
    /// Scroll deltas received since the last frame
    pending_delta: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation or pending delta outstanding; the host should keep ticking
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final position once the running animation completes
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Follow a scroll that happened outside the animator (user wheel/touch)
    pub fn set_position(&mut self, position: f64) {
        self.animation = None;
        self.current = position;
        self.pending_delta = 0.0;
    }

    /// Animate to `target`, clamped to [0, max_scroll]
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64) {
        self.scroll_to_at(target, max_scroll, Instant::now());
    }

    pub fn scroll_to_at(&mut self, target: f64, max_scroll: f64, now: Instant) {
        let target = clamp_offset(target, max_scroll);

        if !self.config.is_smooth() {
            self.current = target;
            self.animation = None;
            return;
        }

        if (self.current - target).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta (positive = down). Deltas arriving between two
    /// frames are merged into a single animation.
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64) {
        if !self.config.is_smooth() {
            self.current = clamp_offset(self.current + delta, max_scroll);
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance one frame and return the position to publish
    pub fn update(&mut self, max_scroll: f64) -> f64 {
        self.update_at(max_scroll, Instant::now())
    }

    pub fn update_at(&mut self, max_scroll: f64, now: Instant) -> f64 {
        if self.pending_delta != 0.0 {
            let target = clamp_offset(self.target() + self.pending_delta, max_scroll);
            self.pending_delta = 0.0;
            if (target - self.current).abs() >= f64::EPSILON {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to: target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete_at(anim.start, now, anim.duration) {
                self.current = clamp_offset(anim.to, max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress_at(anim.start, now, anim.duration));
                self.current = clamp_offset(lerp(anim.from, anim.to, t), max_scroll);
            }
        }

        self.current
    }

    /// Stop where we are
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }

    pub fn reset(&mut self) {
        self.animation = None;
        self.current = 0.0;
        self.pending_delta = 0.0;
    }
}

fn clamp_offset(offset: f64, max_scroll: f64) -> f64 {
    offset.clamp(0.0, max_scroll.max(0.0))
}
