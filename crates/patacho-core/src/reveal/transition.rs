//! Fade/slide-in styling derived from the revealed flag

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::{EasingType, RevealConfig};
use crate::motion::{lerp, progress_at};

/// Visual state of a trackable section for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionStyle {
    pub opacity: f64,
    /// Downward offset in pixels
    pub translate_y: f64,
}

impl SectionStyle {
    pub fn hidden(offset_px: f64) -> Self {
        Self {
            opacity: 0.0,
            translate_y: offset_px,
        }
    }

    pub fn shown() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
        }
    }

    /// Style at eased progress `t` between hidden and shown
    pub fn between(offset_px: f64, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            opacity: t,
            translate_y: lerp(offset_px, 0.0, t),
        }
    }

    pub fn css_transform(&self) -> String {
        format!("translateY({:.1}px)", self.translate_y)
    }

    /// Inline style declarations
    pub fn css(&self) -> String {
        format!(
            "opacity: {:.3}; transform: {}",
            self.opacity,
            self.css_transform()
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RevealTransition {
    duration: Duration,
    offset_px: f64,
    easing: EasingType,
}

impl RevealTransition {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.transition_ms),
            offset_px: config.offset_px,
            easing: config.easing,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Style of a section that revealed at `revealed_at` (or has not), at `now`
    pub fn style(&self, revealed_at: Option<Instant>, now: Instant) -> SectionStyle {
        match revealed_at {
            None => SectionStyle::hidden(self.offset_px),
            Some(start) => {
                let t = self.easing.apply(progress_at(start, now, self.duration));
                SectionStyle::between(self.offset_px, t)
            }
        }
    }

    /// Whether a section revealed at `revealed_at` is still animating at `now`
    pub fn is_animating(&self, revealed_at: Option<Instant>, now: Instant) -> bool {
        revealed_at.is_some_and(|start| now.saturating_duration_since(start) < self.duration)
    }

    /// CSS `transition` declaration equivalent to this transition
    pub fn css_transition(&self) -> String {
        format!(
            "opacity {ms}ms {f}, transform {ms}ms {f}",
            ms = self.duration.as_millis(),
            f = self.easing.css_timing_function()
        )
    }
}

impl Default for RevealTransition {
    fn default() -> Self {
        Self::new(&RevealConfig::default())
    }
}
