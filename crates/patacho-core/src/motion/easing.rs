//! Easing curves for scroll animations and reveal transitions

use crate::config::EasingType;

impl EasingType {
    /// Map linear progress onto the curve.
    ///
    /// Input is clamped to [0, 1]; every curve starts at 0 and ends at 1
    /// (`None` sits at 0 until the very end).
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }

    /// Equivalent CSS `transition-timing-function`, for rendering layers that
    /// let the browser run the transition
    pub fn css_timing_function(self) -> &'static str {
        match self {
            EasingType::None => "step-end",
            EasingType::Linear => "linear",
            EasingType::Cubic => "cubic-bezier(0.33, 1, 0.68, 1)",
            EasingType::Quintic => "cubic-bezier(0.22, 1, 0.36, 1)",
            EasingType::EaseOut => "ease-out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_curves_end_at_one() {
        for easing in ALL {
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
            if easing != EasingType::None {
                assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
        }
    }

    #[test]
    fn test_curves_never_decrease() {
        for easing in ALL {
            let mut prev = 0.0;
            for step in 0..=20 {
                let v = easing.apply(step as f64 / 20.0);
                assert!(v >= prev, "{:?} decreased at step {}", easing, step);
                prev = v;
            }
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-3.0), 0.0);
        assert_eq!(EasingType::Linear.apply(7.0), 1.0);
    }

    #[test]
    fn test_ease_out_front_loads_progress() {
        assert!(EasingType::Cubic.apply(0.5) > 0.5);
        assert!(EasingType::Quintic.apply(0.5) > EasingType::Cubic.apply(0.5));
    }
}
