//! Derived values of the scroll configuration

use std::time::Duration;

use crate::config::ScrollConfig;

impl ScrollConfig {
    /// Navigation animation duration
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Time between animation frames
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    /// Smooth scrolling needs both the flag and a non-zero duration
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{EasingType, ScrollConfig};
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = ScrollConfig::default();
        assert!(config.smooth_enabled);
        assert_eq!(config.animation_duration_ms, 600);
        assert_eq!(config.easing, EasingType::Cubic);
        assert_eq!(config.animation_fps, 60);
    }

    #[test]
    fn test_frame_interval() {
        let config = ScrollConfig {
            animation_fps: 50,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));

        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.smooth_enabled = false;
        assert!(!config.is_smooth());

        config.smooth_enabled = true;
        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}
