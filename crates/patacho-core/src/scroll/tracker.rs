//! Page-wide scroll offset
//!
//! Backed by a `watch` channel: subscribers always see the most recent
//! offset and never a backlog, which is all a render pass needs.

use tokio::sync::watch;
use tracing::{debug, warn};

pub struct ScrollTracker {
    tx: watch::Sender<f64>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self { tx }
    }

    /// Last observed offset; 0 until the first scroll event
    pub fn offset(&self) -> f64 {
        *self.tx.borrow()
    }

    /// Record a scroll event and republish the offset to subscribers
    pub fn on_scroll(&self, offset: f64) {
        if !offset.is_finite() {
            warn!(offset, "Ignoring non-finite scroll offset");
            return;
        }
        let previous = self.tx.send_replace(offset);
        debug!(from = previous, to = offset, "Scroll offset updated");
    }

    /// Receiver that wakes on every republished offset
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Offset of a background layer that moves at `factor` times the scroll speed
    pub fn parallax_offset(&self, factor: f64) -> f64 {
        self.offset() * factor
    }

    pub fn parallax_transform(&self, factor: f64) -> String {
        format!("translateY({:.1}px)", self.parallax_offset(factor))
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_offset_is_zero() {
        let tracker = ScrollTracker::new();
        assert_eq!(tracker.offset(), 0.0);
    }

    #[test]
    fn test_offset_after_scroll() {
        let tracker = ScrollTracker::new();
        tracker.on_scroll(1234.5);
        assert_eq!(tracker.offset(), 1234.5);
        tracker.on_scroll(10.0);
        assert_eq!(tracker.offset(), 10.0);
    }

    #[test]
    fn test_non_finite_offset_is_ignored() {
        let tracker = ScrollTracker::new();
        tracker.on_scroll(300.0);
        tracker.on_scroll(f64::NAN);
        assert_eq!(tracker.offset(), 300.0);
    }

    #[test]
    fn test_parallax() {
        let tracker = ScrollTracker::new();
        tracker.on_scroll(500.0);
        assert!((tracker.parallax_offset(0.3) - 150.0).abs() < 1e-9);
        assert_eq!(tracker.parallax_transform(0.3), "translateY(150.0px)");
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_value_only() {
        let tracker = ScrollTracker::new();
        let mut rx = tracker.subscribe();

        tracker.on_scroll(100.0);
        tracker.on_scroll(200.0);
        tracker.on_scroll(300.0);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 300.0);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_scroll() {
        let tracker = ScrollTracker::new();
        let mut rx = tracker.subscribe();
        let waiter = tokio::spawn(async move {
            rx.changed().await.unwrap();
            *rx.borrow()
        });
        tokio::task::yield_now().await;
        tracker.on_scroll(42.0);
        assert_eq!(waiter.await.unwrap(), 42.0);
    }
}
