//! One-shot reveal tracking
//!
//! The tracker owns the revealed flag of every section it has seen and a
//! single intersection source shared by all of them. A flag flips from
//! hidden to revealed the first time its section reaches the visibility
//! threshold and never flips back.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::source::{IntersectionEntry, IntersectionSource, SectionId};
use crate::geometry::Rect;
use crate::{Error, Result};

/// Emitted once per section, when it reveals
#[derive(Debug, Clone, PartialEq)]
pub enum RevealEvent {
    Revealed { section: SectionId, ratio: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Active,
    Disposed,
}

pub struct RevealTracker<S: IntersectionSource> {
    source: S,
    threshold: f64,
    /// Sections currently mounted and observed
    registered: HashSet<SectionId>,
    /// Reveal instant per section; entries are never removed
    revealed: HashMap<SectionId, Instant>,
    event_tx: Option<mpsc::UnboundedSender<RevealEvent>>,
    lifecycle: Lifecycle,
}

impl<S: IntersectionSource> RevealTracker<S> {
    /// Take ownership of `source` and configure it with `threshold`
    pub fn new(mut source: S, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "visibility threshold must be within 0.0..=1.0, got {}",
                threshold
            )));
        }
        source.set_threshold(threshold);
        Ok(Self {
            source,
            threshold,
            registered: HashSet::new(),
            revealed: HashMap::new(),
            event_tx: None,
            lifecycle: Lifecycle::Active,
        })
    }

    /// Set the channel reveal events are sent to (e.g. to schedule a re-render)
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<RevealEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// Start observing `region` for `section`.
    ///
    /// Returns `Ok(true)` when the section is newly observed and `Ok(false)`
    /// when nothing changed: the section was already registered, or its
    /// region cannot be observed (it will then never reveal). Fails with
    /// `Error::Lifecycle` once the tracker has been disposed.
    pub fn register(&mut self, section: impl Into<SectionId>, region: Rect) -> Result<bool> {
        let section = section.into();
        if self.is_disposed() {
            return Err(Error::Lifecycle(format!(
                "cannot register section '{}' after teardown",
                section
            )));
        }
        if self.registered.contains(&section) {
            debug!(section = %section, "Section already registered");
            return Ok(false);
        }
        if !self.source.observe(&section, region) {
            warn!(section = %section, "Section region cannot be observed; it will stay hidden");
            return Ok(false);
        }
        debug!(section = %section, "Registered section");
        self.registered.insert(section);
        Ok(true)
    }

    /// Stop observing a section. Unknown ids and a disposed tracker are no-ops.
    pub fn unregister(&mut self, section: &str) -> bool {
        if self.is_disposed() {
            return false;
        }
        match self.registered.take(section) {
            Some(section) => {
                self.source.unobserve(&section);
                debug!(section = %section, "Unregistered section");
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, section: &str) -> bool {
        self.registered.contains(section)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Revealed flag; `false` for unknown sections
    pub fn is_revealed(&self, section: &str) -> bool {
        self.revealed.contains_key(section)
    }

    /// When the section revealed, if it has
    pub fn revealed_at(&self, section: &str) -> Option<Instant> {
        self.revealed.get(section).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Drain the source and apply whatever it queued
    pub fn pump(&mut self) -> Vec<SectionId> {
        self.pump_at(Instant::now())
    }

    pub fn pump_at(&mut self, now: Instant) -> Vec<SectionId> {
        if self.is_disposed() {
            return Vec::new();
        }
        let batch = self.source.take_records();
        self.apply_batch_at(&batch, now)
    }

    /// Apply one batch of notifications, returning the sections it revealed
    pub fn apply_batch(&mut self, batch: &[IntersectionEntry]) -> Vec<SectionId> {
        self.apply_batch_at(batch, Instant::now())
    }

    /// Only the entries in `batch` are looked at. A batch that arrives after
    /// disposal changes nothing.
    pub fn apply_batch_at(&mut self, batch: &[IntersectionEntry], now: Instant) -> Vec<SectionId> {
        if self.is_disposed() {
            debug!(entries = batch.len(), "Ignoring intersection batch after teardown");
            return Vec::new();
        }

        let mut newly_revealed = Vec::new();
        for entry in batch {
            if !self.registered.contains(&entry.section) {
                continue;
            }
            if self.revealed.contains_key(&entry.section) {
                continue;
            }
            if !(entry.ratio > 0.0 && entry.ratio >= self.threshold) {
                continue;
            }
            self.revealed.insert(entry.section.clone(), now);
            debug!(section = %entry.section, ratio = entry.ratio, "Section revealed");
            self.send_event(RevealEvent::Revealed {
                section: entry.section.clone(),
                ratio: entry.ratio,
            });
            newly_revealed.push(entry.section.clone());
        }
        newly_revealed
    }

    /// Detach the source and stop all tracking. Idempotent.
    ///
    /// Revealed flags stay readable; nothing can change them afterwards.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.source.disconnect();
        self.registered.clear();
        self.lifecycle = Lifecycle::Disposed;
        info!(revealed = self.revealed.len(), "Reveal tracker disposed");
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The source, for hosts that drive it (viewport updates, pushed entries)
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn send_event(&self, event: RevealEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send reveal event: receiver dropped");
            }
        }
    }
}

impl<S: IntersectionSource> Drop for RevealTracker<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::source::ManualSource;

    fn region() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 600.0)
    }

    fn tracker() -> RevealTracker<ManualSource> {
        RevealTracker::new(ManualSource::new(), 0.1).unwrap()
    }

    #[test]
    fn test_unknown_section_is_hidden() {
        let tracker = tracker();
        assert!(!tracker.is_revealed("nowhere"));
    }

    #[test]
    fn test_threshold_is_passed_to_source() {
        let tracker = tracker();
        assert!((tracker.source().threshold() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_invalid_threshold() {
        assert!(RevealTracker::new(ManualSource::new(), 1.2).is_err());
        assert!(RevealTracker::new(ManualSource::new(), -0.1).is_err());
    }

    #[test]
    fn test_never_scrolled_into_view_stays_hidden() {
        let mut tracker = tracker();
        tracker.register("historia", region()).unwrap();
        tracker.apply_batch(&[IntersectionEntry::new("historia", 0.0)]);
        tracker.apply_batch(&[IntersectionEntry::new("historia", 0.05)]);
        assert!(!tracker.is_revealed("historia"));
    }

    #[test]
    fn test_reveal_is_monotone() {
        let mut tracker = tracker();
        tracker.register("historia", region()).unwrap();

        let revealed = tracker.apply_batch(&[IntersectionEntry::new("historia", 0.1)]);
        assert_eq!(revealed, vec![SectionId::from("historia")]);
        assert!(tracker.is_revealed("historia"));

        // Scrolled back out of view
        let revealed = tracker.apply_batch(&[IntersectionEntry::new("historia", 0.0)]);
        assert!(revealed.is_empty());
        assert!(tracker.is_revealed("historia"));
    }

    #[test]
    fn test_reveal_notifies_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = tracker().with_event_sender(tx);
        tracker.register("evento", region()).unwrap();

        tracker.apply_batch(&[IntersectionEntry::new("evento", 0.4)]);
        tracker.apply_batch(&[IntersectionEntry::new("evento", 0.9)]);

        assert_eq!(
            rx.try_recv().unwrap(),
            RevealEvent::Revealed {
                section: SectionId::from("evento"),
                ratio: 0.4
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_duplicate_register_is_idempotent() {
        let mut tracker = tracker();
        assert!(tracker.register("hospedagem", region()).unwrap());
        assert!(!tracker.register("hospedagem", region()).unwrap());
        assert_eq!(tracker.registered_count(), 1);
        assert_eq!(tracker.source().observed_count(), 1);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let mut tracker = tracker();
        assert!(!tracker.unregister("presentes"));
        tracker.register("presentes", region()).unwrap();
        assert!(tracker.unregister("presentes"));
        assert!(!tracker.unregister("presentes"));
    }

    #[test]
    fn test_unregistered_section_ignores_stale_entries() {
        let mut tracker = tracker();
        tracker.register("presentes", region()).unwrap();
        tracker.unregister("presentes");
        tracker.apply_batch(&[IntersectionEntry::new("presentes", 1.0)]);
        assert!(!tracker.is_revealed("presentes"));
    }

    #[test]
    fn test_unobservable_region_is_noop_registration() {
        let mut tracker = tracker();
        let registered = tracker
            .register("como-chegar", Rect::new(0.0, f64::NAN, 0.0, 0.0))
            .unwrap();
        assert!(!registered);
        assert!(!tracker.is_registered("como-chegar"));
        tracker.apply_batch(&[IntersectionEntry::new("como-chegar", 1.0)]);
        assert!(!tracker.is_revealed("como-chegar"));
    }

    #[test]
    fn test_same_batch_reveals_both_in_any_order() {
        for order in [["evento", "hospedagem"], ["hospedagem", "evento"]] {
            let mut tracker = tracker();
            tracker.register("evento", region()).unwrap();
            tracker.register("hospedagem", region()).unwrap();

            let batch: Vec<_> = order
                .iter()
                .map(|id| IntersectionEntry::new(*id, 0.5))
                .collect();
            let revealed = tracker.apply_batch(&batch);

            assert_eq!(revealed.len(), 2);
            assert!(tracker.is_revealed("evento"));
            assert!(tracker.is_revealed("hospedagem"));
        }
    }

    #[test]
    fn test_pump_drains_source() {
        let mut tracker = tracker();
        tracker.register("confirmacao", region()).unwrap();
        tracker
            .source_mut()
            .push(IntersectionEntry::new("confirmacao", 0.3));

        assert_eq!(tracker.pump(), vec![SectionId::from("confirmacao")]);
        assert!(tracker.pump().is_empty());
    }

    #[test]
    fn test_register_after_dispose_fails() {
        let mut tracker = tracker();
        tracker.dispose();
        let err = tracker.register("historia", region()).unwrap_err();
        assert!(matches!(err, Error::Lifecycle(_)));
        assert_eq!(tracker.source().observed_count(), 0);
    }

    #[test]
    fn test_dispose_mid_transition_freezes_state() {
        let mut tracker = tracker();
        tracker.register("historia", region()).unwrap();
        // Intersecting, but below the threshold
        tracker.apply_batch(&[IntersectionEntry::new("historia", 0.05)]);

        tracker.dispose();
        assert!(tracker.source().is_disconnected());

        // A notification that was already in flight
        let revealed = tracker.apply_batch(&[IntersectionEntry::new("historia", 0.8)]);
        assert!(revealed.is_empty());
        assert!(!tracker.is_revealed("historia"));
        assert!(!tracker.unregister("historia"));
    }

    #[test]
    fn test_revealed_flags_survive_dispose() {
        let mut tracker = tracker();
        tracker.register("evento", region()).unwrap();
        tracker.apply_batch(&[IntersectionEntry::new("evento", 1.0)]);
        tracker.dispose();
        tracker.dispose();
        assert!(tracker.is_revealed("evento"));
    }

    #[test]
    fn test_zero_threshold_still_needs_some_visibility() {
        let mut tracker = RevealTracker::new(ManualSource::new(), 0.0).unwrap();
        tracker.register("hero", region()).unwrap();
        tracker.apply_batch(&[IntersectionEntry::new("hero", 0.0)]);
        assert!(!tracker.is_revealed("hero"));
        tracker.apply_batch(&[IntersectionEntry::new("hero", 0.01)]);
        assert!(tracker.is_revealed("hero"));
    }
}
