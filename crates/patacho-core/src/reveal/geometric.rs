//! Intersection source computed from layout geometry
//!
//! Holds the document-space box of every watched section and re-evaluates
//! them whenever the viewport moves or resizes. Like a browser intersection
//! observer it queues one entry when a region starts being watched and then
//! one entry per threshold crossing, in either direction.

use std::collections::HashMap;

use tracing::debug;

use super::source::{IntersectionEntry, IntersectionSource, SectionId};
use crate::geometry::{intersection_ratio, Rect, Viewport};

#[derive(Debug, Clone)]
struct Watched {
    region: Rect,
    /// Whether the last queued entry was at or above the threshold
    above: bool,
}

#[derive(Debug)]
pub struct GeometricSource {
    viewport: Viewport,
    threshold: f64,
    watched: HashMap<SectionId, Watched>,
    pending: Vec<IntersectionEntry>,
    connected: bool,
}

impl GeometricSource {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            threshold: 0.0,
            watched: HashMap::new(),
            pending: Vec::new(),
            connected: true,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Move or resize the viewport and queue entries for every crossing.
    /// Non-finite viewports are ignored.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !is_finite_viewport(&viewport) {
            debug!("Ignoring non-finite viewport");
            return;
        }
        self.viewport = viewport;
        self.evaluate_all();
    }

    /// Convenience for the common case of a scroll event
    pub fn scroll_to(&mut self, scroll_y: f64) {
        if !scroll_y.is_finite() {
            return;
        }
        let viewport = self.viewport.scrolled_to(scroll_y);
        self.set_viewport(viewport);
    }

    /// Replace watched boxes and the viewport together, then evaluate each
    /// region once against the final geometry. Ids not being watched and
    /// invalid boxes are ignored.
    pub fn relayout<'a>(
        &mut self,
        regions: impl IntoIterator<Item = (&'a SectionId, Rect)>,
        viewport: Viewport,
    ) {
        if !self.connected || !is_finite_viewport(&viewport) {
            return;
        }
        for (section, region) in regions {
            if !region.is_valid() {
                continue;
            }
            if let Some(watched) = self.watched.get_mut(section) {
                watched.region = region;
            }
        }
        self.viewport = viewport;
        self.evaluate_all();
    }

    /// Replace a watched section's box after a relayout
    pub fn update_region(&mut self, section: &SectionId, region: Rect) {
        if !self.connected || !region.is_valid() {
            return;
        }
        let threshold = self.threshold;
        let viewport = self.viewport;
        if let Some(watched) = self.watched.get_mut(section) {
            watched.region = region;
            if let Some(entry) = crossing(section, watched, &viewport, threshold) {
                self.pending.push(entry);
            }
        }
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn evaluate_all(&mut self) {
        if !self.connected {
            return;
        }
        let threshold = self.threshold;
        let viewport = self.viewport;
        let before = self.pending.len();
        for (section, watched) in self.watched.iter_mut() {
            if let Some(entry) = crossing(section, watched, &viewport, threshold) {
                self.pending.push(entry);
            }
        }
        let queued = self.pending.len() - before;
        if queued > 0 {
            debug!(scroll_y = viewport.scroll_y, queued, "Queued intersection entries");
        }
    }
}

fn is_finite_viewport(viewport: &Viewport) -> bool {
    viewport.scroll_y.is_finite() && viewport.width.is_finite() && viewport.height.is_finite()
}

fn is_above(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}

/// Entry for `watched` if its threshold side changed, updating the stored side
fn crossing(
    section: &SectionId,
    watched: &mut Watched,
    viewport: &Viewport,
    threshold: f64,
) -> Option<IntersectionEntry> {
    let ratio = intersection_ratio(&watched.region, viewport);
    let above = is_above(ratio, threshold);
    if above == watched.above {
        return None;
    }
    watched.above = above;
    Some(IntersectionEntry::new(section.clone(), ratio))
}

impl IntersectionSource for GeometricSource {
    fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    fn observe(&mut self, section: &SectionId, region: Rect) -> bool {
        if !self.connected || !region.is_valid() {
            return false;
        }
        if self.watched.contains_key(section) {
            return true;
        }
        let ratio = intersection_ratio(&region, &self.viewport);
        let above = is_above(ratio, self.threshold);
        self.watched.insert(section.clone(), Watched { region, above });
        // Initial report, delivered whichever side of the threshold it is on
        self.pending.push(IntersectionEntry::new(section.clone(), ratio));
        true
    }

    fn unobserve(&mut self, section: &SectionId) {
        self.watched.remove(section);
        self.pending.retain(|entry| &entry.section != section);
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.watched.clear();
        self.pending.clear();
    }

    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> GeometricSource {
        let mut source = GeometricSource::new(Viewport::new(1280.0, 800.0));
        source.set_threshold(0.1);
        source
    }

    #[test]
    fn test_observe_queues_initial_entry() {
        let mut source = source();
        let id = SectionId::from("historia");
        assert!(source.observe(&id, Rect::new(0.0, 1000.0, 1280.0, 600.0)));

        let records = source.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section, id);
        assert_eq!(records[0].ratio, 0.0);
    }

    #[test]
    fn test_scroll_reports_crossings_only() {
        let mut source = source();
        let id = SectionId::from("historia");
        source.observe(&id, Rect::new(0.0, 1000.0, 1280.0, 600.0));
        source.take_records();

        // 20px of 600 visible: below threshold, no crossing
        source.scroll_to(220.0);
        assert!(source.take_records().is_empty());

        // 100px of 600 visible
        source.scroll_to(300.0);
        let records = source.take_records();
        assert_eq!(records.len(), 1);
        assert!(records[0].ratio >= 0.1);

        // Still above: nothing new
        source.scroll_to(500.0);
        assert!(source.take_records().is_empty());

        // Back to top: crossing downwards is reported
        source.scroll_to(0.0);
        let records = source.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ratio, 0.0);
    }

    #[test]
    fn test_invalid_region_is_not_watched() {
        let mut source = source();
        let id = SectionId::from("como-chegar");
        assert!(!source.observe(&id, Rect::new(0.0, 0.0, f64::NAN, 10.0)));
        assert_eq!(source.watched_count(), 0);
    }

    #[test]
    fn test_disconnect_stops_reporting() {
        let mut source = source();
        source.observe(&SectionId::from("evento"), Rect::new(0.0, 2000.0, 1280.0, 500.0));
        source.disconnect();
        source.scroll_to(2000.0);
        assert!(source.take_records().is_empty());
        assert!(!source.observe(&SectionId::from("evento"), Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_unobserve_drops_queued_entries() {
        let mut source = source();
        let id = SectionId::from("presentes");
        source.observe(&id, Rect::new(0.0, 0.0, 1280.0, 500.0));
        source.unobserve(&id);
        assert!(source.take_records().is_empty());
    }

    #[test]
    fn test_update_region_reports_crossing() {
        let mut source = source();
        let id = SectionId::from("confirmacao");
        source.observe(&id, Rect::new(0.0, 5000.0, 1280.0, 500.0));
        source.take_records();

        source.update_region(&id, Rect::new(0.0, 200.0, 1280.0, 500.0));
        let records = source.take_records();
        assert_eq!(records.len(), 1);
        assert!((records[0].ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_relayout_evaluates_final_geometry_once() {
        let mut source = GeometricSource::new(Viewport::new(1280.0, 1100.0));
        source.set_threshold(0.1);
        let id = SectionId::from("historia");
        // Below a 1100px hero: 0..1100 shows nothing of it
        source.observe(&id, Rect::new(0.0, 1100.0, 1280.0, 1100.0));
        source.take_records();

        // Window shrinks: the hero becomes 900px, historia moves up to 900
        // but the viewport now ends at 800
        source.relayout(
            [(&id, Rect::new(0.0, 900.0, 1280.0, 1100.0))],
            Viewport::new(1280.0, 800.0),
        );
        assert!(source.take_records().is_empty());
        assert_eq!(source.viewport().height, 800.0);
    }

    #[test]
    fn test_non_finite_scroll_is_ignored() {
        let mut source = source();
        let id = SectionId::from("evento");
        source.observe(&id, Rect::new(0.0, 2000.0, 1280.0, 500.0));
        source.take_records();

        source.scroll_to(f64::NAN);
        source.set_viewport(Viewport::new(1280.0, f64::INFINITY));
        assert!(source.take_records().is_empty());
        assert_eq!(source.viewport().scroll_y, 0.0);
        assert_eq!(source.viewport().height, 800.0);
    }
}
