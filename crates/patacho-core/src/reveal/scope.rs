//! Mount-time registration of every trackable section
//!
//! A `RevealScope` is acquired when the page has been laid out and released
//! when it is torn down. Release unregisters every mounted section and
//! disposes the tracker on all exit paths, including a failed mount.

use tracing::{info, warn};

use super::source::{IntersectionSource, SectionId};
use super::tracker::RevealTracker;
use crate::geometry::Rect;
use crate::Result;

/// Producer of trackable regions (the rendered document)
pub trait TrackableDocument {
    /// Every region marked trackable, in document order. `None` means the
    /// element is missing from the rendered output.
    fn trackable_regions(&self) -> Vec<(SectionId, Option<Rect>)>;
}

/// Outcome of a mount pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountReport {
    pub registered: Vec<SectionId>,
    /// Marked trackable but not observable; these never reveal
    pub skipped: Vec<SectionId>,
}

pub struct RevealScope<S: IntersectionSource> {
    tracker: RevealTracker<S>,
    mounted: Vec<SectionId>,
}

impl<S: IntersectionSource> RevealScope<S> {
    /// Register every trackable region of `document` with `tracker`
    pub fn mount(
        tracker: RevealTracker<S>,
        document: &impl TrackableDocument,
    ) -> Result<(Self, MountReport)> {
        // Built before registering so that an early return still releases
        let mut scope = Self {
            tracker,
            mounted: Vec::new(),
        };
        let mut report = MountReport::default();

        for (section, region) in document.trackable_regions() {
            let Some(region) = region else {
                warn!(section = %section, "Trackable section missing from document");
                report.skipped.push(section);
                continue;
            };
            if scope.tracker.register(section.clone(), region)? {
                scope.mounted.push(section.clone());
                report.registered.push(section);
            } else if !scope.tracker.is_registered(section.as_str()) {
                report.skipped.push(section);
            }
        }

        info!(
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            "Mounted trackable sections"
        );
        Ok((scope, report))
    }

    pub fn tracker(&self) -> &RevealTracker<S> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut RevealTracker<S> {
        &mut self.tracker
    }

    pub fn mounted(&self) -> &[SectionId] {
        &self.mounted
    }

    /// Explicit teardown; dropping the scope does the same
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        for section in self.mounted.drain(..) {
            self.tracker.unregister(section.as_str());
        }
        self.tracker.dispose();
    }
}

impl<S: IntersectionSource> Drop for RevealScope<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::source::{IntersectionEntry, ManualSource};

    struct FixedDocument(Vec<(SectionId, Option<Rect>)>);

    impl TrackableDocument for FixedDocument {
        fn trackable_regions(&self) -> Vec<(SectionId, Option<Rect>)> {
            self.0.clone()
        }
    }

    fn document() -> FixedDocument {
        FixedDocument(vec![
            ("historia".into(), Some(Rect::new(0.0, 800.0, 1280.0, 600.0))),
            ("evento".into(), Some(Rect::new(0.0, 1400.0, 1280.0, 900.0))),
            ("presentes".into(), None),
            ("como-chegar".into(), Some(Rect::new(0.0, 2300.0, f64::NAN, 10.0))),
        ])
    }

    fn tracker() -> RevealTracker<ManualSource> {
        RevealTracker::new(ManualSource::new(), 0.1).unwrap()
    }

    #[test]
    fn test_mount_registers_observable_sections() {
        let (scope, report) = RevealScope::mount(tracker(), &document()).unwrap();
        assert_eq!(
            report.registered,
            vec![SectionId::from("historia"), SectionId::from("evento")]
        );
        assert_eq!(
            report.skipped,
            vec![SectionId::from("presentes"), SectionId::from("como-chegar")]
        );
        assert_eq!(scope.tracker().registered_count(), 2);
    }

    #[test]
    fn test_duplicate_regions_register_once() {
        let doc = FixedDocument(vec![
            ("historia".into(), Some(Rect::new(0.0, 0.0, 10.0, 10.0))),
            ("historia".into(), Some(Rect::new(0.0, 0.0, 10.0, 10.0))),
        ]);
        let (scope, report) = RevealScope::mount(tracker(), &doc).unwrap();
        assert_eq!(report.registered.len(), 1);
        assert!(report.skipped.is_empty());
        assert_eq!(scope.mounted().len(), 1);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let (mut scope, _) = RevealScope::mount(tracker(), &document()).unwrap();
        scope
            .tracker_mut()
            .apply_batch(&[IntersectionEntry::new("historia", 0.5)]);
        assert!(scope.tracker().is_revealed("historia"));

        scope.release();
        assert!(scope.tracker().is_disposed());
        assert_eq!(scope.tracker().registered_count(), 0);
        assert!(scope.tracker().source().is_disconnected());
        assert!(scope.mounted().is_empty());
    }

    #[test]
    fn test_mount_on_disposed_tracker_fails() {
        let mut disposed = tracker();
        disposed.dispose();
        assert!(RevealScope::mount(disposed, &document()).is_err());
    }
}
