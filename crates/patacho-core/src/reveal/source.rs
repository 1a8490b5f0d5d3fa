//! Intersection sources: the capability the reveal tracker observes through
//!
//! A source watches a set of regions against the viewport and queues
//! notifications whenever a region's visibility relative to the threshold
//! changes. The tracker drains them in batches.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Identifier of a trackable section (the element id in the document)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One notification: how much of a watched region is visible right now
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub section: SectionId,
    /// Visible fraction of the region, in [0, 1]
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(section: impl Into<SectionId>, ratio: f64) -> Self {
        Self {
            section: section.into(),
            ratio,
        }
    }
}

/// A shared observing primitive that watches many regions at once
pub trait IntersectionSource {
    /// Threshold crossings worth reporting
    fn set_threshold(&mut self, threshold: f64);

    /// Start watching `region` for `section`.
    ///
    /// Returns `false` when the region cannot be observed (invalid geometry
    /// or a disconnected source); the section is then simply never reported.
    fn observe(&mut self, section: &SectionId, region: Rect) -> bool;

    /// Stop watching a section. Unknown sections are ignored.
    fn unobserve(&mut self, section: &SectionId);

    /// Stop watching everything and discard queued notifications.
    fn disconnect(&mut self);

    /// Drain the notifications queued since the last call.
    fn take_records(&mut self) -> Vec<IntersectionEntry>;
}

/// A source fed by hand: a bridge to a native intersection primitive pushes
/// entries into it, and tests script batches with it.
#[derive(Debug, Default)]
pub struct ManualSource {
    threshold: f64,
    observed: HashSet<SectionId>,
    pending: Vec<IntersectionEntry>,
    disconnected: bool,
}

impl ManualSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification, as the host runtime would
    pub fn push(&mut self, entry: IntersectionEntry) {
        self.pending.push(entry);
    }

    pub fn is_observing(&self, section: &str) -> bool {
        self.observed.contains(section)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl IntersectionSource for ManualSource {
    fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    fn observe(&mut self, section: &SectionId, region: Rect) -> bool {
        if self.disconnected || !region.is_valid() {
            return false;
        }
        self.observed.insert(section.clone());
        true
    }

    fn unobserve(&mut self, section: &SectionId) {
        self.observed.remove(section);
    }

    fn disconnect(&mut self) {
        self.disconnected = true;
        self.observed.clear();
        self.pending.clear();
    }

    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.pending)
    }
}
