//! A mounted page: layout, scroll offset, reveal tracking and navigation
//!
//! `PageSession` is the host-side glue. Every scroll event goes through
//! `scroll_to()`, which republishes the offset and re-evaluates reveals in
//! one step. Nav clicks go through `navigate()` followed by `tick()` once per
//! frame until `is_navigating()` turns false.

use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::config::AppConfig;
use crate::geometry::Viewport;
use crate::page::PageLayout;
use crate::reveal::{
    GeometricSource, MountReport, RevealEvent, RevealScope, RevealTracker, RevealTransition,
    SectionId, SectionStyle,
};
use crate::scroll::{ScrollAnimator, ScrollTracker};
use crate::Result;

pub struct PageSession {
    layout: PageLayout,
    scroll: ScrollTracker,
    reveal: RevealScope<GeometricSource>,
    animator: ScrollAnimator,
    transition: RevealTransition,
    parallax_factor: f64,
    header_offset: f64,
}

impl PageSession {
    /// Lay out the page for `viewport`, mount its trackable sections and
    /// reveal whatever is already in view
    pub fn new(config: &AppConfig, viewport: Viewport) -> Result<(Self, MountReport)> {
        Self::build(config, viewport, None)
    }

    /// Like `new`, also sending a `RevealEvent` for every reveal
    pub fn with_event_sender(
        config: &AppConfig,
        viewport: Viewport,
        tx: mpsc::UnboundedSender<RevealEvent>,
    ) -> Result<(Self, MountReport)> {
        Self::build(config, viewport, Some(tx))
    }

    fn build(
        config: &AppConfig,
        viewport: Viewport,
        tx: Option<mpsc::UnboundedSender<RevealEvent>>,
    ) -> Result<(Self, MountReport)> {
        let layout = PageLayout::new(viewport);
        let mut tracker = RevealTracker::new(GeometricSource::new(viewport), config.reveal.threshold)?;
        if let Some(tx) = tx {
            tracker = tracker.with_event_sender(tx);
        }
        let (mut reveal, report) = RevealScope::mount(tracker, &layout)?;
        reveal.tracker_mut().pump();

        let scroll = ScrollTracker::new();
        scroll.on_scroll(viewport.scroll_y);

        let mut animator = ScrollAnimator::new(config.scroll.clone());
        animator.set_position(viewport.scroll_y);

        let session = Self {
            layout,
            scroll,
            reveal,
            animator,
            transition: RevealTransition::new(&config.reveal),
            parallax_factor: config.scroll.parallax_factor,
            header_offset: config.scroll.header_offset_px,
        };
        Ok((session, report))
    }

    /// A user scroll to `offset`; returns the sections it revealed.
    /// Non-finite offsets are ignored.
    pub fn scroll_to(&mut self, offset: f64) -> Vec<SectionId> {
        if !offset.is_finite() {
            debug!("Ignoring non-finite scroll offset");
            return Vec::new();
        }
        let offset = offset.clamp(0.0, self.layout.max_scroll());
        self.animator.set_position(offset);
        self.apply_offset(offset, Instant::now())
    }

    /// The viewport changed size: relayout, move every watched box, re-evaluate
    pub fn resize(&mut self, width: f64, height: f64) -> Vec<SectionId> {
        if !(width.is_finite() && height.is_finite()) {
            debug!("Ignoring non-finite viewport size");
            return Vec::new();
        }
        self.layout.relayout(width, height);
        let offset = self.scroll.offset().clamp(0.0, self.layout.max_scroll());
        self.animator.set_position(offset);

        let tracker = self.reveal.tracker_mut();
        tracker.source_mut().relayout(
            self.layout.sections().iter().map(|s| (&s.id, s.rect)),
            Viewport::new(width, height).scrolled_to(offset),
        );
        self.scroll.on_scroll(offset);
        tracker.pump()
    }

    /// Start scrolling to a section. Unknown ids are ignored and return false.
    pub fn navigate(&mut self, section: &str) -> bool {
        let Some(top) = self.layout.section_top(section) else {
            debug!(section, "Navigation target not on page");
            return false;
        };
        let target = (top - self.header_offset).max(0.0);
        let max_scroll = self.layout.max_scroll();
        self.animator.scroll_to(target, max_scroll);
        if !self.animator.is_animating() {
            // Instant navigation: publish right away
            let offset = self.animator.current();
            self.apply_offset(offset, Instant::now());
        }
        true
    }

    pub fn is_navigating(&self) -> bool {
        self.animator.needs_update()
    }

    /// Advance a running navigation by one frame
    pub fn tick(&mut self) -> Vec<SectionId> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Vec<SectionId> {
        if !self.animator.needs_update() {
            return Vec::new();
        }
        let offset = self.animator.update_at(self.layout.max_scroll(), now);
        self.apply_offset(offset, now)
    }

    fn apply_offset(&mut self, offset: f64, now: Instant) -> Vec<SectionId> {
        self.scroll.on_scroll(offset);
        let tracker = self.reveal.tracker_mut();
        tracker.source_mut().scroll_to(offset);
        tracker.pump_at(now)
    }

    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn subscribe_scroll(&self) -> watch::Receiver<f64> {
        self.scroll.subscribe()
    }

    pub fn is_revealed(&self, section: &str) -> bool {
        self.reveal.tracker().is_revealed(section)
    }

    /// Render-pass style of a section; sections without reveal animation are
    /// always shown. `None` for ids not on the page.
    pub fn style_of(&self, section: &str, now: Instant) -> Option<SectionStyle> {
        let laid_out = self
            .layout
            .sections()
            .iter()
            .find(|s| s.id.as_str() == section)?;
        if !laid_out.animated {
            return Some(SectionStyle::shown());
        }
        let revealed_at = self.reveal.tracker().revealed_at(section);
        Some(self.transition.style(revealed_at, now))
    }

    /// Offset of the hero background layer
    pub fn parallax_offset(&self) -> f64 {
        self.scroll.parallax_offset(self.parallax_factor)
    }

    pub fn parallax_transform(&self) -> String {
        self.scroll.parallax_transform(self.parallax_factor)
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn tracker(&self) -> &RevealTracker<GeometricSource> {
        self.reveal.tracker()
    }

    pub fn transition(&self) -> &RevealTransition {
        &self.transition
    }

    /// Page teardown. Revealed flags stay readable, nothing changes afterwards.
    pub fn dispose(&mut self) {
        self.animator.cancel();
        self.reveal.tracker_mut().dispose();
    }
}
