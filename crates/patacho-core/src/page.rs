//! Page outline and a simple top-to-bottom layout of it
//!
//! The layout stands in for the rendered document: it knows where every
//! section sits and which of them are marked for reveal-on-scroll.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::EventConfig;
use crate::geometry::{Rect, Viewport};
use crate::reveal::{SectionId, TrackableDocument};

/// A section of the page, in document order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    /// Fades/slides in the first time it scrolls into view
    pub animated: bool,
    /// Desktop height in pixels
    pub height: f64,
    /// Stretches to at least one viewport height
    pub full_screen: bool,
}

const fn section(id: &'static str, title: &'static str, height: f64) -> SectionSpec {
    SectionSpec {
        id,
        title,
        animated: true,
        height,
        full_screen: false,
    }
}

pub const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "hero",
        title: "Isadora & Pedro",
        animated: false,
        height: 900.0,
        full_screen: true,
    },
    section("historia", "Nossa História", 1100.0),
    section("evento", "Sobre o Grande Dia", 1800.0),
    section("recepcao-boas-vindas", "Recepção de Boas-Vindas", 900.0),
    section("hospedagem", "Hospedagem", 2200.0),
    section("aproveitar-patacho", "Como Aproveitar os Dias no Patacho", 600.0),
    section("presentes", "Lista de Presentes", 1400.0),
    section("como-chegar", "Como Chegar", 1000.0),
    section("confirmacao", "Confirme sua Presença", 700.0),
];

/// Header navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub target: &'static str,
}

pub const NAV: &[NavItem] = &[
    NavItem { label: "Início", target: "hero" },
    NavItem { label: "Nossa História", target: "historia" },
    NavItem { label: "Evento", target: "evento" },
    NavItem { label: "Hospedagem", target: "hospedagem" },
    NavItem { label: "Presentes", target: "presentes" },
    NavItem { label: "Confirmar", target: "confirmacao" },
];

pub fn find_section(id: &str) -> Option<&'static SectionSpec> {
    SECTIONS.iter().find(|s| s.id == id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutSection {
    pub id: SectionId,
    pub animated: bool,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    specs: Vec<SectionSpec>,
    sections: Vec<LaidOutSection>,
    viewport: Viewport,
    document_height: f64,
}

impl PageLayout {
    /// Lay out the standard outline for `viewport`
    pub fn new(viewport: Viewport) -> Self {
        Self::with_sections(SECTIONS.to_vec(), viewport)
    }

    pub fn with_sections(specs: Vec<SectionSpec>, viewport: Viewport) -> Self {
        let mut layout = Self {
            specs,
            sections: Vec::new(),
            viewport,
            document_height: 0.0,
        };
        layout.relayout(viewport.width, viewport.height);
        layout
    }

    /// Recompute every box for a new viewport size
    pub fn relayout(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;

        let mut y = 0.0;
        self.sections = self
            .specs
            .iter()
            .map(|spec| {
                let h = if spec.full_screen {
                    spec.height.max(height)
                } else {
                    spec.height
                };
                let laid_out = LaidOutSection {
                    id: SectionId::from(spec.id),
                    animated: spec.animated,
                    rect: Rect::new(0.0, y, width, h),
                };
                y += h;
                laid_out
            })
            .collect();
        self.document_height = y;
    }

    pub fn sections(&self) -> &[LaidOutSection] {
        &self.sections
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Furthest the page can scroll
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    pub fn section_rect(&self, id: &str) -> Option<Rect> {
        self.sections
            .iter()
            .find(|s| s.id.as_str() == id)
            .map(|s| s.rect)
    }

    /// Top edge of a section, for scroll-to-section navigation
    pub fn section_top(&self, id: &str) -> Option<f64> {
        self.section_rect(id).map(|r| r.y)
    }
}

impl TrackableDocument for PageLayout {
    fn trackable_regions(&self) -> Vec<(SectionId, Option<Rect>)> {
        self.sections
            .iter()
            .filter(|s| s.animated)
            .map(|s| (s.id.clone(), Some(s.rect)))
            .collect()
    }
}

impl EventConfig {
    /// Whole days from `today` until the celebration starts (negative once it has)
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    pub fn is_over(&self, today: NaiveDate) -> bool {
        today > self.end_date
    }
}
