//! Outbound links: RSVP form, venue map, lodging and gift payment pages
//!
//! The site never talks to these services itself; it only navigates to them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};
use url::Url;

use crate::config::{LinkEntry, LinksConfig};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Rsvp,
    Map,
    Lodging,
    Gift,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Rsvp => "rsvp",
            LinkKind::Map => "map",
            LinkKind::Lodging => "lodging",
            LinkKind::Gift => "gift",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rsvp" | "confirmacao" => Ok(LinkKind::Rsvp),
            "map" | "mapa" => Ok(LinkKind::Map),
            "lodging" | "hospedagem" => Ok(LinkKind::Lodging),
            "gift" | "gifts" | "presentes" => Ok(LinkKind::Gift),
            other => Err(Error::UnknownLink(format!("unknown link kind '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub kind: LinkKind,
    pub label: String,
    pub url: Url,
}

impl ExternalLink {
    /// Validate `url` as an absolute http(s) URL
    pub fn new(kind: LinkKind, label: impl Into<String>, url: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidLink(format!(
                "{} link must use http or https: {}",
                kind, url
            )));
        }
        if parsed.host_str().is_none() {
            return Err(Error::InvalidLink(format!("{} link has no host: {}", kind, url)));
        }
        Ok(Self {
            kind,
            label: label.into(),
            url: parsed,
        })
    }

    fn from_entry(kind: LinkKind, entry: &LinkEntry) -> Result<Self> {
        Self::new(kind, entry.label.clone(), &entry.url)
    }
}

/// Every outbound link of the page, validated
#[derive(Debug, Clone, Serialize)]
pub struct LinkDirectory {
    links: Vec<ExternalLink>,
}

impl LinkDirectory {
    pub fn from_config(config: &LinksConfig) -> Result<Self> {
        let mut links = vec![
            ExternalLink::new(LinkKind::Rsvp, "Confirmar presença", &config.rsvp)?,
            ExternalLink::new(LinkKind::Map, "Ver no mapa", &config.map)?,
        ];
        for entry in &config.lodging {
            links.push(ExternalLink::from_entry(LinkKind::Lodging, entry)?);
        }
        for entry in &config.gifts {
            links.push(ExternalLink::from_entry(LinkKind::Gift, entry)?);
        }
        Ok(Self { links })
    }

    pub fn all(&self) -> &[ExternalLink] {
        &self.links
    }

    pub fn of_kind(&self, kind: LinkKind) -> impl Iterator<Item = &ExternalLink> {
        self.links.iter().filter(move |l| l.kind == kind)
    }

    /// The `index`-th link of a kind (0-based)
    pub fn get(&self, kind: LinkKind, index: usize) -> Result<&ExternalLink> {
        self.of_kind(kind).nth(index).ok_or_else(|| {
            Error::UnknownLink(format!("no {} link at position {}", kind, index))
        })
    }
}

/// Hand the link to the system browser. Failures are logged, not returned.
pub fn open_external(link: &ExternalLink) {
    info!(kind = %link.kind, url = %link.url, "Opening external link");
    if let Err(e) = open::that_detached(link.url.as_str()) {
        warn!("Failed to open {}: {}", link.url, e);
    }
}
