use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub event: EventConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Easing curve used by scroll animations and reveal transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the end value
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Fraction of a section that must be inside the viewport before it reveals (0.0-1.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Fade/slide-in duration in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    /// Vertical offset of a hidden section, in pixels
    #[serde(default = "default_offset_px")]
    pub offset_px: f64,
    /// Easing curve for the fade/slide-in
    #[serde(default = "default_reveal_easing")]
    pub easing: EasingType,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            transition_ms: default_transition_ms(),
            offset_px: default_offset_px(),
            easing: default_reveal_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Multiplier applied to the scroll offset for the hero background layer
    #[serde(default = "default_parallax_factor")]
    pub parallax_factor: f64,
    /// Animate scroll-to-section navigation
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Navigation animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for navigation animations
    #[serde(default)]
    pub easing: EasingType,
    /// Frames per second while a navigation animation runs
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Height of the fixed header, subtracted from navigation targets
    #[serde(default = "default_header_offset")]
    pub header_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            parallax_factor: default_parallax_factor(),
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            header_offset_px: default_header_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port (the PORT environment variable takes precedence)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the built asset bundle
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    /// Entry document served for every path without a matching asset
    #[serde(default = "default_index_file")]
    pub index_file: String,
    /// Compress responses when the client accepts it
    #[serde(default = "default_true")]
    pub compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            index_file: default_index_file(),
            compression: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_couple")]
    pub couple: String,
    /// First day of the celebration
    #[serde(default = "default_event_date")]
    pub date: NaiveDate,
    /// Last day of the celebration
    #[serde(default = "default_event_end_date")]
    pub end_date: NaiveDate,
    #[serde(default = "default_venue")]
    pub venue: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_dress_code")]
    pub dress_code: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            couple: default_couple(),
            date: default_event_date(),
            end_date: default_event_end_date(),
            venue: default_venue(),
            location: default_location(),
            dress_code: default_dress_code(),
        }
    }
}

/// A labelled outbound URL as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

impl LinkEntry {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// RSVP form (third-party form service)
    #[serde(default = "default_rsvp_url")]
    pub rsvp: String,
    /// Venue on a map
    #[serde(default = "default_map_url")]
    pub map: String,
    #[serde(default = "default_lodging")]
    pub lodging: Vec<LinkEntry>,
    /// Gift contributions (third-party payment links)
    #[serde(default = "default_gifts")]
    pub gifts: Vec<LinkEntry>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            rsvp: default_rsvp_url(),
            map: default_map_url(),
            lodging: default_lodging(),
            gifts: default_gifts(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    0.1
}

fn default_transition_ms() -> u64 {
    1000
}

fn default_offset_px() -> f64 {
    30.0
}

fn default_reveal_easing() -> EasingType {
    EasingType::EaseOut
}

fn default_parallax_factor() -> f64 {
    0.3
}

fn default_animation_duration() -> u64 {
    600
}

fn default_animation_fps() -> u32 {
    60
}

fn default_header_offset() -> f64 {
    0.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("dist").join("public")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_couple() -> String {
    "Isadora & Pedro".to_string()
}

fn default_event_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap_or_default()
}

fn default_event_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap_or_default()
}

fn default_venue() -> String {
    "Espaço Koral".to_string()
}

fn default_location() -> String {
    "Praia do Patacho, Porto de Pedras - AL".to_string()
}

fn default_dress_code() -> String {
    "Esporte fino à beira-mar".to_string()
}

fn default_rsvp_url() -> String {
    "https://docs.google.com/forms/d/e/1FAIpQLSeTz7SqZj0KiZHW7o9YTaJdLJZcbU0sBdwhU3JPaGm7k2bLGQ/viewform?usp=sharing".to_string()
}

fn default_map_url() -> String {
    "https://www.google.com/maps/search/Espa%C3%A7o+Koral+Praia+do+Patacho+Porto+de+Pedras+AL/@-9.1583,-35.2833,15z".to_string()
}

fn default_lodging() -> Vec<LinkEntry> {
    vec![
        LinkEntry::new(
            "Pousada Samba Pa Ti",
            "https://www.booking.com/searchresults.pt-br.html?ss=Pousada%20Samba%20Pa%20Ti%2C%20Porto%20de%20Pedras&checkin=2026-10-16&checkout=2026-10-18",
        ),
        LinkEntry::new(
            "Pousada do Patacho",
            "https://www.booking.com/searchresults.pt-br.html?ss=Pousada%20Patacho%2C%20Porto%20de%20Pedras&checkin=2026-10-16&checkout=2026-10-18",
        ),
        LinkEntry::new(
            "Pedras do Patacho",
            "https://www.booking.com/searchresults.pt-br.html?ss=Pedras%20Do%20Patacho%20Hotel%20Boutique%20Experience%2C%20Porto%20de%20Pedras&checkin=2026-10-16&checkout=2026-10-18",
        ),
        LinkEntry::new(
            "Villa Canziani & Donato",
            "https://www.booking.com/searchresults.pt-br.html?highlighted_hotels=6790234&checkin=2026-10-16&checkout=2026-10-18",
        ),
        LinkEntry::new(
            "Pousada Vila do Patacho",
            "https://www.booking.com/searchresults.pt-br.html?ss=Pousada%20Vila%20do%20Patacho%2C%20Porto%20de%20Pedras&checkin=2026-10-16&checkout=2026-10-18",
        ),
        LinkEntry::new(
            "Alameda Lounge Pousada",
            "https://www.booking.com/searchresults.pt-br.html?highlighted_hotels=9991979&checkin=2026-10-16&checkout=2026-10-18",
        ),
        LinkEntry::new(
            "4 Suítes - Até 10 Hóspedes",
            "https://www.airbnb.com.br/rooms/1071042474375564812?check_in=2026-10-16&check_out=2026-10-18",
        ),
        LinkEntry::new(
            "4 Quartos - Até 10 Hóspedes",
            "https://www.airbnb.com/rooms/1034210318639088552?check_in=2026-10-16&check_out=2026-10-18",
        ),
        LinkEntry::new(
            "3 Quartos - Até 10 Hóspedes",
            "https://www.airbnb.com.br/rooms/1050878633269370379?check_in=2026-10-16&check_out=2026-10-18",
        ),
    ]
}

fn default_gifts() -> Vec<LinkEntry> {
    vec![
        LinkEntry::new(
            "R$ 100 - Drinks para brindarmos",
            "https://nubank.com.br/cobrar/177chu/6988ae68-8659-41c1-89b8-490c348046bc",
        ),
        LinkEntry::new(
            "R$ 300 - Pratos da culinária local",
            "https://nubank.com.br/cobrar/177chu/6988ae94-af0c-41ca-8393-40790f993830",
        ),
        LinkEntry::new(
            "R$ 500 - Experiências turísticas",
            "https://nubank.com.br/cobrar/177chu/6988aeac-35b3-45fd-abeb-f0efeb962484",
        ),
        LinkEntry::new(
            "Escolha seu valor",
            "https://nubank.com.br/cobrar/177chu/6988aee0-e5f2-4d6b-98ad-84c9bdf88f32",
        ),
    ]
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            Self::read_file(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file; the file must exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/patacho/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("patacho")
            .join("config.toml")
    }

    /// `PORT` wins over the configured port, matching how the site is deployed
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    /// Reject values the trackers cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let threshold = self.reveal.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(crate::Error::Config(format!(
                "reveal.threshold must be within 0.0..=1.0, got {}",
                threshold
            )));
        }
        if !self.reveal.offset_px.is_finite() {
            return Err(crate::Error::Config("reveal.offset_px must be finite".into()));
        }
        let factor = self.scroll.parallax_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll.parallax_factor must be a non-negative number, got {}",
                factor
            )));
        }
        if !self.scroll.header_offset_px.is_finite() || self.scroll.header_offset_px < 0.0 {
            return Err(crate::Error::Config(
                "scroll.header_offset_px must be a non-negative number".into(),
            ));
        }
        if self.event.end_date < self.event.date {
            return Err(crate::Error::Config(
                "event.end_date must not be before event.date".into(),
            ));
        }
        if self.server.index_file.trim().is_empty() {
            return Err(crate::Error::Config("server.index_file must not be empty".into()));
        }
        crate::links::LinkDirectory::from_config(&self.links)?;
        Ok(())
    }

    /// Directory holding the built bundle (with tilde expansion)
    pub fn public_dir(&self) -> PathBuf {
        expand_tilde(&self.server.public_dir)
    }

    /// Full path of the entry document
    pub fn index_path(&self) -> PathBuf {
        self.public_dir().join(&self.server.index_file)
    }
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}
