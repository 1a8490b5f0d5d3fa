pub mod config;
pub mod error;
pub mod geometry;
pub mod links;
pub mod motion;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod session;

pub use config::{AppConfig, EasingType, RevealConfig, ScrollConfig, ServerConfig};
pub use error::{Error, Result};
pub use geometry::{Rect, Viewport};
pub use reveal::{RevealTracker, SectionId};
pub use scroll::ScrollTracker;
pub use session::PageSession;
