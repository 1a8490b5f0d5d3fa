//! Scroll offset tracking and animated navigation
//!
//! - `tracker` - the page-wide offset, republished to subscribers (parallax)
//! - `animation` - smooth scroll-to-section controller
//! - `config` - derived values of `ScrollConfig`

pub mod animation;
pub mod config;
pub mod tracker;

pub use animation::ScrollAnimator;
pub use tracker::ScrollTracker;
