//! Shared motion primitives
//!
//! - `easing` - curves mapping linear progress [0, 1] onto eased progress
//! - `timing` - progress and interpolation helpers
//!
//! Both the scroll animator and the reveal transition build on these.

pub mod easing;
pub mod timing;

pub use timing::{is_complete_at, lerp, progress, progress_at};
