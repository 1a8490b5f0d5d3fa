//! Progressive reveal on scroll
//!
//! ## Pieces
//! - `source` - the intersection capability (`IntersectionSource`) and a hand-fed source
//! - `geometric` - a source computed from layout boxes and the viewport
//! - `tracker` - per-section one-shot revealed flags
//! - `scope` - mount/unmount registration of a document's trackable sections
//! - `transition` - opacity/offset styling for revealed sections
//!
//! # Usage
//!
//! ```ignore
//! let source = GeometricSource::new(Viewport::new(1280.0, 800.0));
//! let tracker = RevealTracker::new(source, 0.1)?;
//! let (mut scope, _report) = RevealScope::mount(tracker, &layout)?;
//!
//! // On every scroll event
//! scope.tracker_mut().source_mut().scroll_to(offset);
//! scope.tracker_mut().pump();
//!
//! let visible = scope.tracker().is_revealed("historia");
//! ```

pub mod geometric;
pub mod scope;
pub mod source;
pub mod tracker;
pub mod transition;

pub use geometric::GeometricSource;
pub use scope::{MountReport, RevealScope, TrackableDocument};
pub use source::{IntersectionEntry, IntersectionSource, ManualSource, SectionId};
pub use tracker::{RevealEvent, RevealTracker};
pub use transition::{RevealTransition, SectionStyle};
