//! HTTP hosting for the built site
//!
//! Static assets are served as-is (compressed when the client accepts it);
//! every other path gets the entry document so client-side navigation works
//! on reload and deep links.

mod router;
mod server;

pub use router::build_router;
pub use server::StaticServer;
