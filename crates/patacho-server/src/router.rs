use std::path::Path;
use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, Instrument};
use uuid::Uuid;

use patacho_core::ServerConfig;

/// Routes for the built bundle in `public_dir`.
///
/// A path matching a file serves that file. Anything else, including
/// client-side routes and missing assets, serves the entry document with
/// status 200 so the single-page app can take over.
pub fn build_router(config: &ServerConfig, public_dir: &Path) -> Router {
    let entry = ServeFile::new(public_dir.join(&config.index_file));
    let assets = ServeDir::new(public_dir).fallback(entry);

    let router = Router::new()
        .fallback_service(assets)
        .layer(from_fn(request_tracing));

    if config.compression {
        router.layer(CompressionLayer::new())
    } else {
        router
    }
}

async fn request_tracing(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %request.method(),
        route = %request.uri().path(),
    );

    let start = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
        debug!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request served"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
