//! Static asset server
//!
//! Serves the built site until the shutdown channel flips to `true`.

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use patacho_core::{AppConfig, Result, ServerConfig};

use crate::router::build_router;

pub struct StaticServer {
    config: ServerConfig,
    public_dir: PathBuf,
}

impl StaticServer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.server.clone(),
            public_dir: config.public_dir(),
        }
    }

    /// `host:port` this server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub fn public_dir(&self) -> &PathBuf {
        &self.public_dir
    }

    /// Bind the configured address and serve
    pub async fn run(&self, shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        let listener = TcpListener::bind(self.bind_addr()).await?;
        self.serve(listener, shutdown_rx).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener, mut shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        let entry = self.public_dir.join(&self.config.index_file);
        if !entry.is_file() {
            warn!(
                "Entry document {} not found; unmatched paths will return 404",
                entry.display()
            );
        }

        let app = build_router(&self.config, &self.public_dir);
        let addr = listener.local_addr()?;
        info!(
            "Serving {} on http://{} (compression: {})",
            self.public_dir.display(),
            addr,
            self.config.compression
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
                info!("Static server shutting down");
            })
            .await?;

        Ok(())
    }
}
