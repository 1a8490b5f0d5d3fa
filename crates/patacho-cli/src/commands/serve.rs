use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use patacho_core::AppConfig;
use patacho_server::StaticServer;

/// Serve the site until Ctrl+C
pub async fn run(mut config: AppConfig, port: Option<u16>, public_dir: Option<PathBuf>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(dir) = public_dir {
        config.server.public_dir = dir;
    }

    let server = StaticServer::new(&config);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    println!(
        "Serving {} at http://{}. Press Ctrl+C to stop.",
        server.public_dir().display(),
        server.bind_addr()
    );

    server.run(shutdown_rx).await?;

    println!("Server stopped.");
    Ok(())
}
