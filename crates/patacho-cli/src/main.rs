use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patacho_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "patacho")]
#[command(author, version, about = "Serve and preview the Isadora & Pedro wedding site")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/patacho/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the built site with single-page fallback
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory holding the built bundle
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },
    /// Scroll a laid-out page top to bottom and report when sections reveal
    Simulate {
        /// Scroll step in pixels
        #[arg(short, long, default_value_t = 100.0)]
        step: f64,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 800.0)]
        viewport_height: f64,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        viewport_width: f64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List external links
    Links {
        /// Only this kind (rsvp, map, lodging, gift)
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Open an external link in the browser
    Open {
        /// Link kind (rsvp, map, lodging, gift)
        kind: String,
        /// Position within the kind, starting at 0
        #[arg(default_value_t = 0)]
        index: usize,
    },
    /// Show the event summary
    Info,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Some(Commands::Serve { port, public_dir }) => {
            commands::serve::run(config, port, public_dir).await
        }
        None => commands::serve::run(config, None, None).await,
        Some(Commands::Simulate {
            step,
            viewport_height,
            viewport_width,
            json,
        }) => commands::simulate::run(&config, step, viewport_width, viewport_height, json),
        Some(Commands::Links { kind }) => commands::links::run(&config, kind.as_deref()),
        Some(Commands::Open { kind, index }) => commands::open::run(&config, &kind, index),
        Some(Commands::Info) => commands::info::run(&config),
        Some(Commands::Config) => commands::config::run(&config),
    }
}
