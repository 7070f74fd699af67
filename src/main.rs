//! Limbo server host process.
//!
//! # Architecture Overview
//!
//! ```text
//!     config.toml ──▶ config (load, relocate, default) ──▶ Arc<LimboConfig>
//!                                                              │
//!     stdin ──▶ lifecycle::console ──┐                         ▼
//!                                    ├──▶ App ──▶ reload / status / shutdown
//!     SIGINT/SIGHUP ──▶ signals ─────┘
//! ```
//!
//! The protocol side consumes `LimboConfig` snapshots; this binary owns
//! loading, reloading and process lifetime.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use limbo::lifecycle::{console, signals, App};
use limbo::observability::logging;

#[derive(Parser)]
#[command(name = "limbo")]
#[command(about = "Minecraft limbo server", long_about = None)]
struct Cli {
    /// Path to the config file. Created with defaults if missing.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let logging = logging::init();

    tracing::info!("limbo v{} starting", env!("CARGO_PKG_VERSION"));

    let app = Arc::new(App::start(&cli.config, logging)?);

    tokio::spawn(signals::run(Arc::clone(&app)));
    tokio::spawn(console::run(Arc::clone(&app), console::spawn_reader()));

    tracing::info!("Bootstrap finished");

    app.shutdown.wait().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
