//! OS signal handling.
//!
//! # Responsibilities
//! - SIGINT / Ctrl-C triggers shutdown
//! - SIGHUP triggers a config reload, not shutdown
//!
//! A handler that cannot be installed is logged and skipped; the other
//! handlers and the console keep running.

use std::sync::Arc;

use crate::lifecycle::startup::App;

/// Handle signals until shutdown.
pub async fn run(app: Arc<App>) {
    tokio::select! {
        _ = app.shutdown.wait() => {}
        _ = interrupt() => {
            tracing::info!("Interrupt received, shutting down");
            app.shutdown.trigger();
        }
        _ = reload_on_hangup(&app) => {}
    }
}

/// Resolve on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for interrupt: {}. Use the `stop` command instead.", e);
        std::future::pending::<()>().await
    }
}

#[cfg(unix)]
async fn reload_on_hangup(app: &App) {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::hangup()) {
        Ok(mut hangup) => {
            while hangup.recv().await.is_some() {
                tracing::info!("SIGHUP received");
                let _ = app.reload();
            }
        }
        Err(e) => tracing::warn!("SIGHUP reload unavailable: {}", e),
    }
    std::future::pending::<()>().await
}

#[cfg(not(unix))]
async fn reload_on_hangup(_app: &App) {
    std::future::pending::<()>().await
}
