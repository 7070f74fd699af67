//! Startup orchestration.
//!
//! # Responsibilities
//! - Check the declared schema before anything reads it
//! - Load (or create) the config file
//! - Log what each listener is configured for
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Reloads go through the same `App` so logging follows the new config

use std::path::Path;

use crate::config::node::ConfigNode;
use crate::config::validation::validate_schema;
use crate::config::{ConfigError, ConfigHandle, LimboConfig, ReloadReport};
use crate::lifecycle::Shutdown;
use crate::observability::logging::LogControl;

/// Process-wide state shared by the console, signal handlers and consumers.
pub struct App {
    pub config: ConfigHandle,
    pub shutdown: Shutdown,
    logging: LogControl,
}

impl App {
    pub fn start(path: &Path, logging: LogControl) -> Result<Self, ConfigError> {
        validate_schema(LimboConfig::schema()).map_err(ConfigError::Schema)?;

        tracing::info!(path = %path.display(), "Loading config");
        let config = ConfigHandle::open(path)?;

        let app = Self {
            config,
            shutdown: Shutdown::new(),
            logging,
        };
        app.apply(&app.config.current());
        app.status();
        Ok(app)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(config: ConfigHandle, shutdown: Shutdown) -> Self {
        Self {
            config,
            shutdown,
            logging: crate::observability::logging::init(),
        }
    }

    /// Reload the config file and apply the result.
    pub fn reload(&self) -> Result<ReloadReport, ConfigError> {
        let report = self.config.reload()?;
        self.apply(&self.config.current());

        for name in &report.removed {
            tracing::info!(listener = %name, "Listener removed from config");
        }
        for name in &report.added {
            tracing::info!(listener = %name, "Listener added");
        }
        for name in &report.changed {
            tracing::info!(listener = %name, "Listener updated");
        }
        if report.is_empty() {
            tracing::info!("Reload completed, nothing changed");
        } else {
            tracing::info!("Reload completed");
        }
        Ok(report)
    }

    /// Log one line per configured listener.
    pub fn status(&self) {
        let config = self.config.current();
        for listener in config.all_listeners() {
            tracing::info!(
                listener = %listener.name,
                targets = ?listener.bind_targets(),
                forward_mode = %listener.forward_mode,
                world = %listener.world,
                "Listener configured"
            );
        }
    }

    fn apply(&self, config: &LimboConfig) {
        self.logging
            .apply_debug(config.all_listeners().any(|listener| listener.debug));
    }
}
