//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Raise verbosity when a listener enables `debug`
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the config file
//! - The filter sits behind a reload layer so a config reload can change it

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

const DEFAULT_DIRECTIVES: &str = "limbo=info";
const DEBUG_DIRECTIVES: &str = "limbo=debug";

/// Handle to the installed log filter.
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

/// Install the global subscriber.
///
/// Installing twice (e.g. from tests) leaves the first subscriber in place.
pub fn init() -> LogControl {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_DIRECTIVES), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();

    LogControl { handle, from_env }
}

impl LogControl {
    /// Switch between the default and debug filters.
    pub fn apply_debug(&self, debug: bool) {
        if self.from_env {
            return;
        }
        let directives = if debug { DEBUG_DIRECTIVES } else { DEFAULT_DIRECTIVES };
        if let Err(e) = self.handle.reload(EnvFilter::new(directives)) {
            tracing::warn!("Failed to update log filter: {}", e);
        }
    }
}
