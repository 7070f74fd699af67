//! Shared configuration handle with atomic reload.
//!
//! Readers take an `Arc` snapshot and keep it for as long as they need; a
//! reload builds a complete new root and swaps the pointer, so a snapshot
//! never changes underneath its holder.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::error::ConfigError;
use crate::config::loader::{load_config, load_or_init};
use crate::config::schema::LimboConfig;

/// Owner of the live configuration.
pub struct ConfigHandle {
    path: PathBuf,
    current: ArcSwap<LimboConfig>,
}

impl ConfigHandle {
    pub fn new(path: &Path, config: LimboConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Load the file at `path`, writing defaults first if it does not exist.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let config = load_or_init(path)?;
        Ok(Self::new(path, config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> Arc<LimboConfig> {
        self.current.load_full()
    }

    /// Reload from disk. On failure the current configuration stays in place.
    pub fn reload(&self) -> Result<ReloadReport, ConfigError> {
        tracing::info!(path = %self.path.display(), "Reloading config");
        match load_config(&self.path) {
            Ok(config) => Ok(self.replace(config)),
            Err(e) => {
                tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
                Err(e)
            }
        }
    }

    /// Swap in a new configuration and report what changed.
    pub fn replace(&self, config: LimboConfig) -> ReloadReport {
        let next = Arc::new(config);
        let previous = self.current.swap(Arc::clone(&next));
        let report = ReloadReport::between(&previous, &next);
        tracing::info!(
            added = report.added.len(),
            removed = report.removed.len(),
            changed = report.changed.len(),
            "Config swapped"
        );
        report
    }
}

/// Listener-level difference between two configurations, matched by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<String>,
    pub unchanged: Vec<String>,
}

impl ReloadReport {
    pub fn between(previous: &LimboConfig, next: &LimboConfig) -> Self {
        let mut report = ReloadReport::default();

        for old in previous.all_listeners() {
            match next.listener_named(&old.name) {
                None => report.removed.push(old.name.clone()),
                Some(new) if new == old => report.unchanged.push(old.name.clone()),
                Some(_) => report.changed.push(old.name.clone()),
            }
        }
        for new in next.all_listeners() {
            if previous.listener_named(&new.name).is_none() {
                report.added.push(new.name.clone());
            }
        }

        report
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ListenerConfig;

    fn named(name: &str) -> ListenerConfig {
        let mut listener = ListenerConfig::default();
        listener.name = name.to_string();
        listener
    }

    #[test]
    fn test_report_matches_listeners_by_name() {
        let mut previous = LimboConfig::default();
        previous.listeners.push(named("lobby"));
        previous.listeners.push(named("old"));

        let mut next = LimboConfig::default();
        let mut lobby = named("lobby");
        lobby.bind_ports = vec![25570];
        next.listeners.push(lobby);
        next.listeners.push(named("new"));

        let report = ReloadReport::between(&previous, &next);
        assert_eq!(report.unchanged, vec!["main"]);
        assert_eq!(report.changed, vec!["lobby"]);
        assert_eq!(report.removed, vec!["old"]);
        assert_eq!(report.added, vec!["new"]);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_snapshot_survives_swap() {
        let handle = ConfigHandle::new(Path::new("unused.toml"), LimboConfig::default());
        let before = handle.current();

        let mut next = LimboConfig::default();
        next.listener.timeout = 5_000;
        let report = handle.replace(next);

        assert_eq!(report.changed, vec!["main"]);
        assert_eq!(before.listener.timeout, 30_000);
        assert_eq!(handle.current().listener.timeout, 5_000);
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let handle = ConfigHandle::new(
            Path::new("/nonexistent/limbo/config.toml"),
            LimboConfig::default(),
        );
        assert!(handle.reload().is_err());
        assert_eq!(*handle.current(), LimboConfig::default());
    }
}
