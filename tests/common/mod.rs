//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file inside its own temporary directory.
pub struct TempConfig {
    // Held so the directory outlives the test.
    _dir: TempDir,
    pub path: PathBuf,
}

impl TempConfig {
    /// Path to a config file that does not exist yet.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Self { _dir: dir, path }
    }

    /// A config file holding `content`.
    pub fn with(content: &str) -> Self {
        let config = Self::missing();
        config.write(content);
        config
    }

    pub fn write(&self, content: &str) {
        fs::write(&self.path, content).unwrap();
    }

    pub fn read(&self) -> String {
        fs::read_to_string(&self.path).unwrap()
    }
}
