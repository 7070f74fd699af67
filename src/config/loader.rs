//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::document::Document;
use crate::config::error::ConfigError;
use crate::config::node::{self, from_document, from_document_observed, render};
use crate::config::relocation::ResolutionObserver;
use crate::config::schema::LimboConfig;
use crate::config::validation::validate_config;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LimboConfig, ConfigError> {
    let document = read_document(path)?;
    let config: LimboConfig = from_document(&document)?;
    validate_config(&config)?;
    Ok(config)
}

/// Same as [`load_config`], reporting how every field was resolved.
pub fn load_config_observed(
    path: &Path,
    observer: &mut dyn ResolutionObserver,
) -> Result<LimboConfig, ConfigError> {
    let document = read_document(path)?;
    let config: LimboConfig = from_document_observed(&document, observer)?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(text: &str) -> Result<LimboConfig, ConfigError> {
    let document = Document::parse(text)?;
    let config: LimboConfig = from_document(&document)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load the file, or write the defaults to it when it does not exist yet.
pub fn load_or_init(path: &Path) -> Result<LimboConfig, ConfigError> {
    if path.exists() {
        return load_config(path);
    }

    tracing::info!(path = %path.display(), "Config file not found, writing defaults");
    let config = node::default_of::<LimboConfig>();
    save_config(path, &config)?;
    Ok(config)
}

/// Write the configuration under the current schema, with descriptions.
pub fn save_config(path: &Path, config: &LimboConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, render(config)).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document(path: &Path) -> Result<Document, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Document::parse(&content)
}
