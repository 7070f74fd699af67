//! Configuration validation.
//!
//! # Responsibilities
//! - Schema invariants: unique paths per node, backward-looking relocation
//! - Loaded-config invariants: unique listener names
//!
//! # Design Decisions
//! - Schema checks return all errors, not just the first
//! - Value coercion is not repeated here; the reader already rejects bad values
//! - No cross-field semantic checks (e.g. whether a forwarding key is valid)

use std::collections::HashSet;

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::config::field::{FieldKind, NodeSchema};
use crate::config::schema::LimboConfig;

/// A violated schema invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("node `{node}` declares path `{path}` more than once")]
    DuplicatePath { node: &'static str, path: String },

    #[error("node `{node}` field `{field}` relocates from `{path}`, which is a current path")]
    RelocationShadowsCurrent {
        node: &'static str,
        field: &'static str,
        path: String,
    },

    #[error("node `{node}` field `{field}` has a multi-segment path `{path}`")]
    NestedPath {
        node: &'static str,
        field: &'static str,
        path: String,
    },
}

/// Check every node reachable from `schema`.
pub fn validate_schema(schema: &NodeSchema) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut visited: Vec<*const NodeSchema> = Vec::new();
    check_node(schema, &mut visited, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_node(
    schema: &NodeSchema,
    visited: &mut Vec<*const NodeSchema>,
    errors: &mut Vec<ValidationError>,
) {
    let ptr = schema as *const NodeSchema;
    if visited.contains(&ptr) {
        return;
    }
    visited.push(ptr);

    let fields = schema.expanded();
    let mut seen = HashSet::new();
    for entry in &fields {
        let path = entry.path();
        if path.contains('.') {
            errors.push(ValidationError::NestedPath {
                node: schema.name,
                field: entry.name,
                path: path.to_string(),
            });
        }
        if !seen.insert(path.clone()) {
            errors.push(ValidationError::DuplicatePath {
                node: schema.name,
                path: path.into_owned(),
            });
        }
    }

    for entry in &fields {
        for old in entry.relocated_from {
            let head = old.split('.').next().unwrap_or(old);
            if seen.iter().any(|current| current == head) {
                errors.push(ValidationError::RelocationShadowsCurrent {
                    node: schema.name,
                    field: entry.name,
                    path: old.to_string(),
                });
            }
        }
    }

    for entry in schema.fields {
        match entry.kind {
            FieldKind::Node(child) | FieldKind::NodeList(child) | FieldKind::Flatten(child) => {
                check_node(child, visited, errors);
            }
            _ => {}
        }
    }
}

/// Check a loaded configuration. Listener names must be unique.
pub fn validate_config(config: &LimboConfig) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for listener in config.all_listeners() {
        if !names.insert(listener.name.as_str()) {
            return Err(ConfigError::DuplicateListenerName(listener.name.clone()));
        }
    }
    Ok(())
}
