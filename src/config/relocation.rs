//! Backward-compatible value resolution.
//!
//! A field is looked up at its current path first, then at each of its
//! `relocated_from` paths in declared order, then falls back to its default.
//! The first hit wins; values found at several historical paths are never
//! merged. Only declared historical paths are consulted, so a document
//! written for a newer schema cannot leak into an older field.

use std::borrow::Cow;

use serde::Serialize;
use toml::{Table, Value};

use crate::config::error::ConfigError;
use crate::config::field::FieldEntry;
use crate::config::path;
use crate::config::value::ConfigValue;

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Source {
    /// Found at the field's current path.
    Current,
    /// Found at an older path (absolute).
    Relocated { from: String },
    /// Absent from the document.
    Default,
}

/// Receives one callback per resolved leaf field.
pub trait ResolutionObserver {
    fn resolved(&mut self, path: &str, source: &Source);
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {
    fn resolved(&mut self, _path: &str, _source: &Source) {}
}

/// Observer that records every resolution in order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ResolutionTrace {
    pub entries: Vec<TraceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub path: String,
    #[serde(flatten)]
    pub source: Source,
}

impl ResolutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source recorded for an absolute path, if it was resolved.
    pub fn source_of(&self, path: &str) -> Option<&Source> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.source)
    }

    pub fn relocated(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.source, Source::Relocated { .. }))
    }

    pub fn defaulted(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.source == Source::Default)
    }
}

impl ResolutionObserver for ResolutionTrace {
    fn resolved(&mut self, path: &str, source: &Source) {
        self.entries.push(TraceEntry {
            path: path.to_string(),
            source: source.clone(),
        });
    }
}

/// A document value located for a field.
#[derive(Debug)]
pub struct Located<'t> {
    pub value: &'t Value,
    /// Path the value was found at, relative to the node.
    pub path: Cow<'static, str>,
    pub relocated: bool,
}

/// A typed value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

/// Follow a dotted path through tables; numeric segments index sequences.
pub fn lookup<'t>(table: &'t Table, path: &str) -> Option<&'t Value> {
    let mut segments = path.split('.');
    let mut current = table.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Table(inner) => inner.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Find the document value for a field: current path, then historical paths.
pub fn locate<'t>(table: &'t Table, entry: &FieldEntry) -> Option<Located<'t>> {
    let current = entry.path();
    if let Some(value) = lookup(table, &current) {
        return Some(Located {
            value,
            path: current,
            relocated: false,
        });
    }

    entry.relocated_from.iter().find_map(|&old| {
        lookup(table, old).map(|value| Located {
            value,
            path: Cow::Borrowed(old),
            relocated: true,
        })
    })
}

/// Resolve a typed field value from the node table found at `prefix`.
///
/// `table` is `None` when the whole node is absent from the document.
pub fn resolve_value<T: ConfigValue>(
    table: Option<&Table>,
    prefix: &str,
    entry: &FieldEntry,
    default: T,
) -> Result<Resolved<T>, ConfigError> {
    let Some(found) = table.and_then(|table| locate(table, entry)) else {
        return Ok(Resolved {
            value: default,
            source: Source::Default,
        });
    };

    let at = path::join(prefix, &found.path);
    let value = T::from_value(found.value)
        .ok_or_else(|| ConfigError::invalid_value(at.clone(), T::expected(), found.value))?;

    let source = if found.relocated {
        tracing::debug!(
            field = %path::join(prefix, &entry.path()),
            from = %at,
            "Resolved field from relocated path"
        );
        Source::Relocated { from: at }
    } else {
        Source::Current
    };

    Ok(Resolved { value, source })
}
