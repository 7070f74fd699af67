//! Static field descriptors.
//!
//! Every configuration node registers a [`NodeSchema`]: a table of
//! [`FieldEntry`] records describing how each field maps onto the document.
//! The tables are plain statics, so the resolver never needs reflection.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::config::path;

/// The declared type of a field, as far as the document is concerned.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Bool,
    Integer,
    Float,
    String,
    /// Closed set of names, encoded verbatim.
    Enum(&'static [&'static str]),
    /// Ordered sequence of scalars.
    List(&'static FieldKind),
    /// Nested node stored as a table under the field's path.
    Node(&'static NodeSchema),
    /// Sequence of nested nodes stored as an array of tables.
    NodeList(&'static NodeSchema),
    /// Node whose fields live directly in the enclosing node.
    Flatten(&'static NodeSchema),
}

impl FieldKind {
    /// Whether values of this kind are written as tables rather than `key = value` lines.
    pub fn is_section(&self) -> bool {
        matches!(self, FieldKind::Node(_) | FieldKind::NodeList(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "boolean"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Enum(names) => write!(f, "enum({})", names.join("|")),
            FieldKind::List(inner) => write!(f, "sequence of {}", inner),
            FieldKind::Node(schema) | FieldKind::Flatten(schema) => write!(f, "{}", schema.name),
            FieldKind::NodeList(schema) => write!(f, "sequence of {}", schema.name),
        }
    }
}

/// Metadata for one configurable field.
///
/// The entry carries no default value. Defaults are the node's `Default`
/// impl, handed to the reader per field; `describe` recovers them by
/// serializing `default_of::<N>()`.
#[derive(Debug, Clone, Copy)]
pub struct FieldEntry {
    /// Declared name, kebab-cased into the path unless overridden.
    pub name: &'static str,

    /// Explicit path override.
    pub path: Option<&'static str>,

    pub kind: FieldKind,

    /// Comment lines written above the field.
    pub description: &'static [&'static str],

    /// Older paths consulted, in order, when the current path is absent.
    pub relocated_from: &'static [&'static str],
}

impl FieldEntry {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            path: None,
            kind,
            description: &[],
            relocated_from: &[],
        }
    }

    /// Pin the document path instead of deriving it from the name.
    pub const fn at(self, path: &'static str) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    pub const fn describe(self, description: &'static [&'static str]) -> Self {
        Self {
            description,
            ..self
        }
    }

    pub const fn relocated_from(self, relocated_from: &'static [&'static str]) -> Self {
        Self {
            relocated_from,
            ..self
        }
    }

    /// The current path of this field, relative to its node.
    pub fn path(&self) -> Cow<'static, str> {
        path::resolve(self.name, self.path)
    }
}

/// Schema of one configuration node.
#[derive(Debug)]
pub struct NodeSchema {
    pub name: &'static str,
    pub fields: &'static [&'static FieldEntry],
}

impl NodeSchema {
    /// Fields stored at this node's level, with flattened nodes expanded in place.
    pub fn expanded(&self) -> Vec<&'static FieldEntry> {
        let mut out = Vec::with_capacity(self.fields.len());
        for &entry in self.fields {
            match entry.kind {
                FieldKind::Flatten(inner) => out.extend(inner.expanded()),
                _ => out.push(entry),
            }
        }
        out
    }

    /// Look up a field by its current path.
    pub fn field(&self, path: &str) -> Option<&'static FieldEntry> {
        self.expanded().into_iter().find(|entry| entry.path() == path)
    }
}

/// Flat, human-oriented view of one field, used by `limbo-config schema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub path: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub description: Vec<String>,
    pub relocated_from: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    static PORT: FieldEntry = FieldEntry::new("port", FieldKind::Integer)
        .describe(&["listening port"])
        .relocated_from(&["legacy-port"]);
    static ACTION_BAR: FieldEntry =
        FieldEntry::new("action_bar", FieldKind::String).at("actionBar");
    static INNER: NodeSchema = NodeSchema {
        name: "inner",
        fields: &[&PORT],
    };
    static FLAT: FieldEntry = FieldEntry::new("inner", FieldKind::Flatten(&INNER));
    static OUTER: NodeSchema = NodeSchema {
        name: "outer",
        fields: &[&FLAT, &ACTION_BAR],
    };

    #[test]
    fn test_entry_builders() {
        assert_eq!(PORT.path(), "port");
        assert_eq!(PORT.description, &["listening port"]);
        assert_eq!(PORT.relocated_from, &["legacy-port"]);
        assert_eq!(ACTION_BAR.path(), "actionBar");
    }

    #[test]
    fn test_flatten_expands_in_place() {
        let paths: Vec<_> = OUTER.expanded().iter().map(|f| f.path()).collect();
        assert_eq!(paths, vec!["port", "actionBar"]);
        assert!(OUTER.field("port").is_some());
        assert!(OUTER.field("inner").is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::List(&FieldKind::Integer).to_string(), "sequence of integer");
        assert_eq!(FieldKind::Enum(&["A", "B"]).to_string(), "enum(A|B)");
        assert_eq!(FieldKind::NodeList(&INNER).to_string(), "sequence of inner");
    }
}
