//! Typed configuration nodes and their document contract.
//!
//! A [`ConfigNode`] pairs a Rust struct with its static [`NodeSchema`]. Reading
//! goes through a [`NodeReader`], which applies relocation and defaults per
//! field; writing goes through a [`NodeWriter`], which lays values out at
//! their current paths.

use std::fmt;

use toml::{Table, Value};

use crate::config::document::Document;
use crate::config::error::ConfigError;
use crate::config::field::{FieldDescriptor, FieldEntry, FieldKind, NodeSchema};
use crate::config::path;
use crate::config::relocation::{self, NoopObserver, ResolutionObserver, Source};
use crate::config::value::ConfigValue;

/// One level of the configuration tree.
///
/// `Default` must produce the declared compiled-in defaults, never a zeroed
/// placeholder.
pub trait ConfigNode: Default + Clone + PartialEq + fmt::Debug {
    fn schema() -> &'static NodeSchema;

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError>;

    fn write(&self, writer: &mut NodeWriter);
}

/// The compiled-in defaults of a node type. Cannot fail.
pub fn default_of<N: ConfigNode>() -> N {
    N::default()
}

/// Build a node tree from a parsed document.
pub fn from_document<N: ConfigNode>(document: &Document) -> Result<N, ConfigError> {
    from_document_observed(document, &mut NoopObserver)
}

/// Same as [`from_document`], reporting every leaf resolution to `observer`.
pub fn from_document_observed<N: ConfigNode>(
    document: &Document,
    observer: &mut dyn ResolutionObserver,
) -> Result<N, ConfigError> {
    let mut reader = NodeReader {
        table: Some(document.table()),
        prefix: String::new(),
        relocated: false,
        observer,
    };
    N::read(&mut reader)
}

/// Lay a node tree out as a document.
pub fn to_document<N: ConfigNode>(node: &N) -> Document {
    let mut writer = NodeWriter::default();
    node.write(&mut writer);
    Document::from_table(writer.finish())
}

/// Render a node tree as commented document text.
pub fn render<N: ConfigNode>(node: &N) -> String {
    to_document(node).render(N::schema())
}

/// Reads one node's fields out of its document table.
pub struct NodeReader<'a> {
    table: Option<&'a Table>,
    prefix: String,
    /// Set when the whole node was found at a historical path.
    relocated: bool,
    observer: &'a mut dyn ResolutionObserver,
}

impl<'a> NodeReader<'a> {
    /// Absolute path of this node in the document.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve a leaf field.
    pub fn value<T: ConfigValue>(
        &mut self,
        entry: &FieldEntry,
        default: T,
    ) -> Result<T, ConfigError> {
        let resolved = relocation::resolve_value(self.table, &self.prefix, entry, default)?;
        let source = match resolved.source {
            Source::Current if self.relocated => Source::Relocated {
                from: path::join(&self.prefix, &entry.path()),
            },
            other => other,
        };
        self.observer
            .resolved(&path::join(&self.prefix, &entry.path()), &source);
        Ok(resolved.value)
    }

    /// Resolve a nested node. An absent node yields its defaults.
    pub fn node<N: ConfigNode>(&mut self, entry: &FieldEntry) -> Result<N, ConfigError> {
        let located = self.table.and_then(|table| relocation::locate(table, entry));
        let (table, prefix, relocated) = match located {
            Some(found) => {
                let at = path::join(&self.prefix, &found.path);
                match found.value {
                    Value::Table(inner) => (Some(inner), at, self.relocated || found.relocated),
                    other => return Err(ConfigError::invalid_value(at, "a table".into(), other)),
                }
            }
            None => (None, path::join(&self.prefix, &entry.path()), false),
        };

        let mut child = NodeReader {
            table,
            prefix,
            relocated,
            observer: &mut *self.observer,
        };
        N::read(&mut child)
    }

    /// Resolve a sequence of nested nodes, skipping the first `skip` entries.
    pub fn nodes<N: ConfigNode>(
        &mut self,
        entry: &FieldEntry,
        skip: usize,
    ) -> Result<Vec<N>, ConfigError> {
        let Some(found) = self.table.and_then(|table| relocation::locate(table, entry)) else {
            return Ok(Vec::new());
        };
        let at = path::join(&self.prefix, &found.path);
        let Value::Array(items) = found.value else {
            return Err(ConfigError::invalid_value(
                at,
                "a sequence of tables".into(),
                found.value,
            ));
        };

        let relocated = self.relocated || found.relocated;
        items
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(index, item)| self.element(&at, index, item, relocated))
            .collect()
    }

    /// Read element `index` of a node sequence as if it were stored at this
    /// node's level under an older schema.
    pub fn relocated_element<N: ConfigNode>(
        &mut self,
        entry: &FieldEntry,
        index: usize,
    ) -> Result<Option<N>, ConfigError> {
        let Some(found) = self.table.and_then(|table| relocation::locate(table, entry)) else {
            return Ok(None);
        };
        let at = path::join(&self.prefix, &found.path);
        match found.value {
            Value::Array(items) => match items.get(index) {
                Some(item) => self.element(&at, index, item, true).map(Some),
                None => Ok(None),
            },
            other => Err(ConfigError::invalid_value(at, "a sequence of tables".into(), other)),
        }
    }

    fn element<N: ConfigNode>(
        &mut self,
        at: &str,
        index: usize,
        item: &Value,
        relocated: bool,
    ) -> Result<N, ConfigError> {
        let prefix = path::join(at, &index.to_string());
        let Value::Table(inner) = item else {
            return Err(ConfigError::invalid_value(prefix, "a table".into(), item));
        };
        let mut child = NodeReader {
            table: Some(inner),
            prefix,
            relocated,
            observer: &mut *self.observer,
        };
        N::read(&mut child)
    }

    /// Read a node whose fields live at this node's level.
    pub fn flatten<N: ConfigNode>(&mut self) -> Result<N, ConfigError> {
        let mut child = NodeReader {
            table: self.table,
            prefix: self.prefix.clone(),
            relocated: self.relocated,
            observer: &mut *self.observer,
        };
        N::read(&mut child)
    }

    /// Whether any field of `schema` is present here, at a current or
    /// historical path.
    pub fn contains_any(&self, schema: &NodeSchema) -> bool {
        let Some(table) = self.table else {
            return false;
        };
        schema.expanded().into_iter().any(|entry| relocation::locate(table, entry).is_some())
    }
}

/// Collects a node's values into a document table.
#[derive(Debug, Default)]
pub struct NodeWriter {
    table: Table,
}

impl NodeWriter {
    pub fn value<T: ConfigValue>(&mut self, entry: &FieldEntry, value: &T) {
        self.table.insert(entry.path().into_owned(), value.to_value());
    }

    pub fn node<N: ConfigNode>(&mut self, entry: &FieldEntry, node: &N) {
        let mut child = NodeWriter::default();
        node.write(&mut child);
        self.table
            .insert(entry.path().into_owned(), Value::Table(child.finish()));
    }

    pub fn nodes<N: ConfigNode>(&mut self, entry: &FieldEntry, nodes: &[N]) {
        let items = nodes
            .iter()
            .map(|node| {
                let mut child = NodeWriter::default();
                node.write(&mut child);
                Value::Table(child.finish())
            })
            .collect();
        self.table.insert(entry.path().into_owned(), Value::Array(items));
    }

    pub fn flatten<N: ConfigNode>(&mut self, node: &N) {
        node.write(self);
    }

    pub fn finish(self) -> Table {
        self.table
    }
}

/// Describe every field reachable from `N`, with defaults taken from
/// `default_of::<N>()`.
pub fn describe<N: ConfigNode>() -> Vec<FieldDescriptor> {
    let defaults = to_document(&default_of::<N>());
    let mut out = Vec::new();
    describe_node(N::schema(), Some(defaults.table()), "", &mut out);
    out
}

fn describe_node(
    schema: &NodeSchema,
    defaults: Option<&Table>,
    prefix: &str,
    out: &mut Vec<FieldDescriptor>,
) {
    for entry in schema.expanded() {
        let current = entry.path();
        let at = path::join(prefix, &current);
        let default = defaults.and_then(|table| table.get(&*current));

        out.push(FieldDescriptor {
            path: at.clone(),
            kind: entry.kind.to_string(),
            default: match entry.kind {
                FieldKind::Node(_) | FieldKind::NodeList(_) | FieldKind::Flatten(_) => None,
                _ => default.map(ToString::to_string),
            },
            description: entry.description.iter().map(|line| line.to_string()).collect(),
            relocated_from: entry.relocated_from.iter().map(|old| old.to_string()).collect(),
        });

        match entry.kind {
            FieldKind::Node(child) => {
                describe_node(child, default.and_then(Value::as_table), &at, out);
            }
            FieldKind::NodeList(child) => {
                describe_node(child, None, &format!("{at}[]"), out);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LimboConfig, PositionConfig};

    fn field<'a>(fields: &'a [FieldDescriptor], path: &str) -> &'a FieldDescriptor {
        fields
            .iter()
            .find(|field| field.path == path)
            .unwrap_or_else(|| panic!("no field at {path}"))
    }

    #[test]
    fn test_describe_reports_defaults_from_default_impls() {
        let fields = describe::<LimboConfig>();

        assert_eq!(field(&fields, "timeout").default.as_deref(), Some("30000"));
        assert_eq!(field(&fields, "position.x").default.as_deref(), Some("7.5"));
        assert_eq!(field(&fields, "motd").default, None);

        let ports = field(&fields, "bind-ports");
        assert_eq!(ports.kind, "sequence of integer");
        assert_eq!(ports.relocated_from, vec!["bind-port", "port"]);

        assert!(fields.iter().any(|field| field.path == "message.actionBar"));
        assert!(fields.iter().any(|field| field.path == "listeners[].name"));
    }

    #[test]
    fn test_default_of_is_never_zeroed() {
        let position: PositionConfig = default_of();
        assert_eq!(position.y, 100.0);
        assert_eq!(position.yaw, 180.0);
    }
}
