//! The persisted key-value document.
//!
//! Parsing is delegated to the `toml` crate. Rendering walks the schema so
//! fields come out in declaration order with their descriptions as comments;
//! keys the schema does not declare are dropped.

use std::fmt::Write as _;

use toml::{Table, Value};

use crate::config::error::ConfigError;
use crate::config::field::{FieldKind, NodeSchema};
use crate::config::path;

/// A parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    table: Table,
}

impl Document {
    /// Parse document text. Fails only when the text is not a valid document.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let table: Table = toml::from_str(text)?;
        Ok(Self { table })
    }

    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// Render the document laid out according to `schema`.
    pub fn render(&self, schema: &NodeSchema) -> String {
        let mut out = String::new();
        render_node(&mut out, &self.table, schema, "");
        out
    }
}

fn render_node(out: &mut String, table: &Table, schema: &NodeSchema, prefix: &str) {
    let fields = schema.expanded();

    // Plain keys must precede any table header of the same level.
    for entry in fields.iter().filter(|entry| !entry.kind.is_section()) {
        let current = entry.path();
        if let Some(value) = table.get(&*current) {
            write_description(out, entry.description);
            let _ = writeln!(out, "{} = {}", key(&current), value);
        }
    }

    for entry in &fields {
        let current = entry.path();
        let header = path::join(prefix, &key(&current));
        match (entry.kind, table.get(&*current)) {
            (FieldKind::Node(child), Some(Value::Table(inner))) => {
                out.push('\n');
                write_description(out, entry.description);
                let _ = writeln!(out, "[{header}]");
                render_node(out, inner, child, &header);
            }
            (FieldKind::NodeList(child), Some(Value::Array(items))) => {
                // The description is kept even with no entries, so the file
                // still documents how to add them.
                if !items.is_empty() || !entry.description.is_empty() {
                    out.push('\n');
                    write_description(out, entry.description);
                }
                for item in items {
                    if let Value::Table(inner) = item {
                        let _ = writeln!(out, "[[{header}]]");
                        render_node(out, inner, child, &header);
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}

fn write_description(out: &mut String, lines: &[&str]) {
    for line in lines {
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            let _ = writeln!(out, "# {line}");
        }
    }
}

/// Quote a key segment unless it is a valid bare key.
fn key(segment: &str) -> String {
    let bare = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if bare {
        segment.to_string()
    } else {
        Value::String(segment.to_string()).to_string()
    }
}
