//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read from disk)
//!     → document.rs (parse into a key-value tree)
//!     → node.rs + relocation.rs (per field: current path → older paths → default)
//!     → validation.rs (listener names unique)
//!     → LimboConfig (immutable)
//!     → shared via Arc to all consumers
//!
//! On reload (console `reload` or SIGHUP):
//!     reload.rs loads a complete new LimboConfig
//!     → atomic swap of Arc<LimboConfig>
//!     → holders of the old snapshot keep seeing the old values
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - Every field has a compiled-in default, so an empty document is valid
//! - Field-to-path mapping is a static table per node, not reflection
//! - Present-but-invalid values fail the load; they are never defaulted

pub mod document;
pub mod error;
pub mod field;
pub mod loader;
pub mod node;
pub mod path;
pub mod relocation;
pub mod reload;
pub mod schema;
pub mod validation;
pub mod value;

pub use document::Document;
pub use error::ConfigError;
pub use field::{FieldDescriptor, FieldEntry, FieldKind, NodeSchema};
pub use node::{default_of, from_document, from_document_observed, to_document, ConfigNode};
pub use relocation::{ResolutionObserver, ResolutionTrace, Source};
pub use reload::{ConfigHandle, ReloadReport};
pub use schema::{
    ForwardMode, ForwardSecret, JoinMessageConfig, LimboConfig, ListenerConfig, MotdConfig,
    PositionConfig, TabConfig, TitleConfig, World,
};
