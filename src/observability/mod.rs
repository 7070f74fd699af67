//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, e.g. listener name, path)
//!
//! Consumers:
//!     → fmt layer on stdout, filtered by RUST_LOG or the config's debug flags
//! ```

pub mod logging;
