//! Configuration layer for a Minecraft limbo server.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::schema::LimboConfig;
pub use config::ConfigHandle;
pub use lifecycle::Shutdown;
