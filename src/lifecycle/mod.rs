//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Check schema → Load or create config → Log listeners
//!
//! Running:
//!     console.rs: stop/end → shutdown, reload → App::reload, status → log
//!     signals.rs: SIGINT → shutdown, SIGHUP → App::reload
//!
//! Shutdown (shutdown.rs):
//!     trigger → every waiter released → exit
//! ```

pub mod console;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::App;
