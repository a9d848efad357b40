//! # backsync - Differential directory backup
//!
//! Walks a SOURCE tree and copies every file that is newer than its
//! counterpart in a TARGET (comparison) tree into a DESTINATION tree.
//! Modification times are the only staleness signal.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod logging;
pub mod matcher;
pub mod synchronizer;
pub mod types;

// Re-export commonly used types
pub use config::{Cli, SyncRequest, SyncRequestBuilder};
pub use matcher::{matches, Filter};
pub use synchronizer::Synchronizer;
pub use types::{SyncAction, SyncError, SyncStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
