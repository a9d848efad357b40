//! Core type definitions for backsync

mod action;
mod error;
mod paths;
mod stats;

pub use action::{SkipReason, SyncAction};
pub use error::SyncError;
pub use paths::SyncPaths;
pub use stats::SyncStats;
