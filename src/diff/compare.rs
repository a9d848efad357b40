//! Modification-time comparison

use crate::types::{SkipReason, SyncAction};
use std::cmp::Ordering;
use std::time::SystemTime;

/// Decide whether a source file should replace an existing counterpart
///
/// Only a strictly newer source wins:
///
/// - Source newer (`source > existing`) → `on_newer`
/// - Counterpart newer → Skip(TargetNewer)
/// - Same mtime → Skip(SameAge)
///
/// `on_newer` lets callers pick `Copy` or `Update` depending on which tree
/// held the counterpart.
pub fn compare_mtimes(source: SystemTime, existing: SystemTime, on_newer: SyncAction) -> SyncAction {
    match source.cmp(&existing) {
        Ordering::Greater => on_newer,
        Ordering::Less => SyncAction::Skip(SkipReason::TargetNewer),
        Ordering::Equal => SyncAction::Skip(SkipReason::SameAge),
    }
}
