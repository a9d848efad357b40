//! SyncStats - Counters accumulated over one request

use super::{SkipReason, SyncAction};

/// Statistics for a single sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Directories listed successfully.
    pub dirs_visited: usize,
    /// Files copied (planned copies in dry-run mode).
    pub files_copied: usize,
    /// Files left alone because the comparison copy is current.
    pub files_up_to_date: usize,
    /// Files left alone because of `noupdate`.
    pub files_not_updated: usize,
    /// Files left alone because a sibling with another extension exists.
    pub files_other_extension: usize,
    /// Files removed by the file filter.
    pub files_filtered: usize,
    /// Directories removed by the directory filter.
    pub dirs_filtered: usize,
    /// Unreadable directories and failed copies.
    pub errors: usize,
    /// Aggregate copied bytes (always 0 in dry-run mode).
    pub bytes_copied: u64,
}

impl SyncStats {
    /// Account for a per-file decision
    pub fn record(&mut self, action: SyncAction) {
        match action {
            SyncAction::Copy | SyncAction::Update => self.files_copied += 1,
            SyncAction::Skip(SkipReason::TargetNewer | SkipReason::SameAge) => {
                self.files_up_to_date += 1
            }
            SyncAction::Skip(SkipReason::NoUpdate) => self.files_not_updated += 1,
            SyncAction::Skip(SkipReason::OtherExtension) => self.files_other_extension += 1,
        }
    }

    /// Files that were examined but not copied
    pub fn files_skipped(&self) -> usize {
        self.files_up_to_date + self.files_not_updated + self.files_other_extension
    }

    /// Check if anything went wrong during the run
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
