//! SyncAction - Per-file decisions made by the comparator

/// What the synchronizer decided to do with a single source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy a file that has no current counterpart
    Copy,

    /// Overwrite an existing, older counterpart
    Update,

    /// Leave the file alone
    Skip(SkipReason),
}

/// Why a file was not copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Comparison file is newer than the source
    TargetNewer,

    /// Comparison file has the same mtime as the source
    SameAge,

    /// Comparison file exists and updates are disabled
    NoUpdate,

    /// A file with the same stem but another extension exists in the target
    OtherExtension,
}

impl SyncAction {
    /// Short label used in log lines
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncAction::Copy => "Copy",
            SyncAction::Update => "Update",
            SyncAction::Skip(_) => "Skip",
        }
    }

    /// Check if this action leaves the destination untouched
    pub fn is_skip(&self) -> bool {
        matches!(self, SyncAction::Skip(_))
    }
}
