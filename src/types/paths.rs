//! SyncPaths - The directory triple a recursion level works on

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Source, comparison and destination directories for one level of the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    /// Directory being read
    pub source: PathBuf,

    /// Directory whose files are compared against
    pub target: PathBuf,

    /// Directory copies are written to
    pub dest: PathBuf,

    /// Path of `source` relative to the source root (empty at the root)
    pub relative: PathBuf,
}

impl SyncPaths {
    /// Create the triple for the roots of a request
    pub fn root(source: &Path, target: &Path, dest: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            dest: dest.to_path_buf(),
            relative: PathBuf::new(),
        }
    }

    /// Descend into the sub-directory `name` on all three trees
    pub fn child(&self, name: &OsStr) -> Self {
        Self {
            source: self.source.join(name),
            target: self.target.join(name),
            dest: self.dest.join(name),
            relative: self.relative.join(name),
        }
    }
}
