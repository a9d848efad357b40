//! Executor module for file operations

pub mod copy;

use crate::types::SyncError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub use copy::copy_preserving;

/// Copy primitive used by the synchronizer
///
/// Injected so callers can swap the real filesystem copy for something else
/// (a throttled copy, a failing copy in tests).
pub trait FileCopier {
    /// Copy `src` to `dest`, returning the number of bytes written
    fn copy(&self, src: &Path, dest: &Path) -> Result<u64, SyncError>;
}

/// Default copier: content, permissions and timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct PreservingCopier;

impl FileCopier for PreservingCopier {
    fn copy(&self, src: &Path, dest: &Path) -> Result<u64, SyncError> {
        copy_preserving(src, dest)
    }
}

/// Create `dir` and its parents; an existing directory counts as success
pub fn ensure_dir(dir: &Path) -> Result<(), SyncError> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(SyncError::from_copy_io(dir, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let nested = temp.path().join("a/b/c");

        ensure_dir(&nested).expect("create nested dirs");
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_existing_is_ok() {
        let temp = tempfile::tempdir().expect("create tempdir");
        ensure_dir(temp.path()).expect("existing dir is fine");
        ensure_dir(temp.path()).expect("still fine the second time");
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let file = temp.path().join("plain");
        fs::write(&file, b"x").expect("write file");

        assert!(ensure_dir(&file).is_err());
    }

    #[test]
    fn test_preserving_copier_copies() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let src = temp.path().join("in.txt");
        fs::write(&src, b"abc").expect("write source");

        let bytes = PreservingCopier
            .copy(&src, &temp.path().join("out.txt"))
            .expect("copy");
        assert_eq!(bytes, 3);
    }
}
