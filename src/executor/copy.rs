//! Metadata-preserving file copy

use crate::types::SyncError;
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Copy a file and carry its timestamps over to the copy
///
/// 1. Refuse to copy a file onto itself
/// 2. Stream content into `dest` (created or truncated)
/// 3. Flush to disk
/// 4. Preserve permissions, access time and mtime
///
/// The mtime must survive the copy: it is what the next run compares against.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - `SameFile`, `PermissionDenied` or another IO failure
///
/// # Example
/// ```no_run
/// use backsync::executor::copy_preserving;
/// use std::path::Path;
///
/// let bytes = copy_preserving(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), backsync::types::SyncError>(())
/// ```
pub fn copy_preserving(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    if is_same_file(src, dest) {
        return Err(SyncError::SameFile {
            path: src.to_path_buf(),
        });
    }

    let src_metadata = fs::metadata(src).map_err(|e| SyncError::from_copy_io(src, e))?;
    let mut src_file = File::open(src).map_err(|e| SyncError::from_copy_io(src, e))?;
    let mut dest_file = File::create(dest).map_err(|e| SyncError::from_copy_io(dest, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SyncError::Io(e)),
        };

        dest_file
            .write_all(&buffer[..bytes_read])
            .map_err(SyncError::Io)?;
        total_bytes += bytes_read as u64;
    }

    dest_file.sync_all().map_err(SyncError::Io)?;
    drop(dest_file);

    fs::set_permissions(dest, src_metadata.permissions())
        .map_err(|e| SyncError::from_copy_io(dest, e))?;

    let atime = FileTime::from_last_access_time(&src_metadata);
    let mtime = FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_times(dest, atime, mtime).map_err(|e| SyncError::from_copy_io(dest, e))?;

    Ok(total_bytes)
}

/// Both paths exist and resolve to the same file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_preserves_content_and_mtime() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("a.txt");
        let dest = temp.path().join("b.txt");
        fs::write(&src, b"payload").expect("write source");

        let mtime = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_mtime(&src, mtime).expect("set source mtime");

        let bytes = copy_preserving(&src, &dest).expect("copy should succeed");

        assert_eq!(bytes, 7);
        assert_eq!(fs::read(&dest).expect("read dest"), b"payload");
        let dest_meta = fs::metadata(&dest).expect("dest metadata");
        assert_eq!(FileTime::from_last_modification_time(&dest_meta), mtime);
    }

    #[test]
    fn test_copy_overwrites_existing_dest() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("a.txt");
        let dest = temp.path().join("b.txt");
        fs::write(&src, b"new").expect("write source");
        fs::write(&dest, b"much older content").expect("write dest");

        copy_preserving(&src, &dest).expect("copy should succeed");

        assert_eq!(fs::read(&dest).expect("read dest"), b"new");
    }

    #[test]
    fn test_copy_onto_itself_is_same_file_error() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("a.txt");
        fs::write(&src, b"payload").expect("write source");

        let result = copy_preserving(&src, &src);

        assert!(matches!(result, Err(SyncError::SameFile { .. })));
        assert_eq!(fs::read(&src).expect("read source"), b"payload");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp = TempDir::new().expect("create tempdir");
        let result = copy_preserving(&temp.path().join("missing"), &temp.path().join("out"));

        assert!(matches!(result, Err(SyncError::Io(_))));
        assert!(!temp.path().join("out").exists());
    }
}
