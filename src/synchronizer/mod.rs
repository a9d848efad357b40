//! Recursive walk-and-compare
//!
//! Walks the source tree depth-first. Every regular file is compared with
//! its counterpart in the target tree and copied into the destination tree
//! when the source is strictly newer.
//!
//! Nothing in here returns an error to the caller. Unreadable directories and
//! failed copies are logged, counted in [`SyncStats`], and the walk goes on.

use crate::config::SyncRequest;
use crate::diff::compare_mtimes;
use crate::executor::{ensure_dir, FileCopier};
use crate::logging::SyncLog;
use crate::types::{SkipReason, SyncAction, SyncError, SyncPaths, SyncStats};
use std::ffi::OsStr;
use std::fs::{self, DirEntry, Metadata};
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

/// Walks one request's trees with an injected log sink and copy primitive
pub struct Synchronizer<'a> {
    log: &'a dyn SyncLog,
    copier: &'a dyn FileCopier,
}

impl<'a> Synchronizer<'a> {
    pub fn new(log: &'a dyn SyncLog, copier: &'a dyn FileCopier) -> Self {
        Self { log, copier }
    }

    /// Run a request from its roots
    pub fn sync(&self, request: &SyncRequest) -> SyncStats {
        let mut stats = SyncStats::default();
        let root = SyncPaths::root(&request.source, &request.target, &request.dest);
        self.sync_dir(request, root, &mut stats);
        stats
    }

    fn sync_dir(&self, request: &SyncRequest, paths: SyncPaths, stats: &mut SyncStats) {
        self.log
            .debug(&format!("Processing {}", paths.source.display()));

        let entries = match read_entries(&paths.source) {
            Ok(entries) => entries,
            Err(source) => {
                let error = SyncError::DirectoryUnreadable {
                    path: paths.source.clone(),
                    source,
                };
                self.log.error(&error.to_string());
                stats.errors += 1;
                return;
            }
        };
        stats.dirs_visited += 1;

        for entry in entries {
            let name = entry.file_name();
            let label = name.to_string_lossy();

            // Editor backups and hidden entries are never visited.
            if label.starts_with('~') || label.starts_with('.') {
                continue;
            }

            let source = entry.path();
            self.log.debug(&format!("Working {}", source.display()));

            // Follows symlinks, so a link to a directory is walked like one.
            let metadata = match fs::metadata(&source) {
                Ok(m) => m,
                Err(e) => {
                    self.log.debug(&format!(
                        "Ignoring {}: metadata unavailable ({})",
                        source.display(),
                        e
                    ));
                    continue;
                }
            };

            if metadata.is_dir() {
                self.visit_dir(request, &paths, &name, stats);
            } else if metadata.is_file() {
                self.visit_file(request, &paths, &name, &metadata, stats);
            } else {
                self.log
                    .debug(&format!("Ignoring special file {}", source.display()));
            }
        }
    }

    fn visit_dir(&self, request: &SyncRequest, paths: &SyncPaths, name: &OsStr, stats: &mut SyncStats) {
        let child = paths.child(name);
        let full = child.source.to_string_lossy();
        let relative = child.relative.to_string_lossy();

        if !request.dir_filter.allows(&[full.as_ref(), relative.as_ref()]) {
            self.log
                .info(&format!("Skipping directory {}", child.source.display()));
            stats.dirs_filtered += 1;
            return;
        }

        self.sync_dir(request, child, stats);
    }

    fn visit_file(
        &self,
        request: &SyncRequest,
        paths: &SyncPaths,
        name: &OsStr,
        metadata: &Metadata,
        stats: &mut SyncStats,
    ) {
        let source = paths.source.join(name);

        if !request.file_filter.allows(&[name.to_string_lossy().as_ref()]) {
            self.log
                .info(&format!("Source {} is excluded - ignoring", source.display()));
            stats.files_filtered += 1;
            return;
        }

        let comp = paths.target.join(name);
        let dest = paths.dest.join(name);
        self.log.debug(&format!(
            "Comparing {} to {}",
            comp.display(),
            source.display()
        ));

        let decision = metadata
            .modified()
            .map_err(SyncError::Io)
            .and_then(|mtime| self.decide(request, mtime, &comp, &dest));

        match decision {
            Ok(SyncAction::Skip(reason)) => {
                self.log.debug(&skip_message(&source, reason));
                stats.record(SyncAction::Skip(reason));
            }
            Ok(action) => self.transfer(request, paths, &source, &dest, action, stats),
            Err(e) => {
                self.log
                    .error(&format!("Error comparing {}: {}", source.display(), e));
                stats.errors += 1;
            }
        }
    }

    /// Newer-wins decision for one file
    fn decide(
        &self,
        request: &SyncRequest,
        source_mtime: SystemTime,
        comp: &Path,
        dest: &Path,
    ) -> Result<SyncAction, SyncError> {
        if let Some(comp_mtime) = mtime_if_exists(comp)? {
            if request.no_update {
                return Ok(SyncAction::Skip(SkipReason::NoUpdate));
            }
            return Ok(compare_mtimes(source_mtime, comp_mtime, SyncAction::Update));
        }

        self.log
            .debug(&format!("Target {} does not exist", comp.display()));

        let mut action = SyncAction::Copy;
        if dest != comp {
            if let Some(dest_mtime) = mtime_if_exists(dest)? {
                action = compare_mtimes(source_mtime, dest_mtime, SyncAction::Update);
                if action.is_skip() {
                    return Ok(action);
                }
            }
        }

        if request.no_all_ext && has_sibling_extension(comp) {
            return Ok(SyncAction::Skip(SkipReason::OtherExtension));
        }

        Ok(action)
    }

    fn transfer(
        &self,
        request: &SyncRequest,
        paths: &SyncPaths,
        source: &Path,
        dest: &Path,
        action: SyncAction,
        stats: &mut SyncStats,
    ) {
        if request.dry_run {
            if !paths.dest.is_dir() {
                self.log
                    .info(&format!("Would create directory {}", paths.dest.display()));
            }
            self.log.info(&format!(
                "Would {} {} to {}",
                action.action_name().to_lowercase(),
                source.display(),
                dest.display()
            ));
            stats.record(action);
            return;
        }

        if let Err(e) = ensure_dir(&paths.dest) {
            self.log.error(&format!(
                "Could not create {}: {}",
                paths.dest.display(),
                e
            ));
            stats.errors += 1;
            return;
        }

        match self.copier.copy(source, dest) {
            Ok(bytes) => {
                self.log.info(&format!(
                    "{} {} to {}",
                    past_tense(action),
                    source.display(),
                    dest.display()
                ));
                stats.record(action);
                stats.bytes_copied += bytes;
            }
            Err(e) => {
                self.log.error(&format!(
                    "Error backing up {} to {}: {}",
                    source.display(),
                    dest.display(),
                    e
                ));
                stats.errors += 1;
            }
        }
    }
}

/// Directory entries sorted by name; unreadable entries are dropped
fn read_entries(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries: Vec<DirEntry> = fs::read_dir(dir)?.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// mtime of `path`, or `None` when nothing is there
fn mtime_if_exists(path: &Path) -> Result<Option<SystemTime>, SyncError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.modified()?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::Io(e)),
    }
}

/// Some `<stem>.*` exists next to `comp` (which itself does not exist)
fn has_sibling_extension(comp: &Path) -> bool {
    let (Some(parent), Some(stem)) = (comp.parent(), comp.file_stem()) else {
        return false;
    };
    let dir = glob::Pattern::escape(&parent.to_string_lossy());
    let stem = glob::Pattern::escape(&stem.to_string_lossy());
    let pattern = Path::new(&dir).join(format!("{stem}.*"));

    match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => paths.filter_map(Result::ok).any(|p| p != comp),
        Err(_) => false,
    }
}

fn skip_message(source: &Path, reason: SkipReason) -> String {
    match reason {
        SkipReason::TargetNewer => format!("Target of {} is newer - ignoring", source.display()),
        SkipReason::SameAge => format!(
            "Target and source {} are of same age - ignoring",
            source.display()
        ),
        SkipReason::NoUpdate => format!(
            "Target of {} exists but noupdate is set - ignoring",
            source.display()
        ),
        SkipReason::OtherExtension => format!(
            "Found matching file with different extension for {} - ignoring",
            source.display()
        ),
    }
}

fn past_tense(action: SyncAction) -> &'static str {
    match action {
        SyncAction::Update => "Updated",
        _ => "Copied",
    }
}
