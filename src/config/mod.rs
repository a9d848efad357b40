//! Configuration management
//!
//! Requests come either from command-line flags or from config files. Both
//! paths fill a [`SyncRequestBuilder`], and only [`SyncRequestBuilder::validate`]
//! produces the immutable [`SyncRequest`] the synchronizer consumes.

mod file;

pub use file::{load_config_file, parse_config};

use crate::matcher::{self, Filter};
use crate::types::SyncError;
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "backsync")]
#[command(version)]
#[command(about = "Copy every file that is newer than its counterpart in a comparison tree")]
#[command(group(ArgGroup::new("input").required(true).args(["src", "config"])))]
pub struct Cli {
    /// The head of the source directory tree
    #[arg(long, value_name = "DIR", requires = "dest")]
    pub src: Option<PathBuf>,

    /// Where files that are newer than the comparison tree are stored
    #[arg(long, value_name = "DIR", requires = "src")]
    pub dest: Option<PathBuf>,

    /// Tree compared with the source (defaults to the destination)
    #[arg(long, value_name = "DIR", requires = "src")]
    pub tgt: Option<PathBuf>,

    /// Title shown when this backup starts
    #[arg(long, requires = "src")]
    pub title: Option<String>,

    /// Directories to skip (comma-separated, `*x` / `x*` allowed)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',', requires = "src", conflicts_with = "includedir")]
    pub excludedir: Vec<String>,

    /// Only descend into these directories
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',', requires = "src")]
    pub includedir: Vec<String>,

    /// File names to skip (comma-separated, `*x` / `x*` allowed)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',', requires = "src", conflicts_with = "includefile")]
    pub excludefile: Vec<String>,

    /// Only copy these file names
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',', requires = "src")]
    pub includefile: Vec<String>,

    /// Do not update files that already exist in the comparison tree
    #[arg(long)]
    pub noupdate: bool,

    /// Do not back up a file when one with the same name but another extension exists
    #[arg(long)]
    pub noallext: bool,

    /// Show what would be copied, but do not touch the filesystem
    #[arg(long)]
    pub dryrun: bool,

    /// Output lots of debug messages while processing
    #[arg(long)]
    pub debug: bool,

    /// File in which the processing log is stored
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Comma-separated list of config files holding backup blocks
    #[arg(long, value_name = "FILES", value_delimiter = ',', conflicts_with_all = ["src", "dest", "tgt"])]
    pub config: Vec<PathBuf>,
}

/// A validated backup request
///
/// Never mutated after validation; the synchronizer only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Optional label for log output
    pub title: Option<String>,

    /// Root of the tree being backed up
    pub source: PathBuf,

    /// Root of the tree used for mtime comparison
    pub target: PathBuf,

    /// Root copies are written to
    pub dest: PathBuf,

    /// Filter on directory paths
    pub dir_filter: Filter,

    /// Filter on bare file names
    pub file_filter: Filter,

    /// Leave files that exist in the target alone
    pub no_update: bool,

    /// Treat `name.other` in the target as a backup of `name.ext`
    pub no_all_ext: bool,

    /// Log actions without performing them
    pub dry_run: bool,

    /// Verbose logging for this request
    pub debug: bool,

    /// Dedicated log file for this request
    pub log_file: Option<PathBuf>,
}

/// Raw, unchecked request fields as collected from flags or a config block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncRequestBuilder {
    pub title: Option<String>,
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    pub exclude_dirs: Vec<String>,
    pub include_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub include_files: Vec<String>,
    pub no_update: bool,
    pub no_all_ext: bool,
    pub dry_run: bool,
    pub debug: bool,
    pub log_file: Option<PathBuf>,
}

impl SyncRequestBuilder {
    /// Start a builder for the given source and destination
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            dest: Some(dest.into()),
            ..Self::default()
        }
    }

    /// Check every invariant and build the request
    ///
    /// Creates the destination directory unless this is a dry run.
    pub fn validate(self) -> Result<SyncRequest, SyncError> {
        let source = self
            .source
            .ok_or_else(|| SyncError::Validation("You must provide a SOURCE directory".to_string()))?;
        if !source.is_dir() {
            return Err(SyncError::Validation(format!(
                "SOURCE directory {} does not exist",
                source.display()
            )));
        }

        let dest = self.dest.ok_or_else(|| {
            SyncError::Validation("You must provide a DESTINATION directory".to_string())
        })?;

        let dir_filter = Filter::from_lists(self.exclude_dirs, self.include_dirs).ok_or_else(|| {
            SyncError::Validation(
                "Cannot provide both excludedir and includedir options".to_string(),
            )
        })?;
        let file_filter =
            Filter::from_lists(self.exclude_files, self.include_files).ok_or_else(|| {
                SyncError::Validation(
                    "Cannot provide both excludefile and includefile options".to_string(),
                )
            })?;
        warn_unsupported(&dir_filter);
        warn_unsupported(&file_filter);

        if !dest.exists() && !self.dry_run {
            create_destination(&dest)?;
        }

        let target = self.target.unwrap_or_else(|| dest.clone());

        Ok(SyncRequest {
            title: self.title,
            source,
            target,
            dest,
            dir_filter,
            file_filter,
            no_update: self.no_update,
            no_all_ext: self.no_all_ext,
            dry_run: self.dry_run,
            debug: self.debug,
            log_file: self.log_file,
        })
    }

    /// Fold run-wide flags into a request read from a config file
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        self.dry_run |= cli.dryrun;
        self.debug |= cli.debug;
        self.no_update |= cli.noupdate;
        self.no_all_ext |= cli.noallext;
        self
    }
}

impl From<&Cli> for SyncRequestBuilder {
    fn from(cli: &Cli) -> Self {
        Self {
            title: cli.title.clone(),
            source: cli.src.clone(),
            target: cli.tgt.clone(),
            dest: cli.dest.clone(),
            exclude_dirs: cli.excludedir.clone(),
            include_dirs: cli.includedir.clone(),
            exclude_files: cli.excludefile.clone(),
            include_files: cli.includefile.clone(),
            no_update: cli.noupdate,
            no_all_ext: cli.noallext,
            dry_run: cli.dryrun,
            debug: cli.debug,
            // --log configures the run-wide subscriber, not a per-request sink
            log_file: None,
        }
    }
}

/// Requests that survived validation, plus the reasons for the rest
#[derive(Debug, Default)]
pub struct RequestSet {
    pub requests: Vec<SyncRequest>,
    pub rejected: Vec<SyncError>,
}

impl RequestSet {
    fn push(&mut self, result: Result<SyncRequest, SyncError>) {
        match result {
            Ok(request) => self.requests.push(request),
            Err(e) => self.rejected.push(e),
        }
    }
}

/// Turn parsed command-line arguments into validated requests
///
/// A request that fails validation is recorded in `rejected` and does not
/// affect the others.
pub fn collect_requests(cli: &Cli) -> RequestSet {
    let mut set = RequestSet::default();

    if cli.src.is_some() {
        set.push(SyncRequestBuilder::from(cli).validate());
        return set;
    }

    for path in &cli.config {
        match load_config_file(path) {
            Ok(blocks) => {
                for block in blocks {
                    set.push(block.and_then(|b| b.with_overrides(cli).validate()));
                }
            }
            Err(e) => set.rejected.push(e),
        }
    }

    set
}

fn create_destination(dest: &Path) -> Result<(), SyncError> {
    std::fs::create_dir_all(dest).map_err(|e| {
        SyncError::Validation(format!(
            "DESTINATION path {} could not be created: {}",
            dest.display(),
            e
        ))
    })?;
    if !dest.is_dir() {
        return Err(SyncError::Validation(format!(
            "DESTINATION path {} could not be created",
            dest.display()
        )));
    }
    Ok(())
}

fn warn_unsupported(filter: &Filter) {
    for pattern in filter.patterns() {
        if !matcher::is_supported(pattern) {
            tracing::warn!(
                pattern = %pattern,
                "only a leading or trailing '*' is supported; this pattern never matches"
            );
        }
    }
}
