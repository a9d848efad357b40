//! Main sync command

use crate::config::SyncRequest;
use crate::executor::PreservingCopier;
use crate::logging::{FileLog, SyncLog, TracingLog};
use crate::synchronizer::Synchronizer;
use crate::types::SyncStats;
use console::style;
use indicatif::HumanBytes;

/// Run every request in order and print a summary after each
///
/// Requests are independent: errors inside one are logged and counted, and
/// never stop the ones after it.
pub fn run(requests: &[SyncRequest]) -> Vec<SyncStats> {
    requests.iter().map(run_request).collect()
}

/// Run a single request with the log sink it asks for
pub fn run_request(request: &SyncRequest) -> SyncStats {
    let title = request.title.as_deref().unwrap_or("");
    let span = tracing::info_span!("sync", title = %title);
    let _guard = span.enter();

    let file_log = request.log_file.as_deref().and_then(|path| {
        FileLog::open(path, request.debug)
            .map_err(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not open request log file, using the main log"
                );
            })
            .ok()
    });
    let log: &dyn SyncLog = match &file_log {
        Some(file_log) => file_log,
        None => &TracingLog,
    };

    if let Some(title) = &request.title {
        log.info(&format!("Processing: {}", title));
    }
    log.debug(&format!(
        "source={} target={} dest={} dry_run={}",
        request.source.display(),
        request.target.display(),
        request.dest.display(),
        request.dry_run
    ));

    let stats = Synchronizer::new(log, &PreservingCopier).sync(request);
    println!("{}", format_summary(request, &stats));
    stats
}

fn format_summary(request: &SyncRequest, stats: &SyncStats) -> String {
    let label = request
        .title
        .clone()
        .unwrap_or_else(|| request.source.display().to_string());
    let verb = if request.dry_run { "To copy" } else { "Copied" };

    let mut line = format!(
        "{}: {}: {}  Skipped: {}  Filtered: {}",
        style(label).bold(),
        verb,
        stats.files_copied,
        stats.files_skipped(),
        stats.files_filtered + stats.dirs_filtered,
    );
    if !request.dry_run {
        line.push_str(&format!("  ({})", HumanBytes(stats.bytes_copied)));
    }
    if stats.has_errors() {
        line.push_str(&format!(
            "  {}",
            style(format!("Errors: {}", stats.errors)).red()
        ));
    }
    if request.dry_run {
        line.push_str("\nDry-run mode: no changes were made.");
    }
    line
}
