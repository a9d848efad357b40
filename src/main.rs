use anyhow::Context;
use backsync::config::{collect_requests, Cli};
use clap::Parser;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log.as_deref())?;

    let set = collect_requests(&cli);
    for error in &set.rejected {
        eprintln!("Skipping request: {}", error);
    }

    if set.requests.is_empty() {
        anyhow::bail!("no valid backup request to process");
    }

    backsync::commands::sync::run(&set.requests);

    Ok(())
}

/// Initialize logging: `--debug` lowers the level, `--log` redirects to a file
fn init_logging(debug: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
