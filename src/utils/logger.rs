use crate::utils::error::Result;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize diagnostics for one enrichment run: a compact stderr layer
/// plus a timestamped run-log file under `log_dir`. Stdout stays untouched
/// so the enriched JSON is the only thing written there.
///
/// Returns the path of the run-log file so `main` can report it.
pub fn init_enrich_logger(log_dir: &Path, verbose: bool) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(format!(
        "enrich-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));
    let log_file = File::create(&log_path)?;

    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("source_enrich=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("source_enrich=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .init();

    Ok(log_path)
}
