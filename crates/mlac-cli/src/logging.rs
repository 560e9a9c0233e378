//! # Log Routing
//!
//! Logs go to stderr unless `--log-file` is given. Error records may also be
//! written to stderr, so the default filter turns logging off in that case
//! to keep the record stream clean JSON lines.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
///
/// With no `-v`, `warn` is used unless error records share stderr with the
/// logs, in which case logging is off. An explicit `-v` always wins.
pub fn filter_directive(verbose: u8, records_share_stderr: bool) -> &'static str {
    match verbose {
        0 if records_share_stderr => "off",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
pub fn init(
    verbose: u8,
    json: bool,
    log_file: Option<&Path>,
    records_on_stderr: bool,
) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let records_share_stderr = records_on_stderr && log_file.is_none();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive(verbose, records_share_stderr)))
        .with_target(false)
        .with_writer(writer);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
