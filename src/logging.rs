use anyhow::{Context, Result};
use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, warn, Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::lint::{PackageReport, Severity};

/// `YYYY-mm-dd HH:MM:SS -    LEVEL - message`
pub struct LintLineFormat;

impl<S, N> FormatEvent<S, N> for LintLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {:>8} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            event.metadata().level().to_string()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file for a lint run started now, one per minute
pub fn log_file_name() -> String {
    Local::now().format("lint_%Y_%m_%d_%H_%M.log").to_string()
}

/// Send warnings and errors to an appending log file in `log_folder`
pub fn init_lint_logging(log_folder: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_folder)
        .with_context(|| format!("Failed to create log folder: {}", log_folder.display()))?;

    let log_file = log_folder.join(log_file_name());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(LintLineFormat)
        .with_writer(Mutex::new(file))
        .with_env_filter(EnvFilter::new("warn"))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(log_file)
}

/// Console logging on stderr, overridable through RUST_LOG
pub fn init_console_logging(verbose: bool, quiet: bool) -> Result<()> {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// One log entry per failed check: advisory as warn, blocking as error
pub fn emit_diagnostics(report: &PackageReport) {
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            Severity::Advisory => warn!(check = %diagnostic.check, "{}", diagnostic.message),
            Severity::Blocking => error!(check = %diagnostic.check, "{}", diagnostic.message),
        }
    }
}
