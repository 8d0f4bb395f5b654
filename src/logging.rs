//! Log output setup.
//!
//! Every event is rendered as `[YYYY-MM-DD HH:MM:SS] LEVEL: message` on
//! stderr and, when a log directory is configured, appended to
//! `<log_dir>/scan.log`.

use crate::error::{IoOperation, Result, SweepError};
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt as tfmt, prelude::*};

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "scan.log";

/// Timestamped single-line event format.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepFormat;

impl<S, N> FormatEvent<S, N> for SweepFormat
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
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(writer, "[{}] {}: ", now, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Console verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    fn console_directive(self) -> &'static str {
        match self {
            Self::Quiet => "clamsweep=error",
            Self::Normal => "clamsweep=info",
            Self::Debug => "clamsweep=debug",
            Self::Trace => "clamsweep=trace",
        }
    }

    /// The log file always keeps the per-file audit trail at info.
    fn file_directive(self) -> &'static str {
        match self {
            Self::Quiet | Self::Normal => "clamsweep=info",
            Self::Debug => "clamsweep=debug",
            Self::Trace => "clamsweep=trace",
        }
    }
}

/// Path of the log file for a log directory.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the console verbosity when set; the log file is
/// filtered on its own. Installing twice is a no-op.
pub fn setup_logging(verbosity: Verbosity, log_dir: Option<&Path>) -> Result<()> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.console_directive()));

    let file = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| SweepError::io(IoOperation::CreateDir, dir, e))?;
            let path = log_file_path(dir);
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| SweepError::io(IoOperation::OpenLog, &path, e))?;
            Some(Mutex::new(handle))
        }
        None => None,
    };

    let _ = layered(console_filter, verbosity, std::io::stderr, file).try_init();

    Ok(())
}

/// Console and optional file layers, each with its own filter.
fn layered<C, F>(
    console_filter: EnvFilter,
    verbosity: Verbosity,
    console: C,
    file: Option<F>,
) -> impl Subscriber + Send + Sync + 'static
where
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let console_layer = tfmt::layer()
        .event_format(SweepFormat)
        .with_writer(console)
        .with_ansi(false)
        .with_filter(console_filter);

    let file_layer = file.map(|writer| {
        tfmt::layer()
            .event_format(SweepFormat)
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(EnvFilter::new(verbosity.file_directive()))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
}
