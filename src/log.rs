// src/log.rs
//! Run log: one setup call at process start, shared by every thread.
//!
//! Lines look like
//! `2026-10-16 09:30:00,123 - PID=4242 TID=3 - INFO - Fetching URL: ...`
//! and go to stdout and to the run log file.

use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::{io, process, thread};

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::ScrapeError;
use crate::file::ensure_directory;
use crate::profile::ProfileLayer;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// `<time> - PID=<pid> TID=<tid> - <LEVEL> - <message>`
pub struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
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
            "{} - PID={} TID={} - {} - ",
            Local::now().format(TIME_FORMAT),
            process::id(),
            thread_id(),
            event.metadata().level(),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Numeric part of the std thread id.
fn thread_id() -> String {
    let raw = format!("{:?}", thread::current().id());
    raw.trim_start_matches("ThreadId(").trim_end_matches(')').to_string()
}

/// Install the global subscriber: INFO and above to stdout and `log_path`
/// (appended), plus the optional profiling layer.
///
/// Fails if a global subscriber is already set.
pub fn init(log_path: &Path, profile: Option<ProfileLayer>) -> Result<(), ScrapeError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| ScrapeError::fs(log_path, e))?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(RunLogFormat)
        .with_ansi(false)
        .with_writer(io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(RunLogFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(profile)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ScrapeError::Unexpected(format!("failed to initialize logging: {e}")))
}
