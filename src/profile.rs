// src/profile.rs
//! Span timing for the profiling report.
//!
//! [`ProfileLayer`] records how long every span stayed open and aggregates by
//! span name. Only the binary installs it and writes the report.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{span, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::error::ScrapeError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanStat {
    pub calls: u64,
    pub total: Duration,
    pub max: Duration,
}

impl SpanStat {
    pub fn mean(&self) -> Duration {
        match u32::try_from(self.calls) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total / n,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.calls as f64),
        }
    }
}

type Stats = Arc<Mutex<HashMap<&'static str, SpanStat>>>;

/// Handle that outlives the subscriber and reads the collected stats.
#[derive(Clone, Default)]
pub struct Profile {
    stats: Stats,
}

pub struct ProfileLayer {
    stats: Stats,
}

/// Stored in span extensions while the span is open.
struct Opened(Instant);

impl Profile {
    pub fn new() -> Self { Self::default() }

    pub fn layer(&self) -> ProfileLayer {
        ProfileLayer { stats: Arc::clone(&self.stats) }
    }

    /// Stats sorted by total time, longest first.
    pub fn snapshot(&self) -> Vec<(&'static str, SpanStat)> {
        let mut v: Vec<_> = match self.stats.lock() {
            Ok(g) => g.iter().map(|(k, s)| (*k, *s)).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(k, s)| (*k, *s)).collect(),
        };
        v.sort_by(|a, b| b.1.total.cmp(&a.1.total).then(a.0.cmp(b.0)));
        v
    }

    pub fn report(&self, wall: Duration) -> String {
        let mut out = format!("redline_scrape profile, wall time {:.3}s\n\n", wall.as_secs_f64());
        let _ = writeln!(out, "{:>8} {:>10} {:>10} {:>10}  span", "calls", "total_s", "mean_s", "max_s");
        for (name, s) in self.snapshot() {
            let _ = writeln!(
                out,
                "{:>8} {:>10.4} {:>10.4} {:>10.4}  {}",
                s.calls,
                s.total.as_secs_f64(),
                s.mean().as_secs_f64(),
                s.max.as_secs_f64(),
                name
            );
        }
        out
    }

    /// Overwrite `path` with [`Profile::report`].
    pub fn write_report(&self, path: &Path, wall: Duration) -> Result<(), ScrapeError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                crate::file::ensure_directory(parent)?;
            }
        }
        std::fs::write(path, self.report(wall)).map_err(|e| ScrapeError::fs(path, e))
    }
}

impl<S> Layer<S> for ProfileLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Opened(Instant::now()));
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else { return };
        let Some(elapsed) = span.extensions().get::<Opened>().map(|o| o.0.elapsed()) else {
            return;
        };
        if let Ok(mut stats) = self.stats.lock() {
            let s = stats.entry(span.metadata().name()).or_default();
            s.calls += 1;
            s.total += elapsed;
            s.max = s.max.max(elapsed);
        }
    }
}
