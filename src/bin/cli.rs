// src/bin/cli.rs
use std::time::Instant;

use redline_scrape::{
    config::OutputPaths,
    core::HttpFetcher,
    log,
    profile::Profile,
    runner,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let started = Instant::now();

    let paths = OutputPaths::default();
    paths.ensure_dirs()?;

    let profile = Profile::new();
    log::init(&paths.run_log(), Some(profile.layer()))?;

    let fetcher = HttpFetcher::new()?;
    let summary = runner::run(&fetcher, &paths);
    tracing::info!(
        "Run complete: {} year rows, {} series rows, catalog entries: {}.",
        summary.year_rows,
        summary.series_rows,
        summary.catalog_entries.map_or_else(|| String::from("skipped"), |n| n.to_string()),
    );

    profile.write_report(&paths.profile_report(), started.elapsed())?;
    Ok(())
}
