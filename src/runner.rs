// src/runner.rs
//
// Whole run: years batch and series batch side by side, then the merge.

use std::thread::{self, ScopedJoinHandle};

use tracing::{error, info, info_span};

use crate::{
    catalog,
    config::{
        consts::{COLUMN_NAME, SERIES_KEY, YEAR_KEY},
        GroupSet, OutputPaths,
    },
    core::Fetch,
    scrape::run_batch,
    table::Table,
};

/// What one run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub year_rows: usize,
    pub series_rows: usize,
    /// `None` when the merge was skipped or could not be written.
    pub catalog_entries: Option<usize>,
}

/// Scrape the fixed year and series pages and write every report.
pub fn run(fetcher: &dyn Fetch, paths: &OutputPaths) -> RunSummary {
    run_groups(fetcher, paths, COLUMN_NAME, &GroupSet::years(), &GroupSet::series())
}

pub fn run_groups(
    fetcher: &dyn Fetch,
    paths: &OutputPaths,
    column: &str,
    years: &GroupSet,
    series: &GroupSet,
) -> RunSummary {
    let _span = info_span!("run").entered();
    info!("Starting year and series batches.");

    // The two batches share nothing; join both before merging.
    let (years_table, series_table) = thread::scope(|scope| {
        let y = scope.spawn(|| run_batch(fetcher, paths, column, years, YEAR_KEY));
        let s = scope.spawn(|| run_batch(fetcher, paths, column, series, SERIES_KEY));
        (join_batch(y, YEAR_KEY), join_batch(s, SERIES_KEY))
    });

    info!("Creating combined CSV and JSON files...");
    let catalog = catalog::merge(column, &years_table, &series_table, paths);
    info!("Finished creating combined files.");

    RunSummary {
        year_rows: years_table.len(),
        series_rows: series_table.len(),
        catalog_entries: catalog.map(|c| c.len()),
    }
}

fn join_batch(handle: ScopedJoinHandle<'_, Table>, label_key: &str) -> Table {
    handle.join().unwrap_or_else(|_| {
        error!("{label_key} batch panicked; continuing without it.");
        Table::default()
    })
}
