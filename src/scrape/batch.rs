// src/scrape/batch.rs
//
// Fan one group dictionary out over a small worker pool and stack the results.

use std::{
    any::Any,
    num::NonZeroUsize,
    panic::{self, AssertUnwindSafe},
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
};

use tracing::{error, info, info_span};

use super::group::{process_group, GroupJob};
use crate::config::{GroupSet, OutputPaths};
use crate::core::Fetch;
use crate::table::Table;

/// Workers for `units` jobs: hardware concurrency, never more than the jobs.
pub fn pool_size(units: usize) -> usize {
    thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(units)
        .max(1)
}

/// Scrape every (label, table_index) of `groups` concurrently.
///
/// Each successful unit contributes its names tagged with `label_key = label`.
/// Failed units are left out. If nothing succeeds the table has no columns.
pub fn run_batch(
    fetcher: &dyn Fetch,
    paths: &OutputPaths,
    column: &str,
    groups: &GroupSet,
    label_key: &str,
) -> Table {
    let _span = info_span!("run_batch", label_key).entered();
    info!("Starting CSV creation for {label_key}.");

    let jobs: Vec<(&str, usize)> = groups.iter().collect();
    if jobs.is_empty() {
        return Table::default();
    }

    let workers = pool_size(jobs.len());
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(&str, Option<Table>)>();

    let mut parts: Vec<Table> = Vec::with_capacity(jobs.len());

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (jobs, counter) = (&jobs, &counter);

            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    let Some(&(label, table_index)) = jobs.get(i) else {
                        break;
                    };
                    let job = GroupJob {
                        url: GroupSet::url(label),
                        table_index,
                        dataset_key: label,
                        out_path: paths.group_export(label),
                        column,
                    };
                    let result = panic::catch_unwind(AssertUnwindSafe(|| process_group(fetcher, &job)))
                        .unwrap_or_else(|payload| {
                            error!("Unexpected error processing {}: worker panicked: {}", job.url, panic_message(&*payload));
                            None
                        });
                    let _ = tx.send((label, result));
                }
            });
        }
        drop(res_tx); // this thread is the sole receiver now

        // Completion order; the merge step does not depend on it.
        for (label, result) in res_rx {
            if let Some(export) = result {
                parts.push(export.with_constant(label_key, label));
            }
        }
    });

    info!("Finished CSV creation for {label_key}: {}/{} groups.", parts.len(), jobs.len());
    Table::concat(parts)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}
