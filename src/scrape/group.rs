// src/scrape/group.rs
//
// One scraping unit: fetch → extract → normalize → write `hotwheels-{label}.csv`.
// Every failure ends here as a log line and `None`.

use std::error::Error;
use std::path::PathBuf;

use tracing::{error, info, info_span};

use crate::core::{extract_table, Fetch};
use crate::error::ScrapeError;
use crate::file::write_csv;
use crate::normalize::normalize;
use crate::table::Table;

#[derive(Clone, Debug)]
pub struct GroupJob<'a> {
    pub url: String,
    pub table_index: usize,
    /// Label of the page; also selects dataset-specific normalization.
    pub dataset_key: &'a str,
    pub out_path: PathBuf,
    /// Header of the single exported column, e.g. "Casting".
    pub column: &'a str,
}

/// Run one unit. Returns the exported names, or `None` after logging why not.
pub fn process_group(fetcher: &dyn Fetch, job: &GroupJob) -> Option<Table> {
    let _span = info_span!("process_group", key = job.dataset_key).entered();

    match try_process_group(fetcher, job) {
        Ok(export) => Some(export),
        Err(e) => {
            report_failure(job, &e);
            None
        }
    }
}

/// Same as [`process_group`] with the error left to the caller.
pub fn try_process_group(fetcher: &dyn Fetch, job: &GroupJob) -> Result<Table, ScrapeError> {
    info!("Fetching URL: {}", job.url);
    let html = fetcher.fetch(&job.url)?;

    let grid = extract_table(&html, job.table_index, &job.url)?;
    let names = normalize(&grid, job.dataset_key);
    let export = Table::single_column(job.column, names);

    write_csv(&job.out_path, &export)?;
    info!("Data saved to {}.", job.out_path.display());
    Ok(export)
}

fn report_failure(job: &GroupJob, e: &ScrapeError) {
    if e.is_expected() {
        info!("{e}");
    } else {
        error!(
            url = %job.url,
            table_index = job.table_index,
            out_path = %job.out_path.display(),
            kind = ?e.kind(),
            "Unexpected error processing {}: {}",
            job.url,
            error_chain(e)
        );
    }
}

/// `outer: inner: innermost`
pub fn error_chain(e: &dyn Error) -> String {
    let mut out = e.to_string();
    let mut cur = e.source();
    while let Some(src) = cur {
        out.push_str(": ");
        out.push_str(&src.to_string());
        cur = src.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Page(&'static str);
    impl Fetch for Page {
        fn fetch(&self, _url: &str) -> Result<String, ScrapeError> { Ok(s!(self.0)) }
    }

    struct Down;
    impl Fetch for Down {
        fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
            Err(ScrapeError::Network { url: s!(url), reason: s!("Connection error") })
        }
    }

    fn job<'a>(dir: &std::path::Path, key: &'a str) -> GroupJob<'a> {
        GroupJob {
            url: format!("https://fake/{key}.html"),
            table_index: 0,
            dataset_key: key,
            out_path: dir.join(format!("hotwheels-{key}.csv")),
            column: "Casting",
        }
    }

    #[test]
    fn success_writes_export_and_returns_it() {
        let dir = tempfile::tempdir().unwrap();
        let page = Page("<table><tr><th>Name</th></tr><tr><td>Snake</td></tr><tr><td>Mongoose</td></tr></table>");
        let j = job(dir.path(), "1968");

        let t = process_group(&page, &j).unwrap();
        assert_eq!(t.headers(), &["Casting"]);
        assert_eq!(t.column("Casting").flatten().collect::<Vec<_>>(), vec!["Mongoose", "Snake"]);
        assert_eq!(std::fs::read_to_string(&j.out_path).unwrap(), "Casting\nMongoose\nSnake\n");
    }

    #[test]
    fn network_and_missing_table_yield_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(process_group(&Down, &job(dir.path(), "1968")).is_none());
        assert!(process_group(&Page("<p>none</p>"), &job(dir.path(), "1969")).is_none());
        assert!(process_group(&Page("<table></table>"), &job(dir.path(), "1971")).is_none());
        assert!(!dir.path().join("hotwheels-1968.csv").exists());
    }

    #[test]
    fn unwritable_output_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("reports");
        std::fs::write(&blocker, "file, not dir").unwrap();

        let mut j = job(dir.path(), "1968");
        j.out_path = blocker.join("hotwheels-1968.csv");
        let err = try_process_group(&Page("<table><tr><td>Snake</td></tr></table>"), &j).unwrap_err();
        assert!(matches!(err, ScrapeError::Filesystem { .. }));
        assert!(process_group(&Page("<table><tr><td>Snake</td></tr></table>"), &j).is_none());
    }

    #[test]
    fn chain_includes_sources() {
        let e = ScrapeError::fs("/x", io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"));
        assert_eq!(error_chain(&e), "filesystem error at /x: Permission denied: Permission denied");
    }
}
