// src/config/paths.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::error::ScrapeError;
use crate::file::ensure_directory;

/// Every file the run writes, derived from one root directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    root: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::new(OUTPUT_ROOT)
    }
}

impl OutputPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn reports_dir(&self) -> PathBuf { self.root.join(REPORTS_SUBDIR) }
    pub fn logs_dir(&self) -> PathBuf { self.root.join(LOGS_SUBDIR) }

    /// `reports/hotwheels-{label}.csv`
    pub fn group_export(&self, label: &str) -> PathBuf {
        self.reports_dir().join(join!(EXPORT_PREFIX, label, ".csv"))
    }

    pub fn catalog_csv(&self) -> PathBuf {
        self.reports_dir().join(join!(CATALOG_STEM, ".csv"))
    }

    pub fn catalog_json(&self) -> PathBuf {
        self.reports_dir().join(join!(CATALOG_STEM, ".json"))
    }

    pub fn run_log(&self) -> PathBuf { self.logs_dir().join(RUN_LOG_FILE) }
    pub fn profile_report(&self) -> PathBuf { self.logs_dir().join(PROFILE_FILE) }

    /// Create the reports and logs directories.
    pub fn ensure_dirs(&self) -> Result<(), ScrapeError> {
        ensure_directory(&self.reports_dir())?;
        ensure_directory(&self.logs_dir())
    }
}
