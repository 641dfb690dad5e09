// src/error.rs
//! Error taxonomy for one scrape run.
//!
//! Every variant is recoverable at the group boundary: the group processor logs
//! it and drops that unit. Nothing here ever aborts a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure or a non-2xx status.
    #[error("error fetching the URL {url}: {reason}")]
    Network { url: String, reason: String },

    /// No `<table>` in the page, or a table without data rows.
    #[error("no table found at {url}")]
    NoTable { url: String },

    /// Cannot create a directory or write a file.
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    NoTable,
    Filesystem,
    Unexpected,
}

impl ScrapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::Network { .. } => ErrorKind::Network,
            ScrapeError::NoTable { .. } => ErrorKind::NoTable,
            ScrapeError::Filesystem { .. } => ErrorKind::Filesystem,
            ScrapeError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScrapeError::Filesystem { path: path.into(), source }
    }

    /// Expected failures are logged plainly; the rest get full diagnostics.
    pub fn is_expected(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::NoTable)
    }
}
