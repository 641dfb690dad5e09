// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::csv::{write_table, SEP};
use crate::error::ScrapeError;
use crate::table::Table;

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::fs(
            dir,
            std::io::Error::other("path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::fs(dir, e))?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ScrapeError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Create/truncate `path` and hand a buffered writer to `body`.
fn write_with<F>(path: &Path, body: F) -> Result<(), ScrapeError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| ScrapeError::fs(path, e))?;
    let mut out = BufWriter::new(file);
    body(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| ScrapeError::fs(path, e))
}

/// Overwrite `path` with the table as CSV (header row first).
pub fn write_csv(path: &Path, table: &Table) -> Result<(), ScrapeError> {
    write_with(path, |out| write_table(out, table, SEP))
}

/// Overwrite `path` with pretty JSON, 4-space indent.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ScrapeError> {
    // Encode first so a serialization failure leaves no partial file.
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| ScrapeError::Unexpected(format!("JSON encoding failed: {e}")))?;

    write_with(path, |out| out.write_all(&buf))
}
