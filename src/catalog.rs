// src/catalog.rs
//! Merge of the by-year and by-series scrapes into one catalog.
//!
//! Both inputs are stacked, grouped by canonical name, and each name collects
//! the distinct years and series it was seen with. The catalog is written as
//! `redlines.csv` and `redlines.json`.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::{error, info, info_span};

use crate::config::consts::{SERIES_KEY, YEAR_KEY};
use crate::config::OutputPaths;
use crate::error::ScrapeError;
use crate::file::{write_csv, write_json};
use crate::table::Table;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub years: BTreeSet<String>,
    pub series: BTreeSet<String>,
}

/// Entries sorted by name, plus the header used for the name column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    column: String,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn column(&self) -> &str { &self.column }
    pub fn entries(&self) -> &[CatalogEntry] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Flat table for CSV: list cells hold a bracketed literal like `['1968', '1969']`.
    pub fn to_table(&self) -> Table {
        let mut t = Table::new(vec![self.column.clone(), s!(YEAR_KEY), s!(SERIES_KEY)]);
        for e in &self.entries {
            t.push_row(vec![
                Some(e.name.clone()),
                Some(list_literal(&e.years)),
                Some(list_literal(&e.series)),
            ]);
        }
        t
    }
}

/// `['a', 'b']`, or `[]` when empty.
///
/// Items are always single-quoted, with `'` and `\` backslash-escaped. A value
/// holding `'` is not switched to double quotes; labels never hold one.
pub fn list_literal(values: &BTreeSet<String>) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| join!("'", &v.replace('\\', "\\\\").replace('\'', "\\'"), "'"))
        .collect();
    join!("[", &items.join(", "), "]")
}

/// One JSON record: `{ <column>: name, "Year": [...], "Series": [...] }`.
struct Record<'a> {
    column: &'a str,
    entry: &'a CatalogEntry,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.column, &self.entry.name)?;
        map.serialize_entry(YEAR_KEY, &self.entry.years)?;
        map.serialize_entry(SERIES_KEY, &self.entry.series)?;
        map.end()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(&Record { column: &self.column, entry })?;
        }
        seq.end()
    }
}

/// Columns the stacked inputs must provide between them.
fn missing_columns<'a>(column: &'a str, years: &Table, series: &Table) -> Vec<&'a str> {
    [column, YEAR_KEY, SERIES_KEY]
        .into_iter()
        .filter(|c| !years.has_column(c) && !series.has_column(c))
        .collect()
}

/// Group both tables by name. `None` if a required column is missing from both.
pub fn build(column: &str, years: &Table, series: &Table) -> Option<Catalog> {
    if !missing_columns(column, years, series).is_empty() {
        return None;
    }

    let all = Table::concat([years.clone(), series.clone()]);

    let mut grouped: BTreeMap<&str, (BTreeSet<String>, BTreeSet<String>)> = BTreeMap::new();
    for ((name, year), ser) in all
        .column(column)
        .zip(all.column(YEAR_KEY))
        .zip(all.column(SERIES_KEY))
    {
        // Rows without a name cannot be keyed.
        let Some(name) = name else { continue };
        let (ys, ss) = grouped.entry(name).or_default();
        if let Some(y) = year {
            ys.insert(s!(y));
        }
        if let Some(s) = ser {
            ss.insert(s!(s));
        }
    }

    let entries = grouped
        .into_iter()
        .map(|(name, (years, series))| CatalogEntry { name: s!(name), years, series })
        .collect();

    Some(Catalog { column: s!(column), entries })
}

/// Write both catalog files.
pub fn persist(catalog: &Catalog, paths: &OutputPaths) -> Result<(), ScrapeError> {
    let csv_path = paths.catalog_csv();
    write_csv(&csv_path, &catalog.to_table())?;
    info!("CSV saved to {}.", csv_path.display());

    let json_path = paths.catalog_json();
    write_json(&json_path, catalog)?;
    info!("JSON saved to {}.", json_path.display());
    Ok(())
}

/// Build and persist the catalog.
///
/// Skips (no files touched) when the inputs lack `column`, "Year" or "Series"
/// between them. Never fails the run; write errors are logged.
pub fn merge(column: &str, years: &Table, series: &Table, paths: &OutputPaths) -> Option<Catalog> {
    let _span = info_span!("merge").entered();

    let missing = missing_columns(column, years, series);
    if !missing.is_empty() {
        info!("Missing expected columns {missing:?}. Skipping CSV and JSON creation.");
        return None;
    }

    let catalog = build(column, years, series)?;
    match persist(&catalog, paths) {
        Ok(()) => Some(catalog),
        Err(e) => {
            error!("Failed to write catalog: {}", crate::scrape::error_chain(&e));
            None
        }
    }
}
