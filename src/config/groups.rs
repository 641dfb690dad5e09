// src/config/groups.rs
//
// Group dictionaries: which pages to scrape and which parsed table to read on each.

use super::consts::BASE_URL;
use crate::error::ScrapeError;

const FIRST_YEAR: u16 = 1968;
const LAST_YEAR: u16 = 1977;

/// The 1970 page wraps its casting list in a nested table.
const NESTED_TABLE_YEAR: u16 = 1970;

const SERIES: [&str; 7] = [
    "customs",
    "gran_prix",
    "heavyweights",
    "spoilers",
    "super_chromes",
    "snake_mongoose",
    "classics",
];

/// Parallel sequences of labels and table indices, one entry per scraped page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSet {
    labels: Vec<String>,
    table_indices: Vec<usize>,
}

impl GroupSet {
    pub fn new(labels: Vec<String>, table_indices: Vec<usize>) -> Result<Self, ScrapeError> {
        if labels.len() != table_indices.len() {
            return Err(ScrapeError::Unexpected(format!(
                "group labels ({}) and table indices ({}) differ in length",
                labels.len(),
                table_indices.len()
            )));
        }
        Ok(Self { labels, table_indices })
    }

    /// 1968..=1977, reading the nested table on the 1970 page.
    pub fn years() -> Self {
        let (labels, table_indices) = (FIRST_YEAR..=LAST_YEAR)
            .map(|y| (y.to_string(), usize::from(y == NESTED_TABLE_YEAR)))
            .unzip();
        Self { labels, table_indices }
    }

    pub fn series() -> Self {
        Self {
            labels: SERIES.iter().map(|s| s!(*s)).collect(),
            table_indices: vec![0; SERIES.len()],
        }
    }

    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    pub fn labels(&self) -> &[String] { &self.labels }

    /// (label, table_index) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.table_indices.iter().copied())
    }

    pub fn url(label: &str) -> String {
        join!(BASE_URL, "/", label, ".html")
    }
}
