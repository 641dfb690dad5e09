// src/core/html.rs
// Table extraction: first <table> in the document, parsed into a row/column grid.
//
// The first table and every table nested inside it form the list of "logical"
// tables, in document order. `table_index` picks one of those; it never skips
// to a later top-level table.

use scraper::{ElementRef, Html, Selector};
use tracing::info_span;

use super::sanitize::cell_value;
use crate::error::ScrapeError;

/// HTML caps colspan at 1000 and rowspan at 65534.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

/// Row-major cell values. Blank cells are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self { Self { rows } }

    /// Convenience for fixtures: every cell present.
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|r| r.iter().map(|c| Some(s!(*c))).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] { &self.rows }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// A new grid with column `col` removed from every row.
    /// Rows too short to have that column are kept as they are.
    pub fn without_column(&self, col: usize) -> Grid {
        let rows = self
            .rows
            .iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != col)
                    .map(|(_, c)| c.clone())
                    .collect()
            })
            .collect();
        Grid { rows }
    }

    /// Present cell values, row by row, left to right.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().filter_map(|c| c.as_deref())
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::Unexpected(format!("bad selector {css:?}: {e}")))
}

/// Parse `html` and return logical table `table_index` of its first `<table>`.
///
/// `source` only labels errors (usually the page URL).
pub fn extract_table(html: &str, table_index: usize, source: &str) -> Result<Grid, ScrapeError> {
    let _span = info_span!("extract", table_index).entered();
    let no_table = || ScrapeError::NoTable { url: s!(source) };

    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;
    let tr_sel = selector("tr")?;

    let first = doc.select(&table_sel).next().ok_or_else(no_table)?;

    let logical: Vec<ElementRef> = std::iter::once(first)
        .chain(first.select(&table_sel).filter(|t| t.id() != first.id()))
        .collect();

    let table = logical.get(table_index).copied().ok_or_else(|| {
        ScrapeError::Unexpected(format!(
            "table index {table_index} out of range: {} table(s) parsed at {source}",
            logical.len()
        ))
    })?;

    let rows: Vec<(bool, Vec<Cell>)> = table
        .select(&tr_sel)
        .filter(|tr| belongs_to(tr, &table))
        .map(|tr| (in_thead(&tr), cells_of(&tr)))
        .filter(|(_, cells)| !cells.is_empty())
        .collect();

    // Without a <thead>, the leading all-<th> rows are the header.
    let has_thead = rows.iter().any(|(head, _)| *head);
    let body = rows
        .into_iter()
        .filter(|(head, _)| !head)
        .map(|(_, cells)| cells)
        .skip_while(|cells| !has_thead && cells.iter().all(|c| c.header));

    let rows = place_rows(body);
    if rows.is_empty() {
        return Err(no_table());
    }
    Ok(Grid::new(rows))
}

/// True when `table` is the nearest enclosing `<table>` of `el`.
fn belongs_to(el: &ElementRef, table: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "table")
        .is_some_and(|a| a.id() == table.id())
}

/// True when the row sits in a `<thead>` of its own table.
fn in_thead(tr: &ElementRef) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|a| a.value().name() != "table")
        .any(|a| a.value().name() == "thead")
}

/// One `<td>`/`<th>` before span placement.
struct Cell {
    value: Option<String>,
    colspan: usize,
    rowspan: usize,
    header: bool,
}

fn span_attr(cell: &ElementRef, name: &str, max: usize) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, max)
}

fn cells_of(tr: &ElementRef) -> Vec<Cell> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
        .map(|c| Cell {
            value: cell_value(c.text()),
            colspan: span_attr(&c, "colspan", MAX_COLSPAN),
            rowspan: span_attr(&c, "rowspan", MAX_ROWSPAN),
            header: c.value().name() == "th",
        })
        .collect()
}

/// A value carried down by `rowspan` into the rows below.
struct Carry {
    left: usize,
    value: Option<String>,
}

/// Lay cells out on the grid: slots covered by a `rowspan` from above are
/// filled first, then each cell takes the next free slot, `colspan` times.
fn place_rows(rows: impl Iterator<Item = Vec<Cell>>) -> Vec<Vec<Option<String>>> {
    let mut carried: Vec<Option<Carry>> = Vec::new();
    let mut grid = Vec::new();

    for cells in rows {
        let mut row: Vec<Option<String>> = Vec::with_capacity(cells.len());
        let mut cells = cells.into_iter();
        loop {
            let col = row.len();
            if let Some(c) = carried.get_mut(col).and_then(Option::as_mut) {
                row.push(c.value.clone());
                c.left -= 1;
                if c.left == 0 {
                    carried[col] = None;
                }
                continue;
            }
            let Some(cell) = cells.next() else {
                // Pad up to any carry still waiting further right.
                if carried.iter().skip(col).any(Option::is_some) {
                    row.push(None);
                    continue;
                }
                break;
            };
            for _ in 0..cell.colspan {
                let at = row.len();
                if carried.len() <= at {
                    carried.resize_with(at + 1, || None);
                }
                carried[at] = (cell.rowspan > 1).then(|| Carry {
                    left: cell.rowspan - 1,
                    value: cell.value.clone(),
                });
                row.push(cell.value.clone());
            }
        }
        grid.push(row);
    }
    grid
}
