// src/table.rs
//
// Small column-named table used between the scrape and merge stages.
// Cells are optional so tables with different columns can be stacked.

pub type Row = Vec<Option<String>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Build from string slices; empty strings become absent cells.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut t = Self::new(headers.iter().map(|h| s!(*h)).collect());
        for r in rows {
            t.push_row(
                r.iter()
                    .map(|c| if c.is_empty() { None } else { Some(s!(*c)) })
                    .collect(),
            );
        }
        t
    }

    /// One-column table of names.
    pub fn single_column(header: &str, values: Vec<String>) -> Self {
        Self {
            headers: vec![s!(header)],
            rows: values.into_iter().map(|v| vec![Some(v)]).collect(),
        }
    }

    pub fn headers(&self) -> &[String] { &self.headers }
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column; every row yields `None` if the column is missing.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = Option<&'a str>> + use<'a> {
        let ix = self.column_index(name);
        self.rows
            .iter()
            .map(move |r| ix.and_then(|i| r.get(i)).and_then(|c| c.as_deref()))
    }

    /// Rows are padded or truncated to the header width.
    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    /// Append a column holding the same value in every row.
    pub fn with_constant(mut self, header: &str, value: &str) -> Self {
        self.headers.push(s!(header));
        for r in &mut self.rows {
            r.push(Some(s!(value)));
        }
        self
    }

    /// Stack tables row-wise. Columns are the union in first-seen order;
    /// a row lacking a column gets `None` there.
    pub fn concat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let tables: Vec<Table> = tables.into_iter().collect();

        let mut headers: Vec<String> = Vec::new();
        for t in &tables {
            for h in &t.headers {
                if !headers.contains(h) {
                    headers.push(h.clone());
                }
            }
        }

        let mut out = Table::new(headers);
        for t in tables {
            let map: Vec<Option<usize>> = out.headers.iter().map(|h| t.column_index(h)).collect();
            for mut r in t.rows {
                let row = map
                    .iter()
                    .map(|ix| ix.and_then(|i| r.get_mut(i)).and_then(Option::take))
                    .collect();
                out.rows.push(row);
            }
        }
        out
    }
}
