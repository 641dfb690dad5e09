// tests/extract_table.rs
//
// Extraction + normalization over page-shaped HTML.

use redline_scrape::core::{extract_table, Grid};
use redline_scrape::normalize::normalize;
use redline_scrape::ScrapeError;

const SERIES_PAGE: &str = r#"
<!DOCTYPE html>
<html><body>
<div id="nav"><a href="1968.html">1968</a></div>
<table width="100%">
  <thead><tr><th colspan="2">Snake &amp; Mongoose</th></tr></thead>
  <tbody>
    <tr><td>Snake</td><td>Mongoose</td></tr>
    <tr><td>Snake II Funny Car</td><td>Mongoose II Funny Car</td></tr>
    <tr><td>
      Snake   Funny
      Car
    </td><td></td></tr>
  </tbody>
</table>
<table><tr><td>Footer table</td></tr></table>
</body></html>"#;

#[test]
fn first_table_rows_with_whitespace_collapsed() {
    let grid = extract_table(SERIES_PAGE, 0, "snake_mongoose").unwrap();
    assert_eq!(grid.rows().len(), 3);
    assert_eq!(grid.width(), 2);
    assert_eq!(grid.rows()[2], vec![Some("Snake Funny Car".to_string()), None]);
    assert!(grid.values().all(|v| v != "Footer table"));
}

#[test]
fn blank_column_page_keeps_first_column_only() {
    let grid = extract_table(SERIES_PAGE, 0, "snake_mongoose").unwrap();
    assert_eq!(normalize(&grid, "snake_mongoose"), vec!["Snake", "Snake II"]);
    assert_eq!(
        normalize(&grid, "classics"),
        vec!["Mongoose", "Mongoose II", "Snake", "Snake II"]
    );
}

#[test]
fn header_only_table_is_no_table() {
    let html = "<table><tr><th>Casting</th></tr></table>";
    assert!(matches!(
        extract_table(html, 0, "https://x/1975.html"),
        Err(ScrapeError::NoTable { url }) if url == "https://x/1975.html"
    ));
}

#[test]
fn grid_equality_helper_matches_extraction() {
    let html = "<table><tr><td>Alive 55</td><td>King Cuda</td></tr></table>";
    assert_eq!(
        extract_table(html, 0, "t").unwrap(),
        Grid::from_strs(&[&["Alive 55", "King Cuda"]])
    );
}
