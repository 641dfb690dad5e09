// tests/group_export.rs
//
// Group processor against canned pages: what lands in hotwheels-{label}.csv.

mod common;

use std::collections::HashMap;
use std::fs;

use redline_scrape::config::{GroupSet, OutputPaths};
use redline_scrape::core::Fetch;
use redline_scrape::scrape::{process_group, GroupJob};
use redline_scrape::ScrapeError;

use common::read_csv;

struct Pages(HashMap<String, String>);

impl Pages {
    fn one(label: &str, html: &str) -> Self {
        Pages(HashMap::from([(GroupSet::url(label), html.to_string())]))
    }
}

impl Fetch for Pages {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.0.get(url).cloned().ok_or_else(|| ScrapeError::Network {
            url: url.to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        })
    }
}

fn job<'a>(paths: &OutputPaths, label: &'a str, table_index: usize) -> GroupJob<'a> {
    GroupJob {
        url: GroupSet::url(label),
        table_index,
        dataset_key: label,
        out_path: paths.group_export(label),
        column: "Casting",
    }
}

const PAGE_1970: &str = r#"
<html><head><title>1970</title></head><body>
<table class="layout">
  <tr><td>
    <h2>1970 Redlines</h2>
    <table border="1">
      <tr><th>Casting</th></tr>
      <tr><td>Mongoose 2</td></tr>
      <tr><td>Snake</td></tr>
    </table>
  </td></tr>
</table>
</body></html>"#;

#[test]
fn nested_1970_table_is_normalized_and_written() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());

    let export = process_group(&Pages::one("1970", PAGE_1970), &job(&paths, "1970", 1)).unwrap();
    let names: Vec<&str> = export.column("Casting").flatten().collect();
    assert_eq!(names, vec!["Mongoose II", "Snake"]);

    let written = fs::read_to_string(paths.group_export("1970")).unwrap();
    assert_eq!(written, "Casting\nMongoose II\nSnake\n");
    assert!(paths.group_export("1970").ends_with("reports/hotwheels-1970.csv"));
}

#[test]
fn snake_mongoose_second_column_never_exported() {
    let html = r#"<table>
        <tr><th>Snake</th><th>Mongoose</th></tr>
        <tr><td>Snake Funny Car</td><td>Mongoose Funny Car</td></tr>
        <tr><td>Snake II</td><td>Snake</td></tr>
        <tr><td>Snake 2</td><td>Zzz Only In Column Two</td></tr>
    </table>"#;
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());

    process_group(&Pages::one("snake_mongoose", html), &job(&paths, "snake_mongoose", 0)).unwrap();

    let text = fs::read_to_string(paths.group_export("snake_mongoose")).unwrap();
    let rows = read_csv(&text);
    assert_eq!(rows, vec![vec!["Casting"], vec!["Snake"], vec!["Snake II"]]);
    assert!(!text.contains("Zzz"));
    assert!(!text.contains("Mongoose"));
}

#[test]
fn rerun_overwrites_previous_export() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());

    let first = Pages::one("1968", "<table><tr><td>Old Casting</td></tr></table>");
    let second = Pages::one("1968", "<table><tr><td>Snake</td></tr></table>");
    process_group(&first, &job(&paths, "1968", 0)).unwrap();
    process_group(&second, &job(&paths, "1968", 0)).unwrap();

    assert_eq!(fs::read_to_string(paths.group_export("1968")).unwrap(), "Casting\nSnake\n");
}

#[test]
fn out_of_range_index_and_missing_page_give_none() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());
    let pages = Pages::one("1969", "<table><tr><td>Snake</td></tr></table>");

    assert!(process_group(&pages, &job(&paths, "1969", 3)).is_none());
    assert!(process_group(&pages, &job(&paths, "1971", 0)).is_none());
    assert!(!paths.group_export("1969").exists());
    assert!(!paths.group_export("1971").exists());
}
