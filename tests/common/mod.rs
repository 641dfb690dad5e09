// tests/common/mod.rs
//
// Reads exported CSV back into rows of fields.

/// Splits on unquoted commas and line breaks; `""` inside quotes is a quote.
/// Blank lines are skipped.
pub fn read_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    let mut end_row = |row: &mut Vec<String>, field: &mut String| {
        row.push(std::mem::take(field));
        if row.iter().any(|f| !f.is_empty()) || row.len() > 1 {
            rows.push(std::mem::take(row));
        }
    };

    while let Some(ch) = chars.next() {
        match (ch, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', _) => quoted = !quoted,
            (',', false) => row.push(std::mem::take(&mut field)),
            ('\r', false) => {}
            ('\n', false) => end_row(&mut row, &mut field),
            (c, _) => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        end_row(&mut row, &mut field);
    }
    rows
}
