// src/csv.rs
use std::io::{self, Write};

use crate::table::Table;

pub const SEP: char = ',';

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W, S>(mut w: W, row: &[S], sep: char) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line plus every row; absent cells are written empty.
pub fn write_table<W: Write>(mut w: W, table: &Table, sep: char) -> io::Result<()> {
    write_row(&mut w, table.headers(), sep)?;
    for r in table.rows() {
        let cells: Vec<&str> = r.iter().map(|c| c.as_deref().unwrap_or("")).collect();
        write_row(&mut w, &cells, sep)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(table: &Table) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, table, SEP).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn quotes_only_when_needed() {
        let t = Table::from_strs(
            &["Casting", "Year"],
            &[&["King 'Cuda", "['1970']"], &["Say \"Hi\", Bye", ""]],
        );
        assert_eq!(
            to_string(&t),
            "Casting,Year\nKing 'Cuda,['1970']\n\"Say \"\"Hi\"\", Bye\",\n"
        );
    }

    #[test]
    fn line_breaks_are_quoted() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a\nb", "c"], SEP).unwrap();
        assert_eq!(buf, b"\"a\nb\",c\n");
    }
}
