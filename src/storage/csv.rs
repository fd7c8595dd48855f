// src/storage/csv.rs
use std::io::{self, Write};

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes one RFC 4180 row, quoting only the cells that need it.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEP)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    write!(w, "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(row: &[&str]) -> String {
        let row: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        write_row(&mut out, &row).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_cells_are_bare() {
        assert_eq!(render(&["1", "Tyson Fury", ""]), "1,Tyson Fury,\r\n");
    }

    #[test]
    fn separators_and_quotes_are_escaped() {
        assert_eq!(
            render(&["Madison Square Garden, New York", "\"Gypsy\" King"]),
            "\"Madison Square Garden, New York\",\"\"\"Gypsy\"\" King\"\r\n"
        );
    }
}
