//! Plain-text tables with an underlined header.
//!
//! Columns are left-aligned and separated by two spaces. The last column is
//! never padded, so rows carry no trailing whitespace.

use std::io::{self, Write};

/// Spaces between columns.
const COLUMN_GAP: usize = 2;

/// A table rendered as aligned text.
///
/// # Examples
///
/// ```
/// use fioctl_targets::table::Table;
///
/// let mut table = Table::new(["NAME", "VERSION"]);
/// table.add_row(["shellhttpd", "1"]);
///
/// let mut out = Vec::new();
/// table.write_to(&mut out)?;
/// assert_eq!(
///     String::from_utf8_lossy(&out),
///     "NAME        VERSION\n----        -------\nshellhttpd  1\n"
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headings.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Return true when the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Write the header, its underline, and every row.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        let underline: Vec<String> = self
            .header
            .iter()
            .map(|cell| "-".repeat(cell.chars().count()))
            .collect();
        let widths = self.column_widths(&underline);

        write_line(out, &self.header, &widths)?;
        write_line(out, &underline, &widths)?;
        for row in &self.rows {
            write_line(out, row, &widths)?;
        }
        Ok(())
    }

    fn column_widths(&self, underline: &[String]) -> Vec<usize> {
        let mut widths = Vec::new();
        let lines = std::iter::once(self.header.as_slice())
            .chain(std::iter::once(underline))
            .chain(self.rows.iter().map(Vec::as_slice));
        for line in lines {
            for (column, cell) in line.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(column) {
                    Some(current) if *current < width => *current = width,
                    Some(_) => {}
                    None => widths.push(width),
                }
            }
        }
        widths
    }
}

fn write_line(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (column, cell) in cells.iter().enumerate() {
        if column == last {
            line.push_str(cell);
        } else {
            let width = widths.get(column).copied().unwrap_or_default() + COLUMN_GAP;
            line.push_str(&format!("{cell:<width$}"));
        }
    }
    writeln!(out, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &Table) -> String {
        let mut out = Vec::new();
        table.write_to(&mut out).expect("writing to a Vec succeeds");
        String::from_utf8(out).expect("table output is UTF-8")
    }

    #[test]
    fn header_only_table_prints_underline() {
        let table = Table::new(["TARGET NAME", "OSTREE HASH - SHA256"]);

        assert!(table.is_empty());
        assert_eq!(
            render(&table),
            "TARGET NAME  OSTREE HASH - SHA256\n-----------  --------------------\n"
        );
    }

    #[test]
    fn columns_widen_to_longest_cell() {
        let mut table = Table::new(["A", "B"]);
        table.add_row(["long-name", "x"]);
        table.add_row(["s", "y"]);

        assert_eq!(table.len(), 2);
        assert_eq!(
            render(&table),
            "A          B\n-          -\nlong-name  x\ns          y\n"
        );
    }

    #[test]
    fn last_column_has_no_trailing_padding() {
        let mut table = Table::new(["NAME", "VALUE"]);
        table.add_row(["n", "a-very-long-value"]);

        for line in render(&table).lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let mut table = Table::new(["APP", "V"]);
        table.add_row(["café", "1"]);

        let output = render(&table);
        assert!(output.contains("café  1\n"), "{output}");
    }
}
