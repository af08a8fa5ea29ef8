//! Text-table rendering for frames

use std::fmt;

use super::DataFrame;

/// Rows shown before the output is elided.
const MAX_DISPLAY_ROWS: usize = 20;

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty frame)");
        }
        let n_rows = self.n_rows().min(MAX_DISPLAY_ROWS);

        // Column widths from header and visible cells.
        let mut widths: Vec<usize> = Vec::with_capacity(self.n_cols());
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.n_cols());
        for (name, series) in self.iter() {
            let column: Vec<String> = (0..n_rows).map(|i| series.format_cell(i)).collect();
            let width = column
                .iter()
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(name.len());
            widths.push(width);
            cells.push(column);
        }

        for (idx, name) in self.column_names().iter().enumerate() {
            if idx > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{name:>width$}", width = widths[idx])?;
        }
        writeln!(f)?;
        for (idx, &width) in widths.iter().enumerate() {
            if idx > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{}", "-".repeat(width))?;
        }
        for row in 0..n_rows {
            writeln!(f)?;
            for (idx, column) in cells.iter().enumerate() {
                if idx > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", column[row], width = widths[idx])?;
            }
        }
        if self.n_rows() > MAX_DISPLAY_ROWS {
            writeln!(f)?;
            write!(f, "... {} rows total", self.n_rows())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::frame::{DataFrame, Series};

    #[test]
    fn test_display_contains_header_and_rule() {
        let frame = DataFrame::from_columns([("x", Series::int([1, 22]))]).unwrap();
        let text = frame.to_string();
        assert!(text.contains(" x"));
        assert!(text.contains("--"));
        assert!(text.contains("22"));
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(DataFrame::new().to_string(), "(empty frame)");
    }
}
