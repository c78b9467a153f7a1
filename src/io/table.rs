//! Plain-text tables with a full grid border:
//!
//! ```text
//! +------+----------+
//! | Item | Quantity |
//! +======+==========+
//! | Bolt |       15 |
//! +------+----------+
//! ```

use std::fmt;

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with left-aligned columns.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            align: vec![Align::Left; headers.len()],
            rows: Vec::new(),
        }
    }

    /// Right-align a column (numbers).
    pub fn align_right(mut self, column: usize) -> Self {
        if let Some(align) = self.align.get_mut(column) {
            *align = Align::Right;
        }
        self
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .map(|row| row[col].width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn write_rule(&self, f: &mut fmt::Formatter<'_>, widths: &[usize], fill: char) -> fmt::Result {
        write!(f, "+")?;
        for width in widths {
            write!(f, "{}+", fill.to_string().repeat(width + 2))?;
        }
        Ok(())
    }

    fn write_cells(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize],
        cells: &[String],
    ) -> fmt::Result {
        write!(f, "|")?;
        for ((cell, width), align) in cells.iter().zip(widths).zip(&self.align) {
            // Padding is computed from display width so accented text lines up.
            let pad = " ".repeat(width - cell.width());
            match align {
                Align::Left => write!(f, " {}{} |", cell, pad)?,
                Align::Right => write!(f, " {}{} |", pad, cell)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        self.write_rule(f, &widths, '-')?;
        writeln!(f)?;
        self.write_cells(f, &widths, &self.headers)?;
        writeln!(f)?;
        self.write_rule(f, &widths, '=')?;

        for row in &self.rows {
            writeln!(f)?;
            self.write_cells(f, &widths, row)?;
            writeln!(f)?;
            self.write_rule(f, &widths, '-')?;
        }
        Ok(())
    }
}
