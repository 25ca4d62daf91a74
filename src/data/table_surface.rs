//! Table access traits for the filter engine
//!
//! The filter controller never touches a concrete table type. It reads cell
//! values and writes the hidden marker through [`TableSurface`], so the same
//! predicate code works over the in-memory [`DataTable`](super::datatable::DataTable)
//! or any other rendering surface.

use std::collections::BTreeSet;
use std::fmt::Debug;

/// Core trait for reading rows and toggling their visibility
pub trait TableSurface: Debug {
    /// Get the total number of rows
    fn row_count(&self) -> usize;

    /// Display text of a cell, untrimmed
    /// Returns None if row or column index is out of bounds
    fn cell_text(&self, row: usize, column: usize) -> Option<&str>;

    /// Precomputed numeric sort value of a cell, if the cell carries one
    fn cell_sort_value(&self, row: usize, column: usize) -> Option<f64>;

    /// A row attribute such as `value-trade`
    fn row_attribute(&self, row: usize, name: &str) -> Option<&str>;

    /// Set or clear the hidden marker of a row
    fn set_row_hidden(&mut self, row: usize, hidden: bool);

    fn is_row_hidden(&self, row: usize) -> bool;

    /// Whether a row attribute holds exactly `true`
    /// Missing or malformed markers read as false
    fn row_flag(&self, row: usize, name: &str) -> bool {
        self.row_attribute(row, name) == Some("true")
    }

    /// Distinct trimmed values of a column, ordered by UTF-16 code units
    /// the way a browser sorts strings
    fn distinct_column_values(&self, column: usize) -> Vec<String> {
        let distinct: BTreeSet<String> = (0..self.row_count())
            .filter_map(|row| self.cell_text(row, column))
            .map(|text| text.trim().to_string())
            .collect();

        let mut values: Vec<String> = distinct.into_iter().collect();
        values.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
        values
    }

    /// Mark every row visible
    fn show_all_rows(&mut self) {
        for row in 0..self.row_count() {
            self.set_row_hidden(row, false);
        }
    }

    fn hidden_row_count(&self) -> usize {
        (0..self.row_count())
            .filter(|&row| self.is_row_hidden(row))
            .count()
    }
}
