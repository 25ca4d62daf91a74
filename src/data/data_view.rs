use anyhow::Result;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::data::datatable::{DataCell, DataTable};

/// A read-only projection over a filtered DataTable, used for terminal output
/// without modifying the underlying data
#[derive(Clone)]
pub struct DataView {
    /// The underlying immutable data source
    source: Arc<DataTable>,

    /// Row indices that are visible
    visible_rows: Vec<usize>,

    /// Column indices that are visible (after projection)
    visible_columns: Vec<usize>,

    limit: Option<usize>,
}

impl DataView {
    /// Create a new view showing all data from the table
    pub fn new(source: Arc<DataTable>) -> Self {
        let row_count = source.row_count();
        let col_count = source.column_count();

        Self {
            source,
            visible_rows: (0..row_count).collect(),
            visible_columns: (0..col_count).collect(),
            limit: None,
        }
    }

    /// Create a view that only contains the rows not carrying the hidden marker
    pub fn unhidden(source: Arc<DataTable>) -> Self {
        Self::new(source).filter(|table, row_idx| !table.rows[row_idx].hidden)
    }

    /// Hide a column by index
    pub fn hide_column(&mut self, column_index: usize) {
        self.visible_columns.retain(|&idx| idx != column_index);
    }

    /// Hide a column by name
    pub fn hide_column_by_name(&mut self, column_name: &str) {
        if let Some(col_idx) = self.source.get_column_index(column_name) {
            self.hide_column(col_idx);
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filter rows based on a predicate
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&DataTable, usize) -> bool,
    {
        self.visible_rows = self
            .visible_rows
            .into_iter()
            .filter(|&row_idx| predicate(&self.source, row_idx))
            .collect();
        self
    }

    /// Sort rows by a column, numeric sort values first, display text otherwise
    pub fn sort_by(mut self, column_index: usize, ascending: bool) -> Result<Self> {
        if column_index >= self.source.column_count() {
            return Err(anyhow::anyhow!(
                "Column index {} out of bounds",
                column_index
            ));
        }

        let source = &self.source;
        self.visible_rows.sort_by(|&a, &b| {
            let cell_a = source.get_cell(a, column_index);
            let cell_b = source.get_cell(b, column_index);
            let cmp = compare_cells(cell_a, cell_b);

            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        Ok(self)
    }

    /// Get the number of visible rows
    pub fn row_count(&self) -> usize {
        let count = self.visible_rows.len();
        match self.limit {
            Some(limit) => count.min(limit),
            None => count,
        }
    }

    /// Get the number of visible columns
    pub fn column_count(&self) -> usize {
        self.visible_columns.len()
    }

    /// Get column names for visible columns
    pub fn column_names(&self) -> Vec<String> {
        self.visible_columns
            .iter()
            .filter_map(|&idx| self.source.columns.get(idx).map(|c| c.name.clone()))
            .collect()
    }

    /// Get the display texts of a row by view index (respecting limit)
    pub fn get_row(&self, index: usize) -> Option<Vec<String>> {
        if index >= self.row_count() {
            return None;
        }

        let row_idx = *self.visible_rows.get(index)?;
        Some(
            self.visible_columns
                .iter()
                .map(|&col_idx| {
                    self.source
                        .get_cell(row_idx, col_idx)
                        .map(|c| c.text.trim().to_string())
                        .unwrap_or_default()
                })
                .collect(),
        )
    }

    /// Get all visible rows (respecting limit)
    pub fn get_rows(&self) -> Vec<Vec<String>> {
        (0..self.row_count()).filter_map(|i| self.get_row(i)).collect()
    }

    /// Get visible row indices (before limit)
    pub fn visible_row_indices(&self) -> &[usize] {
        &self.visible_rows
    }
}

fn compare_cells(a: Option<&DataCell>, b: Option<&DataCell>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.sort_value, b.sort_value) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => a.text.trim().cmp(b.text.trim()),
        },
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
