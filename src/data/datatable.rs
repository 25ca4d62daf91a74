use crate::data::table_surface::TableSurface;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// How the sortable-table collaborator compares a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMethod {
    /// Column is not sortable (image column)
    None,
    String,
    Number,
}

impl SortMethod {
    /// Attribute value used in the page header, if any
    pub fn as_attribute(&self) -> Option<&'static str> {
        match self {
            SortMethod::None => None,
            SortMethod::String => Some("string"),
            SortMethod::Number => Some("number"),
        }
    }

    /// Merge two observed methods (for columns built from loose data)
    pub fn merge(&self, other: &SortMethod) -> SortMethod {
        match (self, other) {
            (a, b) if a == b => *a,
            (SortMethod::None, t) | (t, SortMethod::None) => *t,
            _ => SortMethod::String,
        }
    }
}

/// Column metadata and definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub sort_method: SortMethod,
    pub metadata: HashMap<String, String>,
}

impl DataColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort_method: SortMethod::String,
            metadata: HashMap::new(),
        }
    }

    pub fn with_sort_method(mut self, sort_method: SortMethod) -> Self {
        self.sort_method = sort_method;
        self
    }
}

/// A single cell: what the user sees plus the precomputed numeric sort key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataCell {
    pub text: String,
    pub sort_value: Option<f64>,
    pub image_url: Option<String>,
}

impl DataCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn numeric(text: impl Into<String>, sort_value: f64) -> Self {
        Self {
            text: text.into(),
            sort_value: Some(sort_value),
            image_url: None,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Self::default()
        }
    }
}

impl fmt::Display for DataCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A row of data in the table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataRow {
    pub cells: Vec<DataCell>,
    /// `data-*` style attributes, keyed without the prefix
    pub attributes: BTreeMap<String, String>,
    pub hidden: bool,
}

impl DataRow {
    pub fn new(cells: Vec<DataCell>) -> Self {
        Self {
            cells,
            attributes: BTreeMap::new(),
            hidden: false,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, index: usize) -> Option<&DataCell> {
        self.cells.get(index)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The listing table the filters operate on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
    pub metadata: HashMap<String, String>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_columns(name: impl Into<String>, columns: Vec<DataColumn>) -> Self {
        let mut table = Self::new(name);
        table.columns = columns;
        table
    }

    pub fn add_column(&mut self, column: DataColumn) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn add_row(&mut self, row: DataRow) -> Result<(), String> {
        if row.len() != self.columns.len() {
            return Err(format!(
                "Row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column names as a vector
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&DataCell> {
        self.rows.get(row)?.get(col)
    }

    pub fn visible_row_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.hidden).count()
    }

    /// Generate a debug dump string for display
    pub fn debug_dump(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("DataTable: {}\n", self.name));
        output.push_str(&format!(
            "Rows: {} ({} visible) | Columns: {}\n",
            self.row_count(),
            self.visible_row_count(),
            self.column_count()
        ));

        output.push_str("\nColumns:\n");
        for column in &self.columns {
            output.push_str(&format!("  {} ({:?})\n", column.name, column.sort_method));
        }

        if self.row_count() > 0 {
            let sample_size = 5.min(self.row_count());
            output.push_str(&format!("\nFirst {} rows:\n", sample_size));

            for (row_idx, row) in self.rows.iter().take(sample_size).enumerate() {
                output.push_str(&format!("  [{}]: ", row_idx));
                let texts: Vec<&str> = row.cells.iter().map(|c| c.text.as_str()).collect();
                output.push_str(&texts.join(", "));
                if row.hidden {
                    output.push_str(" (hidden)");
                }
                output.push('\n');
            }
        }

        output
    }
}

impl TableSurface for DataTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_text(&self, row: usize, column: usize) -> Option<&str> {
        self.get_cell(row, column).map(|c| c.text.as_str())
    }

    fn cell_sort_value(&self, row: usize, column: usize) -> Option<f64> {
        self.get_cell(row, column)?.sort_value
    }

    fn row_attribute(&self, row: usize, name: &str) -> Option<&str> {
        self.rows.get(row)?.attribute(name)
    }

    fn set_row_hidden(&mut self, row: usize, hidden: bool) {
        if let Some(r) = self.rows.get_mut(row) {
            r.hidden = hidden;
        }
    }

    fn is_row_hidden(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> DataTable {
        let mut table = DataTable::new("test");
        table.add_column(DataColumn::new("name"));
        table.add_column(DataColumn::new("price").with_sort_method(SortMethod::Number));
        table
    }

    #[test]
    fn test_add_row_rejects_wrong_width() {
        let mut table = two_column_table();
        let err = table
            .add_row(DataRow::new(vec![DataCell::text("Opt")]))
            .unwrap_err();
        assert!(err.contains("1 cells"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_surface_reads_cells_and_attributes() {
        let mut table = two_column_table();
        table
            .add_row(
                DataRow::new(vec![
                    DataCell::text(" Opt "),
                    DataCell::numeric("12.50 SEK", 12.5),
                ])
                .with_attribute("value-trade", "true"),
            )
            .unwrap();

        assert_eq!(table.cell_text(0, 0), Some(" Opt "));
        assert_eq!(table.cell_sort_value(0, 1), Some(12.5));
        assert_eq!(table.cell_sort_value(0, 0), None);
        assert_eq!(table.row_attribute(0, "value-trade"), Some("true"));
        assert_eq!(table.cell_text(3, 0), None);
    }

    #[test]
    fn test_hidden_marker() {
        let mut table = two_column_table();
        table
            .add_row(DataRow::new(vec![
                DataCell::text("a"),
                DataCell::numeric("1", 1.0),
            ]))
            .unwrap();
        assert_eq!(table.visible_row_count(), 1);

        table.set_row_hidden(0, true);
        assert!(table.is_row_hidden(0));
        assert_eq!(table.visible_row_count(), 0);
        assert!(table.debug_dump().contains("(hidden)"));

        // out of range is a no-op
        table.set_row_hidden(9, true);
        assert!(!table.is_row_hidden(9));
    }

    #[test]
    fn test_sort_method_merge() {
        assert_eq!(
            SortMethod::None.merge(&SortMethod::Number),
            SortMethod::Number
        );
        assert_eq!(
            SortMethod::Number.merge(&SortMethod::String),
            SortMethod::String
        );
        assert_eq!(SortMethod::Number.as_attribute(), Some("number"));
    }
}
