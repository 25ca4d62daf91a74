use crate::data::table_surface::TableSurface;
use crate::filter::state::ALL_VALUE;
use serde::{Deserialize, Serialize};

/// One dropdown entry; value and label are the raw categorical value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// The universal "all" option
    pub fn all(label: impl Into<String>) -> Self {
        Self {
            value: ALL_VALUE.to_string(),
            label: label.into(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.value == ALL_VALUE
    }
}

/// "All" followed by the sorted distinct trimmed values of `column`
pub fn option_set<S: TableSurface + ?Sized>(
    surface: &S,
    column: usize,
    all_label: &str,
) -> Vec<SelectOption> {
    std::iter::once(SelectOption::all(all_label))
        .chain(
            surface
                .distinct_column_values(column)
                .into_iter()
                .map(SelectOption::new),
        )
        .collect()
}
