use crate::data::table_surface::TableSurface;
use crate::filter::layout::FilterLayout;
use crate::filter::state::{FilterState, Selection};

/// One independent condition of the row filter conjunction
#[derive(Debug, Clone, PartialEq)]
pub enum RowPredicate {
    /// Trimmed cell text equals the selection, or the selection is "all"
    Categorical { column: usize, selection: Selection },
    /// Cell sort value is at least `bound`; rows without one fail
    MinThreshold { column: usize, bound: f64 },
    /// Row attribute must be exactly `true`
    AttributeGate { attribute: String },
}

impl RowPredicate {
    pub fn matches<S: TableSurface + ?Sized>(&self, surface: &S, row: usize) -> bool {
        match self {
            RowPredicate::Categorical { column, selection } => {
                selection.matches(surface.cell_text(row, *column))
            }
            RowPredicate::MinThreshold { column, bound } => surface
                .cell_sort_value(row, *column)
                .is_some_and(|value| value >= *bound),
            RowPredicate::AttributeGate { attribute } => surface.row_flag(row, attribute),
        }
    }
}

/// Build the conjunction a layout wires up for the given state
///
/// The value-trade gate is only part of the conjunction while its toggle is
/// on; otherwise it is vacuously true and left out.
pub fn predicates_for(layout: &FilterLayout, state: &FilterState) -> Vec<RowPredicate> {
    let mut predicates = Vec::new();

    for filter in &layout.categorical {
        predicates.push(RowPredicate::Categorical {
            column: filter.column,
            selection: state.selection(&filter.control_id),
        });
    }

    for filter in &layout.thresholds {
        predicates.push(RowPredicate::MinThreshold {
            column: filter.column,
            bound: state.threshold(&filter.control_id),
        });
    }

    if let Some(toggle) = &layout.toggle {
        if state.toggle(&toggle.control_id) {
            predicates.push(RowPredicate::AttributeGate {
                attribute: toggle.attribute.clone(),
            });
        }
    }

    predicates
}

pub fn row_matches<S: TableSurface + ?Sized>(
    predicates: &[RowPredicate],
    surface: &S,
    row: usize,
) -> bool {
    predicates.iter().all(|p| p.matches(surface, row))
}

/// Visibility decision for every row, without touching the surface
pub fn visibility<S: TableSurface + ?Sized>(
    layout: &FilterLayout,
    state: &FilterState,
    surface: &S,
) -> Vec<bool> {
    let predicates = predicates_for(layout, state);
    (0..surface.row_count())
        .map(|row| row_matches(&predicates, surface, row))
        .collect()
}
