use tracing::{debug, info};

use crate::data::table_surface::TableSurface;
use crate::filter::controls::{read_state, ControlPanel};
use crate::filter::layout::FilterLayout;
use crate::filter::options::option_set;
use crate::filter::predicate::{predicates_for, row_matches};
use crate::filter::state::FilterState;

/// Row counts after a filter pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSummary {
    pub visible: usize,
    pub hidden: usize,
}

impl FilterSummary {
    pub fn total(&self) -> usize {
        self.visible + self.hidden
    }
}

/// Drives option population, filtering and reset for one layout
#[derive(Debug, Clone)]
pub struct FilterController {
    layout: FilterLayout,
}

impl FilterController {
    pub fn new(layout: FilterLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &FilterLayout {
        &self.layout
    }

    /// Fill every categorical dropdown with "All" plus the distinct values
    /// found in its column. Calling it again on an unchanged table yields the
    /// same options.
    pub fn populate_filters<S, C>(&self, table: &S, controls: &mut C)
    where
        S: TableSurface + ?Sized,
        C: ControlPanel + ?Sized,
    {
        for filter in &self.layout.categorical {
            let options = option_set(table, filter.column, &self.layout.all_label);
            debug!(
                "Populating {} with {} options from column {}",
                filter.control_id,
                options.len(),
                filter.column
            );
            controls.set_options(&filter.control_id, options);
        }
    }

    /// Read the controls and re-evaluate every row
    pub fn apply_filters<S, C>(&self, table: &mut S, controls: &C) -> FilterSummary
    where
        S: TableSurface + ?Sized,
        C: ControlPanel + ?Sized,
    {
        let state = read_state(controls, &self.layout);
        self.apply_state(table, &state)
    }

    /// Mark rows failing any predicate hidden and all others visible,
    /// replacing whatever visibility the rows had before
    pub fn apply_state<S>(&self, table: &mut S, state: &FilterState) -> FilterSummary
    where
        S: TableSurface + ?Sized,
    {
        let predicates = predicates_for(&self.layout, state);
        debug!("Applying {} predicates: {:?}", predicates.len(), predicates);

        let mut summary = FilterSummary::default();
        for row in 0..table.row_count() {
            let visible = row_matches(&predicates, table, row);
            table.set_row_hidden(row, !visible);
            if visible {
                summary.visible += 1;
            } else {
                summary.hidden += 1;
            }
        }

        info!(
            "Filtered {} rows: {} visible, {} hidden",
            summary.total(),
            summary.visible,
            summary.hidden
        );
        summary
    }

    /// Put every control back to its default and show every row
    pub fn reset_filters<S, C>(&self, table: &mut S, controls: &mut C) -> FilterSummary
    where
        S: TableSurface + ?Sized,
        C: ControlPanel + ?Sized,
    {
        controls.reset_all();
        table.show_all_rows();
        info!("Filters reset, {} rows visible", table.row_count());
        FilterSummary {
            visible: table.row_count(),
            hidden: 0,
        }
    }

    /// Check the value-trade toggle and filter, as the page button does
    pub fn show_value_trades<S, C>(&self, table: &mut S, controls: &mut C) -> FilterSummary
    where
        S: TableSurface + ?Sized,
        C: ControlPanel + ?Sized,
    {
        if let Some(toggle) = &self.layout.toggle {
            controls.set_checked(&toggle.control_id, true);
        }
        self.apply_filters(table, controls)
    }
}
