//! Event dispatcher binding one table and its controls to a controller

use crate::data::datatable::DataTable;
use crate::data::table_surface::TableSurface;
use crate::filter::controller::{FilterController, FilterSummary};
use crate::filter::controls::{ControlPanel, FilterControls};
use crate::filter::layout::FilterLayout;
use crate::state::events::FilterEvent;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Owns a listing table and its controls and routes page events to the
/// controller. Every handler runs to completion before the next event.
#[derive(Debug)]
pub struct FilterSession<S = DataTable, C = FilterControls> {
    controller: FilterController,
    table: S,
    controls: C,

    /// Event history for debugging
    event_history: VecDeque<FilterEvent>,

    /// Maximum event history size
    max_history: usize,
}

impl FilterSession<DataTable, FilterControls> {
    pub fn new(layout: FilterLayout, table: DataTable) -> Self {
        let controls = FilterControls::for_layout(&layout);
        Self::with_parts(layout, table, controls)
    }
}

impl<S: TableSurface, C: ControlPanel> FilterSession<S, C> {
    pub fn with_parts(layout: FilterLayout, table: S, controls: C) -> Self {
        Self {
            controller: FilterController::new(layout),
            table,
            controls,
            event_history: VecDeque::new(),
            max_history: 100,
        }
    }

    pub fn table(&self) -> &S {
        &self.table
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn controller(&self) -> &FilterController {
        &self.controller
    }

    pub fn into_table(self) -> S {
        self.table
    }

    pub fn event_history(&self) -> impl Iterator<Item = &FilterEvent> {
        self.event_history.iter()
    }

    /// Handle one event. Returns the filter summary when rows were
    /// re-evaluated or reset, None when nothing about visibility changed.
    pub fn dispatch(&mut self, event: FilterEvent) -> Option<FilterSummary> {
        debug!("FilterSession: Dispatching {:?}", event);
        self.record(event.clone());

        match event {
            FilterEvent::Load => {
                self.controller
                    .populate_filters(&self.table, &mut self.controls);
                None
            }
            FilterEvent::SelectChanged { control, value } => {
                if !self.controls.set_select_value(&control, &value) {
                    warn!("FilterSession: Ignoring change on unknown select '{}'", control);
                    return None;
                }
                Some(self.apply())
            }
            FilterEvent::InputChanged { control, text } => {
                if !self.controls.set_input_text(&control, &text) {
                    warn!("FilterSession: Ignoring input on unknown control '{}'", control);
                    return None;
                }
                Some(self.apply())
            }
            FilterEvent::ToggleChanged { control, checked } => {
                if !self.controls.set_checked(&control, checked) {
                    warn!("FilterSession: Ignoring toggle on unknown checkbox '{}'", control);
                    return None;
                }
                Some(self.apply())
            }
            FilterEvent::ResetClicked => Some(
                self.controller
                    .reset_filters(&mut self.table, &mut self.controls),
            ),
            FilterEvent::ValueTradesClicked => Some(
                self.controller
                    .show_value_trades(&mut self.table, &mut self.controls),
            ),
        }
    }

    fn apply(&mut self) -> FilterSummary {
        self.controller.apply_filters(&mut self.table, &self.controls)
    }

    fn record(&mut self, event: FilterEvent) {
        if self.event_history.len() >= self.max_history {
            self.event_history.pop_front();
        }
        self.event_history.push_back(event);
    }
}
