//! Filter input controls
//!
//! [`ControlPanel`] is the seam between the controller and whatever hosts the
//! inputs. [`FilterControls`] is the in-memory host used by the CLI, the page
//! renderer and the tests.

use crate::filter::layout::FilterLayout;
use crate::filter::options::SelectOption;
use crate::filter::state::{FilterState, ALL_VALUE};
use std::collections::BTreeMap;

/// The value held by a single control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Select {
        value: String,
        options: Vec<SelectOption>,
    },
    Input(String),
    Checkbox(bool),
}

impl ControlValue {
    fn reset(&mut self) {
        match self {
            ControlValue::Select { value, .. } => *value = ALL_VALUE.to_string(),
            ControlValue::Input(text) => text.clear(),
            ControlValue::Checkbox(checked) => *checked = false,
        }
    }
}

/// Read and write access to filter controls by element id
///
/// Setters return false when the id does not name a control of that kind.
pub trait ControlPanel {
    fn select_value(&self, id: &str) -> Option<&str>;
    fn input_text(&self, id: &str) -> Option<&str>;
    fn is_checked(&self, id: &str) -> Option<bool>;

    fn set_select_value(&mut self, id: &str, value: &str) -> bool;
    fn set_input_text(&mut self, id: &str, text: &str) -> bool;
    fn set_checked(&mut self, id: &str, checked: bool) -> bool;

    /// Replace the options of a select control
    fn set_options(&mut self, id: &str, options: Vec<SelectOption>) -> bool;
    fn options(&self, id: &str) -> &[SelectOption];

    /// Restore every control to its default value
    fn reset_all(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterControls {
    controls: BTreeMap<String, ControlValue>,
}

impl FilterControls {
    /// Register every control the layout wires up, at its default value
    pub fn for_layout(layout: &FilterLayout) -> Self {
        let mut controls = BTreeMap::new();

        for filter in &layout.categorical {
            controls.insert(
                filter.control_id.clone(),
                ControlValue::Select {
                    value: ALL_VALUE.to_string(),
                    options: vec![SelectOption::all(&layout.all_label)],
                },
            );
        }
        for filter in &layout.thresholds {
            controls.insert(filter.control_id.clone(), ControlValue::Input(String::new()));
        }
        if let Some(toggle) = &layout.toggle {
            controls.insert(toggle.control_id.clone(), ControlValue::Checkbox(false));
        }

        Self { controls }
    }

    pub fn get(&self, id: &str) -> Option<&ControlValue> {
        self.controls.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    /// Snapshot the controls a layout wires up into a filter state value
    pub fn read_state(&self, layout: &FilterLayout) -> FilterState {
        read_state(self, layout)
    }
}

/// Read the current filter state out of any control panel
pub fn read_state<C: ControlPanel + ?Sized>(controls: &C, layout: &FilterLayout) -> FilterState {
    let mut state = FilterState::new();

    for filter in &layout.categorical {
        if let Some(value) = controls.select_value(&filter.control_id) {
            state.set_selection(filter.control_id.clone(), value);
        }
    }
    for filter in &layout.thresholds {
        if let Some(text) = controls.input_text(&filter.control_id) {
            state.set_threshold(filter.control_id.clone(), text);
        }
    }
    if let Some(toggle) = &layout.toggle {
        if let Some(checked) = controls.is_checked(&toggle.control_id) {
            state.set_toggle(toggle.control_id.clone(), checked);
        }
    }

    state
}

impl ControlPanel for FilterControls {
    fn select_value(&self, id: &str) -> Option<&str> {
        match self.controls.get(id)? {
            ControlValue::Select { value, .. } => Some(value),
            _ => None,
        }
    }

    fn input_text(&self, id: &str) -> Option<&str> {
        match self.controls.get(id)? {
            ControlValue::Input(text) => Some(text),
            _ => None,
        }
    }

    fn is_checked(&self, id: &str) -> Option<bool> {
        match self.controls.get(id)? {
            ControlValue::Checkbox(checked) => Some(*checked),
            _ => None,
        }
    }

    fn set_select_value(&mut self, id: &str, new_value: &str) -> bool {
        match self.controls.get_mut(id) {
            Some(ControlValue::Select { value, .. }) => {
                *value = new_value.to_string();
                true
            }
            _ => false,
        }
    }

    fn set_input_text(&mut self, id: &str, new_text: &str) -> bool {
        match self.controls.get_mut(id) {
            Some(ControlValue::Input(text)) => {
                *text = new_text.to_string();
                true
            }
            _ => false,
        }
    }

    fn set_checked(&mut self, id: &str, new_checked: bool) -> bool {
        match self.controls.get_mut(id) {
            Some(ControlValue::Checkbox(checked)) => {
                *checked = new_checked;
                true
            }
            _ => false,
        }
    }

    fn set_options(&mut self, id: &str, new_options: Vec<SelectOption>) -> bool {
        match self.controls.get_mut(id) {
            Some(ControlValue::Select { options, .. }) => {
                *options = new_options;
                true
            }
            _ => false,
        }
    }

    fn options(&self, id: &str) -> &[SelectOption] {
        match self.controls.get(id) {
            Some(ControlValue::Select { options, .. }) => options,
            _ => &[],
        }
    }

    fn reset_all(&mut self) {
        for control in self.controls.values_mut() {
            control.reset();
        }
    }
}
