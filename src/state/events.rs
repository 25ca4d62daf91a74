//! UI events that drive the filter controller

/// Events a listing page raises
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// Page finished loading, dropdowns need their options
    Load,

    /// A dropdown changed
    SelectChanged { control: String, value: String },

    /// A numeric input was edited
    InputChanged { control: String, text: String },

    /// A checkbox changed
    ToggleChanged { control: String, checked: bool },

    /// "Reset Filters" button
    ResetClicked,

    /// "Show Value Trades" button
    ValueTradesClicked,
}

impl FilterEvent {
    pub fn select(control: impl Into<String>, value: impl Into<String>) -> Self {
        FilterEvent::SelectChanged {
            control: control.into(),
            value: value.into(),
        }
    }

    pub fn input(control: impl Into<String>, text: impl Into<String>) -> Self {
        FilterEvent::InputChanged {
            control: control.into(),
            text: text.into(),
        }
    }

    pub fn toggle(control: impl Into<String>, checked: bool) -> Self {
        FilterEvent::ToggleChanged {
            control: control.into(),
            checked,
        }
    }
}
