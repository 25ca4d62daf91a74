use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Control value of the universal "match everything" option
pub const ALL_VALUE: &str = "all";

/// A categorical dropdown selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Read a select control value; the sentinel maps to [`Selection::All`]
    pub fn from_control_value(value: &str) -> Self {
        if value == ALL_VALUE {
            Selection::All
        } else {
            Selection::Value(value.to_string())
        }
    }

    pub fn control_value(&self) -> &str {
        match self {
            Selection::All => ALL_VALUE,
            Selection::Value(v) => v,
        }
    }

    /// Whether a (trimmed) cell value passes this selection
    pub fn matches(&self, cell: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => cell.map(str::trim) == Some(v.as_str()),
        }
    }
}

/// Snapshot of every filter control, read before each evaluation
///
/// Controls that are absent read as their defaults: "all" for selections,
/// zero for thresholds and off for toggles. `FilterState::default()` is
/// therefore the fully reset state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    selections: BTreeMap<String, Selection>,
    /// Raw threshold input text as typed
    thresholds: BTreeMap<String, String>,
    toggles: BTreeMap<String, bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, control: impl Into<String>, value: &str) -> Self {
        self.set_selection(control, value);
        self
    }

    pub fn with_threshold(mut self, control: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_threshold(control, text);
        self
    }

    pub fn with_toggle(mut self, control: impl Into<String>, on: bool) -> Self {
        self.set_toggle(control, on);
        self
    }

    pub fn set_selection(&mut self, control: impl Into<String>, value: &str) {
        self.selections
            .insert(control.into(), Selection::from_control_value(value));
    }

    pub fn set_threshold(&mut self, control: impl Into<String>, text: impl Into<String>) {
        self.thresholds.insert(control.into(), text.into());
    }

    pub fn set_toggle(&mut self, control: impl Into<String>, on: bool) {
        self.toggles.insert(control.into(), on);
    }

    pub fn selection(&self, control: &str) -> Selection {
        self.selections.get(control).cloned().unwrap_or_default()
    }

    /// Numeric bound of a threshold control; malformed or empty input is zero
    pub fn threshold(&self, control: &str) -> f64 {
        self.thresholds
            .get(control)
            .map(|text| parse_numeric_input(text))
            .unwrap_or(0.0)
    }

    pub fn threshold_text(&self, control: &str) -> &str {
        self.thresholds.get(control).map(String::as_str).unwrap_or("")
    }

    pub fn toggle(&self, control: &str) -> bool {
        self.toggles.get(control).copied().unwrap_or(false)
    }
}

fn number_prefix() -> &'static Regex {
    static NUMBER_PREFIX: OnceLock<Regex> = OnceLock::new();
    NUMBER_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("number prefix pattern is valid")
    })
}

/// The longest leading decimal number of `text`, ignoring leading whitespace
///
/// `"12.5 SEK"` reads as 12.5, `"1e3x"` as 1000, `"abc"` as None.
pub fn leading_number(text: &str) -> Option<f64> {
    let m = number_prefix().find(text.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// Read a numeric filter input; anything that is not a number is zero
pub fn parse_numeric_input(text: &str) -> f64 {
    leading_number(text)
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}
