//! Wiring of filter controls to table columns for each listing page

use crate::data::datatable::{DataColumn, SortMethod};
use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

pub const TABLE_ID: &str = "card-table";

pub const RARITY_FILTER: &str = "rarityFilter";
pub const COLOR_FILTER: &str = "colorFilter";
pub const VENDOR_FILTER: &str = "vendorFilter";
pub const MIN_PRICE_FILTER: &str = "minPriceFilter";
pub const MIN_DIFF_FILTER: &str = "minDiffFilter";
pub const VALUE_TRADE_FILTER: &str = "valueTradeFilter";

/// Row attribute marking a value trade
pub const VALUE_TRADE_ATTRIBUTE: &str = "value-trade";

/// Column positions of the tradable cards page
pub mod tradable_columns {
    pub const IMAGE: usize = 0;
    pub const NAME_SET: usize = 1;
    pub const TRADE_IN_PRICE: usize = 2;
    pub const MCM_PRICE: usize = 3;
    pub const VENDOR_REQUESTED: usize = 4;
    pub const TRADABLE_AMOUNT: usize = 5;
    pub const COLOR: usize = 6;
    pub const RARITY: usize = 7;
    pub const PERCENT_DIFF: usize = 8;
}

/// Column positions of the nice price page
pub mod nice_price_columns {
    pub const IMAGE: usize = 0;
    pub const NAME: usize = 1;
    pub const VENDOR_PRICE: usize = 2;
    pub const MCM_PRICE: usize = 3;
    pub const PRICE_DIFFERENCE: usize = 4;
    pub const VENDOR: usize = 5;
}

/// Which page variant a layout belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Tradable,
    NicePrice,
}

impl FromStr for LayoutKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tradable" | "tradable-cards" => Ok(LayoutKind::Tradable),
            "nice-price" | "nice_price" | "nice" => Ok(LayoutKind::NicePrice),
            other => Err(anyhow!(
                "Unknown layout '{}', expected 'tradable' or 'nice-price'",
                other
            )),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Tradable => write!(f, "tradable"),
            LayoutKind::NicePrice => write!(f, "nice-price"),
        }
    }
}

/// Dropdown matched against a column's trimmed text
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalFilter {
    pub control_id: String,
    pub label: String,
    pub column: usize,
}

/// Numeric input compared against a column's sort value
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdFilter {
    pub control_id: String,
    pub label: String,
    pub column: usize,
}

/// Checkbox requiring a row attribute to be `true`
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleFilter {
    pub control_id: String,
    pub attribute: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterLayout {
    pub kind: LayoutKind,
    pub title: String,
    pub table_id: String,
    pub columns: Vec<DataColumn>,
    pub categorical: Vec<CategoricalFilter>,
    pub thresholds: Vec<ThresholdFilter>,
    pub toggle: Option<ToggleFilter>,
    /// Escape option values when rendering them as markup
    pub escape_options: bool,
    /// Label of the "all" option
    pub all_label: String,
}

impl FilterLayout {
    pub fn for_kind(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Tradable => Self::tradable_cards(),
            LayoutKind::NicePrice => Self::nice_price(),
        }
    }

    /// Rarity, color, two numeric thresholds and the value-trade toggle
    pub fn tradable_cards() -> Self {
        use self::tradable_columns::*;

        Self {
            kind: LayoutKind::Tradable,
            title: "Tradable cards".to_string(),
            table_id: TABLE_ID.to_string(),
            columns: vec![
                DataColumn::new("Image").with_sort_method(SortMethod::None),
                DataColumn::new("Name/Set"),
                DataColumn::new("Trade-in price").with_sort_method(SortMethod::Number),
                DataColumn::new("MCM price").with_sort_method(SortMethod::Number),
                DataColumn::new("Vendor requested amnt").with_sort_method(SortMethod::Number),
                DataColumn::new("Tradable cards amnt").with_sort_method(SortMethod::Number),
                DataColumn::new("Color"),
                DataColumn::new("Rarity"),
                DataColumn::new("% Diff").with_sort_method(SortMethod::Number),
            ],
            categorical: vec![
                categorical(RARITY_FILTER, "Rarity", RARITY),
                categorical(COLOR_FILTER, "Color", COLOR),
            ],
            thresholds: vec![
                threshold(MIN_PRICE_FILTER, "Min Trade-in Price", TRADE_IN_PRICE),
                threshold(MIN_DIFF_FILTER, "Min % Diff", PERCENT_DIFF),
            ],
            toggle: Some(ToggleFilter {
                control_id: VALUE_TRADE_FILTER.to_string(),
                attribute: VALUE_TRADE_ATTRIBUTE.to_string(),
            }),
            escape_options: true,
            all_label: "All".to_string(),
        }
    }

    /// A single vendor dropdown
    pub fn nice_price() -> Self {
        use self::nice_price_columns::*;

        Self {
            kind: LayoutKind::NicePrice,
            title: "MTG Cards with Price Difference".to_string(),
            table_id: TABLE_ID.to_string(),
            columns: vec![
                DataColumn::new("Image").with_sort_method(SortMethod::None),
                DataColumn::new("Name"),
                DataColumn::new("Vendor price").with_sort_method(SortMethod::Number),
                DataColumn::new("MCM price").with_sort_method(SortMethod::Number),
                DataColumn::new("Price Difference").with_sort_method(SortMethod::Number),
                DataColumn::new("Vendor"),
            ],
            categorical: vec![categorical(VENDOR_FILTER, "Vendor", VENDOR)],
            thresholds: Vec::new(),
            toggle: None,
            escape_options: false,
            all_label: "All".to_string(),
        }
    }

    pub fn with_all_label(mut self, label: impl Into<String>) -> Self {
        self.all_label = label.into();
        self
    }

    /// Every control id this layout wires up
    pub fn control_ids(&self) -> Vec<&str> {
        self.categorical
            .iter()
            .map(|c| c.control_id.as_str())
            .chain(self.thresholds.iter().map(|t| t.control_id.as_str()))
            .chain(self.toggle.iter().map(|t| t.control_id.as_str()))
            .collect()
    }
}

fn categorical(control_id: &str, label: &str, column: usize) -> CategoricalFilter {
    CategoricalFilter {
        control_id: control_id.to_string(),
        label: label.to_string(),
        column,
    }
}

fn threshold(control_id: &str, label: &str, column: usize) -> ThresholdFilter {
    ThresholdFilter {
        control_id: control_id.to_string(),
        label: label.to_string(),
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tradable_wiring() {
        let layout = FilterLayout::tradable_cards();
        assert_eq!(layout.columns.len(), 9);
        assert_eq!(layout.categorical[0].column, tradable_columns::RARITY);
        assert_eq!(layout.categorical[1].column, tradable_columns::COLOR);
        assert_eq!(layout.columns[tradable_columns::PERCENT_DIFF].name, "% Diff");
        assert_eq!(
            layout.control_ids(),
            vec![
                RARITY_FILTER,
                COLOR_FILTER,
                MIN_PRICE_FILTER,
                MIN_DIFF_FILTER,
                VALUE_TRADE_FILTER
            ]
        );
        assert!(layout.escape_options);
    }

    #[test]
    fn test_nice_price_wiring() {
        let layout = FilterLayout::nice_price();
        assert_eq!(layout.columns.len(), 6);
        assert_eq!(layout.control_ids(), vec![VENDOR_FILTER]);
        assert_eq!(layout.columns[nice_price_columns::VENDOR].name, "Vendor");
        assert!(layout.toggle.is_none());
    }

    #[test]
    fn test_layout_kind_parse() {
        assert_eq!(
            "tradable".parse::<LayoutKind>().unwrap(),
            LayoutKind::Tradable
        );
        assert_eq!(
            "Nice-Price".parse::<LayoutKind>().unwrap(),
            LayoutKind::NicePrice
        );
        assert!("vendor".parse::<LayoutKind>().is_err());
        assert_eq!(LayoutKind::NicePrice.to_string(), "nice-price");
    }
}
