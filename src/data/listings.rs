//! Card listing records and the page tables built from them

use crate::config::config::TradeConfig;
use crate::data::datatable::{DataCell, DataRow, DataTable};
use crate::filter::layout::{FilterLayout, VALUE_TRADE_ATTRIBUTE};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/en/a/aa/Magic_the_gathering-card_back.jpg";

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}

/// A card of the personal collection that a vendor will take in trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradableListing {
    pub name: String,
    pub set: String,
    #[serde(default)]
    pub foil: bool,
    /// Price the vendor pays in trade, in the page currency
    pub trade_in_price: f64,
    pub mcm_price: f64,
    #[serde(default)]
    pub vendor_requested: u32,
    #[serde(default)]
    pub tradable_amount: u32,
    pub color: String,
    pub rarity: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

impl TradableListing {
    /// How much more the vendor pays than the market, in percent
    ///
    /// Zero unless the market price is positive and the trade-in price
    /// exceeds it.
    pub fn percentual_difference(&self) -> f64 {
        if self.mcm_price > 0.0 && self.trade_in_price > self.mcm_price {
            (self.trade_in_price - self.mcm_price) / self.mcm_price * 100.0
        } else {
            0.0
        }
    }

    pub fn is_value_trade(&self, threshold: f64) -> bool {
        self.percentual_difference() >= threshold
    }
}

/// A vendor card priced below the market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicePriceListing {
    pub name: String,
    #[serde(default)]
    pub foil: bool,
    pub vendor_price: f64,
    pub mcm_price: f64,
    pub price_difference: f64,
    pub vendor: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

/// Round to the two decimals the page shows
fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn money_cell(value: f64, currency: &str) -> DataCell {
    DataCell::numeric(format!("{value:.2} {currency}"), cents(value))
}

/// Tradable cards table: nine columns and the value-trade row marker
pub fn tradable_table(listings: &[TradableListing], trade: &TradeConfig) -> DataTable {
    let layout = FilterLayout::tradable_cards();
    let mut table = DataTable::with_columns("tradable_cards", layout.columns);
    let currency = trade.currency.as_str();

    for listing in listings {
        let foil_text = if listing.foil { " (Foil)" } else { "" };
        let diff = listing.percentual_difference();
        let value_trade = diff >= trade.value_trade_threshold;

        let row = DataRow::new(vec![
            DataCell::image(&listing.image_url),
            DataCell::text(format!("{}{}/{}", listing.name, foil_text, listing.set)),
            money_cell(listing.trade_in_price, currency),
            money_cell(listing.mcm_price, currency),
            DataCell::numeric(
                listing.vendor_requested.to_string(),
                f64::from(listing.vendor_requested),
            ),
            DataCell::numeric(
                listing.tradable_amount.to_string(),
                f64::from(listing.tradable_amount),
            ),
            DataCell::text(&listing.color),
            DataCell::text(&listing.rarity),
            DataCell::numeric(format!("{diff:.2}%"), cents(diff)),
        ])
        .with_attribute(VALUE_TRADE_ATTRIBUTE, value_trade.to_string());

        // Row width always matches the layout
        table.rows.push(row);
    }

    debug!(
        "Built tradable table with {} rows (threshold {}%)",
        table.row_count(),
        trade.value_trade_threshold
    );
    table
}

/// Nice price table: six columns, vendor last
pub fn nice_price_table(listings: &[NicePriceListing], currency: &str) -> DataTable {
    let layout = FilterLayout::nice_price();
    let mut table = DataTable::with_columns("nice_price_cards", layout.columns);

    for listing in listings {
        let name = if listing.foil {
            format!("{} (foil)", listing.name)
        } else {
            listing.name.clone()
        };

        table.rows.push(DataRow::new(vec![
            DataCell::image(&listing.image_url),
            DataCell::text(name),
            money_cell(listing.vendor_price, currency),
            money_cell(listing.mcm_price, currency),
            money_cell(listing.price_difference, currency),
            DataCell::text(&listing.vendor),
        ]));
    }

    debug!("Built nice price table with {} rows", table.row_count());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_surface::TableSurface;
    use crate::filter::layout::{nice_price_columns, tradable_columns};

    fn listing(trade_in: f64, mcm: f64) -> TradableListing {
        TradableListing {
            name: "Ragavan, Nimble Pilferer".to_string(),
            set: "MH2".to_string(),
            foil: true,
            trade_in_price: trade_in,
            mcm_price: mcm,
            vendor_requested: 4,
            tradable_amount: 1,
            color: "Red".to_string(),
            rarity: "Mythic".to_string(),
            image_url: default_image_url(),
        }
    }

    #[test]
    fn test_percentual_difference() {
        assert_eq!(listing(150.0, 100.0).percentual_difference(), 50.0);
        assert_eq!(listing(90.0, 100.0).percentual_difference(), 0.0);
        assert_eq!(listing(10.0, 0.0).percentual_difference(), 0.0);
        assert!(listing(150.0, 100.0).is_value_trade(50.0));
        assert!(!listing(149.0, 100.0).is_value_trade(50.0));
    }

    #[test]
    fn test_tradable_row_layout() {
        let table = tradable_table(&[listing(150.0, 100.0)], &TradeConfig::default());

        assert_eq!(table.column_count(), 9);
        assert_eq!(
            table.cell_text(0, tradable_columns::NAME_SET),
            Some("Ragavan, Nimble Pilferer (Foil)/MH2")
        );
        assert_eq!(
            table.cell_text(0, tradable_columns::TRADE_IN_PRICE),
            Some("150.00 SEK")
        );
        assert_eq!(
            table.cell_sort_value(0, tradable_columns::PERCENT_DIFF),
            Some(50.0)
        );
        assert_eq!(table.cell_text(0, tradable_columns::PERCENT_DIFF), Some("50.00%"));
        assert_eq!(table.cell_text(0, tradable_columns::RARITY), Some("Mythic"));
        assert!(table.row_flag(0, VALUE_TRADE_ATTRIBUTE));
    }

    #[test]
    fn test_sort_values_rounded_to_cents() {
        let table = tradable_table(&[listing(10.005, 3.333)], &TradeConfig::default());
        assert_eq!(
            table.cell_sort_value(0, tradable_columns::MCM_PRICE),
            Some(3.33)
        );
    }

    #[test]
    fn test_nice_price_row_layout() {
        let listings = vec![NicePriceListing {
            name: "Opt".to_string(),
            foil: false,
            vendor_price: 2.0,
            mcm_price: 5.5,
            price_difference: 3.5,
            vendor: "Dragonslair".to_string(),
            image_url: default_image_url(),
        }];
        let table = nice_price_table(&listings, "SEK");

        assert_eq!(table.column_count(), 6);
        assert_eq!(
            table.cell_text(0, nice_price_columns::VENDOR),
            Some("Dragonslair")
        );
        assert_eq!(
            table.cell_sort_value(0, nice_price_columns::PRICE_DIFFERENCE),
            Some(3.5)
        );
        assert_eq!(table.row_attribute(0, VALUE_TRADE_ATTRIBUTE), None);
    }
}
