use anyhow::Result;
use card_filter::config::config::{Config, TradeConfig};
use card_filter::data::loaders::{load_nice_price_json, load_tradable_json};
use card_filter::data::table_surface::TableSurface;
use card_filter::filter::controls::ControlPanel;
use card_filter::filter::layout::{
    FilterLayout, MIN_DIFF_FILTER, MIN_PRICE_FILTER, RARITY_FILTER, VALUE_TRADE_FILTER,
    VENDOR_FILTER,
};
use card_filter::html::render_page;
use card_filter::state::{FilterEvent, FilterSession};
use std::io::Write;
use tempfile::NamedTempFile;

const TRADABLE_JSON: &str = r#"[
  {"name": "Lightning Bolt", "set": "M10", "trade_in_price": 30.0, "mcm_price": 12.0,
   "vendor_requested": 8, "tradable_amount": 2, "color": "Red", "rarity": "Common"},
  {"name": "Thoughtseize", "set": "THS", "foil": true, "trade_in_price": 120.0, "mcm_price": 110.0,
   "vendor_requested": 2, "tradable_amount": 1, "color": "Black", "rarity": "Rare"},
  {"name": "Sheoldred", "set": "DMU", "trade_in_price": 400.0, "mcm_price": 250.0,
   "vendor_requested": 1, "tradable_amount": 1, "color": "Black", "rarity": "Mythic"}
]"#;

const NICE_PRICE_JSON: &str = r#"[
  {"name": "Opt", "vendor_price": 2.0, "mcm_price": 4.0, "price_difference": 2.0, "vendor": "Dragonslair"},
  {"name": "Ponder", "foil": true, "vendor_price": 5.0, "mcm_price": 9.5, "price_difference": 4.5, "vendor": "Alphaspel"},
  {"name": "Brainstorm", "vendor_price": 3.0, "mcm_price": 4.0, "price_difference": 1.0, "vendor": "Dragonslair"}
]"#;

fn write_temp(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn tradable_session() -> Result<FilterSession> {
    let file = write_temp(TRADABLE_JSON)?;
    let table = load_tradable_json(file.path(), &TradeConfig::default())?;
    let mut session = FilterSession::new(FilterLayout::tradable_cards(), table);
    session.dispatch(FilterEvent::Load);
    Ok(session)
}

fn visible_rarities(session: &FilterSession) -> Vec<String> {
    let table = session.table();
    (0..table.row_count())
        .filter(|&row| !table.is_row_hidden(row))
        .filter_map(|row| table.cell_text(row, 7).map(str::to_string))
        .collect()
}

#[test]
fn load_populates_dropdowns() -> Result<()> {
    let session = tradable_session()?;
    let rarities: Vec<&str> = session
        .controls()
        .options(RARITY_FILTER)
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(rarities, vec!["all", "Common", "Mythic", "Rare"]);
    assert_eq!(session.table().hidden_row_count(), 0);
    Ok(())
}

#[test]
fn value_trade_marker_follows_threshold() -> Result<()> {
    let session = tradable_session()?;
    let table = session.table();
    // 150% and 60% above market are value trades, 9% is not
    assert!(table.row_flag(0, "value-trade"));
    assert!(!table.row_flag(1, "value-trade"));
    assert!(table.row_flag(2, "value-trade"));
    Ok(())
}

#[test]
fn input_events_refilter_rows() -> Result<()> {
    let mut session = tradable_session()?;

    let summary = session
        .dispatch(FilterEvent::input(MIN_PRICE_FILTER, "100"))
        .expect("input triggers a filter pass");
    assert_eq!(summary.visible, 2);
    assert_eq!(visible_rarities(&session), vec!["Rare", "Mythic"]);

    session.dispatch(FilterEvent::input(MIN_DIFF_FILTER, "50"));
    assert_eq!(visible_rarities(&session), vec!["Mythic"]);

    // clearing an input lifts the bound again
    session.dispatch(FilterEvent::input(MIN_DIFF_FILTER, ""));
    assert_eq!(visible_rarities(&session), vec!["Rare", "Mythic"]);
    Ok(())
}

#[test]
fn value_trades_button_checks_toggle() -> Result<()> {
    let mut session = tradable_session()?;

    let summary = session
        .dispatch(FilterEvent::ValueTradesClicked)
        .expect("button triggers a filter pass");

    assert_eq!(summary.visible, 2);
    assert_eq!(session.controls().is_checked(VALUE_TRADE_FILTER), Some(true));
    assert_eq!(visible_rarities(&session), vec!["Common", "Mythic"]);

    session.dispatch(FilterEvent::toggle(VALUE_TRADE_FILTER, false));
    assert_eq!(visible_rarities(&session).len(), 3);
    Ok(())
}

#[test]
fn reset_event_shows_all_rows() -> Result<()> {
    let mut session = tradable_session()?;
    session.dispatch(FilterEvent::select(RARITY_FILTER, "Rare"));
    session.dispatch(FilterEvent::ValueTradesClicked);
    assert!(visible_rarities(&session).is_empty());

    let summary = session.dispatch(FilterEvent::ResetClicked).unwrap();
    assert_eq!(summary.visible, 3);
    assert_eq!(session.controls().select_value(RARITY_FILTER), Some("all"));
    assert_eq!(session.controls().is_checked(VALUE_TRADE_FILTER), Some(false));
    assert_eq!(session.event_history().count(), 4);
    Ok(())
}

#[test]
fn nice_price_vendor_flow_and_page() -> Result<()> {
    let file = write_temp(NICE_PRICE_JSON)?;
    let table = load_nice_price_json(file.path(), "SEK")?;
    let layout = FilterLayout::nice_price();
    let mut session = FilterSession::new(layout.clone(), table);
    session.dispatch(FilterEvent::Load);

    let vendors: Vec<&str> = session
        .controls()
        .options(VENDOR_FILTER)
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(vendors, vec!["All", "Alphaspel", "Dragonslair"]);

    let summary = session
        .dispatch(FilterEvent::select(VENDOR_FILTER, "Dragonslair"))
        .unwrap();
    assert_eq!(summary.visible, 2);
    assert_eq!(session.table().cell_text(1, 1), Some("Ponder (foil)"));
    assert!(session.table().is_row_hidden(1));

    // rarity is not wired up for this layout
    assert_eq!(session.dispatch(FilterEvent::select(RARITY_FILTER, "Rare")), None);

    let page = render_page(
        &layout,
        session.table(),
        session.controls(),
        &Config::default(),
        "2024-05-01",
    );
    assert!(page.contains(r#"<option value="Dragonslair" selected>Dragonslair</option>"#));
    assert_eq!(page.matches(r#"<tr class="hidden">"#).count(), 1);
    assert!(page.contains(r#"<td data-sort="4.5">4.50 SEK</td>"#));
    Ok(())
}
