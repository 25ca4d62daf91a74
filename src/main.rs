use anyhow::{bail, Context, Result};
use card_filter::config::config::Config;
use card_filter::data::data_view::DataView;
use card_filter::data::datatable::DataTable;
use card_filter::data::loaders::{load_csv_to_datatable, load_nice_price_json, load_tradable_json};
use card_filter::filter::layout::{
    FilterLayout, LayoutKind, COLOR_FILTER, MIN_DIFF_FILTER, MIN_PRICE_FILTER, RARITY_FILTER,
    VENDOR_FILTER,
};
use card_filter::html::render_page;
use card_filter::state::{FilterEvent, FilterSession};
use card_filter::utils::logging::init_tracing;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info};

mod table_display;

use table_display::display_view;

const USAGE: &str = "\
Usage: card-filter <listings.json|listings.csv> [options]

Options:
  --layout <tradable|nice-price>  Page layout of the listings (default: tradable)
  --rarity <value>                Only show this rarity
  --color <value>                 Only show this color
  --vendor <value>                Only show this vendor
  --min-price <number>            Minimum trade-in price
  --min-diff <number>             Minimum percent difference
  --value-trades                  Only show value trades
  --sort <column>                 Sort printed rows by column, descending
  --limit <n>                     Print at most n rows
  --html <path>                   Write the filtered page to path
  --show-log                      Print recent log entries after the run
  --init-config                   Write a commented default config file
";

const SELECT_FLAGS: [(&str, &str); 3] = [
    ("--rarity", RARITY_FILTER),
    ("--color", COLOR_FILTER),
    ("--vendor", VENDOR_FILTER),
];

const INPUT_FLAGS: [(&str, &str); 2] = [
    ("--min-price", MIN_PRICE_FILTER),
    ("--min-diff", MIN_DIFF_FILTER),
];

/// Flags that take a value; their value is never the listings file
const VALUE_FLAGS: [&str; 9] = [
    "--layout",
    "--rarity",
    "--color",
    "--vendor",
    "--min-price",
    "--min-diff",
    "--sort",
    "--limit",
    "--html",
];

/// Value following `flag`; a flag without a value is an error
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        Some(value) => bail!("{} expects a value, found '{}'", flag, value),
        None => bail!("{} expects a value", flag),
    }
}

fn data_file(args: &[String]) -> Option<&str> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            return Some(arg);
        }
    }
    None
}

fn write_default_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {:?}", parent))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("Error writing config file {:?}", path))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn load_table(path: &str, kind: LayoutKind, config: &Config) -> Result<DataTable> {
    if path.to_ascii_lowercase().ends_with(".csv") {
        return load_csv_to_datatable(path, &kind.to_string());
    }
    match kind {
        LayoutKind::Tradable => load_tradable_json(path, &config.trade),
        LayoutKind::NicePrice => load_nice_price_json(path, &config.trade.currency),
    }
}

fn main() -> Result<()> {
    let log_buffer = init_tracing("info");
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{USAGE}");
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        return write_default_config();
    }

    let Some(path) = data_file(&args) else {
        eprint!("{USAGE}");
        std::process::exit(2);
    };

    let config = Config::load()?;
    let kind: LayoutKind = flag_value(&args, "--layout")?
        .unwrap_or("tradable")
        .parse()?;
    let layout = FilterLayout::for_kind(kind).with_all_label(&config.filters.all_label);

    let table = load_table(path, kind, &config)?;
    info!("Loaded {} rows for layout {}", table.row_count(), kind);
    debug!("{}", table.debug_dump());

    let mut session = FilterSession::new(layout.clone(), table);
    session.dispatch(FilterEvent::Load);

    for (flag, control) in SELECT_FLAGS {
        if let Some(value) = flag_value(&args, flag)? {
            session.dispatch(FilterEvent::select(control, value));
        }
    }
    for (flag, control) in INPUT_FLAGS {
        if let Some(text) = flag_value(&args, flag)? {
            session.dispatch(FilterEvent::input(control, text));
        }
    }
    if args.iter().any(|a| a == "--value-trades") {
        session.dispatch(FilterEvent::ValueTradesClicked);
    }

    if let Some(out) = flag_value(&args, "--html")? {
        let date = Local::now().format(&config.page.date_format).to_string();
        let page = render_page(
            &layout,
            session.table(),
            session.controls(),
            &config,
            &date,
        );
        std::fs::write(out, page).with_context(|| format!("Failed to write page to {}", out))?;
        println!("Page written to {}", out);
    }

    let table = Arc::new(session.into_table());
    let total = table.row_count();
    let mut view = DataView::unhidden(Arc::clone(&table));
    view.hide_column_by_name("Image");

    if let Some(column) = flag_value(&args, "--sort")? {
        let index = table
            .get_column_index(column)
            .with_context(|| format!("Unknown column '{}'", column))?;
        view = view.sort_by(index, false)?;
    }
    if let Some(limit) = flag_value(&args, "--limit")? {
        let limit: usize = limit
            .parse()
            .with_context(|| format!("Invalid --limit '{}'", limit))?;
        view = view.with_limit(limit);
    }

    display_view(&view);
    println!(
        "{} of {} listings shown",
        view.visible_row_indices().len(),
        total
    );

    if args.iter().any(|a| a == "--show-log") {
        for entry in log_buffer.get_recent(50) {
            eprintln!("{}", entry.format_for_display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_value_reads_following_argument() {
        let args = args(&["card-filter", "cards.json", "--rarity", "Rare"]);
        assert_eq!(flag_value(&args, "--rarity").unwrap(), Some("Rare"));
        assert_eq!(flag_value(&args, "--color").unwrap(), None);
    }

    #[test]
    fn test_flag_followed_by_flag_is_rejected() {
        let args = args(&["card-filter", "cards.json", "--rarity", "--color", "Red"]);
        let err = flag_value(&args, "--rarity").unwrap_err();
        assert!(err.to_string().contains("--rarity expects a value"));
        assert_eq!(flag_value(&args, "--color").unwrap(), Some("Red"));
    }

    #[test]
    fn test_trailing_flag_without_value_is_rejected() {
        let args = args(&["card-filter", "cards.json", "--min-price"]);
        assert!(flag_value(&args, "--min-price").is_err());
    }

    #[test]
    fn test_negative_number_is_a_value() {
        let args = args(&["card-filter", "--min-diff", "-5", "cards.json"]);
        assert_eq!(flag_value(&args, "--min-diff").unwrap(), Some("-5"));
        assert_eq!(data_file(&args), Some("cards.json"));
    }
}
