use crate::config::config::TradeConfig;
use crate::data::datatable::{DataCell, DataColumn, DataRow, DataTable, SortMethod};
use crate::data::listings::{nice_price_table, tradable_table, NicePriceListing, TradableListing};
use crate::filter::layout::VALUE_TRADE_ATTRIBUTE;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Headers of a CSV column that carries the value-trade marker
const VALUE_TRADE_HEADERS: [&str; 3] = ["value_trade", "value-trade", "valuetrade"];

fn load_json_records<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse listings in {:?}", path.as_ref()))
}

fn tag_source(table: &mut DataTable, source_type: &str, path: &Path) {
    table
        .metadata
        .insert("source_type".to_string(), source_type.to_string());
    table
        .metadata
        .insert("source_path".to_string(), path.display().to_string());
}

/// Load tradable card listings (a JSON array) into a tradable cards table
pub fn load_tradable_json<P: AsRef<Path>>(path: P, trade: &TradeConfig) -> Result<DataTable> {
    let listings: Vec<TradableListing> = load_json_records(&path)?;
    let mut table = tradable_table(&listings, trade);
    tag_source(&mut table, "json", path.as_ref());

    info!(
        "Loaded {} tradable listings from {:?}",
        table.row_count(),
        path.as_ref()
    );
    Ok(table)
}

/// Load nice price listings (a JSON array) into a nice price table
pub fn load_nice_price_json<P: AsRef<Path>>(path: P, currency: &str) -> Result<DataTable> {
    let listings: Vec<NicePriceListing> = load_json_records(&path)?;
    let mut table = nice_price_table(&listings, currency);
    tag_source(&mut table, "json", path.as_ref());

    info!(
        "Loaded {} nice price listings from {:?}",
        table.row_count(),
        path.as_ref()
    );
    Ok(table)
}

fn numeric_cell_pattern() -> &'static Regex {
    static NUMERIC_CELL: OnceLock<Regex> = OnceLock::new();
    NUMERIC_CELL.get_or_init(|| {
        Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)(?:\s*%|\s+[A-Z]{3})?$")
            .expect("numeric cell pattern is valid")
    })
}

/// Sort value of a CSV cell
///
/// The whole trimmed cell must be a number, optionally followed by `%` or a
/// three letter currency code: `"2.50 SEK"` and `"12%"` are numbers,
/// `"3 Red"` and `"Infinity Elemental"` are not.
fn cell_number(text: &str) -> Option<f64> {
    let caps = numeric_cell_pattern().captures(text.trim())?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Load a headed CSV file into a DataTable
///
/// Numeric cells get their number as sort value. A
/// `value_trade` column is not kept as a column; it becomes the row's
/// value-trade attribute so the remaining columns keep their positions.
pub fn load_csv_to_datatable<P: AsRef<Path>>(path: P, table_name: &str) -> Result<DataTable> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader.headers()?.clone();
    let flag_index = headers
        .iter()
        .position(|h| VALUE_TRADE_HEADERS.contains(&h.trim().to_ascii_lowercase().as_str()));

    let mut table = DataTable::new(table_name);
    tag_source(&mut table, "csv", path.as_ref());

    for (idx, header) in headers.iter().enumerate() {
        if Some(idx) != flag_index {
            table.add_column(DataColumn::new(header).with_sort_method(SortMethod::None));
        }
    }

    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV record {}", line + 1))?;

        let mut cells = Vec::with_capacity(table.column_count());
        let mut flag = None;
        for (idx, value) in record.iter().enumerate() {
            if Some(idx) == flag_index {
                flag = Some(value.trim().to_ascii_lowercase());
                continue;
            }
            cells.push(match cell_number(value) {
                Some(number) => DataCell::numeric(value, number),
                None => DataCell::text(value),
            });
        }

        let mut row = DataRow::new(cells);
        if let Some(flag) = flag {
            row = row.with_attribute(VALUE_TRADE_ATTRIBUTE, flag);
        }
        table
            .add_row(row)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("Invalid CSV record {}", line + 1))?;
    }

    infer_sort_methods(&mut table);

    info!(
        "Loaded {} rows with {} columns from {:?}",
        table.row_count(),
        table.column_count(),
        path.as_ref()
    );
    Ok(table)
}

/// A column is numeric when every non-empty cell carries a sort value
fn infer_sort_methods(table: &mut DataTable) {
    for (col_idx, column) in table.columns.iter_mut().enumerate() {
        let mut method = SortMethod::None;
        for row in &table.rows {
            let Some(cell) = row.get(col_idx) else {
                continue;
            };
            if cell.text.trim().is_empty() {
                continue;
            }
            let observed = if cell.sort_value.is_some() {
                SortMethod::Number
            } else {
                SortMethod::String
            };
            method = method.merge(&observed);
        }
        column.sort_method = if method == SortMethod::None {
            SortMethod::String
        } else {
            method
        };
    }
}
