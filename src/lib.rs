//! Filtering for trading-card listing tables
//!
//! Builds listing tables, fills the filter dropdowns from what the table
//! holds, hides rows that fail the selected filters and renders the result
//! as a sortable HTML page.

pub mod config;
pub mod data;
pub mod filter;
pub mod html;
pub mod state;
pub mod utils;
