//! Data layer for the listing tables
//!
//! This module provides the table model the filters operate on, the trait
//! that separates filtering from storage, and the loaders that build tables
//! from listing files.

pub mod data_view;
pub mod datatable;
pub mod listings;
pub mod loaders;
pub mod table_surface;
