//! Filter engine for the listing tables
//!
//! Option population, the row predicate conjunction, reset and the
//! value-trade shortcut, all expressed over [`TableSurface`] and
//! [`ControlPanel`] so they run without a rendering surface.
//!
//! [`TableSurface`]: crate::data::table_surface::TableSurface
//! [`ControlPanel`]: controls::ControlPanel

pub mod controller;
pub mod controls;
pub mod layout;
pub mod options;
pub mod predicate;
pub mod state;
