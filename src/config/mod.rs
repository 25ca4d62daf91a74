//! Configuration module
//!
//! Settings for listing tables, page rendering and filter controls.

pub mod config;
