//! HTML rendering of listing pages

pub mod escape;
pub mod page;
pub mod script;

pub use escape::escape_html;
pub use page::{render_options, render_page, render_table_body};
pub use script::filter_script;
