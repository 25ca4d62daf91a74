use card_filter::data::data_view::DataView;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

/// Print the rows of a view as a terminal table
pub fn display_view(view: &DataView) {
    if view.row_count() == 0 {
        println!("No listings match the current filters.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = view
        .column_names()
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(headers);

    for row in view.get_rows() {
        table.add_row(row);
    }

    println!("{table}");
}
