use crate::config::config::Config;
use crate::data::datatable::{DataCell, DataRow, DataTable};
use crate::filter::controls::{ControlPanel, FilterControls};
use crate::filter::layout::FilterLayout;
use crate::filter::options::SelectOption;
use crate::html::escape::escape_html;
use crate::html::script::filter_script;
use std::fmt::Write;

const TABLESORT_SCRIPTS: &str = r#"    <script src="https://cdnjs.cloudflare.com/ajax/libs/tablesort/5.2.1/tablesort.min.js"></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/tablesort/5.2.1/sorts/tablesort.number.min.js"></script>
"#;

const STYLES: &str = r#"
        table { border-collapse: collapse; width: 70%; margin: 0 auto; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { cursor: pointer; position: sticky; top: 0; background: white; z-index: 10; }
        .card-image-container { position: relative; display: inline-block; }
        .card-image { width: 40px; height: auto; cursor: pointer; }
        .enlarged-image { display: none; position: fixed; top: 50%; left: 50%;
            transform: translate(-50%, -50%); max-width: 80vw; max-height: 80vh; z-index: 1000; }
        .card-image-container:hover .enlarged-image { display: block; }
        h1 { text-align: center; margin: 20px 0; }
        .filters { width: 70%; margin: 20px auto; padding: 10px; background: #f5f5f5; border-radius: 5px; }
        .filter-group { margin: 10px 0; display: flex; gap: 10px; align-items: center; }
        select, button { padding: 5px; border-radius: 4px; border: 1px solid #ddd; }
        button { background: #4CAF50; color: white; border: none; padding: 6px 12px; cursor: pointer; }
"#;

/// Render dropdown options, escaping values when asked to
///
/// Value and label are both written as given; `selected` marks the option
/// whose value equals `selected`.
pub fn render_options(options: &[SelectOption], escape: bool, selected: &str) -> String {
    let text = |s: &str| if escape { escape_html(s) } else { s.to_string() };

    let mut out = String::new();
    for option in options {
        let marker = if option.value == selected {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            text(&option.value),
            marker,
            text(&option.label)
        );
    }
    out
}

fn render_filter_controls(layout: &FilterLayout, controls: &FilterControls) -> String {
    let mut out = String::from("    <div class=\"filters\">\n        <div class=\"filter-group\">\n");

    for filter in &layout.categorical {
        let id = &filter.control_id;
        let selected = controls.select_value(id).unwrap_or_default();
        let _ = writeln!(
            out,
            r#"            <label for="{id}">{}:</label>
            <select id="{id}">{}</select>"#,
            escape_html(&filter.label),
            render_options(controls.options(id), layout.escape_options, selected)
        );
    }

    for filter in &layout.thresholds {
        let id = &filter.control_id;
        let value = controls.input_text(id).unwrap_or_default();
        let _ = writeln!(
            out,
            r#"            <label for="{id}">{}:</label>
            <input type="number" id="{id}" step="0.01" placeholder="0.00" value="{}">"#,
            escape_html(&filter.label),
            escape_html(value)
        );
    }

    out.push_str("            <button onclick=\"resetFilters()\">Reset Filters</button>\n");
    if layout.toggle.is_some() {
        out.push_str("            <button onclick=\"filterValueTrades()\">Show Value Trades</button>\n");
    }
    out.push_str("        </div>\n");

    if let Some(toggle) = &layout.toggle {
        let checked = if controls.is_checked(&toggle.control_id).unwrap_or(false) {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            r#"        <input type="checkbox" id="{}" class="hidden"{checked}>"#,
            toggle.control_id
        );
    }

    out.push_str("    </div>\n");
    out
}

fn render_header(table: &DataTable) -> String {
    let mut out = String::from("        <thead>\n            <tr>\n");
    for column in &table.columns {
        let attribute = match column.sort_method.as_attribute() {
            Some(method) => format!(r#" data-sort-method="{method}""#),
            None => r#" class="no-sort""#.to_string(),
        };
        let _ = writeln!(
            out,
            "                <th{attribute}>{}</th>",
            escape_html(&column.name)
        );
    }
    out.push_str("            </tr>\n        </thead>\n");
    out
}

fn render_cell(cell: &DataCell, alt: &str) -> String {
    if let Some(url) = &cell.image_url {
        let url = escape_html(url);
        let alt = escape_html(alt);
        return format!(
            r#"<td><div class="card-image-container"><img class="card-image" src="{url}" alt="{alt}"><img class="enlarged-image" src="{url}" alt="{alt}"></div></td>"#
        );
    }

    match cell.sort_value {
        Some(value) => format!(
            r#"<td data-sort="{value}">{}</td>"#,
            escape_html(&cell.text)
        ),
        None => format!("<td>{}</td>", escape_html(&cell.text)),
    }
}

fn render_row(row: &DataRow, hidden_class: &str) -> String {
    let mut attributes = String::new();
    for (name, value) in &row.attributes {
        let _ = write!(
            attributes,
            r#" data-{}="{}""#,
            escape_html(name),
            escape_html(value)
        );
    }
    if row.hidden {
        let _ = write!(attributes, r#" class="{}""#, escape_html(hidden_class));
    }

    // The name column follows the image column in every layout
    let alt = row.get(1).map(|c| c.text.as_str()).unwrap_or_default();

    let mut out = format!("            <tr{attributes}>\n");
    for cell in &row.cells {
        let _ = writeln!(out, "                {}", render_cell(cell, alt));
    }
    out.push_str("            </tr>\n");
    out
}

/// Table rows, hidden rows carrying `hidden_class`
pub fn render_table_body(table: &DataTable, hidden_class: &str) -> String {
    table
        .rows
        .iter()
        .map(|row| render_row(row, hidden_class))
        .collect()
}

/// A complete listing page: filter controls in their current state followed
/// by the table with its current visibility
pub fn render_page(
    layout: &FilterLayout,
    table: &DataTable,
    controls: &FilterControls,
    config: &Config,
    date: &str,
) -> String {
    let title = config.page.title.as_deref().unwrap_or(&layout.title);
    let title = if date.is_empty() {
        escape_html(title)
    } else {
        escape_html(&format!("{title}, {date}"))
    };
    let hidden_class = escape_html(&config.filters.hidden_class);
    let scripts = if config.page.include_tablesort {
        TABLESORT_SCRIPTS
    } else {
        ""
    };

    let mut page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
{scripts}    <style>{STYLES}        .{hidden_class} {{ display: none; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
"#
    );

    page.push_str(&render_filter_controls(layout, controls));
    let _ = writeln!(page, "    <table id=\"{}\">", escape_html(&layout.table_id));
    page.push_str(&render_header(table));
    page.push_str("        <tbody>\n");
    page.push_str(&render_table_body(table, &config.filters.hidden_class));
    page.push_str("        </tbody>\n    </table>\n");
    let _ = writeln!(
        page,
        "    <script>\n{}    </script>",
        filter_script(layout, &config.filters.hidden_class)
    );
    if config.page.include_tablesort {
        let _ = writeln!(
            page,
            "    <script>new Tablesort(document.getElementById('{}'), {{ descending: true }});</script>",
            escape_html(&layout.table_id)
        );
    }
    page.push_str("</body>\n</html>\n");
    page
}
