//! Client-side filter script for a rendered listing page
//!
//! The script mirrors [`FilterController`](crate::filter::controller::FilterController)
//! in the browser: `applyFilters` recomputes row visibility from the controls,
//! `resetFilters` restores the defaults and `filterValueTrades` checks the
//! toggle before filtering. Option lists are rendered server side, so there is
//! no client-side populate step.

use crate::filter::layout::FilterLayout;
use crate::filter::state::ALL_VALUE;
use std::fmt::Write;

/// A JavaScript string literal safe to place inside a `<script>` element
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

fn apply_filters_fn(layout: &FilterLayout, hidden_class: &str) -> String {
    let mut out = String::from("function applyFilters() {\n");

    for (i, filter) in layout.categorical.iter().enumerate() {
        let _ = writeln!(
            out,
            "    const selected{i} = document.getElementById({}).value;",
            js_string(&filter.control_id)
        );
    }
    for (i, filter) in layout.thresholds.iter().enumerate() {
        let _ = writeln!(
            out,
            "    const min{i} = parseFloat(document.getElementById({}).value) || 0;",
            js_string(&filter.control_id)
        );
    }
    if let Some(toggle) = &layout.toggle {
        let _ = writeln!(
            out,
            "    const onlyFlagged = document.getElementById({}).checked;",
            js_string(&toggle.control_id)
        );
    }

    let _ = writeln!(
        out,
        "    const rows = document.getElementById({}).querySelectorAll('tbody tr');",
        js_string(&layout.table_id)
    );
    out.push_str("    rows.forEach(row => {\n");
    out.push_str("        const cells = row.getElementsByTagName('td');\n");
    out.push_str("        let show = true;\n");

    for (i, filter) in layout.categorical.iter().enumerate() {
        let _ = writeln!(
            out,
            "        if (selected{i} !== {} && cells[{}].textContent.trim() !== selected{i}) show = false;",
            js_string(ALL_VALUE),
            filter.column
        );
    }
    // NaN never passes, so a cell without data-sort fails any bound
    for (i, filter) in layout.thresholds.iter().enumerate() {
        let _ = writeln!(
            out,
            "        if (!(parseFloat(cells[{}].dataset.sort) >= min{i})) show = false;",
            filter.column
        );
    }
    if let Some(toggle) = &layout.toggle {
        let _ = writeln!(
            out,
            "        if (onlyFlagged && row.getAttribute({}) !== 'true') show = false;",
            js_string(&format!("data-{}", toggle.attribute))
        );
    }

    let _ = writeln!(
        out,
        "        row.classList.toggle({}, !show);",
        js_string(hidden_class)
    );
    out.push_str("    });\n}\n");
    out
}

fn reset_filters_fn(layout: &FilterLayout, hidden_class: &str) -> String {
    let mut out = String::from("function resetFilters() {\n");

    for filter in &layout.categorical {
        let _ = writeln!(
            out,
            "    document.getElementById({}).value = {};",
            js_string(&filter.control_id),
            js_string(ALL_VALUE)
        );
    }
    for filter in &layout.thresholds {
        let _ = writeln!(
            out,
            "    document.getElementById({}).value = '';",
            js_string(&filter.control_id)
        );
    }
    if let Some(toggle) = &layout.toggle {
        let _ = writeln!(
            out,
            "    document.getElementById({}).checked = false;",
            js_string(&toggle.control_id)
        );
    }

    let _ = writeln!(
        out,
        "    document.getElementById({}).querySelectorAll('tbody tr').forEach(row => row.classList.remove({}));",
        js_string(&layout.table_id),
        js_string(hidden_class)
    );
    out.push_str("}\n");
    out
}

/// Filter functions and control listeners for `layout`
///
/// Every button the page renders calls a function defined here, and every
/// control re-runs `applyFilters` when it changes.
pub fn filter_script(layout: &FilterLayout, hidden_class: &str) -> String {
    let mut out = apply_filters_fn(layout, hidden_class);
    out.push('\n');
    out.push_str(&reset_filters_fn(layout, hidden_class));

    if let Some(toggle) = &layout.toggle {
        let _ = writeln!(
            out,
            "\nfunction filterValueTrades() {{\n    document.getElementById({}).checked = true;\n    applyFilters();\n}}",
            js_string(&toggle.control_id)
        );
    }

    out.push('\n');
    for filter in &layout.categorical {
        let _ = writeln!(
            out,
            "document.getElementById({}).addEventListener('change', applyFilters);",
            js_string(&filter.control_id)
        );
    }
    for filter in &layout.thresholds {
        let _ = writeln!(
            out,
            "document.getElementById({}).addEventListener('input', applyFilters);",
            js_string(&filter.control_id)
        );
    }
    if let Some(toggle) = &layout.toggle {
        let _ = writeln!(
            out,
            "document.getElementById({}).addEventListener('change', applyFilters);",
            js_string(&toggle.control_id)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::layout::{
        COLOR_FILTER, MIN_DIFF_FILTER, MIN_PRICE_FILTER, RARITY_FILTER, VALUE_TRADE_FILTER,
        VENDOR_FILTER,
    };

    #[test]
    fn test_tradable_script_defines_button_handlers() {
        let script = filter_script(&FilterLayout::tradable_cards(), "hidden");

        assert!(script.contains("function applyFilters()"));
        assert!(script.contains("function resetFilters()"));
        assert!(script.contains("function filterValueTrades()"));
        assert!(script.contains("cells[7].textContent.trim() !== selected0"));
        assert!(script.contains("parseFloat(cells[8].dataset.sort) >= min1"));
        assert!(script.contains(r#"row.getAttribute("data-value-trade") !== 'true'"#));
        assert!(script.contains(r#"row.classList.toggle("hidden", !show);"#));
    }

    #[test]
    fn test_tradable_script_listens_on_every_control() {
        let script = filter_script(&FilterLayout::tradable_cards(), "hidden");

        for id in [RARITY_FILTER, COLOR_FILTER, VALUE_TRADE_FILTER] {
            assert!(script.contains(&format!(
                r#"document.getElementById("{id}").addEventListener('change', applyFilters);"#
            )));
        }
        for id in [MIN_PRICE_FILTER, MIN_DIFF_FILTER] {
            assert!(script.contains(&format!(
                r#"document.getElementById("{id}").addEventListener('input', applyFilters);"#
            )));
        }
    }

    #[test]
    fn test_nice_price_script_has_only_vendor_filter() {
        let script = filter_script(&FilterLayout::nice_price(), "hidden");

        assert!(script.contains("function resetFilters()"));
        assert!(!script.contains("filterValueTrades"));
        assert!(script.contains(&format!(
            r#"document.getElementById("{VENDOR_FILTER}").value = "all";"#
        )));
        assert!(!script.contains(RARITY_FILTER));
        assert!(!script.contains("parseFloat"));
    }

    #[test]
    fn test_configured_class_cannot_close_script() {
        let script = filter_script(&FilterLayout::nice_price(), "x</script><b>");
        assert!(!script.contains("</script>"));
        assert!(script.contains(r#""x<\/script><b>""#));
    }
}
