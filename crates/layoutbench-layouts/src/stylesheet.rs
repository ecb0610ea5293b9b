//! Author stylesheet shared by the four layouts
//!
//! The same rules are injected into a document as CSS text and cascaded by the
//! Taffy host.

use layoutbench_core::{Selector, Stylesheet};

/// Width every resizable column starts at, in pixels.
pub const INITIAL_COLUMN_WIDTH: f32 = 200.0;

/// Name of the custom property sizing column `index`.
pub fn column_width_property(index: usize) -> String {
    format!("--column-{}-width", index)
}

/// `<first> 1fr 1fr ...` for `column_count` columns.
pub fn template_columns(first: &str, column_count: usize) -> String {
    let mut template = first.to_string();
    for _ in 1..column_count {
        template.push_str(" 1fr");
    }
    template
}

pub(crate) fn px(width: f32) -> String {
    format!("{}px", width)
}

/// Stylesheet for tables of `column_count` columns.
pub fn bench_stylesheet(column_count: usize) -> Stylesheet {
    let initial = px(INITIAL_COLUMN_WIDTH);
    let first_var = format!("var({})", column_width_property(0));
    let grid_template = template_columns(&first_var, column_count);
    let subgrid_template = template_columns(&initial, column_count);

    let flex_vars: Vec<(String, String)> = (0..column_count)
        .map(|i| (column_width_property(i), initial.clone()))
        .collect();
    let mut flex_root: Vec<(&str, &str)> = vec![("display", "flex"), ("flex-direction", "column")];
    flex_root.extend(flex_vars.iter().map(|(p, v)| (p.as_str(), v.as_str())));

    let column_0 = column_width_property(0);

    Stylesheet::new()
        .rule(Selector::class("cell"), &[("padding", "4px 8px")])
        .rule(
            Selector::class("grid-layout"),
            &[
                ("display", "flex"),
                ("flex-direction", "column"),
                (column_0.as_str(), initial.as_str()),
            ],
        )
        .rule(
            Selector::class("grid-row"),
            &[("display", "grid"), ("grid-template-columns", grid_template.as_str())],
        )
        .rule(
            Selector::class("subgrid-layout"),
            &[("display", "grid"), ("grid-template-columns", subgrid_template.as_str())],
        )
        .rule(
            Selector::class("subgrid-row"),
            &[
                ("display", "grid"),
                ("grid-column", "1 / -1"),
                ("grid-template-columns", "subgrid"),
            ],
        )
        .rule(Selector::class("table-layout"), &[("width", "100%")])
        .rule(Selector::class("flex-layout"), &flex_root)
        .rule(Selector::class("flex-row"), &[("display", "flex")])
        .rule(Selector::class("flex-cell"), &[("flex-shrink", "0")])
}
