//! CSS grid layout
//!
//! Every row is its own grid whose first track reads `--column-0-width` from
//! the root. Resizing sets the custom property on the root, so all rows
//! restyle through inheritance.

use crate::stylesheet::{column_width_property, px};
use layoutbench_core::{LayoutHost, LayoutResult, Row, RowSet, UiNode};

pub const ROOT_REF: &str = "grid-root";

/// Header row with one `columnheader` cell per column.
pub(crate) fn header_row(row_class: &str, column_count: usize) -> UiNode {
    UiNode::element("div")
        .class(row_class)
        .attr("role", "row")
        .children((1..=column_count).map(|i| {
            UiNode::from(
                UiNode::element("div")
                    .class("cell")
                    .attr("role", "columnheader")
                    .text(format!("Column {}", i)),
            )
        }))
        .into()
}

pub(crate) fn data_row(row_class: &str, row: &Row) -> UiNode {
    UiNode::element("div")
        .class(row_class)
        .attr("role", "row")
        .attr("data-row", row.id.to_string())
        .children(row.cells.iter().map(|cell| {
            UiNode::from(
                UiNode::element("div")
                    .class("cell")
                    .attr("role", "cell")
                    .text(cell.content.clone()),
            )
        }))
        .into()
}

pub fn render(rows: &RowSet) -> UiNode {
    UiNode::element("div")
        .class("grid-layout")
        .attr("role", "grid")
        .node_ref(ROOT_REF)
        .child(header_row("grid-row", rows.column_count()))
        .children(rows.iter().map(|row| data_row("grid-row", row)))
        .into()
}

pub fn apply_resize<H: LayoutHost>(host: &mut H, root: H::Handle, width_px: f32) -> LayoutResult<()> {
    host.set_custom_property(root, &column_width_property(0), &px(width_px))
}
