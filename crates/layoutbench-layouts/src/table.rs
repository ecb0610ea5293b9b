//! HTML table layout with the fixed table-layout algorithm
//!
//! Column widths come from the `col` elements of the leading `colgroup`;
//! resizing sets the inline width of the first `col`.

use crate::stylesheet::{px, INITIAL_COLUMN_WIDTH};
use layoutbench_core::{LayoutError, LayoutHost, LayoutResult, RowSet, UiNode};

pub const ROOT_REF: &str = "table-root";

fn colgroup(column_count: usize) -> UiNode {
    let initial = px(INITIAL_COLUMN_WIDTH);
    UiNode::element("colgroup")
        .children((0..column_count).map(|i| {
            let width = if i + 1 == column_count { "auto".to_string() } else { initial.clone() };
            UiNode::from(UiNode::element("col").style("width", width))
        }))
        .into()
}

pub fn render(rows: &RowSet) -> UiNode {
    let column_count = rows.column_count();
    let header = UiNode::element("tr").children(
        (1..=column_count)
            .map(|i| UiNode::from(UiNode::element("th").text(format!("Column {}", i)))),
    );

    UiNode::element("table")
        .class("table-layout")
        .style("table-layout", "fixed")
        .node_ref(ROOT_REF)
        .child(colgroup(column_count))
        .child(UiNode::element("thead").child(header))
        .child(UiNode::element("tbody").children(rows.iter().map(|row| {
            UiNode::from(UiNode::element("tr").children(row.cells.iter().map(|cell| {
                UiNode::from(UiNode::element("td").class("cell").text(cell.content.clone()))
            })))
        })))
        .into()
}

/// Set the width of `root.children[0].children[0]`, the first `col`.
pub fn apply_resize<H: LayoutHost>(host: &mut H, root: H::Handle, width_px: f32) -> LayoutResult<()> {
    let col = host
        .child(root, 0)
        .and_then(|colgroup| host.child(colgroup, 0))
        .ok_or_else(|| LayoutError::UnknownElement("table-root > colgroup > col".to_string()))?;
    host.set_style_property(col, "width", &px(width_px))
}
