//! CSS subgrid layout
//!
//! The root owns an explicit track template and every row spans it with
//! `grid-template-columns: subgrid`. Resizing rewrites the root's template.

use crate::grid::{data_row, header_row};
use crate::stylesheet::{px, template_columns};
use layoutbench_core::{LayoutHost, LayoutResult, RowSet, UiNode};

pub const ROOT_REF: &str = "subgrid-root";

pub fn render(rows: &RowSet) -> UiNode {
    UiNode::element("div")
        .class("subgrid-layout")
        .attr("role", "grid")
        .node_ref(ROOT_REF)
        .child(header_row("subgrid-row", rows.column_count()))
        .children(rows.iter().map(|row| data_row("subgrid-row", row)))
        .into()
}

/// Rewrite the template as `"<w>px 1fr 1fr"`, one `1fr` per remaining column.
pub fn apply_resize<H: LayoutHost>(
    host: &mut H,
    root: H::Handle,
    width_px: f32,
    column_count: usize,
) -> LayoutResult<()> {
    host.set_style_property(
        root,
        "grid-template-columns",
        &template_columns(&px(width_px), column_count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_use_subgrid_class() {
        let tree = render(&RowSet::new(3, 3));
        let root = tree.as_element().unwrap();
        assert_eq!(root.node_ref.as_deref(), Some(ROOT_REF));
        assert!(root
            .element_children()
            .iter()
            .all(|row| row.has_class("subgrid-row")));
    }
}
