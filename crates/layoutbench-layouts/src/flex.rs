//! Flexbox layout
//!
//! Rows are flex containers and each cell's inline width reads
//! `--column-<i>-width` from the root. There is no header row.

use crate::stylesheet::{column_width_property, px};
use layoutbench_core::{LayoutHost, LayoutResult, RowSet, UiNode};

pub const ROOT_REF: &str = "flex-root";

pub fn render(rows: &RowSet) -> UiNode {
    UiNode::element("div")
        .class("flex-layout")
        .node_ref(ROOT_REF)
        .children(rows.iter().map(|row| {
            UiNode::from(UiNode::element("div").class("flex-row").children(
                row.cells.iter().enumerate().map(|(i, cell)| {
                    UiNode::from(
                        UiNode::element("div")
                            .class("cell")
                            .class("flex-cell")
                            .style("width", format!("var({})", column_width_property(i)))
                            .text(cell.content.clone()),
                    )
                }),
            ))
        }))
        .into()
}

pub fn apply_resize<H: LayoutHost>(host: &mut H, root: H::Handle, width_px: f32) -> LayoutResult<()> {
    host.set_custom_property(root, &column_width_property(0), &px(width_px))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_reference_column_variables() {
        let tree = render(&RowSet::new(1, 3));
        let row = tree.as_element().unwrap().element_children()[0].clone();
        let widths: Vec<String> = row
            .element_children()
            .iter()
            .map(|cell| cell.style[0].to_string())
            .collect();
        assert_eq!(
            widths,
            vec![
                "width: var(--column-0-width)",
                "width: var(--column-1-width)",
                "width: var(--column-2-width)",
            ]
        );
    }
}
