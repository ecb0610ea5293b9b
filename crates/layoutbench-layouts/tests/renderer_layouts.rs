//! Mount every renderer on the Taffy host and check the resize mutation
//! reaches the first column.

use layoutbench_core::ElementKey;
use layoutbench_layouts::prelude::*;
use pretty_assertions::assert_eq;

const ROWS: usize = 3;

fn mounted(kind: LayoutKind) -> (TaffyHost, LayoutRenderer, ElementKey) {
    let rows = RowSet::new(ROWS, 3);
    let renderer = LayoutRenderer::for_kind(kind);
    let mut host = TaffyHost::new(&ViewportConfig::default()).unwrap();
    host.mount(&renderer.render(&rows), &bench_stylesheet(3))
        .unwrap();
    let root = renderer.root_handle(&host).unwrap();
    (host, renderer, root)
}

/// First cell of the first data row.
fn first_data_cell(host: &TaffyHost, kind: LayoutKind, root: ElementKey) -> ElementKey {
    let row = match kind {
        LayoutKind::Grid | LayoutKind::Subgrid => host.child(root, 1),
        LayoutKind::Table => host.child(root, 2).and_then(|tbody| host.child(tbody, 0)),
        LayoutKind::Flex => host.child(root, 0),
    }
    .unwrap();
    host.child(row, 0).unwrap()
}

fn first_column_width(kind: LayoutKind, width: f32) -> f32 {
    let (mut host, renderer, root) = mounted(kind);
    renderer.apply_resize(&mut host, root, width, 3).unwrap();
    host.force_layout(root).unwrap();
    let cell = first_data_cell(&host, kind, root);
    host.layout_of(cell).unwrap().width()
}

#[test]
fn test_initial_first_column_width() {
    for kind in LayoutKind::ALL {
        let (mut host, _, root) = mounted(kind);
        host.force_layout(root).unwrap();
        let cell = first_data_cell(&host, kind, root);
        assert_eq!(host.layout_of(cell).unwrap().width(), 200.0, "{}", kind);
    }
}

#[test]
fn test_resize_reaches_first_column() {
    for kind in LayoutKind::ALL {
        for width in [150.0, 200.0, 250.0, 300.0] {
            assert_eq!(first_column_width(kind, width), width, "{} at {}px", kind, width);
        }
    }
}

#[test]
fn test_offset_heights() {
    // Cells are one 20px line plus 4px vertical padding on each side; table
    // headers keep the 1px default padding.
    let expected = [
        (LayoutKind::Grid, 4.0 * 28.0),
        (LayoutKind::Subgrid, 4.0 * 28.0),
        (LayoutKind::Table, 22.0 + 3.0 * 28.0),
        (LayoutKind::Flex, 3.0 * 28.0),
    ];
    for (kind, height) in expected {
        let (mut host, renderer, root) = mounted(kind);
        renderer.apply_resize(&mut host, root, 150.0, 3).unwrap();
        assert_eq!(host.force_layout(root).unwrap(), height, "{}", kind);
    }
}

#[test]
fn test_remaining_grid_columns_share_space() {
    let (mut host, renderer, root) = mounted(LayoutKind::Grid);
    renderer.apply_resize(&mut host, root, 250.0, 3).unwrap();
    host.force_layout(root).unwrap();

    let row = host.child(root, 1).unwrap();
    let widths: Vec<f32> = (0..3)
        .map(|i| host.layout_of(host.child(row, i).unwrap()).unwrap().width())
        .collect();
    assert_eq!(widths, vec![250.0, 515.0, 515.0]);
}

#[test]
fn test_table_resize_targets_first_col() {
    let (mut host, renderer, root) = mounted(LayoutKind::Table);
    renderer.apply_resize(&mut host, root, 300.0, 3).unwrap();
    let col = host.child(host.child(root, 0).unwrap(), 0).unwrap();
    assert_eq!(host.tag(col), Some("col"));
    assert_eq!(host.inline_style(col, "width"), Some("300px"));
}

#[test]
fn test_root_handle_missing_when_unmounted() {
    let host = TaffyHost::new(&ViewportConfig::default()).unwrap();
    for kind in LayoutKind::ALL {
        assert!(LayoutRenderer::for_kind(kind).root_handle(&host).is_none());
    }
}
