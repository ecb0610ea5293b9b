use crate::{flex, grid, subgrid, table};
use layoutbench_core::{LayoutHost, LayoutKind, LayoutResult, RowSet, UiNode};

/// One of the four layout strategies under test.
///
/// Every strategy renders the same rows and exposes the same three
/// operations; the variant picks the structure and the resize mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutRenderer {
    Grid,
    Subgrid,
    Table,
    Flex,
}

impl LayoutRenderer {
    pub fn for_kind(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Grid => LayoutRenderer::Grid,
            LayoutKind::Subgrid => LayoutRenderer::Subgrid,
            LayoutKind::Table => LayoutRenderer::Table,
            LayoutKind::Flex => LayoutRenderer::Flex,
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            LayoutRenderer::Grid => LayoutKind::Grid,
            LayoutRenderer::Subgrid => LayoutKind::Subgrid,
            LayoutRenderer::Table => LayoutKind::Table,
            LayoutRenderer::Flex => LayoutKind::Flex,
        }
    }

    /// Ref name of the measured root element.
    pub fn root_ref(&self) -> &'static str {
        match self {
            LayoutRenderer::Grid => grid::ROOT_REF,
            LayoutRenderer::Subgrid => subgrid::ROOT_REF,
            LayoutRenderer::Table => table::ROOT_REF,
            LayoutRenderer::Flex => flex::ROOT_REF,
        }
    }

    /// Build the element tree for `rows`.
    pub fn render(&self, rows: &RowSet) -> UiNode {
        match self {
            LayoutRenderer::Grid => grid::render(rows),
            LayoutRenderer::Subgrid => subgrid::render(rows),
            LayoutRenderer::Table => table::render(rows),
            LayoutRenderer::Flex => flex::render(rows),
        }
    }

    /// Resolve the mounted root element, if any.
    pub fn root_handle<H: LayoutHost>(&self, host: &H) -> Option<H::Handle> {
        host.find_ref(self.root_ref())
    }

    /// Apply this strategy's column-width mutation.
    pub fn apply_resize<H: LayoutHost>(
        &self,
        host: &mut H,
        root: H::Handle,
        width_px: f32,
        column_count: usize,
    ) -> LayoutResult<()> {
        match self {
            LayoutRenderer::Grid => grid::apply_resize(host, root, width_px),
            LayoutRenderer::Subgrid => subgrid::apply_resize(host, root, width_px, column_count),
            LayoutRenderer::Table => table::apply_resize(host, root, width_px),
            LayoutRenderer::Flex => flex::apply_resize(host, root, width_px),
        }
    }
}

impl From<LayoutKind> for LayoutRenderer {
    fn from(kind: LayoutKind) -> Self {
        LayoutRenderer::for_kind(kind)
    }
}
