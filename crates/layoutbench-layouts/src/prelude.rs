//! Prelude module for LayoutBench layouts
//!
//! Re-exports the renderer types together with the core prelude, so
//! `use layoutbench_layouts::prelude::*;` is enough to mount and resize a layout.

pub use layoutbench_core::prelude::*;

pub use crate::renderer::LayoutRenderer;
pub use crate::stylesheet::bench_stylesheet;
