//! LayoutBench layouts
//!
//! The four layout strategies under test. Each renders the same synthetic
//! rows into an element tree and knows how to resize its first column on a
//! mounted host.

pub mod flex;
pub mod grid;
pub mod renderer;
pub mod stylesheet;
pub mod subgrid;
pub mod table;

pub mod prelude;

pub use layoutbench_core::LayoutKind;
pub use renderer::LayoutRenderer;
pub use stylesheet::{bench_stylesheet, column_width_property, INITIAL_COLUMN_WIDTH};

/// Initialize the layouts module
pub fn init() -> layoutbench_core::Result<()> {
    tracing::info!("LayoutBench layouts initialized");
    Ok(())
}
