//! LayoutBench - layout recalculation micro-benchmarks
//!
//! Renders the same synthetic table as a CSS grid, a subgrid, an HTML table
//! and a flex layout, then measures how long a forced layout takes after the
//! first column is resized.

pub use layoutbench_core;
pub use layoutbench_layouts;
pub use layoutbench_platform;

pub use layoutbench_platform::{BenchApp, BenchAppBuilder, ResultsLog, RunController, TestResult};

use layoutbench_core::{BenchError, LoggingConfig, Result};

/// Unified prelude module that exports all commonly used types
pub mod prelude {
    pub use layoutbench_layouts::prelude::*;
    pub use layoutbench_platform::{
        BenchApp, BenchAppBuilder, ResizeSample, RunReport, RunState, TestResult,
    };
    #[cfg(not(target_arch = "wasm32"))]
    pub use layoutbench_platform::desktop::desktop_app;
    #[cfg(target_arch = "wasm32")]
    pub use layoutbench_platform::web::web_app;
}

/// Initialize logging and every LayoutBench layer.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    layoutbench_core::init(logging)?;
    layoutbench_layouts::init()?;
    layoutbench_platform::init().map_err(BenchError::from)?;
    Ok(())
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
