//! Platform layer for LayoutBench
//!
//! Provides the resize simulator, the results accumulator, the benchmark
//! application and the native and browser wiring.

pub mod application;
pub mod controller;
pub mod results;
pub mod sim;

#[cfg(not(target_arch = "wasm32"))]
pub mod desktop;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use application::{BenchApp, BenchAppBuilder, TriggerButton};
pub use controller::{mean, width_for_iteration, ResizeSample, RunController, RunReport, RunState};
pub use results::{ResultsLog, TestResult};

use layoutbench_core::{BenchError, ErrorContext};

/// Platform-specific error type
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("WebAssembly error: {0}")]
    #[cfg(target_arch = "wasm32")]
    Wasm(String),
}

impl From<PlatformError> for BenchError {
    fn from(err: PlatformError) -> Self {
        BenchError::platform_with_context(err.to_string(), ErrorContext::new("setup", "platform"))
    }
}

/// Initialize the platform layer
pub fn init() -> Result<(), PlatformError> {
    tracing::info!("LayoutBench Platform initialized");

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
    }

    Ok(())
}
