//! Core functionality for LayoutBench
//!
//! This crate provides the building blocks shared by every benchmark surface:
//! configuration, errors, logging, the synthetic row generator, the element
//! tree and stylesheet model, reactive state, the host traits and the Taffy
//! host.

pub mod config;
pub mod css;
pub mod data;
pub mod error;
pub mod host;
pub mod layout_kind;
pub mod logging;
pub mod state;
pub mod style;
pub mod taffy_layout;
pub mod ui_node;
pub mod validated_rect;

pub use config::{BenchConfig, DataConfig, LoggingConfig, RunConfig, ViewportConfig};
pub use data::{generate_rows, Cell, Row, RowSet};
pub use error::{
    BenchError, ErrorContext, LayoutError, LayoutResult, Result, StyleError, StyleResult,
    ValidationError,
};
pub use host::{Clock, FrameScheduler, LayoutHost};
pub use layout_kind::LayoutKind;
pub use logging::{LogCategory, LogLevel};
pub use state::{Signal, SubscriptionId};
pub use style::{Declaration, Selector, StyleRule, Stylesheet};
pub use taffy;
pub use taffy_layout::{ElementKey, TaffyHost, TextMetrics};
pub use ui_node::{ElementNode, UiNode};
pub use validated_rect::ValidatedRect;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        config::{BenchConfig, ViewportConfig},
        data::RowSet,
        error::{BenchError, LayoutError, Result},
        host::{Clock, FrameScheduler, LayoutHost},
        layout_kind::LayoutKind,
        logging::LogCategory,
        state::Signal,
        style::{Selector, Stylesheet},
        taffy_layout::TaffyHost,
        ui_node::UiNode,
    };
}

/// Framework version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the given configuration
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Err(e) = logging::init(config) {
        return Err(BenchError::configuration_with_context(
            format!("Failed to initialize logging: {}", e),
            ErrorContext::new("init", "logging"),
        ));
    }

    tracing::info!("LayoutBench Core v{} initialized", VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
