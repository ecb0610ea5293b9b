//! Error types for LayoutBench

use crate::layout_kind::LayoutKind;
use std::collections::HashMap;
use thiserror::Error;

/// Context information for errors to aid in debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Operation that was being performed when the error occurred
    pub operation: String,
    /// Component or module where the error occurred
    pub component: String,
    /// Additional contextual data
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            component: component.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the context
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Format context for logging
    pub fn format_for_log(&self) -> String {
        let mut parts = vec![
            format!("operation={}", self.operation),
            format!("component={}", self.component),
        ];

        if !self.metadata.is_empty() {
            let mut entries: Vec<_> = self.metadata.iter().collect();
            entries.sort();
            let metadata_str = entries
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("metadata=[{}]", metadata_str));
        }

        parts.join(", ")
    }
}

/// Main error type for LayoutBench operations
#[derive(Debug, Error)]
pub enum BenchError {
    /// A run was triggered while another one is still in flight.
    #[error("A run is already in progress ({active} layout)")]
    AlreadyRunning { active: LayoutKind },

    /// The iteration count cannot produce an average.
    #[error("Invalid iteration count {iterations}: at least one iteration is required")]
    InvalidIterations { iterations: usize },

    /// The renderer's root element could not be resolved after mounting.
    #[error("Root element for the {kind} layout is not mounted")]
    RootNotMounted { kind: LayoutKind },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        context: Option<ErrorContext>,
    },

    #[error("Platform error: {message}")]
    Platform {
        message: String,
        context: Option<ErrorContext>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Create a configuration error from a string
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration {
            message: msg.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn configuration_with_context<S: Into<String>>(msg: S, context: ErrorContext) -> Self {
        Self::Configuration {
            message: msg.into(),
            context: Some(context),
        }
    }

    /// Create a platform error with context
    pub fn platform_with_context<S: Into<String>>(msg: S, context: ErrorContext) -> Self {
        Self::Platform {
            message: msg.into(),
            context: Some(context),
        }
    }

    /// Get the error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Configuration { context, .. } | Self::Platform { context, .. } => {
                context.as_ref()
            }
            _ => None,
        }
    }

    /// Format error with context for logging
    pub fn format_for_log(&self) -> String {
        let base_msg = self.to_string();
        if let Some(context) = self.context() {
            format!("{} [{}]", base_msg, context.format_for_log())
        } else {
            base_msg
        }
    }
}

/// Result type alias for LayoutBench operations
pub type Result<T> = std::result::Result<T, BenchError>;

// =============================================================================
// Layout Host Error Types
// =============================================================================

/// Errors raised by a layout host while mounting, mutating or measuring.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LayoutError {
    /// Viewport size is invalid (zero, negative, or infinite).
    #[error("Invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Layout computation failed internally.
    #[error("Layout computation failed: {reason}")]
    ComputationFailed { reason: String },

    /// A handle does not refer to a mounted element.
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// The engine produced coordinates that failed validation.
    #[error("Invalid geometry for element {element}")]
    InvalidGeometry { element: String },

    /// Nothing is mounted in the host.
    #[error("No element tree is mounted")]
    NothingMounted,

    /// Error from Taffy itself.
    #[error("Taffy error: {0}")]
    Taffy(String),

    /// Error reported by the host environment (DOM calls and the like).
    #[error("Host error: {0}")]
    Host(String),

    /// A declaration could not be resolved while restyling.
    #[error("Style error on <{element}>: {source}")]
    Style {
        element: String,
        #[source]
        source: StyleError,
    },
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Taffy(format!("{:?}", err))
    }
}

/// Errors raised while parsing or resolving style declarations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("Invalid length for {property}: '{value}'")]
    InvalidLength { property: String, value: String },

    #[error("Invalid track list: '{0}'")]
    InvalidTrackList(String),

    #[error("Invalid grid placement: '{0}'")]
    InvalidPlacement(String),

    #[error("Invalid number for {property}: '{value}'")]
    InvalidNumber { property: String, value: String },

    #[error("Unresolved custom property {name}")]
    UnresolvedVariable { name: String },

    #[error("Malformed var() reference: '{0}'")]
    MalformedVar(String),
}

/// Result type for layout host operations.
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// Result type for style parsing.
pub type StyleResult<T> = std::result::Result<T, StyleError>;

/// Validation errors for geometry read back from a host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// A value is not finite (NaN or Infinity).
    #[error("Non-finite value in layout output")]
    NonFiniteValue,

    /// Width or height is negative.
    #[error("Negative dimension: width={width}, height={height}")]
    NegativeDimension { width: f32, height: f32 },
}
