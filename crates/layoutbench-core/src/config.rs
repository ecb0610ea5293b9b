//! Configuration system for LayoutBench

use crate::error::{BenchError, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming an optional RON configuration file.
pub const CONFIG_ENV_VAR: &str = "LAYOUTBENCH_CONFIG";

/// Global configuration for LayoutBench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Resize loop settings
    pub run: RunConfig,
    /// Synthetic data shape
    pub data: DataConfig,
    /// Viewport and text metrics used by the layout host
    pub viewport: ViewportConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Resize loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Resizes per run
    pub iterations: usize,
    /// Pause between mounting and the first measurement
    pub settle_delay_ms: u64,
    /// Column widths applied round-robin, in pixels
    pub resize_widths: Vec<f32>,
    /// Frame rate of the native frame scheduler
    pub frame_rate: u32,
}

/// Data generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub row_count: usize,
    pub column_count: usize,
}

/// Viewport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
    /// Advance of one character of cell text
    pub char_width: f32,
    /// Height of one line of cell text
    pub line_height: f32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used for categories without an explicit entry
    pub default_level: String,
    /// Category-specific log levels (category name -> level string)
    pub category_levels: HashMap<String, String>,
    /// Rate limiting duration in seconds
    pub rate_limit_seconds: u64,
    /// Maximum number of messages before rate limiting kicks in
    pub max_rate_limit_count: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            data: DataConfig::default(),
            viewport: ViewportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            settle_delay_ms: 1000,
            resize_widths: vec![150.0, 200.0, 250.0, 300.0],
            frame_rate: 60,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            row_count: 10_000,
            column_count: 3,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            char_width: 8.0,
            line_height: 20.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut category_levels = HashMap::new();

        category_levels.insert("core".to_string(), "info".to_string());
        category_levels.insert("runner".to_string(), "info".to_string());
        category_levels.insert("platform".to_string(), "info".to_string());
        category_levels.insert("layout".to_string(), "warn".to_string());
        category_levels.insert("style".to_string(), "error".to_string());

        Self {
            default_level: "info".to_string(),
            category_levels,
            rate_limit_seconds: 5,
            max_rate_limit_count: 10,
        }
    }
}

impl RunConfig {
    /// Settle delay as a `Duration`.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Interval between two animation frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

impl BenchConfig {
    /// Parse a configuration from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: BenchConfig = ron::from_str(text).map_err(|e| {
            BenchError::configuration_with_context(
                format!("Failed to parse configuration: {}", e),
                ErrorContext::new("parse", "config"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text).map_err(|e| match e {
            BenchError::Configuration { message, .. } => BenchError::configuration_with_context(
                message,
                ErrorContext::new("load", "config")
                    .with_metadata("path", path.display().to_string()),
            ),
            other => other,
        })
    }

    /// Load the file named by `LAYOUTBENCH_CONFIG`, or fall back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| BenchError::configuration(format!("Failed to serialize: {}", e)))
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| {
            Err(BenchError::configuration_with_context(
                msg,
                ErrorContext::new("validate", "config"),
            ))
        };

        if self.run.iterations == 0 {
            return fail("run.iterations must be at least 1");
        }
        if self.run.resize_widths.is_empty() {
            return fail("run.resize_widths must not be empty");
        }
        if self
            .run
            .resize_widths
            .iter()
            .any(|w| !w.is_finite() || *w <= 0.0)
        {
            return fail("run.resize_widths must be finite and positive");
        }
        if self.run.frame_rate == 0 {
            return fail("run.frame_rate must be positive");
        }
        if self.data.row_count == 0 || self.data.column_count == 0 {
            return fail("data.row_count and data.column_count must be positive");
        }
        let vp = &self.viewport;
        if [vp.width, vp.height, vp.char_width, vp.line_height]
            .iter()
            .any(|v| !v.is_finite() || *v <= 0.0)
        {
            return fail("viewport dimensions and text metrics must be finite and positive");
        }
        Ok(())
    }
}
