//! Logging system for LayoutBench
//!
//! Messages are `tracing` events tagged with a `category` field. Each category
//! has its own threshold, and warnings that can fire once per frame (scheduler
//! failures, host teardown) are rate limited per category. The subscriber installed by
//! [`init`] does the formatting; in the browser, install `tracing-wasm` and
//! call [`init_categories`] instead.

use crate::config::LoggingConfig;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

/// Log levels supported by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subsystem a message comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    Core,
    /// Taffy host: mounting, restyles and layout passes
    Layout,
    /// Stylesheet matching and value parsing
    Style,
    /// Resize simulator
    Runner,
    Platform,
}

impl LogCategory {
    pub const ALL: [LogCategory; 5] = [
        LogCategory::Core,
        LogCategory::Layout,
        LogCategory::Style,
        LogCategory::Runner,
        LogCategory::Platform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Core => "core",
            LogCategory::Layout => "layout",
            LogCategory::Style => "style",
            LogCategory::Runner => "runner",
            LogCategory::Platform => "platform",
        }
    }

    pub fn parse(s: &str) -> Option<LogCategory> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-window counter. Time is passed in so windows can be tested without
/// sleeping.
#[derive(Debug)]
struct RateWindow {
    window_start: Option<Duration>,
    count: u32,
}

impl RateWindow {
    fn new() -> Self {
        Self {
            window_start: None,
            count: 0,
        }
    }

    fn admit(&mut self, now: Duration, max_count: u32, window: Duration) -> bool {
        match self.window_start {
            Some(start) if now.saturating_sub(start) < window => {}
            _ => {
                self.window_start = Some(now);
                self.count = 0;
            }
        }
        if self.count < max_count {
            self.count += 1;
            true
        } else {
            false
        }
    }
}

/// Per-category thresholds and rate-limit windows resolved from a
/// [`LoggingConfig`].
#[derive(Debug)]
pub struct CategoryFilter {
    default_level: LogLevel,
    levels: HashMap<LogCategory, LogLevel>,
    max_count: u32,
    window: Duration,
    windows: Mutex<HashMap<LogCategory, RateWindow>>,
}

impl CategoryFilter {
    /// Resolve `config`. Unknown category names and level names are ignored;
    /// an unparseable default level falls back to `info`.
    pub fn new(config: &LoggingConfig) -> Self {
        let levels = config
            .category_levels
            .iter()
            .filter_map(|(category, level)| {
                Some((LogCategory::parse(category)?, LogLevel::parse(level)?))
            })
            .collect();
        Self {
            default_level: LogLevel::parse(&config.default_level).unwrap_or(LogLevel::Info),
            levels,
            max_count: config.max_rate_limit_count,
            window: Duration::from_secs(config.rate_limit_seconds),
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn threshold(&self, category: LogCategory) -> LogLevel {
        self.levels
            .get(&category)
            .copied()
            .unwrap_or(self.default_level)
    }

    pub fn is_enabled(&self, category: LogCategory, level: LogLevel) -> bool {
        level >= self.threshold(category)
    }

    fn admit_at(&self, category: LogCategory, now: Duration) -> bool {
        self.windows
            .lock()
            .entry(category)
            .or_insert_with(RateWindow::new)
            .admit(now, self.max_count, self.window)
    }

    /// Whether another rate-limited message of `category` may pass now.
    pub fn admit(&self, category: LogCategory) -> bool {
        self.admit_at(category, process_uptime())
    }

    /// Directive for `tracing_subscriber::EnvFilter`: the most verbose
    /// configured level, with taffy capped at warnings.
    pub fn env_filter_directive(&self) -> String {
        let most_verbose = self
            .levels
            .values()
            .copied()
            .fold(self.default_level, std::cmp::min);
        format!("{},taffy=warn", most_verbose)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn process_uptime() -> Duration {
    static START: OnceLock<std::time::Instant> = OnceLock::new();
    START.get_or_init(std::time::Instant::now).elapsed()
}

/// `Instant::now` panics on `wasm32-unknown-unknown`, so the browser build
/// reads the wall clock. A backwards step is clamped to the latest reading
/// instead of reopening every rate window.
#[cfg(target_arch = "wasm32")]
fn process_uptime() -> Duration {
    static START: OnceLock<chrono::DateTime<chrono::Utc>> = OnceLock::new();
    static LATEST: Mutex<Duration> = Mutex::new(Duration::ZERO);
    let start = *START.get_or_init(chrono::Utc::now);
    let now = (chrono::Utc::now() - start).to_std().unwrap_or_default();
    let mut latest = LATEST.lock();
    *latest = (*latest).max(now);
    *latest
}

static FILTER: OnceLock<CategoryFilter> = OnceLock::new();

/// Install the category filter and a `tracing-subscriber` formatter.
///
/// `RUST_LOG` overrides the configured levels at the subscriber. Calling this
/// twice keeps the first configuration and is not an error.
pub fn init(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = CategoryFilter::new(config);
    let directive = filter.env_filter_directive();
    if FILTER.set(filter).is_err() {
        return Ok(());
    }

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(directive))?;

    // An embedding application may already own the global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
    Ok(())
}

/// Install only the category filter, leaving the subscriber to the caller.
pub fn init_categories(config: &LoggingConfig) {
    let _ = FILTER.set(CategoryFilter::new(config));
}

/// Emit `message` if `category` passes its threshold and, when
/// `rate_limited`, its window. Without an installed filter everything passes
/// to the subscriber.
pub fn emit(level: LogLevel, category: LogCategory, message: std::fmt::Arguments<'_>, rate_limited: bool) {
    if let Some(filter) = FILTER.get() {
        if !filter.is_enabled(category, level) {
            return;
        }
        if rate_limited && !filter.admit(category) {
            return;
        }
    }

    let category = category.as_str();
    match level {
        LogLevel::Trace => tracing::trace!(category, "{}", message),
        LogLevel::Debug => tracing::debug!(category, "{}", message),
        LogLevel::Info => tracing::info!(category, "{}", message),
        LogLevel::Warn => tracing::warn!(category, "{}", message),
        LogLevel::Error => tracing::error!(category, "{}", message),
    }
}

#[macro_export]
macro_rules! bench_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Trace, $category, format_args!($($arg)*), false)
    };
}

#[macro_export]
macro_rules! bench_debug {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Debug, $category, format_args!($($arg)*), false)
    };
}

#[macro_export]
macro_rules! bench_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Info, $category, format_args!($($arg)*), false)
    };
}

#[macro_export]
macro_rules! bench_warn {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Warn, $category, format_args!($($arg)*), false)
    };
}

#[macro_export]
macro_rules! bench_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Error, $category, format_args!($($arg)*), false)
    };
}

/// Warning that is dropped once its category exceeds the configured rate.
#[macro_export]
macro_rules! bench_warn_rate_limited {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Warn, $category, format_args!($($arg)*), true)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(default_level: &str, levels: &[(&str, &str)]) -> LoggingConfig {
        LoggingConfig {
            default_level: default_level.to_string(),
            category_levels: levels
                .iter()
                .map(|(c, l)| (c.to_string(), l.to_string()))
                .collect(),
            rate_limit_seconds: 1,
            max_rate_limit_count: 2,
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(LogLevel::parse(" WARNING "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogCategory::parse("Runner"), Some(LogCategory::Runner));
        assert_eq!(LogCategory::parse("renderer"), None);
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
    }

    #[test]
    fn test_category_thresholds() {
        let filter = CategoryFilter::new(&config(
            "warn",
            &[("runner", "debug"), ("widgets", "trace"), ("style", "loud")],
        ));

        assert!(filter.is_enabled(LogCategory::Runner, LogLevel::Debug));
        assert!(!filter.is_enabled(LogCategory::Runner, LogLevel::Trace));
        assert!(!filter.is_enabled(LogCategory::Layout, LogLevel::Info));
        assert!(filter.is_enabled(LogCategory::Layout, LogLevel::Warn));
        // Unparseable entries fall back to the default.
        assert_eq!(filter.threshold(LogCategory::Style), LogLevel::Warn);
        assert_eq!(filter.env_filter_directive(), "debug,taffy=warn");
    }

    #[test]
    fn test_uptime_never_decreases() {
        let first = process_uptime();
        let second = process_uptime();
        assert!(second >= first);
    }

    #[test]
    fn test_rate_window() {
        let filter = CategoryFilter::new(&config("info", &[]));
        let t0 = Duration::from_millis(10);

        assert!(filter.admit_at(LogCategory::Layout, t0));
        assert!(filter.admit_at(LogCategory::Layout, t0 + Duration::from_millis(5)));
        assert!(!filter.admit_at(LogCategory::Layout, t0 + Duration::from_millis(900)));
        // Windows are per category.
        assert!(filter.admit_at(LogCategory::Style, t0 + Duration::from_millis(900)));
        // A new window opens after the configured interval.
        assert!(filter.admit_at(LogCategory::Layout, t0 + Duration::from_millis(1010)));
    }
}
