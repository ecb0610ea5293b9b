//! Results accumulator
//!
//! Completed runs are appended in completion order and never removed. The
//! list lives in a [`Signal`] so display surfaces re-render on every append.

use chrono::{DateTime, Utc};
use layoutbench_core::{BenchError, ErrorContext, LayoutKind, Result, Signal};
use serde::{Deserialize, Serialize};

/// Outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub kind: LayoutKind,
    /// Mean duration of one resize plus forced layout, in milliseconds.
    pub average_ms: f64,
    /// Completion time in milliseconds since the Unix epoch. Unique per log.
    pub timestamp_ms: i64,
}

impl TestResult {
    /// Display line, e.g. `grid Layout average resize time: 12.35ms`.
    pub fn display_line(&self) -> String {
        format!(
            "{} Layout average resize time: {:.2}ms",
            self.kind, self.average_ms
        )
    }

    /// Completion time as a UTC date.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// Append-only list of results.
#[derive(Debug, Clone, Default)]
pub struct ResultsLog {
    entries: Signal<Vec<TestResult>>,
}

impl ResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result stamped `epoch_ms`.
    ///
    /// Two runs finishing in the same millisecond would share a key, so the
    /// stamp is bumped past the previous one when needed.
    pub fn record(&self, kind: LayoutKind, average_ms: f64, epoch_ms: i64) -> TestResult {
        let mut recorded = None;
        self.entries.update(|entries| {
            let timestamp_ms = match entries.last() {
                Some(last) if last.timestamp_ms >= epoch_ms => last.timestamp_ms + 1,
                _ => epoch_ms,
            };
            let result = TestResult {
                kind,
                average_ms,
                timestamp_ms,
            };
            entries.push(result.clone());
            recorded = Some(result);
        });
        recorded.unwrap_or(TestResult {
            kind,
            average_ms,
            timestamp_ms: epoch_ms,
        })
    }

    /// Snapshot of all results in completion order.
    pub fn results(&self) -> Vec<TestResult> {
        self.entries.get()
    }

    pub fn len(&self) -> usize {
        self.entries.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One display line per result.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .with(|entries| entries.iter().map(TestResult::display_line).collect())
    }

    /// Results as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        self.entries.with(|entries| {
            serde_json::to_string(entries).map_err(|e| {
                BenchError::platform_with_context(
                    format!("Failed to serialize results: {}", e),
                    ErrorContext::new("to_json", "results"),
                )
            })
        })
    }

    /// Call `f` with the full list after every append.
    pub fn subscribe(&self, f: impl Fn(&[TestResult]) + Send + Sync + 'static) {
        self.entries.subscribe(move |entries: &Vec<TestResult>| f(entries));
    }
}
