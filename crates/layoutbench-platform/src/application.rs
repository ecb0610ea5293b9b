//! Benchmark application
//!
//! Ties the trigger surface (one action per layout) and the display surface
//! (result lines and the testing flag) to a [`RunController`].

use crate::controller::{RunController, RunReport, RunState};
use crate::results::{ResultsLog, TestResult};
use layoutbench_core::logging::LogCategory;
use layoutbench_core::{
    bench_error, bench_info, BenchConfig, BenchError, Clock, FrameScheduler, LayoutHost, LayoutKind,
    Result, RowSet, Signal,
};

/// A trigger on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerButton {
    pub label: &'static str,
    pub kind: LayoutKind,
}

/// Application builder
pub struct BenchAppBuilder {
    config: BenchConfig,
    rows: Option<RowSet>,
}

impl BenchAppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: BenchConfig::default(),
            rows: None,
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: BenchConfig) -> Self {
        self.config = config;
        self
    }

    /// Use pre-generated rows instead of generating them from the config
    pub fn rows(mut self, rows: RowSet) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Validate the configuration, generate rows once and build the application.
    pub fn build<H, C, S>(self, host: H, clock: C, scheduler: S) -> Result<BenchApp<H, C, S>>
    where
        H: LayoutHost,
        C: Clock,
        S: FrameScheduler,
    {
        self.config.validate()?;
        let rows = self
            .rows
            .unwrap_or_else(|| RowSet::generate(&self.config.data));
        bench_info!(
            LogCategory::Platform,
            "Generated {} rows x {} columns",
            rows.len(),
            rows.column_count()
        );

        let controller = RunController::new(host, clock, scheduler, rows, self.config.run.clone());
        let testing = controller.state().computed(RunState::is_testing);
        Ok(BenchApp {
            controller,
            testing,
            config: self.config,
        })
    }
}

impl Default for BenchAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application structure
pub struct BenchApp<H: LayoutHost, C: Clock, S: FrameScheduler> {
    controller: RunController<H, C, S>,
    testing: Signal<bool>,
    config: BenchConfig,
}

impl<H: LayoutHost, C: Clock, S: FrameScheduler> BenchApp<H, C, S> {
    pub fn builder() -> BenchAppBuilder {
        BenchAppBuilder::new()
    }

    /// Run `kind` with the configured iteration count.
    pub async fn trigger(&self, kind: LayoutKind) -> Result<TestResult> {
        self.run(kind, self.config.run.iterations)
            .await
            .map(|report| report.result)
    }

    /// Run `kind` with an explicit iteration count and keep the samples.
    pub async fn run(&self, kind: LayoutKind, iterations: usize) -> Result<RunReport> {
        self.controller.run(kind, iterations).await.inspect_err(|e| {
            if !matches!(e, BenchError::AlreadyRunning { .. }) {
                bench_error!(LogCategory::Runner, "{} run failed: {}", kind, e.format_for_log());
            }
        })
    }

    pub async fn test_grid_resizing(&self) -> Result<TestResult> {
        self.trigger(LayoutKind::Grid).await
    }

    pub async fn test_subgrid_resizing(&self) -> Result<TestResult> {
        self.trigger(LayoutKind::Subgrid).await
    }

    pub async fn test_table_resizing(&self) -> Result<TestResult> {
        self.trigger(LayoutKind::Table).await
    }

    pub async fn test_flex_resizing(&self) -> Result<TestResult> {
        self.trigger(LayoutKind::Flex).await
    }

    /// The four triggers in display order.
    pub fn buttons(&self) -> Vec<TriggerButton> {
        LayoutKind::ALL
            .iter()
            .map(|&kind| TriggerButton {
                label: kind.trigger_label(),
                kind,
            })
            .collect()
    }

    /// One line per completed run, oldest first.
    pub fn result_lines(&self) -> Vec<String> {
        self.controller.results().lines()
    }

    pub fn results(&self) -> &ResultsLog {
        self.controller.results()
    }

    pub fn results_json(&self) -> Result<String> {
        self.controller.results().to_json()
    }

    /// Whether a run is in progress; drives the full-screen overlay.
    pub fn is_testing(&self) -> bool {
        self.testing.get()
    }

    /// Observable testing flag.
    pub fn testing(&self) -> &Signal<bool> {
        &self.testing
    }

    pub fn run_state(&self) -> RunState {
        self.controller.state().get()
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn controller(&self) -> &RunController<H, C, S> {
        &self.controller
    }
}
