//! Resize simulator
//!
//! A run mounts one layout, waits for it to settle, then resizes the first
//! column `iterations` times. Each resize is followed by a forced layout and
//! timed with the clock; the run yields to the scheduler for one frame between
//! iterations. Only one run may be active at a time.

use crate::results::{ResultsLog, TestResult};
use layoutbench_core::logging::LogCategory;
use layoutbench_core::{
    bench_debug, bench_info, bench_warn_rate_limited, BenchError, Clock, ErrorContext,
    FrameScheduler, LayoutHost, LayoutKind, Result, RowSet, RunConfig, Signal, Stylesheet,
};
use layoutbench_layouts::{bench_stylesheet, LayoutRenderer};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Whether a run is in progress, and for which layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Idle,
    Testing(LayoutKind),
}

impl RunState {
    pub fn is_testing(&self) -> bool {
        matches!(self, RunState::Testing(_))
    }

    pub fn active(&self) -> Option<LayoutKind> {
        match self {
            RunState::Testing(kind) => Some(*kind),
            RunState::Idle => None,
        }
    }
}

/// One timed resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeSample {
    pub iteration: usize,
    pub width_px: f32,
    pub duration_ms: f64,
}

/// Result of a completed run together with its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub result: TestResult,
    pub samples: Vec<ResizeSample>,
}

impl RunReport {
    pub fn durations(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.duration_ms)
    }
}

/// Width applied at iteration `i`: the widths cycle in order. `None` when
/// there are no widths.
pub fn width_for_iteration(widths: &[f32], i: usize) -> Option<f32> {
    widths.get(i.checked_rem(widths.len())?).copied()
}

/// Arithmetic mean, `0.0` for no samples.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Leaves the testing state and unmounts when the run ends, fails or is
/// dropped mid-flight.
struct RunGuard<'a, H: LayoutHost> {
    host: &'a RefCell<H>,
    state: &'a Signal<RunState>,
}

impl<H: LayoutHost> Drop for RunGuard<'_, H> {
    fn drop(&mut self) {
        match self.host.try_borrow_mut() {
            Ok(mut host) => host.unmount(),
            Err(_) => {
                bench_warn_rate_limited!(
                    LogCategory::Runner,
                    "Host busy while ending run, tree left mounted"
                );
            }
        }
        self.state.set(RunState::Idle);
    }
}

/// Drives benchmark runs on a host.
pub struct RunController<H: LayoutHost, C: Clock, S: FrameScheduler> {
    host: Rc<RefCell<H>>,
    clock: C,
    scheduler: S,
    rows: RowSet,
    stylesheet: Stylesheet,
    config: RunConfig,
    state: Signal<RunState>,
    results: ResultsLog,
}

impl<H: LayoutHost, C: Clock, S: FrameScheduler> RunController<H, C, S> {
    pub fn new(host: H, clock: C, scheduler: S, rows: RowSet, config: RunConfig) -> Self {
        let stylesheet = bench_stylesheet(rows.column_count());
        Self {
            host: Rc::new(RefCell::new(host)),
            clock,
            scheduler,
            rows,
            stylesheet,
            config,
            state: Signal::new(RunState::Idle),
            results: ResultsLog::new(),
        }
    }

    /// Observable run state.
    pub fn state(&self) -> &Signal<RunState> {
        &self.state
    }

    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    /// Shared handle to the host, for inspection between runs.
    pub fn host(&self) -> Rc<RefCell<H>> {
        Rc::clone(&self.host)
    }

    /// Run the resize benchmark for `kind`.
    ///
    /// # Errors
    ///
    /// - `BenchError::InvalidIterations` if `iterations` is zero
    /// - `BenchError::Configuration` if the run config has no resize widths
    /// - `BenchError::AlreadyRunning` if another run is active
    /// - `BenchError::RootNotMounted` if the root element cannot be resolved
    ///   after the settle delay
    /// - `BenchError::Layout` if the host fails to mount, mutate or lay out
    ///
    /// A failed run records nothing.
    pub async fn run(&self, kind: LayoutKind, iterations: usize) -> Result<RunReport> {
        if iterations == 0 {
            return Err(BenchError::InvalidIterations { iterations });
        }
        if self.config.resize_widths.is_empty() {
            return Err(BenchError::configuration_with_context(
                "run.resize_widths must not be empty",
                ErrorContext::new("run", "controller").with_metadata("layout", kind.as_str()),
            ));
        }

        let mut active = None;
        self.state.update_if(|state| match *state {
            RunState::Testing(current) => {
                active = Some(current);
                false
            }
            RunState::Idle => {
                *state = RunState::Testing(kind);
                true
            }
        });
        if let Some(active) = active {
            bench_debug!(LogCategory::Runner, "Rejected {} run, {} is active", kind, active);
            return Err(BenchError::AlreadyRunning { active });
        }

        let guard = RunGuard {
            host: &self.host,
            state: &self.state,
        };

        let renderer = LayoutRenderer::for_kind(kind);
        let tree = renderer.render(&self.rows);
        self.host.borrow_mut().mount(&tree, &self.stylesheet)?;
        drop(tree);

        bench_info!(
            LogCategory::Runner,
            "Starting {} resize test: {} iterations over {} rows",
            kind,
            iterations,
            self.rows.len()
        );

        self.scheduler.sleep(self.config.settle_delay()).await;

        let root = renderer
            .root_handle(&*self.host.borrow())
            .ok_or(BenchError::RootNotMounted { kind })?;

        let column_count = self.rows.column_count();
        let mut samples = Vec::with_capacity(iterations);
        let widths = self.config.resize_widths.iter().copied().cycle();
        for (iteration, width_px) in widths.take(iterations).enumerate() {
            let duration_ms = {
                let mut host = self.host.borrow_mut();
                let start = self.clock.now_ms();
                renderer.apply_resize(&mut *host, root, width_px, column_count)?;
                host.force_layout(root)?;
                self.clock.now_ms() - start
            };
            samples.push(ResizeSample {
                iteration,
                width_px,
                duration_ms,
            });

            self.scheduler.next_frame().await;
        }

        drop(guard);

        let durations: Vec<f64> = samples.iter().map(|s| s.duration_ms).collect();
        let result = self
            .results
            .record(kind, mean(&durations), self.clock.epoch_ms());
        bench_info!(LogCategory::Runner, "{}", result.display_line());

        Ok(RunReport { result, samples })
    }
}

impl<H: LayoutHost, C: Clock, S: FrameScheduler> std::fmt::Debug for RunController<H, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunController")
            .field("state", &self.state.get())
            .field("rows", &self.rows.len())
            .field("results", &self.results.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_cycle() {
        let widths = RunConfig::default().resize_widths;
        let cycle: Vec<f32> = (0..6)
            .filter_map(|i| width_for_iteration(&widths, i))
            .collect();
        assert_eq!(cycle, vec![150.0, 200.0, 250.0, 300.0, 150.0, 200.0]);
        assert_eq!(width_for_iteration(&widths, 50), Some(250.0));
        assert_eq!(width_for_iteration(&[], 3), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_run_state() {
        assert!(!RunState::Idle.is_testing());
        assert_eq!(RunState::Testing(LayoutKind::Table).active(), Some(LayoutKind::Table));
    }
}
