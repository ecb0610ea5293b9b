//! Desktop platform implementation
//!
//! Runs the benchmark natively against the Taffy host, with `Instant` for
//! timing and tokio timers standing in for animation frames.

use crate::application::{BenchApp, BenchAppBuilder};
use crate::PlatformError;
use futures::future::{FutureExt, LocalBoxFuture};
use layoutbench_core::logging::LogCategory;
use layoutbench_core::{bench_debug, BenchConfig, Clock, FrameScheduler, Result, TaffyHost};
use std::time::{Duration, Instant};

/// Benchmark application wired for native runs.
pub type DesktopBenchApp = BenchApp<TaffyHost, SystemClock, TokioFrameScheduler>;

/// Monotonic clock anchored at creation, plus the system wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn epoch_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Frame pacing on tokio timers.
#[derive(Debug, Clone, Copy)]
pub struct TokioFrameScheduler {
    frame_interval: Duration,
}

impl TokioFrameScheduler {
    pub fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }

    /// Scheduler ticking at `frame_rate` frames per second.
    pub fn with_frame_rate(frame_rate: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1))))
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }
}

impl FrameScheduler for TokioFrameScheduler {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(self.frame_interval).boxed_local()
    }
}

/// Build a native benchmark application from `config`.
///
/// Must be called from within a tokio runtime; the scheduler's timers are
/// registered with it.
pub fn desktop_app(config: BenchConfig) -> Result<DesktopBenchApp> {
    tokio::runtime::Handle::try_current()
        .map_err(|e| PlatformError::Initialization(format!("No tokio runtime: {}", e)))?;
    let host = TaffyHost::new(&config.viewport)?;
    let scheduler = TokioFrameScheduler::new(config.run.frame_interval());
    bench_debug!(
        LogCategory::Platform,
        "Desktop scheduler at {:?} per frame",
        scheduler.frame_interval()
    );
    BenchAppBuilder::new()
        .config(config)
        .build(host, SystemClock::new(), scheduler)
}
