//! Deterministic clock and schedulers
//!
//! Headless runs and tests drive the controller with these instead of wall
//! time: the clock advances by a fixed step on every read and the schedulers
//! never wait for real time.

use futures::future::{FutureExt, LocalBoxFuture};
use layoutbench_core::{Clock, FrameScheduler};
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Clock that advances `step_ms` on every `now_ms` read.
///
/// A resize measured between two reads therefore takes exactly `step_ms`.
#[derive(Debug)]
pub struct SteppingClock {
    now: Cell<f64>,
    step_ms: f64,
    epoch: Cell<i64>,
}

impl SteppingClock {
    pub fn new(step_ms: f64) -> Self {
        Self::starting_at(step_ms, 0)
    }

    /// Start the wall clock at `epoch_ms`; each `epoch_ms` read advances it by one.
    pub fn starting_at(step_ms: f64, epoch_ms: i64) -> Self {
        Self {
            now: Cell::new(0.0),
            step_ms,
            epoch: Cell::new(epoch_ms),
        }
    }

    /// Change the step applied by subsequent reads.
    pub fn set_step(&mut self, step_ms: f64) {
        self.step_ms = step_ms;
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }

    fn epoch_ms(&self) -> i64 {
        let epoch = self.epoch.get();
        self.epoch.set(epoch + 1);
        epoch
    }
}

/// Scheduler whose waits complete immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl FrameScheduler for ImmediateScheduler {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        futures::future::ready(()).boxed_local()
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        futures::future::ready(()).boxed_local()
    }
}

/// Scheduler whose waits suspend once before completing.
///
/// Lets a caller observe a run while it is parked at a suspension point.
#[derive(Debug, Default, Clone, Copy)]
pub struct YieldingScheduler;

impl FrameScheduler for YieldingScheduler {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        YieldOnce::default().boxed_local()
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        YieldOnce::default().boxed_local()
    }
}

#[derive(Debug, Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
