//! Resize simulator behaviour on the Taffy host with a stepping clock.

use futures::executor::block_on;
use layoutbench_core::{
    BenchConfig, BenchError, ElementKey, LayoutHost, LayoutKind, LayoutResult, RowSet, RunConfig,
    Stylesheet, TaffyHost, UiNode,
};
use layoutbench_platform::sim::{ImmediateScheduler, SteppingClock, YieldingScheduler};
use layoutbench_platform::{BenchApp, BenchAppBuilder, RunController, RunState};
use pretty_assertions::assert_eq;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::Context;

fn config(iterations: usize) -> BenchConfig {
    let mut config = BenchConfig::default();
    config.data.row_count = 20;
    config.run.iterations = iterations;
    config
}

fn taffy_host() -> TaffyHost {
    TaffyHost::new(&BenchConfig::default().viewport).unwrap()
}

fn app_with<H: LayoutHost>(host: H, step_ms: f64) -> BenchApp<H, SteppingClock, ImmediateScheduler> {
    BenchAppBuilder::new()
        .config(config(50))
        .build(
            host,
            SteppingClock::starting_at(step_ms, 1_700_000_000_000),
            ImmediateScheduler,
        )
        .unwrap()
}

/// Records every value written through the custom-property and style paths.
struct RecordingHost {
    inner: TaffyHost,
    writes: Vec<String>,
}

impl LayoutHost for RecordingHost {
    type Handle = ElementKey;

    fn mount(&mut self, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()> {
        self.inner.mount(tree, stylesheet)
    }
    fn unmount(&mut self) {
        self.inner.unmount()
    }
    fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }
    fn find_ref(&self, name: &str) -> Option<ElementKey> {
        self.inner.find_ref(name)
    }
    fn child(&self, handle: ElementKey, index: usize) -> Option<ElementKey> {
        self.inner.child(handle, index)
    }
    fn set_custom_property(&mut self, handle: ElementKey, name: &str, value: &str) -> LayoutResult<()> {
        self.writes.push(format!("{}={}", name, value));
        self.inner.set_custom_property(handle, name, value)
    }
    fn set_style_property(&mut self, handle: ElementKey, property: &str, value: &str) -> LayoutResult<()> {
        self.writes.push(format!("{}={}", property, value));
        self.inner.set_style_property(handle, property, value)
    }
    fn force_layout(&mut self, handle: ElementKey) -> LayoutResult<f32> {
        self.inner.force_layout(handle)
    }
}

/// Mounts normally but never resolves refs.
struct DetachedHost(TaffyHost);

impl LayoutHost for DetachedHost {
    type Handle = ElementKey;

    fn mount(&mut self, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()> {
        self.0.mount(tree, stylesheet)
    }
    fn unmount(&mut self) {
        self.0.unmount()
    }
    fn is_mounted(&self) -> bool {
        self.0.is_mounted()
    }
    fn find_ref(&self, _name: &str) -> Option<ElementKey> {
        None
    }
    fn child(&self, handle: ElementKey, index: usize) -> Option<ElementKey> {
        self.0.child(handle, index)
    }
    fn set_custom_property(&mut self, handle: ElementKey, name: &str, value: &str) -> LayoutResult<()> {
        self.0.set_custom_property(handle, name, value)
    }
    fn set_style_property(&mut self, handle: ElementKey, property: &str, value: &str) -> LayoutResult<()> {
        self.0.set_style_property(handle, property, value)
    }
    fn force_layout(&mut self, handle: ElementKey) -> LayoutResult<f32> {
        self.0.force_layout(handle)
    }
}

#[test]
fn test_single_grid_iteration_records_one_result() {
    let app = app_with(taffy_host(), 0.5);
    let report = block_on(app.run(LayoutKind::Grid, 1)).unwrap();

    assert_eq!(report.samples.len(), 1);
    assert_eq!(report.result.kind, LayoutKind::Grid);
    assert!(report.result.average_ms >= 0.0);
    assert_eq!(app.results().len(), 1);
    assert_eq!(app.run_state(), RunState::Idle);
}

#[test]
fn test_k_iterations_give_k_samples_and_their_mean() {
    let app = app_with(taffy_host(), 2.5);
    let report = block_on(app.run(LayoutKind::Subgrid, 7)).unwrap();

    assert_eq!(report.samples.len(), 7);
    assert!(report.durations().all(|d| d == 2.5));
    assert_eq!(report.result.average_ms, 2.5);
    assert_eq!(
        app.result_lines(),
        vec!["subgrid Layout average resize time: 2.50ms".to_string()]
    );
}

#[test]
fn test_widths_cycle_through_configured_sizes() {
    let host = RecordingHost {
        inner: taffy_host(),
        writes: Vec::new(),
    };
    let app = app_with(host, 1.0);
    let report = block_on(app.run(LayoutKind::Grid, 6)).unwrap();

    let widths: Vec<f32> = report.samples.iter().map(|s| s.width_px).collect();
    assert_eq!(widths, vec![150.0, 200.0, 250.0, 300.0, 150.0, 200.0]);

    let host = app.controller().host();
    let writes = host.borrow().writes.clone();
    assert_eq!(
        writes,
        vec![
            "--column-0-width=150px",
            "--column-0-width=200px",
            "--column-0-width=250px",
            "--column-0-width=300px",
            "--column-0-width=150px",
            "--column-0-width=200px",
        ]
    );
}

#[test]
fn test_each_layout_applies_its_own_mutation() {
    let host = RecordingHost {
        inner: taffy_host(),
        writes: Vec::new(),
    };
    let app = app_with(host, 1.0);
    for kind in LayoutKind::ALL {
        block_on(app.run(kind, 1)).unwrap();
    }

    let host = app.controller().host();
    let writes = host.borrow().writes.clone();
    assert_eq!(
        writes,
        vec![
            "--column-0-width=150px",
            "grid-template-columns=150px 1fr 1fr",
            "width=150px",
            "--column-0-width=150px",
        ]
    );
}

#[test]
fn test_sequential_runs_append_in_order() {
    let app = app_with(taffy_host(), 1.0);
    block_on(app.run(LayoutKind::Table, 2)).unwrap();
    block_on(app.run(LayoutKind::Flex, 2)).unwrap();

    let results = app.results().results();
    let kinds: Vec<LayoutKind> = results.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![LayoutKind::Table, LayoutKind::Flex]);
    assert!(results[0].timestamp_ms < results[1].timestamp_ms);
}

#[test]
fn test_zero_iterations_rejected_without_side_effects() {
    let app = app_with(taffy_host(), 1.0);
    let err = block_on(app.run(LayoutKind::Grid, 0)).unwrap_err();

    assert!(matches!(err, BenchError::InvalidIterations { iterations: 0 }));
    assert!(app.results().is_empty());
    assert!(!app.is_testing());
    assert!(!app.controller().host().borrow().is_mounted());
}

#[test]
fn test_controller_without_widths_reports_configuration_error() {
    let config = RunConfig {
        resize_widths: Vec::new(),
        ..RunConfig::default()
    };
    let controller = RunController::new(
        taffy_host(),
        SteppingClock::new(1.0),
        ImmediateScheduler,
        RowSet::new(3, 3),
        config,
    );

    let err = block_on(controller.run(LayoutKind::Grid, 1)).unwrap_err();
    assert!(matches!(err, BenchError::Configuration { .. }));
    assert_eq!(controller.state().get(), RunState::Idle);
    assert!(controller.results().is_empty());
    assert!(!controller.host().borrow().is_mounted());
}

#[test]
fn test_concurrent_run_is_rejected() {
    let app = BenchAppBuilder::new()
        .config(config(50))
        .build(taffy_host(), SteppingClock::new(1.0), YieldingScheduler)
        .unwrap();

    let mut first = Box::pin(app.run(LayoutKind::Grid, 2));
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert!(first.as_mut().poll(&mut cx).is_pending());
    assert_eq!(app.run_state(), RunState::Testing(LayoutKind::Grid));
    assert!(app.is_testing());

    let second = block_on(app.run(LayoutKind::Table, 1));
    assert!(matches!(
        second,
        Err(BenchError::AlreadyRunning {
            active: LayoutKind::Grid
        })
    ));
    assert_eq!(app.run_state(), RunState::Testing(LayoutKind::Grid));

    let report = block_on(first).unwrap();
    assert_eq!(report.samples.len(), 2);
    let kinds: Vec<LayoutKind> = app.results().results().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![LayoutKind::Grid]);
    assert!(!app.is_testing());
}

#[test]
fn test_unresolved_root_fails_without_result() {
    let app = app_with(DetachedHost(taffy_host()), 1.0);
    let err = block_on(app.run(LayoutKind::Flex, 3)).unwrap_err();

    assert!(matches!(
        err,
        BenchError::RootNotMounted {
            kind: LayoutKind::Flex
        }
    ));
    assert!(app.results().is_empty());
    assert_eq!(app.run_state(), RunState::Idle);
    assert!(!app.controller().host().borrow().is_mounted());

    // The guard released the run, so the next one may start.
    assert!(matches!(
        block_on(app.run(LayoutKind::Grid, 1)),
        Err(BenchError::RootNotMounted { .. })
    ));
}

#[test]
fn test_dropping_a_run_releases_it() {
    let app = BenchAppBuilder::new()
        .config(config(50))
        .build(taffy_host(), SteppingClock::new(1.0), YieldingScheduler)
        .unwrap();

    {
        let mut run = Box::pin(app.run(LayoutKind::Table, 3));
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(run.as_mut().poll(&mut cx).is_pending());
        assert!(app.controller().host().borrow().is_mounted());
    }

    assert_eq!(app.run_state(), RunState::Idle);
    assert!(!app.controller().host().borrow().is_mounted());
    assert!(app.results().is_empty());
}

#[test]
fn test_triggers_use_configured_iterations() {
    let app = BenchAppBuilder::new()
        .config(config(3))
        .build(taffy_host(), SteppingClock::new(4.0), ImmediateScheduler)
        .unwrap();
    let notified = Arc::new(AtomicUsize::new(0));
    let notified_clone = notified.clone();
    app.results().subscribe(move |results| {
        notified_clone.store(results.len(), Ordering::SeqCst);
    });

    let grid = block_on(app.test_grid_resizing()).unwrap();
    block_on(app.test_subgrid_resizing()).unwrap();
    block_on(app.test_table_resizing()).unwrap();
    block_on(app.test_flex_resizing()).unwrap();

    assert_eq!(grid.average_ms, 4.0);
    assert_eq!(notified.load(Ordering::SeqCst), 4);
    assert_eq!(
        app.result_lines(),
        vec![
            "grid Layout average resize time: 4.00ms",
            "subgrid Layout average resize time: 4.00ms",
            "table Layout average resize time: 4.00ms",
            "flex Layout average resize time: 4.00ms",
        ]
    );
}

#[test]
fn test_buttons_cover_every_layout() {
    let app = app_with(taffy_host(), 1.0);
    let labels: Vec<&str> = app.buttons().iter().map(|b| b.label).collect();
    assert_eq!(
        labels,
        vec![
            "Test Grid Resizing",
            "Test Sub Grid Resizing",
            "Test Table Resizing",
            "Test Flex Resizing",
        ]
    );
}

#[test]
fn test_invalid_config_rejected_at_build() {
    let mut config = config(50);
    config.run.resize_widths.clear();
    let result = BenchAppBuilder::new().config(config).build(
        taffy_host(),
        SteppingClock::new(1.0),
        ImmediateScheduler,
    );
    assert!(matches!(result, Err(BenchError::Configuration { .. })));
}
