use futures::executor::block_on;
use layoutbench::layoutbench_platform::sim::{ImmediateScheduler, SteppingClock};
use layoutbench::prelude::*;

#[test]
fn prelude_is_enough_for_a_headless_run() {
    let mut config = BenchConfig::default();
    config.data.row_count = 8;
    config.run.iterations = 2;
    let host = TaffyHost::new(&config.viewport).unwrap();

    let app = BenchAppBuilder::new()
        .config(config)
        .build(host, SteppingClock::new(1.5), ImmediateScheduler)
        .unwrap();
    let result = block_on(app.trigger(LayoutKind::Table)).unwrap();

    assert_eq!(result.kind, LayoutKind::Table);
    assert_eq!(
        result.display_line(),
        "table Layout average resize time: 1.50ms"
    );
}

#[test]
fn version_is_set() {
    assert!(!layoutbench::VERSION.is_empty());
}
