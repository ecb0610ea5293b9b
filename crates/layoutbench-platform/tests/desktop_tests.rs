#![cfg(not(target_arch = "wasm32"))]

use layoutbench_core::{BenchConfig, BenchError, LayoutKind};
use layoutbench_platform::desktop::desktop_app;
use pretty_assertions::assert_eq;

fn small_config() -> BenchConfig {
    let mut config = BenchConfig::default();
    config.data.row_count = 10;
    config.run.iterations = 4;
    config
}

#[tokio::test(start_paused = true)]
async fn test_desktop_run_records_result() {
    let app = desktop_app(small_config()).unwrap();
    let start = tokio::time::Instant::now();

    let report = app.run(LayoutKind::Grid, 4).await.unwrap();

    assert_eq!(report.samples.len(), 4);
    assert!(report.result.average_ms >= 0.0);
    assert!(start.elapsed() >= app.config().run.settle_delay());
    assert_eq!(app.results().len(), 1);
    assert!(!app.is_testing());
}

#[tokio::test(start_paused = true)]
async fn test_desktop_runs_every_layout() {
    let app = desktop_app(small_config()).unwrap();
    for kind in LayoutKind::ALL {
        app.trigger(kind).await.unwrap();
    }

    let json = app.results_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(4));

    let lines = app.result_lines();
    assert!(lines[0].starts_with("grid Layout average resize time: "));
    assert!(lines[3].starts_with("flex Layout average resize time: "));
    assert!(lines.iter().all(|line| line.ends_with("ms")));
}

#[test]
fn test_desktop_app_requires_runtime() {
    let Err(err) = desktop_app(small_config()) else {
        panic!("called `Result::unwrap_err()` on an `Ok` value");
    };
    assert!(matches!(err, BenchError::Platform { .. }));
}
