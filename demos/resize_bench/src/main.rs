//! Native resize benchmark
//!
//! Runs the named layouts (all four when none are given) against the Taffy
//! host and prints one result line per run. Set `LAYOUTBENCH_CONFIG` to a RON
//! file to override row count, iterations or widths.
//!
//! ```text
//! cargo run -p resize_bench --release -- grid table
//! ```

use anyhow::{anyhow, Context, Result};
use layoutbench_core::{BenchConfig, LayoutKind};
use layoutbench_platform::desktop::desktop_app;

fn requested_kinds() -> Result<Vec<LayoutKind>> {
    let kinds = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<LayoutKind>().map_err(|e| anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;
    if kinds.is_empty() {
        return Ok(LayoutKind::ALL.to_vec());
    }
    Ok(kinds)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = BenchConfig::from_env().context("loading configuration")?;
    layoutbench_core::init(&config.logging)?;
    layoutbench_platform::init()?;

    let kinds = requested_kinds()?;
    let app = desktop_app(config)?;
    tracing::info!(
        "Benchmarking {} layouts over {} rows",
        kinds.len(),
        app.config().data.row_count
    );

    for kind in kinds {
        let result = app
            .trigger(kind)
            .await
            .with_context(|| format!("{} run failed", kind))?;
        println!("{}", result.display_line());
    }

    Ok(())
}
