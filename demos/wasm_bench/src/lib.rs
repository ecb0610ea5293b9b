//! LayoutBench in the browser
//!
//! Exposes the four resize triggers and the results list to JavaScript. Each
//! trigger returns a promise resolving to the result line of the run.
//!
//! ```js
//! import init, { WasmBench } from "./layoutbench_wasm.js";
//! await init();
//! const bench = new WasmBench();
//! console.log(await bench.testGridResizing());
//! ```
#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Promise};
use layoutbench_core::{BenchConfig, BenchError, LayoutKind, LoggingConfig};
use layoutbench_platform::web::{web_app, WebBenchApp};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

fn to_js(err: BenchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    layoutbench_core::logging::init_categories(&LoggingConfig::default());
    tracing::info!("LayoutBench v{} loaded", layoutbench_core::VERSION);
    Ok(())
}

#[wasm_bindgen]
pub struct WasmBench {
    app: Rc<WebBenchApp>,
}

#[wasm_bindgen]
impl WasmBench {
    /// Create a bench with the default 10 000 rows and 50 iterations.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmBench, JsValue> {
        Self::build(BenchConfig::default())
    }

    /// Create a bench from a RON configuration string.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(ron: &str) -> Result<WasmBench, JsValue> {
        Self::build(BenchConfig::from_ron_str(ron).map_err(to_js)?)
    }

    fn build(config: BenchConfig) -> Result<WasmBench, JsValue> {
        let app = web_app(config).map_err(to_js)?;
        Ok(WasmBench { app: Rc::new(app) })
    }

    fn trigger(&self, kind: LayoutKind) -> Promise {
        let app = Rc::clone(&self.app);
        future_to_promise(async move {
            let result = app.trigger(kind).await.map_err(to_js)?;
            Ok(JsValue::from_str(&result.display_line()))
        })
    }

    #[wasm_bindgen(js_name = testGridResizing)]
    pub fn test_grid_resizing(&self) -> Promise {
        self.trigger(LayoutKind::Grid)
    }

    #[wasm_bindgen(js_name = testSubgridResizing)]
    pub fn test_subgrid_resizing(&self) -> Promise {
        self.trigger(LayoutKind::Subgrid)
    }

    #[wasm_bindgen(js_name = testTableResizing)]
    pub fn test_table_resizing(&self) -> Promise {
        self.trigger(LayoutKind::Table)
    }

    #[wasm_bindgen(js_name = testFlexResizing)]
    pub fn test_flex_resizing(&self) -> Promise {
        self.trigger(LayoutKind::Flex)
    }

    /// Labels of the four triggers, in display order.
    pub fn buttons(&self) -> Array {
        self.app
            .buttons()
            .iter()
            .map(|button| JsValue::from_str(button.label))
            .collect()
    }

    /// Result lines, oldest first.
    pub fn results(&self) -> Array {
        self.app
            .result_lines()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    #[wasm_bindgen(js_name = resultsJson)]
    pub fn results_json(&self) -> Result<String, JsValue> {
        self.app.results_json().map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn testing(&self) -> bool {
        self.app.is_testing()
    }
}
