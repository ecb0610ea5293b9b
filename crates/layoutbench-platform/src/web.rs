//! WebAssembly platform implementation
//!
//! The DOM host builds real elements under a full-screen overlay, injects the
//! stylesheet as a `<style>` element and forces layout by reading
//! `offsetHeight`.

use crate::application::{BenchApp, BenchAppBuilder};
use crate::PlatformError;
use futures::future::{FutureExt, LocalBoxFuture};
use layoutbench_core::logging::LogCategory;
use layoutbench_core::style::inline_style_text;
use layoutbench_core::{
    bench_debug, bench_warn_rate_limited, BenchConfig, Clock, FrameScheduler, LayoutError,
    LayoutHost, LayoutResult, Result, Stylesheet, UiNode,
};
use std::collections::HashMap;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, Window as WebWindow};

/// Benchmark application wired for the browser.
pub type WebBenchApp = BenchApp<DomHost, PerformanceClock, AnimationFrameScheduler>;

const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("z-index", "100"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("overflow", "auto"),
    ("background", "white"),
];

fn web_window() -> std::result::Result<WebWindow, PlatformError> {
    web_sys::window().ok_or_else(|| PlatformError::Wasm("Failed to get window".to_string()))
}

fn document() -> std::result::Result<Document, PlatformError> {
    web_window()?
        .document()
        .ok_or_else(|| PlatformError::Wasm("Failed to get document".to_string()))
}

fn host_error(what: &str, err: wasm_bindgen::JsValue) -> LayoutError {
    LayoutError::Host(format!("{}: {:?}", what, err))
}

/// [`LayoutHost`] backed by the browser DOM.
pub struct DomHost {
    document: Document,
    overlay: Option<HtmlElement>,
    style: Option<Element>,
    elements: Vec<HtmlElement>,
    children: Vec<Vec<usize>>,
    refs: HashMap<String, usize>,
}

impl DomHost {
    pub fn new() -> std::result::Result<Self, PlatformError> {
        Ok(Self {
            document: document()?,
            overlay: None,
            style: None,
            elements: Vec::new(),
            children: Vec::new(),
            refs: HashMap::new(),
        })
    }

    fn create(&self, tag: &str) -> LayoutResult<HtmlElement> {
        self.document
            .create_element(tag)
            .map_err(|e| host_error("Failed to create element", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| LayoutError::Host(format!("<{}> is not an HTML element", tag)))
    }

    fn build(&mut self, node: &UiNode, parent: &HtmlElement, parent_index: Option<usize>) -> LayoutResult<()> {
        match node {
            UiNode::Element(el) => {
                let element = self.create(&el.tag)?;
                if !el.classes.is_empty() {
                    element.set_class_name(&el.classes.join(" "));
                }
                for (name, value) in &el.attributes {
                    element
                        .set_attribute(name, value)
                        .map_err(|e| host_error("Failed to set attribute", e))?;
                }
                if !el.style.is_empty() {
                    element
                        .set_attribute("style", &inline_style_text(&el.style))
                        .map_err(|e| host_error("Failed to set style", e))?;
                }
                parent
                    .append_child(&element)
                    .map_err(|e| host_error("Failed to append element", e))?;

                let index = self.elements.len();
                self.elements.push(element.clone());
                self.children.push(Vec::new());
                if let Some(parent_index) = parent_index {
                    self.children[parent_index].push(index);
                }
                if let Some(name) = &el.node_ref {
                    self.refs.insert(name.clone(), index);
                }
                for child in &el.children {
                    self.build(child, &element, Some(index))?;
                }
            }
            UiNode::Text(text) => {
                let text = self.document.create_text_node(text);
                parent
                    .append_child(&text)
                    .map_err(|e| host_error("Failed to append text", e))?;
            }
            UiNode::Fragment(children) => {
                for child in children {
                    self.build(child, parent, parent_index)?;
                }
            }
        }
        Ok(())
    }

    fn mount_into(&mut self, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()> {
        let style = self
            .document
            .create_element("style")
            .map_err(|e| host_error("Failed to create style", e))?;
        style.set_text_content(Some(&stylesheet.to_css()));
        let head = self
            .document
            .head()
            .ok_or_else(|| LayoutError::Host("No head element".to_string()))?;
        head.append_child(&style)
            .map_err(|e| host_error("Failed to inject style", e))?;
        self.style = Some(style);

        let overlay = self.create("div")?;
        let overlay_style = overlay.style();
        for (property, value) in OVERLAY_STYLE {
            overlay_style
                .set_property(property, value)
                .map_err(|e| host_error("Failed to style overlay", e))?;
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| LayoutError::Host("No body element".to_string()))?;
        body.append_child(&overlay)
            .map_err(|e| host_error("Failed to append overlay", e))?;
        self.overlay = Some(overlay.clone());

        self.build(tree, &overlay, None)
    }

    fn element(&self, handle: usize) -> LayoutResult<&HtmlElement> {
        self.elements
            .get(handle)
            .ok_or_else(|| LayoutError::UnknownElement(handle.to_string()))
    }
}

impl LayoutHost for DomHost {
    type Handle = usize;

    fn mount(&mut self, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()> {
        self.unmount();
        if let Err(e) = self.mount_into(tree, stylesheet) {
            self.unmount();
            return Err(e);
        }
        bench_debug!(LogCategory::Platform, "Mounted {} DOM elements", self.elements.len());
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
        if let Some(style) = self.style.take() {
            style.remove();
        }
        self.elements.clear();
        self.children.clear();
        self.refs.clear();
    }

    fn is_mounted(&self) -> bool {
        self.overlay.is_some()
    }

    fn find_ref(&self, name: &str) -> Option<usize> {
        self.refs.get(name).copied()
    }

    fn child(&self, handle: usize, index: usize) -> Option<usize> {
        self.children.get(handle)?.get(index).copied()
    }

    fn set_custom_property(&mut self, handle: usize, name: &str, value: &str) -> LayoutResult<()> {
        self.set_style_property(handle, name, value)
    }

    fn set_style_property(&mut self, handle: usize, property: &str, value: &str) -> LayoutResult<()> {
        self.element(handle)?
            .style()
            .set_property(property, value)
            .map_err(|e| host_error("Failed to set style property", e))
    }

    fn force_layout(&mut self, handle: usize) -> LayoutResult<f32> {
        if self.overlay.is_none() {
            return Err(LayoutError::NothingMounted);
        }
        Ok(self.element(handle)?.offset_height() as f32)
    }
}

/// `performance.now()` and `Date.now()`.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }

    fn epoch_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// `setTimeout` and `requestAnimationFrame` as futures.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimationFrameScheduler;

fn promise_future(promise: js_sys::Promise) -> LocalBoxFuture<'static, ()> {
    async move {
        if let Err(e) = JsFuture::from(promise).await {
            bench_warn_rate_limited!(LogCategory::Platform, "Scheduler promise rejected: {:?}", e);
        }
    }
    .boxed_local()
}

impl FrameScheduler for AnimationFrameScheduler {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let scheduled = web_window().map_err(|e| e.to_string()).and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .map_err(|e| format!("{:?}", e))
            });
            if let Err(message) = scheduled {
                let _ = reject.call1(&wasm_bindgen::JsValue::NULL, &message.into());
            }
        });
        promise_future(promise)
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let scheduled = web_window().map_err(|e| e.to_string()).and_then(|window| {
                window
                    .request_animation_frame(&resolve)
                    .map_err(|e| format!("{:?}", e))
            });
            if let Err(message) = scheduled {
                let _ = reject.call1(&wasm_bindgen::JsValue::NULL, &message.into());
            }
        });
        promise_future(promise)
    }
}

/// Build a browser benchmark application from `config`.
pub fn web_app(config: BenchConfig) -> Result<WebBenchApp> {
    let host = DomHost::new()?;
    BenchAppBuilder::new()
        .config(config)
        .build(host, PerformanceClock::new(), AnimationFrameScheduler)
}
