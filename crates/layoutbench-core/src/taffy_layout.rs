//! Taffy host
//!
//! Materialises an element tree into a Taffy tree and resolves the stylesheet
//! subset the benchmark layouts rely on.
//!
//! # Architecture
//!
//! ```text
//! UiNode tree + Stylesheet
//!       ↓
//! TaffyHost::mount()        cascade: tag defaults, author rules, inline
//!       ↓
//! ElementRecord per element (SlotMap) ──→ Taffy node
//!       ↓
//! set_custom_property / set_style_property
//!       ↓
//! restyle of the affected subtree (owning table for col mutations)
//!       ↓
//! force_layout(): compute_layout_with_measure() + ValidatedRect read-back
//! ```
//!
//! Taffy has no `display: contents`, subgrid or table layout. Subgrid rows
//! copy the resolved column tracks of their parent grid, and table rows are
//! grids adopting the column tracks derived from the table's `col` widths.
//!
//! # Thread Safety
//!
//! NOT thread-safe. The host is owned by the single-threaded run controller.

use crate::config::ViewportConfig;
use crate::css::{substitute_vars, ComputedStyle, Length, TemplateColumns, Track};
use crate::error::{LayoutError, LayoutResult, StyleError};
use crate::host::LayoutHost;
use crate::logging::LogCategory;
use crate::style::{user_agent_stylesheet, Declaration, Stylesheet};
use crate::ui_node::{ElementNode, UiNode};
use crate::validated_rect::ValidatedRect;
use crate::{bench_debug, bench_trace, bench_warn};

use slotmap::SlotMap;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use taffy::prelude::*;

#[cfg(feature = "perf-metrics")]
use std::time::{Duration, Instant};

slotmap::new_key_type! {
    /// Handle to an element mounted in a [`TaffyHost`].
    pub struct ElementKey;
}

// =============================================================================
// Text measurement
// =============================================================================

/// Fixed-metric text measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl From<&ViewportConfig> for TextMetrics {
    fn from(viewport: &ViewportConfig) -> Self {
        Self {
            char_width: viewport.char_width,
            line_height: viewport.line_height,
        }
    }
}

/// Measure context of a text leaf: character count of each word.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    words: SmallVec<[u16; 8]>,
}

impl TextBlock {
    pub fn new(text: &str) -> Self {
        Self {
            words: text
                .split_whitespace()
                .map(|w| w.chars().count().min(u16::MAX as usize) as u16)
                .collect(),
        }
    }

    fn max_content_chars(&self) -> usize {
        let letters: usize = self.words.iter().map(|w| *w as usize).sum();
        letters + self.words.len().saturating_sub(1)
    }

    fn longest_word(&self) -> usize {
        self.words.iter().copied().max().unwrap_or(0) as usize
    }

    /// Lines needed when greedily wrapping at `width`.
    pub fn line_count(&self, width: f32, metrics: TextMetrics) -> usize {
        if self.words.is_empty() {
            return 0;
        }
        let max_chars = if metrics.char_width > 0.0 {
            ((width / metrics.char_width).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = 1;
        let mut current = 0usize;
        for &word in &self.words {
            let word = word as usize;
            let needed = if current == 0 { word } else { current + 1 + word };
            if current > 0 && needed > max_chars {
                lines += 1;
                current = word;
            } else {
                current = needed;
            }
        }
        lines
    }

    /// Border-box size of the text under the given constraints.
    pub fn measure(
        &self,
        known: Size<Option<f32>>,
        available: Size<AvailableSpace>,
        metrics: TextMetrics,
    ) -> Size<f32> {
        let max_content = self.max_content_chars() as f32 * metrics.char_width;
        let min_content = self.longest_word() as f32 * metrics.char_width;

        let width = known.width.unwrap_or(match available.width {
            AvailableSpace::MinContent => min_content,
            AvailableSpace::MaxContent => max_content,
            AvailableSpace::Definite(w) => max_content.min(w).max(min_content),
        });
        let height = known
            .height
            .unwrap_or(self.line_count(width, metrics) as f32 * metrics.line_height);

        Size { width, height }
    }
}

// =============================================================================
// Element records
// =============================================================================

#[derive(Debug)]
struct ElementRecord {
    tag: String,
    node_ref: Option<String>,
    parent: Option<ElementKey>,
    children: Vec<ElementKey>,
    node: NodeId,
    /// Tag defaults and author rules, in cascade order.
    cascaded: Vec<Declaration>,
    inline: Vec<Declaration>,
    /// Custom properties declared on this element, after `var()` substitution.
    custom_props: SmallVec<[(String, String); 2]>,
    /// Column tracks this element lays its children out with.
    columns: Option<Arc<[Track]>>,
    style: ComputedStyle,
    /// Style depends on ancestor state (`var()` or inherited tracks).
    dependent: bool,
}

/// Performance metrics for the last restyle and layout.
#[cfg(feature = "perf-metrics")]
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    /// Time spent in the last restyle pass.
    pub restyle_time: Duration,
    /// Elements restyled by the last mutation.
    pub restyled_elements: usize,
    /// Time spent in the last `compute_layout` call.
    pub layout_compute_time: Duration,
}

// =============================================================================
// TaffyHost
// =============================================================================

/// [`LayoutHost`] backed by a Taffy tree.
///
/// # Example
///
/// ```rust
/// use layoutbench_core::prelude::*;
///
/// let mut host = TaffyHost::new(&ViewportConfig::default()).unwrap();
/// let sheet = Stylesheet::new().rule(
///     Selector::class("grid"),
///     &[("display", "grid"), ("grid-template-columns", "var(--w) 1fr"), ("--w", "100px")],
/// );
/// let tree: UiNode = UiNode::element("div")
///     .class("grid")
///     .node_ref("root")
///     .child(UiNode::element("div").text("a"))
///     .into();
///
/// host.mount(&tree, &sheet).unwrap();
/// let root = host.find_ref("root").unwrap();
/// host.set_custom_property(root, "--w", "150px").unwrap();
/// assert_eq!(host.force_layout(root).unwrap(), 20.0);
/// ```
pub struct TaffyHost {
    tree: TaffyTree<TextBlock>,
    elements: SlotMap<ElementKey, ElementRecord>,
    refs: HashMap<String, ElementKey>,
    roots: Vec<ElementKey>,
    body: Option<NodeId>,
    viewport: ViewportConfig,
    metrics: TextMetrics,
    user_agent: Stylesheet,

    #[cfg(feature = "perf-metrics")]
    perf: PerformanceMetrics,
}

impl TaffyHost {
    /// Create a host laying out into the given viewport.
    ///
    /// # Errors
    ///
    /// `LayoutError::InvalidViewport` if the width or height is not a positive
    /// finite number.
    pub fn new(viewport: &ViewportConfig) -> LayoutResult<Self> {
        if !viewport.width.is_finite()
            || !viewport.height.is_finite()
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return Err(LayoutError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Self {
            tree: TaffyTree::new(),
            elements: SlotMap::with_key(),
            refs: HashMap::new(),
            roots: Vec::new(),
            body: None,
            viewport: viewport.clone(),
            metrics: TextMetrics::from(viewport),
            user_agent: user_agent_stylesheet(),
            #[cfg(feature = "perf-metrics")]
            perf: PerformanceMetrics::default(),
        })
    }

    /// Number of mounted elements (text nodes excluded).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Tag name of a mounted element.
    pub fn tag(&self, handle: ElementKey) -> Option<&str> {
        self.elements.get(handle).map(|r| r.tag.as_str())
    }

    /// Computed style of a mounted element.
    pub fn computed_style(&self, handle: ElementKey) -> Option<&ComputedStyle> {
        self.elements.get(handle).map(|r| &r.style)
    }

    /// Current inline value of `property`.
    pub fn inline_style(&self, handle: ElementKey, property: &str) -> Option<&str> {
        self.elements.get(handle).and_then(|r| {
            r.inline
                .iter()
                .rev()
                .find(|d| d.property == property)
                .map(|d| d.value.as_str())
        })
    }

    /// Geometry of an element as of the last [`force_layout`](LayoutHost::force_layout).
    pub fn layout_of(&self, handle: ElementKey) -> LayoutResult<ValidatedRect> {
        let record = self.record(handle)?;
        let layout = self.tree.layout(record.node)?;
        ValidatedRect::from_taffy(layout).map_err(|e| {
            bench_debug!(LogCategory::Layout, "Invalid geometry for <{}>: {}", record.tag, e);
            LayoutError::InvalidGeometry {
                element: record.tag.clone(),
            }
        })
    }

    /// Get performance metrics (only available with `perf-metrics` feature).
    #[cfg(feature = "perf-metrics")]
    pub fn perf_metrics(&self) -> &PerformanceMetrics {
        &self.perf
    }

    fn record(&self, handle: ElementKey) -> LayoutResult<&ElementRecord> {
        self.elements
            .get(handle)
            .ok_or_else(|| LayoutError::UnknownElement(format!("{:?}", handle)))
    }

    // -------------------------------------------------------------------------
    // Mounting
    // -------------------------------------------------------------------------

    fn build(
        &mut self,
        node: &UiNode,
        parent: Option<ElementKey>,
        parent_node: NodeId,
        stylesheet: &Stylesheet,
    ) -> LayoutResult<()> {
        match node {
            UiNode::Element(element) => {
                let key = self.insert_element(element, parent, stylesheet)?;
                self.tree.add_child(parent_node, self.elements[key].node)?;
                match parent {
                    Some(parent) => self.elements[parent].children.push(key),
                    None => self.roots.push(key),
                }
                let node = self.elements[key].node;
                for child in &element.children {
                    self.build(child, Some(key), node, stylesheet)?;
                }
            }
            UiNode::Text(text) => {
                let leaf = self
                    .tree
                    .new_leaf_with_context(Style::default(), TextBlock::new(text))?;
                self.tree.add_child(parent_node, leaf)?;
            }
            UiNode::Fragment(children) => {
                for child in children {
                    self.build(child, parent, parent_node, stylesheet)?;
                }
            }
        }
        Ok(())
    }

    fn insert_element(
        &mut self,
        element: &ElementNode,
        parent: Option<ElementKey>,
        stylesheet: &Stylesheet,
    ) -> LayoutResult<ElementKey> {
        let cascaded: Vec<Declaration> = self
            .user_agent
            .matching(&element.tag, &element.classes)
            .chain(stylesheet.matching(&element.tag, &element.classes))
            .cloned()
            .collect();

        let node = self.tree.new_leaf(Style::default())?;
        let key = self.elements.insert(ElementRecord {
            tag: element.tag.clone(),
            node_ref: element.node_ref.clone(),
            parent,
            children: Vec::new(),
            node,
            cascaded,
            inline: element.style.clone(),
            custom_props: SmallVec::new(),
            columns: None,
            style: ComputedStyle::default(),
            dependent: false,
        });

        if let Some(name) = &element.node_ref {
            if self.refs.insert(name.clone(), key).is_some() {
                bench_debug!(LogCategory::Layout, "Ref '{}' mounted twice, keeping the last", name);
            }
        }
        Ok(key)
    }

    // -------------------------------------------------------------------------
    // Style resolution
    // -------------------------------------------------------------------------

    /// Custom property as seen from `start`, walking up the ancestors.
    fn lookup_var(&self, start: Option<ElementKey>, name: &str) -> Option<String> {
        let mut cursor = start;
        while let Some(key) = cursor {
            let record = &self.elements[key];
            if let Some((_, value)) = record.custom_props.iter().rev().find(|(n, _)| n == name) {
                return Some(value.clone());
            }
            cursor = record.parent;
        }
        None
    }

    /// Cascade and substitute the declarations of one element without
    /// touching the tree.
    fn resolve_style(
        &self,
        key: ElementKey,
    ) -> LayoutResult<(ComputedStyle, SmallVec<[(String, String); 2]>, bool)> {
        let record = self.record(key)?;
        let mut own: SmallVec<[(String, String); 2]> = SmallVec::new();
        let mut declarations = Vec::with_capacity(record.cascaded.len() + record.inline.len());
        let mut uses_var = false;

        for decl in record.cascaded.iter().chain(record.inline.iter()) {
            uses_var |= decl.uses_var();
            let value = {
                let lookup = |name: &str| {
                    own.iter()
                        .rev()
                        .find(|(n, _)| n == name)
                        .map(|(_, v)| v.clone())
                        .or_else(|| self.lookup_var(record.parent, name))
                };
                substitute_vars(&decl.value, &lookup)
            }
            .map_err(|source| self.style_error(record, source))?;

            if decl.is_custom_property() {
                own.push((decl.property.clone(), value));
            } else {
                declarations.push(Declaration::new(decl.property.clone(), value));
            }
        }

        let style = ComputedStyle::from_declarations(&declarations)
            .map_err(|source| self.style_error(record, source))?;
        Ok((style, own, uses_var))
    }

    fn style_error(&self, record: &ElementRecord, source: StyleError) -> LayoutError {
        LayoutError::Style {
            element: record.tag.clone(),
            source,
        }
    }

    fn owning_table(&self, key: ElementKey) -> Option<ElementKey> {
        let mut cursor = self.elements.get(key)?.parent;
        while let Some(current) = cursor {
            let record = &self.elements[current];
            if record.tag == "table" {
                return Some(current);
            }
            cursor = record.parent;
        }
        None
    }

    /// Column tracks of a table from the widths of its `col` elements.
    ///
    /// In the fixed algorithm an `auto` column takes the remaining space.
    fn table_columns(&self, table: ElementKey, fixed: bool) -> LayoutResult<Arc<[Track]>> {
        let mut tracks = Vec::new();
        self.collect_col_tracks(table, fixed, &mut tracks)?;
        Ok(tracks.into())
    }

    fn collect_col_tracks(
        &self,
        key: ElementKey,
        fixed: bool,
        tracks: &mut Vec<Track>,
    ) -> LayoutResult<()> {
        for &child in &self.record(key)?.children {
            match self.elements[child].tag.as_str() {
                "colgroup" => self.collect_col_tracks(child, fixed, tracks)?,
                "col" => {
                    let (style, _, _) = self.resolve_style(child)?;
                    tracks.push(match style.width {
                        Length::Px(v) => Track::Px(v),
                        Length::Percent(p) => Track::Percent(p),
                        Length::Auto if fixed => Track::Fr(1.0),
                        Length::Auto => Track::Auto,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn restyle_element(&mut self, key: ElementKey) -> LayoutResult<()> {
        let (style, custom_props, uses_var) = self.resolve_style(key)?;
        let record = &self.elements[key];

        let columns = if record.tag == "table" {
            Some(self.table_columns(key, style.table_layout_fixed)?)
        } else {
            match &style.template_columns {
                TemplateColumns::Tracks(tracks) => Some(Arc::from(tracks.as_slice())),
                TemplateColumns::Subgrid => record
                    .parent
                    .and_then(|parent| self.elements[parent].columns.clone()),
                TemplateColumns::TableColumns => self
                    .owning_table(key)
                    .and_then(|table| self.elements[table].columns.clone()),
                TemplateColumns::None => None,
            }
        };

        self.tree
            .set_style(record.node, style.to_taffy(columns.as_deref()))?;

        let record = &mut self.elements[key];
        record.dependent = uses_var || style.template_columns.is_inherited();
        record.custom_props = custom_props;
        record.columns = columns;
        record.style = style;
        Ok(())
    }

    /// Restyle `key` and every descendant whose style depends on it.
    fn restyle_subtree(&mut self, key: ElementKey) -> LayoutResult<usize> {
        let mut restyled = 0;
        let mut stack = vec![(key, true)];
        while let Some((current, force)) = stack.pop() {
            if force || self.elements[current].dependent {
                self.restyle_element(current)?;
                restyled += 1;
            }
            // Reverse so children are visited in document order.
            stack.extend(self.elements[current].children.iter().rev().map(|&c| (c, false)));
        }
        Ok(restyled)
    }

    /// Restyle after a mutation of `key`. Column mutations restyle the
    /// owning table so its rows pick up the new tracks.
    fn restyle_after_mutation(&mut self, key: ElementKey) -> LayoutResult<()> {
        #[cfg(feature = "perf-metrics")]
        let start = Instant::now();

        let scope = match self.elements[key].tag.as_str() {
            "col" | "colgroup" => self.owning_table(key).unwrap_or(key),
            _ => key,
        };
        let restyled = self.restyle_subtree(scope)?;
        bench_trace!(LogCategory::Style, "Restyled {} elements", restyled);

        #[cfg(feature = "perf-metrics")]
        {
            self.perf.restyle_time = start.elapsed();
            self.perf.restyled_elements = restyled;
        }
        Ok(())
    }

    fn set_inline(&mut self, handle: ElementKey, property: &str, value: &str) -> LayoutResult<()> {
        let record = self
            .elements
            .get_mut(handle)
            .ok_or_else(|| LayoutError::UnknownElement(format!("{:?}", handle)))?;

        let previous = match record.inline.iter_mut().find(|d| d.property == property) {
            Some(decl) => Some(std::mem::replace(&mut decl.value, value.to_string())),
            None => {
                record.inline.push(Declaration::new(property, value));
                None
            }
        };

        let Err(err) = self.restyle_after_mutation(handle) else {
            return Ok(());
        };

        // Roll back so a rejected value does not poison later mutations.
        let record = &mut self.elements[handle];
        match previous {
            Some(previous) => {
                if let Some(decl) = record.inline.iter_mut().find(|d| d.property == property) {
                    decl.value = previous;
                }
            }
            None => record.inline.retain(|d| d.property != property),
        }
        if let Err(restore) = self.restyle_after_mutation(handle) {
            bench_warn!(
                LogCategory::Style,
                "Restyle failed after rolling back '{}': {}",
                property,
                restore
            );
        }
        Err(err)
    }
}

impl LayoutHost for TaffyHost {
    type Handle = ElementKey;

    fn mount(&mut self, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()> {
        self.unmount();

        let body = self.tree.new_leaf(Style {
            display: Display::Block,
            size: Size {
                width: length(self.viewport.width),
                height: auto(),
            },
            ..Default::default()
        })?;
        self.body = Some(body);

        if let Err(e) = self.mount_into(body, tree, stylesheet) {
            self.unmount();
            return Err(e);
        }

        bench_debug!(
            LogCategory::Layout,
            "Mounted {} elements ({} refs)",
            self.elements.len(),
            self.refs.len()
        );
        Ok(())
    }

    fn unmount(&mut self) {
        if self.body.is_none() {
            return;
        }
        self.tree.clear();
        self.elements.clear();
        self.refs.clear();
        self.roots.clear();
        self.body = None;
        bench_trace!(LogCategory::Layout, "Unmounted element tree");
    }

    fn is_mounted(&self) -> bool {
        self.body.is_some()
    }

    fn find_ref(&self, name: &str) -> Option<ElementKey> {
        self.refs.get(name).copied()
    }

    fn child(&self, handle: ElementKey, index: usize) -> Option<ElementKey> {
        self.elements.get(handle)?.children.get(index).copied()
    }

    fn set_custom_property(&mut self, handle: ElementKey, name: &str, value: &str) -> LayoutResult<()> {
        if !name.starts_with("--") {
            return Err(LayoutError::Host(format!(
                "'{}' is not a custom property name",
                name
            )));
        }
        self.set_inline(handle, name, value)
    }

    fn set_style_property(&mut self, handle: ElementKey, property: &str, value: &str) -> LayoutResult<()> {
        self.set_inline(handle, property, value)
    }

    fn force_layout(&mut self, handle: ElementKey) -> LayoutResult<f32> {
        let body = self.body.ok_or(LayoutError::NothingMounted)?;
        let metrics = self.metrics;

        #[cfg(feature = "perf-metrics")]
        let start = Instant::now();

        let available = Size {
            width: AvailableSpace::Definite(self.viewport.width),
            height: AvailableSpace::MaxContent,
        };
        self.tree
            .compute_layout_with_measure(body, available, |known, available, _node, context| {
                match context {
                    Some(text) => text.measure(known, available, metrics),
                    None => Size::ZERO,
                }
            })
            .map_err(|e| LayoutError::ComputationFailed {
                reason: format!("{:?}", e),
            })?;

        #[cfg(feature = "perf-metrics")]
        {
            self.perf.layout_compute_time = start.elapsed();
        }

        Ok(self.layout_of(handle)?.offset_height())
    }
}

impl TaffyHost {
    fn mount_into(&mut self, body: NodeId, tree: &UiNode, stylesheet: &Stylesheet) -> LayoutResult<()> {
        self.build(tree, None, body, stylesheet)?;
        for i in 0..self.roots.len() {
            self.restyle_subtree(self.roots[i])?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for TaffyHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaffyHost")
            .field("mounted", &self.body.is_some())
            .field("elements", &self.elements.len())
            .field("refs", &self.refs.len())
            .field("viewport", &(self.viewport.width, self.viewport.height))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Selector;

    fn host(width: f32) -> TaffyHost {
        TaffyHost::new(&ViewportConfig {
            width,
            height: 600.0,
            char_width: 8.0,
            line_height: 20.0,
        })
        .unwrap()
    }

    fn cell(text: &str) -> UiNode {
        UiNode::element("div").text(text).into()
    }

    #[test]
    fn test_rejects_invalid_viewport() {
        let config = ViewportConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            TaffyHost::new(&config),
            Err(LayoutError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_text_wraps_to_width() {
        let text = TextBlock::new("aaaa bbbb");
        let metrics = TextMetrics {
            char_width: 8.0,
            line_height: 20.0,
        };
        assert_eq!(text.line_count(72.0, metrics), 1);
        assert_eq!(text.line_count(40.0, metrics), 2);
        assert_eq!(TextBlock::new("").line_count(10.0, metrics), 0);

        let size = text.measure(
            Size::NONE,
            Size {
                width: AvailableSpace::Definite(40.0),
                height: AvailableSpace::MaxContent,
            },
            metrics,
        );
        assert_eq!(size.width, 40.0);
        assert_eq!(size.height, 40.0);
    }

    #[test]
    fn test_custom_property_drives_grid_tracks() {
        let mut host = host(400.0);
        let sheet = Stylesheet::new().rule(
            Selector::class("grid"),
            &[
                ("display", "grid"),
                ("grid-template-columns", "var(--w) 1fr"),
                ("--w", "100px"),
            ],
        );
        let tree: UiNode = UiNode::element("div")
            .class("grid")
            .node_ref("root")
            .child(cell("ab"))
            .child(cell("cd"))
            .into();
        host.mount(&tree, &sheet).unwrap();

        let root = host.find_ref("root").unwrap();
        let first = host.child(root, 0).unwrap();
        let second = host.child(root, 1).unwrap();

        assert_eq!(host.force_layout(root).unwrap(), 20.0);
        assert_eq!(host.layout_of(first).unwrap().width(), 100.0);

        host.set_custom_property(root, "--w", "150px").unwrap();
        host.force_layout(root).unwrap();
        assert_eq!(host.layout_of(first).unwrap().width(), 150.0);
        assert_eq!(host.layout_of(second).unwrap().width(), 250.0);
        assert_eq!(host.inline_style(root, "--w"), Some("150px"));
    }

    #[test]
    fn test_subgrid_rows_follow_parent_template() {
        let mut host = host(400.0);
        let sheet = Stylesheet::new()
            .rule(
                Selector::class("outer"),
                &[("display", "grid"), ("grid-template-columns", "100px 1fr")],
            )
            .rule(
                Selector::class("row"),
                &[
                    ("display", "grid"),
                    ("grid-column", "1 / -1"),
                    ("grid-template-columns", "subgrid"),
                ],
            );
        let tree: UiNode = UiNode::element("div")
            .class("outer")
            .node_ref("root")
            .child(UiNode::element("div").class("row").child(cell("a")).child(cell("b")))
            .into();
        host.mount(&tree, &sheet).unwrap();

        let root = host.find_ref("root").unwrap();
        let row = host.child(root, 0).unwrap();
        let first = host.child(row, 0).unwrap();

        host.force_layout(root).unwrap();
        assert_eq!(host.layout_of(row).unwrap().width(), 400.0);
        assert_eq!(host.layout_of(first).unwrap().width(), 100.0);

        host.set_style_property(root, "grid-template-columns", "120px 1fr")
            .unwrap();
        host.force_layout(root).unwrap();
        assert_eq!(host.layout_of(first).unwrap().width(), 120.0);
    }

    #[test]
    fn test_col_width_restyles_table_rows() {
        let mut host = host(400.0);
        let tree: UiNode = UiNode::element("table")
            .node_ref("root")
            .style("table-layout", "fixed")
            .child(
                UiNode::element("colgroup")
                    .child(UiNode::element("col").style("width", "100px"))
                    .child(UiNode::element("col").style("width", "auto")),
            )
            .child(
                UiNode::element("tbody").child(
                    UiNode::element("tr")
                        .child(UiNode::element("td").text("a"))
                        .child(UiNode::element("td").text("b")),
                ),
            )
            .into();
        host.mount(&tree, &Stylesheet::new()).unwrap();

        let root = host.find_ref("root").unwrap();
        let col = host.child(host.child(root, 0).unwrap(), 0).unwrap();
        let row = host.child(host.child(root, 1).unwrap(), 0).unwrap();
        let td = host.child(row, 0).unwrap();
        assert_eq!(host.tag(col), Some("col"));

        // 20px line plus 1px padding above and below
        assert_eq!(host.force_layout(root).unwrap(), 22.0);
        assert_eq!(host.layout_of(td).unwrap().width(), 100.0);

        host.set_style_property(col, "width", "150px").unwrap();
        host.force_layout(root).unwrap();
        assert_eq!(host.layout_of(td).unwrap().width(), 150.0);
        assert_eq!(host.layout_of(host.child(row, 1).unwrap()).unwrap().width(), 250.0);
    }

    #[test]
    fn test_unresolved_var_fails_mount() {
        let mut host = host(400.0);
        let tree: UiNode = UiNode::element("div")
            .style("width", "var(--missing)")
            .into();
        let result = host.mount(&tree, &Stylesheet::new());
        assert!(matches!(result, Err(LayoutError::Style { .. })));
        assert!(!host.is_mounted());
    }

    #[test]
    fn test_unmount_invalidates_refs() {
        let mut host = host(400.0);
        let tree: UiNode = UiNode::element("div").node_ref("root").child(cell("x")).into();
        host.mount(&tree, &Stylesheet::new()).unwrap();
        assert!(host.is_mounted());
        assert_eq!(host.element_count(), 2);

        let root = host.find_ref("root").unwrap();
        host.unmount();
        assert!(host.find_ref("root").is_none());
        assert!(matches!(
            host.force_layout(root),
            Err(LayoutError::NothingMounted)
        ));
        assert!(host.set_custom_property(root, "--w", "1px").is_err());
    }

    #[test]
    fn test_custom_property_name_checked() {
        let mut host = host(400.0);
        let tree: UiNode = UiNode::element("div").node_ref("root").into();
        host.mount(&tree, &Stylesheet::new()).unwrap();
        let root = host.find_ref("root").unwrap();
        assert!(matches!(
            host.set_custom_property(root, "width", "1px"),
            Err(LayoutError::Host(_))
        ));
    }

    #[test]
    fn test_rejected_value_is_rolled_back() {
        let mut host = host(400.0);
        let sheet = Stylesheet::new().rule(Selector::class("grid"), &[("display", "grid")]);
        let tree: UiNode = UiNode::element("div")
            .class("grid")
            .node_ref("root")
            .child(cell("a"))
            .into();
        host.mount(&tree, &sheet).unwrap();
        let root = host.find_ref("root").unwrap();

        assert!(matches!(
            host.set_style_property(root, "width", "bogus"),
            Err(LayoutError::Style { .. })
        ));
        assert_eq!(host.inline_style(root, "width"), None);

        // Later mutations are unaffected.
        host.set_style_property(root, "grid-template-columns", "120px 1fr")
            .unwrap();
        host.set_style_property(root, "width", "300px").unwrap();
        assert!(host.set_style_property(root, "width", "wide").is_err());
        assert_eq!(host.inline_style(root, "width"), Some("300px"));

        host.force_layout(root).unwrap();
        assert_eq!(host.layout_of(root).unwrap().width(), 300.0);
    }
}
