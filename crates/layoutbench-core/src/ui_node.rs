use crate::style::Declaration;

/// A node in the element tree a renderer produces.
/// The tree only describes the document; a [`LayoutHost`](crate::host::LayoutHost)
/// materialises it.
#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    /// An element with a tag, classes, attributes, inline style and children.
    Element(ElementNode),
    /// A text node.
    Text(String),
    /// A container for multiple nodes, flattened into the parent on mount.
    Fragment(Vec<UiNode>),
}

/// Description of an element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    /// Tag name (e.g., "div", "table", "col").
    pub tag: String,
    pub classes: Vec<String>,
    /// Attributes other than `class` and `style` (e.g., `role`).
    pub attributes: Vec<(String, String)>,
    /// Inline style declarations.
    pub style: Vec<Declaration>,
    /// Ref name the element can be looked up by after mount.
    pub node_ref: Option<String>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn element(tag: impl Into<String>) -> ElementNode {
        ElementNode {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        UiNode::Text(text.into())
    }

    /// Number of element nodes in this subtree.
    pub fn element_count(&self) -> usize {
        match self {
            UiNode::Element(el) => 1 + el.children.iter().map(UiNode::element_count).sum::<usize>(),
            UiNode::Text(_) => 0,
            UiNode::Fragment(children) => children.iter().map(UiNode::element_count).sum(),
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            UiNode::Text(text) => out.push_str(text),
            UiNode::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            UiNode::Fragment(children) => children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            UiNode::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl ElementNode {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push(Declaration::new(property, value));
        self
    }

    pub fn node_ref(mut self, name: impl Into<String>) -> Self {
        self.node_ref = Some(name.into());
        self
    }

    pub fn child(mut self, node: impl Into<UiNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = UiNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(UiNode::text(text))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Element children, skipping text nodes and flattening fragments.
    pub fn element_children(&self) -> Vec<&ElementNode> {
        fn walk<'a>(nodes: &'a [UiNode], out: &mut Vec<&'a ElementNode>) {
            for node in nodes {
                match node {
                    UiNode::Element(el) => out.push(el),
                    UiNode::Fragment(children) => walk(children, out),
                    UiNode::Text(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }
}

impl From<ElementNode> for UiNode {
    fn from(el: ElementNode) -> Self {
        UiNode::Element(el)
    }
}

impl From<String> for UiNode {
    fn from(v: String) -> Self {
        UiNode::Text(v)
    }
}

impl From<&str> for UiNode {
    fn from(v: &str) -> Self {
        UiNode::Text(v.to_string())
    }
}
