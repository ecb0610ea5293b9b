//! Stylesheets and declarations
//!
//! A [`Stylesheet`] is an ordered list of single-selector rules. The same
//! sheet is injected into a browser as CSS text and cascaded by the Taffy host.

use std::fmt;

/// A `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// `--*` declarations define inherited custom properties.
    #[inline]
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--")
    }

    /// Whether the value references a custom property.
    #[inline]
    pub fn uses_var(&self) -> bool {
        self.value.contains("var(")
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

/// Render declarations as an inline `style` attribute value.
pub fn inline_style_text(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Simple selector: one tag name or one class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
}

impl Selector {
    pub fn tag(name: impl Into<String>) -> Self {
        Selector::Tag(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    /// Whether an element with `tag` and `classes` matches.
    pub fn matches<S: AsRef<str>>(&self, tag: &str, classes: &[S]) -> bool {
        match self {
            Selector::Tag(t) => t.eq_ignore_ascii_case(tag),
            Selector::Class(c) => classes.iter().any(|cls| cls.as_ref() == c),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(t) => f.write_str(t),
            Selector::Class(c) => write!(f, ".{}", c),
        }
    }
}

/// A selector and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: Selector,
    pub declarations: Vec<Declaration>,
}

/// Ordered list of style rules; later rules win on conflicts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn rule(mut self, selector: Selector, declarations: &[(&str, &str)]) -> Self {
        self.rules.push(StyleRule {
            selector,
            declarations: declarations
                .iter()
                .map(|(p, v)| Declaration::new(*p, *v))
                .collect(),
        });
        self
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Declarations of every matching rule, in cascade order.
    pub fn matching<'a, S: AsRef<str>>(
        &'a self,
        tag: &'a str,
        classes: &'a [S],
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.selector.matches(tag, classes))
            .flat_map(|rule| rule.declarations.iter())
    }

    /// Serialize as CSS text for injection into a document.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for rule in &self.rules {
            css.push_str(&rule.selector.to_string());
            css.push_str(" {\n");
            for decl in &rule.declarations {
                css.push_str("  ");
                css.push_str(&decl.to_string());
                css.push_str(";\n");
            }
            css.push_str("}\n");
        }
        css
    }
}

/// Tag defaults the Taffy host applies before author rules.
///
/// Tables have no native Taffy display mode: a table is a column of rows and
/// each `tr` is a grid adopting the table's column tracks.
pub fn user_agent_stylesheet() -> Stylesheet {
    Stylesheet::new()
        .rule(Selector::tag("div"), &[("display", "block")])
        .rule(
            Selector::tag("table"),
            &[("display", "flex"), ("flex-direction", "column")],
        )
        .rule(Selector::tag("colgroup"), &[("display", "none")])
        .rule(Selector::tag("col"), &[("display", "none")])
        .rule(
            Selector::tag("thead"),
            &[("display", "flex"), ("flex-direction", "column")],
        )
        .rule(
            Selector::tag("tbody"),
            &[("display", "flex"), ("flex-direction", "column")],
        )
        .rule(
            Selector::tag("tr"),
            &[("display", "grid"), ("grid-template-columns", "table-columns")],
        )
        .rule(Selector::tag("th"), &[("display", "block"), ("padding", "1px")])
        .rule(Selector::tag("td"), &[("display", "block"), ("padding", "1px")])
}
