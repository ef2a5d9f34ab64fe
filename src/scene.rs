//! Output scene graph
//!
//! The renderer builds a tree of [`Element`] values mirroring the SVG it
//! describes: groups, paths, marker primitives and text. Serialization to
//! bytes belongs to the consumer; [`Element::outline`] prints a readable
//! indented dump for debugging.

use std::fmt::Write as _;

use crate::style::Style;

/// Named sub-groups of a rendered tree mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneGroup {
    /// The top-level group of one tree mark
    Mark,
    Edges,
    AlignEdges,
    AdmixEdges,
    Nodes,
    NodeLabels,
    TipLabels,
}

impl SceneGroup {
    pub fn name(&self) -> &'static str {
        match self {
            SceneGroup::Mark => "mark-Toytree",
            SceneGroup::Edges => "Edges",
            SceneGroup::AlignEdges => "AlignEdges",
            SceneGroup::AdmixEdges => "AdmixEdges",
            SceneGroup::Nodes => "Nodes",
            SceneGroup::NodeLabels => "NodeLabels",
            SceneGroup::TipLabels => "TipLabels",
        }
    }

    /// Class attribute value under a prefix such as `"toytree-"`
    pub fn class(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.name())
    }
}

/// A node in the output scene graph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// A `g` element
    pub fn group() -> Self {
        Self::new("g")
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set `style` from a style dictionary, leaving it unset when empty
    pub fn with_style(mut self, style: &Style) -> Self {
        if !style.is_empty() {
            self.set_attr("style", style.to_css());
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing any previous value in place
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The parsed `style` attribute
    pub fn style(&self) -> Style {
        self.attr("style").map(Style::from_css).unwrap_or_default()
    }

    /// Append a child and return a handle to it
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// First element in this subtree (including self) with the given class
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.attr("class") == Some(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_class(class))
    }

    /// First element in this subtree with the given id
    pub fn find_id(&self, id: &str) -> Option<&Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_id(id))
    }

    /// Number of elements in this subtree (including self) with the given tag
    pub fn count(&self, tag: &str) -> usize {
        let own = usize::from(self.tag == tag);
        own + self.children.iter().map(|c| c.count(tag)).sum::<usize>()
    }

    /// Indented one-line-per-element dump of the subtree
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{}{}", "  ".repeat(depth), self.tag);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, v);
        }
        if let Some(text) = &self.text {
            let _ = write!(out, " {:?}", text);
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}
