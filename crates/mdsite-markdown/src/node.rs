//! HTML document tree node model.
//!
//! [`HtmlNode`] is a closed sum of two variants: [`LeafNode`] for raw text
//! or a single element with text content, and [`ParentNode`] for an element
//! containing other nodes. Rendering validates shape: a leaf must carry a
//! value, a parent must carry a tag and a children sequence (an *empty*
//! sequence is fine, an *absent* one is not). Attributes preserve insertion
//! order because it affects the serialized output.

use std::fmt::Write;

use crate::inline::{SpanKind, TextRun};

/// A node in the rendered document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HtmlNode {
    /// Raw text or a single element with text content.
    Leaf(LeafNode),
    /// An element containing other nodes.
    Parent(ParentNode),
}

/// Raw text (no tag) or a single HTML element with text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeafNode {
    /// Element tag; `None` or empty renders the value as raw text.
    pub tag: Option<String>,
    /// Text content. Required at render time; empty string is valid.
    pub value: Option<String>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
}

/// An HTML element containing child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParentNode {
    /// Element tag. Required at render time.
    pub tag: Option<String>,
    /// Child nodes in document order. Required at render time; an empty
    /// sequence renders as an empty element.
    pub children: Option<Vec<HtmlNode>>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
}

/// Error returned when a node has an invalid shape at render time.
///
/// These indicate a tree-construction defect, not a markdown input error;
/// the tree builder never produces such nodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A leaf node was rendered without a value.
    #[error("leaf node has no value")]
    MissingValue,
    /// A parent node was rendered without a tag.
    #[error("parent node has no tag")]
    MissingTag,
    /// A parent node was rendered without a children sequence.
    #[error("parent node has no children")]
    MissingChildren,
}

impl HtmlNode {
    /// Serialize the node (and its subtree) to an HTML string.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            Self::Leaf(leaf) => leaf.render(),
            Self::Parent(parent) => parent.render(),
        }
    }

    /// The node's element tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.tag.as_deref(),
            Self::Parent(parent) => parent.tag.as_deref(),
        }
    }

    /// The node's text content without any markup.
    ///
    /// For a leaf this is the raw value; for a parent, the concatenation
    /// of every child's text content in order.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Leaf(leaf) => leaf.value.clone().unwrap_or_default(),
            Self::Parent(parent) => parent
                .children
                .iter()
                .flatten()
                .map(Self::text_content)
                .collect(),
        }
    }
}

impl LeafNode {
    /// Create a tagged leaf.
    #[must_use]
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    /// Create a tagless leaf that renders as raw text.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    /// Append an attribute, preserving insertion order.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Render the leaf to an HTML string.
    ///
    /// A tagless leaf renders its value verbatim, ignoring attributes.
    pub fn render(&self) -> Result<String, RenderError> {
        let value = self.value.as_ref().ok_or(RenderError::MissingValue)?;
        match self.tag.as_deref() {
            None | Some("") => Ok(value.clone()),
            Some(tag) => Ok(format!(
                "<{tag}{}>{value}</{tag}>",
                render_attrs(&self.attrs)
            )),
        }
    }
}

impl ParentNode {
    /// Create a parent element with the given children.
    #[must_use]
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children: Some(children),
            attrs: Vec::new(),
        }
    }

    /// Append an attribute, preserving insertion order.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Render the element and all children, recursively.
    pub fn render(&self) -> Result<String, RenderError> {
        let tag = match self.tag.as_deref() {
            None | Some("") => return Err(RenderError::MissingTag),
            Some(tag) => tag,
        };
        let children = self.children.as_ref().ok_or(RenderError::MissingChildren)?;

        let mut html = format!("<{tag}{}>", render_attrs(&self.attrs));
        for child in children {
            html.push_str(&child.render()?);
        }
        let _ = write!(html, "</{tag}>");
        Ok(html)
    }
}

/// Convert an inline run to its leaf node.
///
/// Plain runs become tagless raw text; links carry an `href` attribute and
/// images render as an empty-valued `img` with `src` and `alt`.
impl From<&TextRun> for LeafNode {
    fn from(run: &TextRun) -> Self {
        let url = || run.url.clone().unwrap_or_default();
        match run.kind {
            SpanKind::Plain => Self::text(&run.text),
            SpanKind::Bold => Self::new("b", &run.text),
            SpanKind::Italic => Self::new("i", &run.text),
            SpanKind::Code => Self::new("code", &run.text),
            SpanKind::Link => Self::new("a", &run.text).attr("href", url()),
            SpanKind::Image => Self::new("img", "").attr("src", url()).attr("alt", &run.text),
        }
    }
}

/// Serialize attributes as ` key="value"` pairs in insertion order.
fn render_attrs(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        let _ = write!(out, " {key}=\"{value}\"");
    }
    out
}
