//! Markdown-to-HTML document tree conversion.
//!
//! This crate converts a fixed markdown subset into a tree of HTML nodes
//! and renders that tree to an HTML string. The pipeline has four stages:
//!
//! 1. [`split_blocks`] cuts the document into blocks on blank lines and
//!    [`classify`] assigns each block a [`BlockKind`].
//! 2. [`tokenize`] splits a block's text into an ordered sequence of
//!    [`TextRun`]s (plain/bold/italic/code/link/image spans).
//! 3. [`build`] maps every block into an [`HtmlNode`] and assembles them
//!    under a single `div` container node.
//! 4. [`HtmlNode::render`] serializes the tree to an HTML string.
//!
//! Inline markup is deliberately flat: markup nested inside an already
//! recognized span (bold inside a link, emphasis inside code, ...) is kept
//! as literal text. Parsing is structural throughout: no regular
//! expressions.
//!
//! # Example
//!
//! ```
//! use mdsite_markdown::build;
//!
//! let markdown = "# Title\n\nSome **bold** text.";
//! let html = build(markdown).unwrap().render().unwrap();
//! assert_eq!(
//!     html,
//!     "<div><h1>Title</h1><p>Some <b>bold</b> text.</p></div>"
//! );
//! ```

mod block;
mod document;
mod inline;
mod node;

pub use block::{BlockKind, classify, split_blocks};
pub use document::{CONTAINER_TAG, DocumentError, build, extract_title};
pub use inline::{InlineError, SpanKind, TextRun, tokenize};
pub use node::{HtmlNode, LeafNode, ParentNode, RenderError};
