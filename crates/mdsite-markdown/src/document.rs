//! Document tree construction.
//!
//! [`build`] converts a whole markdown document into a single [`HtmlNode`]
//! tree rooted at a `div` container; [`extract_title`] pulls the document
//! title out of its unique `h1` heading. Both walk the same block pipeline:
//! segment, classify, convert.

use crate::block::{BlockKind, classify, split_blocks};
use crate::inline::{InlineError, SpanKind, tokenize};
use crate::node::{HtmlNode, LeafNode, ParentNode};

/// Tag of the container element wrapping the whole converted document.
pub const CONTAINER_TAG: &str = "div";

/// Error returned by document conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A block's text contained malformed inline markup.
    #[error(transparent)]
    Inline(#[from] InlineError),
    /// The document has no `h1` heading to use as a title.
    #[error("document has no title heading")]
    NoTitleHeading,
    /// The document has more than one `h1` heading.
    #[error("document has multiple title headings")]
    MultipleTitleHeadings,
}

/// Convert a markdown document into an HTML node tree.
///
/// Every block is converted in document order and collected under a
/// [`CONTAINER_TAG`] parent. Conversion is atomic: on the first malformed
/// block the whole call fails and no partial tree is observable.
pub fn build(markdown: &str) -> Result<HtmlNode, DocumentError> {
    let blocks = split_blocks(markdown);
    let mut children = Vec::with_capacity(blocks.len());
    for block in &blocks {
        children.push(convert_block(block)?);
    }
    Ok(HtmlNode::Parent(ParentNode::new(CONTAINER_TAG, children)))
}

/// Extract the document title from its unique `h1` heading block.
///
/// Returns the heading's text content without markup.
///
/// # Errors
///
/// Fails with [`DocumentError::NoTitleHeading`] if no `h1` block exists
/// and [`DocumentError::MultipleTitleHeadings`] if more than one does.
pub fn extract_title(markdown: &str) -> Result<String, DocumentError> {
    let mut title = None;
    for block in split_blocks(markdown) {
        if classify(&block) != BlockKind::Heading {
            continue;
        }
        let node = heading_node(&block)?;
        if node.tag() != Some("h1") {
            continue;
        }
        if title.is_some() {
            return Err(DocumentError::MultipleTitleHeadings);
        }
        title = Some(node.text_content());
    }
    title.ok_or(DocumentError::NoTitleHeading)
}

/// Convert one classified block into its node.
fn convert_block(block: &str) -> Result<HtmlNode, DocumentError> {
    let lines: Vec<&str> = block.split('\n').collect();
    match classify(block) {
        BlockKind::Heading => heading_node(block),
        BlockKind::Code => code_node(block),
        BlockKind::Quote => quote_node(&lines),
        BlockKind::Unordered => list_node(&lines, "ul", 2),
        BlockKind::Ordered => list_node(&lines, "ol", 3),
        BlockKind::Paragraph => inline_wrap("p", block),
    }
}

/// Tokenize `text` and wrap the runs in a `tag` element.
///
/// A single plain run collapses to a leaf instead of a one-child parent,
/// so unformatted text renders without a redundant wrapper.
fn inline_wrap(tag: &str, text: &str) -> Result<HtmlNode, DocumentError> {
    let runs = tokenize(text)?;
    if let [run] = runs.as_slice()
        && run.kind == SpanKind::Plain
    {
        return Ok(HtmlNode::Leaf(LeafNode::new(tag, run.text.clone())));
    }
    let children = runs
        .iter()
        .map(|run| HtmlNode::Leaf(LeafNode::from(run)))
        .collect();
    Ok(HtmlNode::Parent(ParentNode::new(tag, children)))
}

/// Heading block: `h1`-`h6` from the leading `#` count, capped at six.
///
/// A seventh or later consecutive `#` is literal content, not a deeper
/// level.
fn heading_node(block: &str) -> Result<HtmlNode, DocumentError> {
    let level = block.chars().take_while(|&c| c == '#').count().min(6);
    let tag = format!("h{level}");
    inline_wrap(&tag, block[level..].trim())
}

/// Code block: strip the fence from both ends, wrap in `pre` > `code`.
fn code_node(block: &str) -> Result<HtmlNode, DocumentError> {
    let body = block.strip_prefix("```").unwrap_or(block);
    let body = body.strip_suffix("```").unwrap_or(body).trim();
    let code = inline_wrap("code", body)?;
    Ok(HtmlNode::Parent(ParentNode::new("pre", vec![code])))
}

/// Quote block: strip each line's `>` marker, rejoin, tokenize once.
fn quote_node(lines: &[&str]) -> Result<HtmlNode, DocumentError> {
    let text = lines
        .iter()
        .map(|line| line.strip_prefix('>').unwrap_or(line).trim())
        .collect::<Vec<_>>()
        .join("\n");
    inline_wrap("blockquote", &text)
}

/// List block: each line becomes its own `li`, wrapped in `ul`/`ol`.
///
/// `marker_len` is the marker length in characters, not bytes: two for
/// `* ` / `- `, three for `1. `. The classifier accepts any whitespace
/// character after the marker, so the marker may span more bytes than
/// characters.
fn list_node(lines: &[&str], tag: &str, marker_len: usize) -> Result<HtmlNode, DocumentError> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let text = strip_chars(line, marker_len).trim();
        items.push(inline_wrap("li", text)?);
    }
    Ok(HtmlNode::Parent(ParentNode::new(tag, items)))
}

/// The remainder of `line` after its first `count` characters.
fn strip_chars(line: &str, count: usize) -> &str {
    line.char_indices()
        .nth(count)
        .map_or("", |(offset, _)| &line[offset..])
}
