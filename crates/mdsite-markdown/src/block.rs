//! Block segmentation and classification.
//!
//! A block is one paragraph-sized unit of markdown, delimited by blank
//! lines. [`split_blocks`] performs the segmentation; [`classify`] assigns
//! each block exactly one [`BlockKind`]. Classification is total: a block
//! that matches no structural rule is a paragraph, never an error.

/// The structural type of a markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    Heading,
    Code,
    Quote,
    Unordered,
    Ordered,
    Paragraph,
}

/// Split a markdown document into raw block texts.
///
/// Blocks are separated by blank lines (two consecutive newlines). Each
/// block is trimmed of surrounding blank lines and whitespace; blocks
/// containing no alphanumeric character vanish silently, which also
/// collapses runs of multiple blank lines.
#[must_use]
pub fn split_blocks(markdown: &str) -> Vec<String> {
    markdown
        .split("\n\n")
        .filter(|block| block.chars().any(char::is_alphanumeric))
        .map(|block| block.trim_matches('\n').trim().to_owned())
        .collect()
}

/// Classify a block into exactly one [`BlockKind`].
///
/// Rules are tested in a fixed precedence order; the first match wins and
/// paragraph is the universal fallback.
#[must_use]
pub fn classify(block: &str) -> BlockKind {
    let lines: Vec<&str> = block.split('\n').collect();
    if block.starts_with('#') {
        BlockKind::Heading
    } else if block.starts_with("```") && block.ends_with("```") {
        BlockKind::Code
    } else if lines.iter().all(|line| line.starts_with('>')) {
        BlockKind::Quote
    } else if lines.iter().all(|line| is_unordered_item(line)) {
        BlockKind::Unordered
    } else if lines.iter().all(|line| is_ordered_item(line)) && is_sequenced(&lines) {
        BlockKind::Ordered
    } else {
        BlockKind::Paragraph
    }
}

/// Line starts with `*` or `-` followed by whitespace.
fn is_unordered_item(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('*' | '-')) && chars.next().is_some_and(char::is_whitespace)
}

/// Line starts with a single decimal digit, `.`, and whitespace.
fn is_ordered_item(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next().is_some_and(|c| c.is_ascii_digit())
        && chars.next() == Some('.')
        && chars.next().is_some_and(char::is_whitespace)
}

/// Leading digits must form the strictly increasing sequence 1, 2, 3, ...
///
/// Only the single leading character is read as the item number, so a
/// tenth item can never continue the sequence and the block falls through
/// to paragraph.
fn is_sequenced(lines: &[&str]) -> bool {
    lines.iter().enumerate().all(|(index, line)| {
        line.chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .is_some_and(|digit| digit as usize == index + 1)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let blocks = split_blocks("# Heading\n\nA paragraph.\n\n* item one\n* item two");
        assert_eq!(
            blocks,
            vec!["# Heading", "A paragraph.", "* item one\n* item two"]
        );
    }

    #[test]
    fn collapses_blank_runs_and_trims_edges() {
        let blocks = split_blocks("\n\n# H\n\n\n\nBody\n\n");
        assert_eq!(blocks, vec!["# H", "Body"]);
    }

    #[test]
    fn discards_whitespace_only_blocks() {
        let blocks = split_blocks("   \n\n\t\n\n***\n\nreal text");
        assert_eq!(blocks, vec!["real text"]);
    }

    #[test]
    fn empty_document_has_no_blocks() {
        assert_eq!(split_blocks(""), Vec::<String>::new());
    }

    #[test]
    fn heading_blocks() {
        assert_eq!(classify("# Title"), BlockKind::Heading);
        assert_eq!(classify("###### Deep"), BlockKind::Heading);
        assert_eq!(classify("#######Text"), BlockKind::Heading);
    }

    #[test]
    fn code_blocks() {
        assert_eq!(classify("```\nlet x = 1;\n```"), BlockKind::Code);
        assert_eq!(classify("```single line```"), BlockKind::Code);
        assert_eq!(classify("``````"), BlockKind::Code);
    }

    #[test]
    fn unterminated_code_fence_is_a_paragraph() {
        assert_eq!(classify("```\nlet x = 1;"), BlockKind::Paragraph);
    }

    #[test]
    fn quote_blocks_require_every_line() {
        assert_eq!(classify("> first\n> second"), BlockKind::Quote);
        assert_eq!(classify(">bare"), BlockKind::Quote);
        assert_eq!(classify("> quoted\nnot quoted"), BlockKind::Paragraph);
    }

    #[test]
    fn unordered_list_markers() {
        assert_eq!(classify("* star\n* star"), BlockKind::Unordered);
        assert_eq!(classify("- dash\n- dash"), BlockKind::Unordered);
        assert_eq!(classify("* mixed\n- markers"), BlockKind::Unordered);
    }

    #[test]
    fn unordered_marker_needs_trailing_whitespace() {
        assert_eq!(classify("*no space"), BlockKind::Paragraph);
        assert_eq!(classify("-also none"), BlockKind::Paragraph);
    }

    #[test]
    fn ordered_list_in_sequence() {
        assert_eq!(classify("1. a\n2. b\n3. c"), BlockKind::Ordered);
    }

    #[test]
    fn ordered_list_must_increase_strictly() {
        assert_eq!(classify("1. a\n1. b"), BlockKind::Paragraph);
        assert_eq!(classify("2. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify("1. a\n3. b"), BlockKind::Paragraph);
    }

    #[test]
    fn tenth_item_breaks_the_sequence() {
        let block = (1..=10)
            .map(|n| format!("{n}. item"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(classify(&block), BlockKind::Paragraph);
    }

    #[test]
    fn paragraph_is_the_fallback() {
        assert_eq!(classify("Just a plain sentence."), BlockKind::Paragraph);
        assert_eq!(classify("10. not a single digit"), BlockKind::Paragraph);
    }
}
