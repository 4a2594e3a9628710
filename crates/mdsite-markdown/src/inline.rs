//! Inline text tokenization.
//!
//! [`tokenize`] turns a raw text string into an ordered sequence of
//! [`TextRun`]s by repeated splitting. The pass order is fixed and
//! significant: inline code first (so literal `*` inside code is never
//! treated as emphasis), then `**` before `*` (the bold delimiter is a
//! prefix of the italic one), then images before links (image syntax is
//! link syntax preceded by `!`).
//!
//! Each pass only inspects runs that are still [`SpanKind::Plain`]; runs
//! produced by an earlier pass are carried through untouched. This is what
//! makes nested inline markup a non-feature rather than an error.

/// The formatting applied to one contiguous span of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// One contiguous span of inline text carrying a single formatting kind.
///
/// `url` is only meaningful for [`SpanKind::Link`] and [`SpanKind::Image`]
/// runs; it is `None` for everything else. Runs are immutable once the
/// tokenizer has produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// Text content of the span (alt text for images, anchor text for links).
    pub text: String,
    /// Formatting kind of the span.
    pub kind: SpanKind,
    /// Target URL for link and image runs.
    pub url: Option<String>,
}

impl TextRun {
    /// Create an unformatted run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanKind::Plain)
    }

    /// Create a formatted run without a URL.
    #[must_use]
    pub fn styled(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    /// Create a link or image run.
    #[must_use]
    pub fn with_url(text: impl Into<String>, kind: SpanKind, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            url: Some(url.into()),
        }
    }
}

/// Error returned when inline markup cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InlineError {
    /// A formatting delimiter occurred an odd number of times, leaving an
    /// unclosed span.
    #[error("malformed inline markup: unpaired `{delimiter}` delimiter")]
    UnpairedDelimiter {
        /// The delimiter that was left unpaired.
        delimiter: &'static str,
    },
}

/// Tokenize a text string into an ordered sequence of runs.
///
/// # Errors
///
/// Returns [`InlineError::UnpairedDelimiter`] if a code, bold or italic
/// delimiter is left unclosed. Image and link extraction never fail;
/// text that almost looks like a link is kept as plain text.
pub fn tokenize(text: &str) -> Result<Vec<TextRun>, InlineError> {
    let runs = vec![TextRun::plain(text)];
    let runs = split_delimiter(runs, "`", SpanKind::Code)?;
    let runs = split_delimiter(runs, "**", SpanKind::Bold)?;
    let runs = split_delimiter(runs, "*", SpanKind::Italic)?;
    let runs = split_pattern(runs, SpanKind::Image);
    let runs = split_pattern(runs, SpanKind::Link);
    Ok(runs)
}

/// Split every plain run on `delimiter`, alternating pieces between plain
/// and `kind`.
///
/// Splitting on a paired delimiter yields an odd number of pieces; pieces
/// at odd positions were between a delimiter pair. An even piece count
/// greater than one means a delimiter was left unclosed. Empty pieces
/// (adjacent delimiters, or a delimiter at either end) contribute no run.
fn split_delimiter(
    runs: Vec<TextRun>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<TextRun>, InlineError> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if run.kind != SpanKind::Plain {
            out.push(run);
            continue;
        }
        let pieces: Vec<&str> = run.text.split(delimiter).collect();
        if pieces.len() > 1 && pieces.len() % 2 == 0 {
            return Err(InlineError::UnpairedDelimiter { delimiter });
        }
        for (position, piece) in pieces.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            if position % 2 == 1 {
                out.push(TextRun::styled(piece, kind));
            } else {
                out.push(TextRun::plain(piece));
            }
        }
    }
    Ok(out)
}

/// Extract every `![alt](url)` or `[alt](url)` occurrence from plain runs.
///
/// Scans each plain run left to right, emitting a plain run for the text
/// before each match, the matched image/link run, and finally a plain run
/// for any trailing text. Runs without a match pass through unchanged.
fn split_pattern(runs: Vec<TextRun>, kind: SpanKind) -> Vec<TextRun> {
    let image = kind == SpanKind::Image;
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if run.kind != SpanKind::Plain {
            out.push(run);
            continue;
        }
        let mut remaining = run.text.as_str();
        while let Some(found) = find_bracket_span(remaining, image) {
            if found.start > 0 {
                out.push(TextRun::plain(&remaining[..found.start]));
            }
            out.push(TextRun::with_url(found.text, kind, found.url));
            remaining = &remaining[found.end..];
        }
        if !remaining.is_empty() {
            out.push(TextRun::plain(remaining));
        }
    }
    out
}

/// A `[text](url)` occurrence located within a run's text.
struct BracketSpan<'a> {
    /// Byte offset of the pattern start (the `!` for images).
    start: usize,
    /// Byte offset just past the closing parenthesis.
    end: usize,
    text: &'a str,
    url: &'a str,
}

/// Locate the first image (`![alt](url)`) or link (`[alt](url)`, not
/// preceded by `!`) pattern in `text`.
///
/// The bracketed text may not contain square brackets and the URL may not
/// contain parentheses; a candidate violating either rule is skipped and
/// scanning resumes at the next opening bracket.
fn find_bracket_span(text: &str, image: bool) -> Option<BracketSpan<'_>> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('[') {
        let open = from + offset;
        from = open + 1;

        if text[..open].ends_with('!') != image {
            continue;
        }
        let body = &text[open + 1..];
        let Some((alt, alt_len)) = capture_until(body, ']', '[') else {
            continue;
        };
        let after_alt = &body[alt_len..];
        if !after_alt.starts_with('(') {
            continue;
        }
        let Some((url, url_len)) = capture_until(&after_alt[1..], ')', '(') else {
            continue;
        };

        return Some(BracketSpan {
            start: if image { open - 1 } else { open },
            end: open + 1 + alt_len + 1 + url_len,
            text: alt,
            url,
        });
    }
    None
}

/// Capture the prefix of `section` up to `close`, failing if `forbidden`
/// appears first or `close` never does.
///
/// Returns the captured text and the byte length consumed including the
/// closing character.
fn capture_until(section: &str, close: char, forbidden: char) -> Option<(&str, usize)> {
    let end = section.find([close, forbidden])?;
    if section[end..].starts_with(close) {
        Some((&section[..end], end + close.len_utf8()))
    } else {
        None
    }
}
