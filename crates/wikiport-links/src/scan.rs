//! Link destination discovery.
//!
//! Pages are parsed with the real markdown parser rather than ad-hoc
//! patterns, so constructs inside code fences and code spans are never
//! mistaken for links. For each rewritable construct the scanner records
//! the exact byte range of the destination text, which lets the rewrite
//! phase splice in new destinations while leaving every other byte of the
//! page untouched.

use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use regex::Regex;
use thiserror::Error;

/// `src`/`href` attributes in raw HTML, quoted either way.
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(?:src|href)\s*=\s*("[^"]*"|'[^']*')"#).unwrap());

/// A link construct whose destination could not be located.
///
/// Scanning stops at the first such construct; callers skip the page and
/// report it rather than risk splicing at the wrong offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed link at byte {offset}")]
pub struct ScanError {
    /// Byte offset of the construct within the page body.
    pub offset: usize,
}

/// Kind of construct a destination was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `[text](dest)`
    Inline,
    /// `![alt](dest)`
    Image,
    /// `[label]: dest`
    Definition,
    /// `src="dest"` or `href="dest"` in raw HTML
    HtmlAttr,
}

/// One rewritable destination within a page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// Byte range of the destination text itself, never the whole construct.
    pub range: Range<usize>,
    /// The destination exactly as written.
    pub target: String,
    pub kind: LinkKind,
}

/// Finds every rewritable link destination in a markdown body.
///
/// Inline links and images are located through parser event spans;
/// reference-style links are covered by rewriting their definitions once;
/// autolinks are always external and never reported. Empty destinations
/// (`[x]()`) carry nothing to resolve and are skipped.
#[derive(Debug, Clone)]
pub struct LinkScanner {
    options: Options,
}

impl LinkScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM,
        }
    }

    /// Scan `body` and return destinations in document order.
    pub fn scan(&self, body: &str) -> Result<Vec<LinkOccurrence>, ScanError> {
        let parser = Parser::new_ext(body, self.options);
        let mut occurrences = Vec::new();

        for (_, def) in parser.reference_definitions().iter() {
            if def.dest.is_empty() {
                continue;
            }
            let range = locate_definition_dest(body, &def.span).ok_or(ScanError {
                offset: def.span.start,
            })?;
            occurrences.push(LinkOccurrence {
                target: body[range.clone()].to_owned(),
                range,
                kind: LinkKind::Definition,
            });
        }

        for (event, span) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    ..
                }) => {
                    if link_type == LinkType::Inline && !dest_url.is_empty() {
                        let range = locate_inline_dest(body, &span)
                            .ok_or(ScanError { offset: span.start })?;
                        occurrences.push(LinkOccurrence {
                            target: body[range.clone()].to_owned(),
                            range,
                            kind: LinkKind::Inline,
                        });
                    }
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    ..
                }) => {
                    if link_type == LinkType::Inline && !dest_url.is_empty() {
                        let range = locate_inline_dest(body, &span)
                            .ok_or(ScanError { offset: span.start })?;
                        occurrences.push(LinkOccurrence {
                            target: body[range.clone()].to_owned(),
                            range,
                            kind: LinkKind::Image,
                        });
                    }
                }
                Event::Html(_) | Event::InlineHtml(_) => {
                    scan_html_attrs(body, &span, &mut occurrences);
                }
                _ => {}
            }
        }

        occurrences.sort_by_key(|o| o.range.start);
        Ok(occurrences)
    }
}

impl Default for LinkScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the destination inside an inline link or image span.
///
/// The span covers the whole construct (`[text](dest "title")`). The link
/// text is skipped with bracket matching that honors backslash escapes and
/// code spans, then the destination is parsed in either its `<...>` or bare
/// form.
fn locate_inline_dest(body: &str, span: &Range<usize>) -> Option<Range<usize>> {
    let bytes = body[span.clone()].as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'!'));
    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    i += 1;

    let mut depth = 1usize;
    while i < bytes.len() && depth > 0 {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => i = skip_code_span(bytes, i),
            b'[' => {
                depth += 1;
                i += 1;
            }
            b']' => {
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    if depth != 0 || bytes.get(i) != Some(&b'(') {
        return None;
    }
    i += 1;
    while matches!(bytes.get(i), Some(b' ' | b'\t' | b'\r' | b'\n')) {
        i += 1;
    }

    let (start, end) = parse_destination(bytes, i)?;
    Some(span.start + start..span.start + end)
}

/// Locate the destination inside a reference definition span
/// (`[label]: dest "title"`).
fn locate_definition_dest(body: &str, span: &Range<usize>) -> Option<Range<usize>> {
    let bytes = body[span.clone()].as_bytes();
    let mut i = 0;
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    i += 1;
    while i < bytes.len() && bytes[i] != b']' {
        if bytes[i] == b'\\' {
            i += 1;
        }
        i += 1;
    }
    if bytes.get(i) != Some(&b']') || bytes.get(i + 1) != Some(&b':') {
        return None;
    }
    i += 2;
    while matches!(bytes.get(i), Some(b' ' | b'\t' | b'\r' | b'\n')) {
        i += 1;
    }

    let (start, end) = parse_destination(bytes, i)?;
    Some(span.start + start..span.start + end)
}

/// Parse a link destination starting at `i`, returning its byte range.
///
/// `<dest>` runs to the closing angle bracket; a bare destination runs to
/// unbalanced `)` or whitespace. Backslash escapes are skipped either way.
fn parse_destination(bytes: &[u8], i: usize) -> Option<(usize, usize)> {
    if bytes.get(i) == Some(&b'<') {
        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && bytes[j] != b'>' {
            if bytes[j] == b'\\' {
                j += 1;
            }
            j += 1;
        }
        if j >= bytes.len() {
            return None;
        }
        return Some((start, j));
    }

    let start = i;
    let mut j = i;
    let mut parens = 0usize;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 1,
            b'(' => parens += 1,
            b')' => {
                if parens == 0 {
                    break;
                }
                parens -= 1;
            }
            b' ' | b'\t' | b'\r' | b'\n' => break,
            _ => {}
        }
        j += 1;
    }
    Some((start, j))
}

/// Advance past a backtick code span, or past the opening run when it has
/// no closing run. Code spans may contain unbalanced brackets, so bracket
/// matching must not look inside them.
fn skip_code_span(bytes: &[u8], start: usize) -> usize {
    let mut run = 0;
    while start + run < bytes.len() && bytes[start + run] == b'`' {
        run += 1;
    }
    let mut i = start + run;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let mut close = 0;
            while i + close < bytes.len() && bytes[i + close] == b'`' {
                close += 1;
            }
            if close == run {
                return i + close;
            }
            i += close;
        } else {
            i += 1;
        }
    }
    start + run
}

/// Record `src`/`href` attribute values within a raw HTML event span.
fn scan_html_attrs(body: &str, span: &Range<usize>, occurrences: &mut Vec<LinkOccurrence>) {
    let text = &body[span.clone()];
    for caps in ATTR_RE.captures_iter(text) {
        let Some(quoted) = caps.get(1) else { continue };
        // Shrink the match to the value between the quotes.
        let start = span.start + quoted.start() + 1;
        let end = span.start + quoted.end() - 1;
        if start == end {
            continue;
        }
        occurrences.push(LinkOccurrence {
            target: body[start..end].to_owned(),
            range: start..end,
            kind: LinkKind::HtmlAttr,
        });
    }
}
