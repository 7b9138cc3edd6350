//! Lightweight scanning of the markup subset embedded in node content.
//!
//! Content strings handed to the annotator may carry a handful of inline
//! tags and a block-quote wrapper. This module finds those tags without
//! building a DOM, decides whether a node's markup is safe to parse notes
//! from, and flattens block-quote markup back into plain text.

use std::borrow::Cow;

use memchr::memchr;
use quick_xml::escape::{resolve_html5_entity, unescape_with};

/// Inline tags that do not suppress note parsing by default.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &["p", "br", "em", "strong", "b", "i", "li", "ul", "ol"];

/// Structural wrapper used for detailed notes. Always permitted.
pub const QUOTE_TAG: &str = "blockquote";

/// A tag found in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag name as written (not lowercased).
    pub name: &'a str,
    /// True for `</name>`.
    pub closing: bool,
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset just past `>`.
    pub end: usize,
}

impl Tag<'_> {
    /// Case-insensitive name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Iterator over the tags of a string, in order.
pub struct Tags<'a> {
    text: &'a str,
    escape: &'a str,
    pos: usize,
}

/// Scan `text` for tags.
///
/// A tag is `<` or `</`, an ASCII letter followed by alphanumerics, then
/// whitespace, `/` or `>`, and finally a closing `>`. Anything else (a bare
/// `<` in prose, `<https://...>`) is plain text.
pub fn tags(text: &str) -> Tags<'_> {
    Tags {
        text,
        escape: "",
        pos: 0,
    }
}

/// Scan `text` for tags, treating a `<` right after `escape` as text.
///
/// An empty `escape` behaves like [`tags`].
pub fn unescaped_tags<'a>(text: &'a str, escape: &'a str) -> Tags<'a> {
    Tags {
        text,
        escape,
        pos: 0,
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let start = self.pos + memchr(b'<', &bytes[self.pos..])?;
            self.pos = start + 1;
            if !self.escape.is_empty() && self.text[..start].ends_with(self.escape) {
                continue;
            }
            if let Some(tag) = parse_tag(self.text, start) {
                self.pos = tag.end;
                return Some(tag);
            }
        }
        None
    }
}

fn parse_tag(text: &str, start: usize) -> Option<Tag<'_>> {
    let bytes = text.as_bytes();
    let mut i = start + 1;

    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    let name_end = i;

    match bytes.get(i) {
        Some(b'>' | b'/') => {}
        Some(c) if c.is_ascii_whitespace() => {}
        _ => return None,
    }

    let close = memchr(b'>', &bytes[i..])?;
    Some(Tag {
        name: &text[name_start..name_end],
        closing,
        start,
        end: i + close + 1,
    })
}

/// Which tags may appear in content without suppressing note parsing.
///
/// Content carrying any other tag (links, images, spans with attributes)
/// is passed through untouched so that URLs and attribute values are never
/// split at a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupPolicy {
    allowed: Vec<String>,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl MarkupPolicy {
    /// The default allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that only permits the structural quote wrapper.
    pub fn strict() -> Self {
        Self {
            allowed: Vec::new(),
        }
    }

    /// Extend the allow-list with another tag name.
    pub fn allow(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        if !self.allowed.contains(&tag) {
            self.allowed.push(tag);
        }
        self
    }

    /// The allowed tag names, lowercased.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(QUOTE_TAG)
            || self.allowed.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// First tag in `content` outside the allow-list.
    ///
    /// A `<` escaped with `escape` does not open a tag.
    pub fn first_disallowed<'a>(&self, content: &'a str, escape: &'a str) -> Option<Tag<'a>> {
        unescaped_tags(content, escape).find(|tag| !self.is_allowed(tag.name))
    }
}

/// True when `content` (after trimming) opens with a block-quote wrapper.
pub fn starts_with_quote(content: &str) -> bool {
    let content = content.trim_start();
    tags(content)
        .next()
        .is_some_and(|tag| tag.start == 0 && !tag.closing && tag.is(QUOTE_TAG))
}

/// Byte offset of the first opening block-quote tag in `content` that is
/// not escaped with `escape`.
pub fn find_quote(content: &str, escape: &str) -> Option<usize> {
    unescaped_tags(content, escape)
        .find(|tag| !tag.closing && tag.is(QUOTE_TAG))
        .map(|tag| tag.start)
}

/// Remove one `<p>...</p>` pair wrapping the whole of `content`.
pub fn strip_paragraph(content: &str) -> &str {
    let trimmed = content.trim();
    let mut iter = tags(trimmed);
    let Some(open) = iter.next() else {
        return trimmed;
    };
    if open.start != 0 || open.closing || !open.is("p") {
        return trimmed;
    }
    let Some(close) = iter.last() else {
        return trimmed;
    };
    if close.end != trimmed.len() || !close.closing || !close.is("p") {
        return trimmed;
    }
    &trimmed[open.end..close.start]
}

/// Decode character references (`&amp;`, `&#39;`, `&nbsp;`, ...).
///
/// Text with a malformed reference is returned as is.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    unescape_with(text, resolve_html5_entity).unwrap_or(Cow::Borrowed(text))
}

/// Flatten markup into plain text.
///
/// Tags are dropped. `<br>` becomes a newline; paragraph, list and quote
/// boundaries become a single newline; list items are prefixed with `- `.
/// Whitespace-only text between block tags is ignored and entities are
/// decoded. The result is not trimmed.
pub fn flatten_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    let mut after_break = false;

    for tag in tags(html) {
        push_text(&mut out, &html[last..tag.start], after_break);
        last = tag.end;
        after_break = false;

        if tag.is("br") {
            out.push('\n');
            after_break = true;
        } else if tag.is("li") && !tag.closing {
            ensure_line_break(&mut out);
            out.push_str("- ");
        } else if is_block_tag(&tag) {
            ensure_line_break(&mut out);
        }
    }
    push_text(&mut out, &html[last..], after_break);

    out
}

fn is_block_tag(tag: &Tag<'_>) -> bool {
    ["p", "li", "ul", "ol", "div", QUOTE_TAG]
        .iter()
        .any(|name| tag.is(name))
}

fn ensure_line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn push_text(out: &mut String, raw: &str, after_break: bool) {
    // `<br>\n` is a single line break
    let raw = if after_break {
        raw.strip_prefix("\r\n")
            .or_else(|| raw.strip_prefix('\n'))
            .unwrap_or(raw)
    } else {
        raw
    };

    if raw.is_empty() || (raw.trim().is_empty() && raw.contains('\n')) {
        return;
    }
    out.push_str(&decode_entities(raw));
}
