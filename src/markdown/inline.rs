//! Inline note splitting.
//!
//! A node's content is split at the first occurrence of the note separator
//! that is not immediately preceded by the escape token.

use memchr::memmem;

use super::escape::remove_escape;

/// Result of splitting a content string at its note separator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineSplit {
    /// Main text, trimmed and unescaped.
    pub main: String,
    /// Note text, trimmed and unescaped. `Some("")` for a trailing
    /// separator, `None` when no unescaped separator exists.
    pub note: Option<String>,
}

/// Byte offset of the first `separator` not preceded by `escape`.
///
/// Returns `None` for an empty separator.
pub fn find_unescaped(content: &str, separator: &str, escape: &str) -> Option<usize> {
    if separator.is_empty() {
        return None;
    }

    let finder = memmem::Finder::new(separator.as_bytes());
    let bytes = content.as_bytes();
    let mut offset = 0;

    while offset <= bytes.len() {
        let at = offset + finder.find(&bytes[offset..])?;
        if escape.is_empty() || !content[..at].ends_with(escape) {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}

/// Split `content` into main text and an optional inline note.
///
/// Both parts are trimmed, then run through [`remove_escape`].
///
/// # Examples
///
/// ```
/// use annota::markdown::split_inline_note;
///
/// let split = split_inline_note("A\\: B: C", ":", "\\");
/// assert_eq!(split.main, "A: B");
/// assert_eq!(split.note.as_deref(), Some("C"));
/// ```
pub fn split_inline_note(content: &str, separator: &str, escape: &str) -> InlineSplit {
    match find_unescaped(content, separator, escape) {
        Some(at) => InlineSplit {
            main: remove_escape(content[..at].trim(), escape),
            note: Some(remove_escape(
                content[at + separator.len()..].trim(),
                escape,
            )),
        },
        None => InlineSplit {
            main: remove_escape(content.trim(), escape),
            note: None,
        },
    }
}
