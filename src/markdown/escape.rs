//! Pure escaping utilities for configurable markers.
//!
//! The escape token protects a marker from being read as syntax: any
//! character that follows an escape token is taken literally.

use memchr::memmem;

/// Insert `escape` before every literal occurrence of `marker`.
///
/// Occurrences are found with a plain left-to-right substring scan. An empty
/// marker or escape token leaves the text unchanged.
///
/// # Examples
///
/// ```
/// use annota::markdown::add_escape;
///
/// assert_eq!(add_escape("A: B", ":", "\\"), "A\\: B");
/// assert_eq!(add_escape("a::b", "::", "%"), "a%::b");
/// ```
pub fn add_escape(text: &str, marker: &str, escape: &str) -> String {
    if marker.is_empty() || escape.is_empty() {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(escape.len() + marker.len());
    escaped.push_str(escape);
    escaped.push_str(marker);
    text.replace(marker, &escaped)
}

/// Drop every escape token and copy the character after it verbatim.
///
/// The character following an escape is copied even when it is not a
/// marker. A trailing escape token with nothing after it is kept as is.
///
/// # Examples
///
/// ```
/// use annota::markdown::remove_escape;
///
/// assert_eq!(remove_escape("A\\: B", "\\"), "A: B");
/// assert_eq!(remove_escape("\\x", "\\"), "x");
/// assert_eq!(remove_escape("end\\", "\\"), "end\\");
/// ```
pub fn remove_escape(text: &str, escape: &str) -> String {
    if escape.is_empty() {
        return text.to_string();
    }

    let finder = memmem::Finder::new(escape.as_bytes());
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = finder.find(rest.as_bytes()) {
        result.push_str(&rest[..pos]);
        let mut after = rest[pos + escape.len()..].chars();
        match after.next() {
            Some(c) => {
                result.push(c);
                rest = after.as_str();
            }
            None => {
                result.push_str(escape);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

/// Escape text for the outline format so that `remove_escape` restores it.
///
/// The escape token itself is doubled first, then an escape is inserted
/// before every position where `marker` starts, overlapping occurrences
/// included (`:::` with marker `::` becomes `\:\::`). This keeps literal
/// escape characters intact across an export/parse cycle.
pub fn escape_marker_text(text: &str, marker: &str, escape: &str) -> String {
    if escape.is_empty() {
        return text.to_string();
    }
    let doubled = add_escape(text, escape, escape);
    if marker.is_empty() || marker.contains(escape) {
        return doubled;
    }

    let finder = memmem::Finder::new(marker.as_bytes());
    let mut result = String::with_capacity(doubled.len() + escape.len());
    let mut copied = 0;
    let mut from = 0;

    while let Some(pos) = finder.find(&doubled.as_bytes()[from..]) {
        let at = from + pos;
        result.push_str(&doubled[copied..at]);
        result.push_str(escape);
        copied = at;
        // Step one character so overlapping matches are found too
        from = at + doubled[at..].chars().next().map_or(1, char::len_utf8);
    }

    result.push_str(&doubled[copied..]);
    result
}
