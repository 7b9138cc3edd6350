//! Detailed note extraction from leading block-quote children.

use crate::model::PureNode;

use super::html::{find_quote, flatten_markup, starts_with_quote};

/// Result of scanning a child list for a detailed note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockExtraction<'a> {
    /// Flattened note text. `Some("")` when the quote blocks were empty.
    pub detailed_note: Option<String>,
    /// Children left after the leading quote blocks.
    pub rest: &'a [PureNode],
}

/// Consume the leading contiguous run of block-quote children.
///
/// Each matching child is flattened to text and trimmed; the texts are
/// joined with newlines and the whole is trimmed. A quote block appearing
/// after any ordinary child stays a child. An empty `note_block` marker
/// disables extraction.
pub fn extract_detailed_note<'a>(children: &'a [PureNode], note_block: &str) -> BlockExtraction<'a> {
    if note_block.is_empty() {
        return BlockExtraction {
            detailed_note: None,
            rest: children,
        };
    }

    let consumed = children
        .iter()
        .take_while(|child| starts_with_quote(&child.content))
        .count();

    if consumed == 0 {
        return BlockExtraction {
            detailed_note: None,
            rest: children,
        };
    }

    let note = children[..consumed]
        .iter()
        .map(|child| flatten_markup(child.content.trim()).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    log::trace!(
        "event=detailed_note_extracted blocks={} chars={}",
        consumed,
        note.len()
    );

    BlockExtraction {
        detailed_note: Some(note.trim().to_string()),
        rest: &children[consumed..],
    }
}

/// Split content that embeds its own quote wrapper.
///
/// Returns the text before the first wrapper and the flattened, trimmed
/// text of everything from the wrapper on, or `None` when the content has
/// no wrapper. A wrapper whose `<` follows `escape` is text.
pub fn split_embedded_quote<'a>(content: &'a str, escape: &str) -> Option<(&'a str, String)> {
    let at = find_quote(content, escape)?;
    let note = flatten_markup(&content[at..]).trim().to_string();
    Some((&content[..at], note))
}
