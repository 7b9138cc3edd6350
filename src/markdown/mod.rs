//! Pure note-syntax primitives.
//!
//! - [`escape`]: adding and removing escape tokens around markers
//! - [`inline`]: splitting a content string at its inline-note separator
//! - [`block`]: extracting a detailed note from leading quote blocks
//! - [`html`]: scanning and flattening the embedded markup subset
//!
//! Everything here is a pure function over strings and slices; the
//! [`crate::annotate`] and [`crate::export`] layers compose them.

mod block;
mod escape;
mod html;
mod inline;

pub use block::{BlockExtraction, extract_detailed_note, split_embedded_quote};
pub use escape::{add_escape, escape_marker_text, remove_escape};
pub use html::{
    DEFAULT_ALLOWED_TAGS, MarkupPolicy, QUOTE_TAG, Tag, Tags, decode_entities, find_quote,
    flatten_markup, starts_with_quote, strip_paragraph, tags, unescaped_tags,
};
pub use inline::{InlineSplit, find_unescaped, split_inline_note};
