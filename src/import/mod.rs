//! Importers that turn outline text into [`PureNode`] trees.
//!
//! The text-to-tree step is a collaborator of the annotator, not part of
//! it: anything that can produce a [`PureNode`] tree implements
//! [`Importer`]. [`OutlineBuilder`] reads the outline grammar written by
//! [`crate::export::MarkdownExporter`], which closes the round trip.

mod outline;

pub use outline::OutlineBuilder;

use std::path::Path;

use crate::model::PureNode;
use crate::util::decode_text;

/// Builds a [`PureNode`] tree from source text.
pub trait Importer {
    /// Parse `text` into a tree whose root holds the top-level items.
    fn import(&self, text: &str) -> PureNode;

    /// Read and parse a file.
    ///
    /// The bytes are decoded as UTF-8 (BOM aware), falling back to
    /// Windows-1252 for legacy files.
    fn import_file(&self, path: &Path) -> crate::Result<PureNode> {
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes);
        Ok(self.import(&text))
    }
}
