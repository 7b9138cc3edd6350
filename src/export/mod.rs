//! Export module for writing annotated trees back to text.
//!
//! Provides the `Exporter` trait and the outline implementation.
//!
//! # Example
//!
//! ```
//! use annota::SeparatorConfig;
//! use annota::export::{Exporter, MarkdownExporter};
//! use annota::model::AnnotatedNode;
//!
//! let tree = AnnotatedNode::new("").with_children(vec![
//!     AnnotatedNode::new("Title").with_inline_note("Note"),
//! ]);
//!
//! let mut out = Vec::new();
//! MarkdownExporter::new(SeparatorConfig::default()).export(&tree, &mut out)?;
//! assert_eq!(out, b"- Title: Note\n");
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use crate::model::AnnotatedNode;

mod text;

pub use text::{MarkdownConfig, MarkdownExporter};

/// Trait for exporting annotated trees.
///
/// Exporters hold their configuration, and `export` writes to any `Write`
/// destination (`File`, `Vec<u8>`, stdout).
pub trait Exporter {
    /// Export the tree to the provided writer.
    fn export<W: Write>(&self, tree: &AnnotatedNode, writer: &mut W) -> io::Result<()>;
}
