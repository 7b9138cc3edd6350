//! # annota
//!
//! An escape-aware note annotation parser and serializer for outline trees.
//!
//! ## Features
//!
//! - Split an inline note off each node at the first unescaped separator
//! - Turn leading block-quote children into a multi-line detailed note
//! - Configurable node, note, block and escape markers
//! - Lossless export back to outline text
//!
//! ## Quick Start
//!
//! ```
//! use annota::{SeparatorConfig, annotate, export};
//!
//! let config = SeparatorConfig::default();
//! let tree = annotate("- Title: short\n  > longer\n  - Child", &config);
//!
//! let title = &tree.children[0];
//! assert_eq!(title.content, "Title");
//! assert_eq!(title.inline_note.as_deref(), Some("short"));
//! assert_eq!(title.detailed_note.as_deref(), Some("longer"));
//!
//! let text = export(&tree, &config);
//! assert_eq!(annotate(&text, &config), tree);
//! ```
//!
//! ## Custom separators
//!
//! ```
//! use annota::{SeparatorConfig, SeparatorOverrides, annotate};
//!
//! let config = SeparatorConfig::from_overrides(SeparatorOverrides {
//!     note: Some("::".to_string()),
//!     ..Default::default()
//! });
//! let tree = annotate("- Lunch at 12:30 :: bring badge", &config);
//! assert_eq!(tree.children[0].content, "Lunch at 12:30");
//! ```

pub mod annotate;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod markdown;
pub mod model;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use annotate::NodeAnnotator;
pub use config::{SeparatorConfig, SeparatorOverrides};
pub use error::{Error, Result};
pub use export::{Exporter, MarkdownConfig, MarkdownExporter};
pub use import::{Importer, OutlineBuilder};
pub use markdown::MarkupPolicy;
pub use model::{AnnotatedNode, PureNode};

/// Build and annotate outline text in one step.
pub fn annotate(text: &str, config: &SeparatorConfig) -> AnnotatedNode {
    let tree = OutlineBuilder::new(config.clone()).build(text);
    NodeAnnotator::new(config.clone()).annotate(&tree)
}

/// Export an annotated tree to outline text.
pub fn export(tree: &AnnotatedNode, config: &SeparatorConfig) -> String {
    MarkdownExporter::new(config.clone()).export_to_string(tree)
}

/// Rewrite outline text in canonical form (annotate, then export).
pub fn normalize(text: &str, config: &SeparatorConfig) -> String {
    export(&annotate(text, config), config)
}
