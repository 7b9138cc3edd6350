//! Core data model for outline annotation.
//!
//! - [`PureNode`]: the input tree (content + children)
//! - [`AnnotatedNode`]: the output tree with inline and detailed notes

mod node;

pub use node::{AnnotatedNode, PureNode};
