//! Note annotation over an outline tree.
//!
//! [`NodeAnnotator`] walks a [`PureNode`] tree and produces an
//! [`AnnotatedNode`] tree. For every node it:
//!
//! 1. skips note parsing entirely when the content carries markup outside
//!    the [`MarkupPolicy`] allow-list (children are still visited);
//! 2. otherwise splits the inline note off the content, and
//! 3. turns a leading run of quote-block children (or a quote wrapper
//!    embedded in the content itself) into the detailed note.
//!
//! Annotation is total: ambiguous input degrades to "no note".

use crate::config::SeparatorConfig;
use crate::markdown::{
    MarkupPolicy, extract_detailed_note, split_embedded_quote, split_inline_note,
    strip_paragraph,
};
use crate::model::{AnnotatedNode, PureNode};

/// Parses inline and detailed notes out of outline trees.
///
/// An annotator owns its configuration; instances built with different
/// separators can be used side by side, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct NodeAnnotator {
    config: SeparatorConfig,
    policy: MarkupPolicy,
}

/// The annotated parts of a single node, before recursion.
struct NodeNotes<'a> {
    content: String,
    inline_note: Option<String>,
    detailed_note: Option<String>,
    rest: &'a [PureNode],
}

impl NodeAnnotator {
    /// Create an annotator with the default markup policy.
    pub fn new(config: SeparatorConfig) -> Self {
        Self {
            config,
            policy: MarkupPolicy::default(),
        }
    }

    /// Replace the markup policy.
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &SeparatorConfig {
        &self.config
    }

    pub fn policy(&self) -> &MarkupPolicy {
        &self.policy
    }

    /// Annotate `node` and its whole subtree.
    pub fn annotate(&self, node: &PureNode) -> AnnotatedNode {
        let notes = self.annotate_node(node);
        AnnotatedNode {
            content: notes.content,
            inline_note: notes.inline_note,
            detailed_note: notes.detailed_note,
            children: notes.rest.iter().map(|child| self.annotate(child)).collect(),
        }
    }

    fn annotate_node<'a>(&self, node: &'a PureNode) -> NodeNotes<'a> {
        let note = self.config.note();
        let escape = self.config.escape();
        let note_block = self.config.note_block();

        if let Some(tag) = self.policy.first_disallowed(&node.content, escape) {
            log::debug!("event=note_parsing_skipped reason=markup tag={}", tag.name);
            return NodeNotes {
                content: node.content.clone(),
                inline_note: None,
                detailed_note: None,
                rest: &node.children,
            };
        }

        let embedded = if note_block.is_empty() {
            None
        } else {
            split_embedded_quote(&node.content, escape)
        };

        let (head, embedded_note) = match embedded {
            Some((head, quote)) => (strip_paragraph(head), Some(quote)),
            None => (node.content.as_str(), None),
        };

        let split = split_inline_note(head, note, escape);
        let extraction = extract_detailed_note(&node.children, note_block);

        let detailed_note = match (embedded_note, extraction.detailed_note) {
            (Some(own), Some(from_children)) => Some(join_notes(own, &from_children)),
            (own, from_children) => own.or(from_children),
        };

        NodeNotes {
            content: split.main,
            inline_note: split.note,
            detailed_note,
            rest: extraction.rest,
        }
    }
}

fn join_notes(mut first: String, second: &str) -> String {
    if first.is_empty() {
        return second.to_string();
    }
    if !second.is_empty() {
        first.push('\n');
        first.push_str(second);
    }
    first
}
