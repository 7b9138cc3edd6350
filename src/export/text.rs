//! Markdown Exporter - converts an annotated tree back to outline text.
//!
//! Walks the tree depth first and emits one line per node:
//!
//! ```text
//! <indent><node> <escaped content><note> <escaped inline note>
//! <indent+1><block> detailed note line
//! <indent+1><node> child ...
//! ```
//!
//! Re-reading the output with [`crate::import::OutlineBuilder`] and
//! annotating it with the same separators yields an equal tree.

use std::io::{self, Write};

use crate::config::SeparatorConfig;
use crate::markdown::{
    MarkupPolicy, QUOTE_TAG, escape_marker_text, find_unescaped, unescaped_tags,
};
use crate::model::AnnotatedNode;

use super::Exporter;

/// Layout options for outline export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownConfig {
    /// Spaces per depth level.
    pub indent_width: usize,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Exporter for outline Markdown output.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    separators: SeparatorConfig,
    config: MarkdownConfig,
    policy: MarkupPolicy,
}

impl MarkdownExporter {
    /// Create an exporter with default layout.
    pub fn new(separators: SeparatorConfig) -> Self {
        Self {
            separators,
            ..Default::default()
        }
    }

    /// Use the specified layout configuration.
    pub fn with_config(mut self, config: MarkdownConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the markup policy of the annotator that will re-read the output.
    ///
    /// Content the annotator would pass through untouched is written
    /// verbatim instead of escaped.
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn separators(&self) -> &SeparatorConfig {
        &self.separators
    }

    /// Render `tree` to a string.
    ///
    /// A root with empty content and no inline note is elided: its detailed
    /// note becomes top-level block lines and its children are written at
    /// depth 0, which is where the outline builder attaches them.
    pub fn export_to_string(&self, tree: &AnnotatedNode) -> String {
        let mut ctx = RenderContext::new(self);
        if tree.content.is_empty() && tree.inline_note.is_none() {
            if let Some(note) = &tree.detailed_note
                && !self.separators.note_block().is_empty()
            {
                ctx.write_detailed_note(note, 0);
            }
            for child in &tree.children {
                ctx.walk_node(child, 0);
            }
        } else {
            ctx.walk_node(tree, 0);
        }
        log::debug!(
            "event=outline_exported lines={} bytes={}",
            ctx.lines,
            ctx.output.len()
        );
        ctx.output
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, tree: &AnnotatedNode, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.export_to_string(tree).as_bytes())
    }
}

/// Output accumulation for a single export.
struct RenderContext<'a> {
    separators: &'a SeparatorConfig,
    config: &'a MarkdownConfig,
    policy: &'a MarkupPolicy,
    output: String,
    lines: usize,
}

impl<'a> RenderContext<'a> {
    fn new(exporter: &'a MarkdownExporter) -> Self {
        Self {
            separators: &exporter.separators,
            config: &exporter.config,
            policy: &exporter.policy,
            output: String::new(),
            lines: 0,
        }
    }

    fn walk_node(&mut self, node: &AnnotatedNode, depth: usize) {
        // Root elision: an empty, note-less parent hands its children up
        if node.content.is_empty() && !node.has_note() && !node.children.is_empty() {
            for child in &node.children {
                self.walk_node(child, depth);
            }
            return;
        }

        self.write_item(node, depth);

        if let Some(note) = &node.detailed_note
            && !self.separators.note_block().is_empty()
        {
            self.write_detailed_note(note, depth + 1);
        }

        for child in &node.children {
            self.walk_node(child, depth + 1);
        }
    }

    fn write_item(&mut self, node: &AnnotatedNode, depth: usize) {
        let marker = self.separators.node();

        self.write_indent(depth);
        self.output.push_str(marker);

        let text = self.item_text(node);
        if !text.is_empty() {
            if !marker.is_empty() {
                self.output.push(' ');
            }
            self.output.push_str(&text);
        }

        self.write_newline();
    }

    /// Everything after the node marker: content, then the inline note.
    ///
    /// Content the annotator skips for its markup is written verbatim when
    /// the node has no notes. Otherwise separators are escaped, and so is
    /// every tag that would stop note parsing or open an embedded quote.
    fn item_text(&self, node: &AnnotatedNode) -> String {
        let note_sep = self.separators.note();
        let escape = self.separators.escape();

        if !node.has_note()
            && self
                .policy
                .first_disallowed(&node.content, escape)
                .is_some()
        {
            return node.content.clone();
        }

        let mut text = escape_marker_text(&node.content, note_sep, escape);

        if let Some(note) = &node.inline_note
            && !note_sep.is_empty()
        {
            if !text.is_empty() && !self.separator_attaches(&text) {
                text.push(' ');
            }
            text.push_str(note_sep);
            let note = escape_marker_text(note, note_sep, escape);
            if !note.is_empty() {
                text.push(' ');
                text.push_str(&note);
            }
        }

        self.protect_markup(text)
    }

    /// Whether the separator can follow `content` without a space and still
    /// be the first unescaped separator on the line.
    fn separator_attaches(&self, content: &str) -> bool {
        let note_sep = self.separators.note();
        let mut line = String::with_capacity(content.len() + note_sep.len());
        line.push_str(content);
        line.push_str(note_sep);
        find_unescaped(&line, note_sep, self.separators.escape()) == Some(content.len())
    }

    /// Escape the `<` of disallowed tags and opening quote tags.
    fn protect_markup(&self, mut text: String) -> String {
        let escape = self.separators.escape();
        if escape.is_empty() {
            return text;
        }
        loop {
            let next = unescaped_tags(&text, escape)
                .find(|tag| (!tag.closing && tag.is(QUOTE_TAG)) || !self.policy.is_allowed(tag.name))
                .map(|tag| tag.start);
            let Some(at) = next else {
                return text;
            };
            text.insert_str(at, escape);
        }
    }

    fn write_detailed_note(&mut self, note: &str, depth: usize) {
        let block = self.separators.note_block();
        for line in note.split('\n') {
            self.write_indent(depth);
            self.output.push_str(block);
            if !line.is_empty() {
                self.output.push(' ');
                self.output.push_str(line.trim_end());
            }
            self.write_newline();
        }
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.config.indent_width {
            self.output.push(' ');
        }
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
        self.lines += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(tree: &AnnotatedNode) -> String {
        MarkdownExporter::default().export_to_string(tree)
    }

    fn root(children: Vec<AnnotatedNode>) -> AnnotatedNode {
        AnnotatedNode::new("").with_children(children)
    }

    #[test]
    fn test_plain_items() {
        let tree = root(vec![
            AnnotatedNode::new("a").with_children(vec![AnnotatedNode::new("a1")]),
            AnnotatedNode::new("b"),
        ]);
        assert_eq!(export(&tree), "- a\n  - a1\n- b\n");
    }

    #[test]
    fn test_inline_note() {
        let tree = root(vec![AnnotatedNode::new("Title").with_inline_note("Note")]);
        assert_eq!(export(&tree), "- Title: Note\n");
    }

    #[test]
    fn test_empty_inline_note_keeps_trailing_separator() {
        let tree = root(vec![
            AnnotatedNode::new("Title").with_inline_note(""),
            AnnotatedNode::new("Plain"),
        ]);
        assert_eq!(export(&tree), "- Title:\n- Plain\n");
    }

    #[test]
    fn test_separators_are_escaped() {
        let tree = root(vec![AnnotatedNode::new("A: B").with_inline_note("C: D")]);
        assert_eq!(export(&tree), "- A\\: B: C\\: D\n");
    }

    #[test]
    fn test_escape_token_is_doubled() {
        let tree = root(vec![AnnotatedNode::new("C:\\dir")]);
        assert_eq!(export(&tree), "- C\\:\\\\dir\n");
    }

    #[test]
    fn test_detailed_note_lines() {
        let tree = root(vec![
            AnnotatedNode::new("Title")
                .with_detailed_note("First\n\nThird")
                .with_children(vec![AnnotatedNode::new("Child")]),
        ]);
        assert_eq!(
            export(&tree),
            "- Title\n  > First\n  >\n  > Third\n  - Child\n"
        );
    }

    #[test]
    fn test_empty_detailed_note() {
        let tree = root(vec![AnnotatedNode::new("Title").with_detailed_note("")]);
        assert_eq!(export(&tree), "- Title\n  >\n");
    }

    #[test]
    fn test_empty_parent_promotes_children() {
        let tree = root(vec![
            AnnotatedNode::new("").with_children(vec![AnnotatedNode::new("x")]),
        ]);
        assert_eq!(export(&tree), "- x\n");
    }

    #[test]
    fn test_empty_leaf_is_kept() {
        let tree = root(vec![AnnotatedNode::new(""), AnnotatedNode::new("b")]);
        assert_eq!(export(&tree), "-\n- b\n");
    }

    #[test]
    fn test_empty_content_with_inline_note() {
        let tree = root(vec![AnnotatedNode::new("").with_inline_note("n")]);
        assert_eq!(export(&tree), "- : n\n");
    }

    #[test]
    fn test_non_empty_root_is_written() {
        let tree = AnnotatedNode::new("Root").with_children(vec![AnnotatedNode::new("c")]);
        assert_eq!(export(&tree), "- Root\n  - c\n");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(export(&AnnotatedNode::default()), "");
    }

    #[test]
    fn test_markup_content_is_verbatim() {
        let tree = root(vec![AnnotatedNode::new("<a href=\"http://x\">y</a>")]);
        assert_eq!(export(&tree), "- <a href=\"http://x\">y</a>\n");
    }

    #[test]
    fn test_separator_spaced_when_it_would_not_attach() {
        let tree = root(vec![AnnotatedNode::new("a\\").with_inline_note("n")]);
        assert_eq!(export(&tree), "- a\\\\ : n\n");

        let separators = SeparatorConfig::new().with_note("::");
        let tree = root(vec![AnnotatedNode::new("a:").with_inline_note("n")]);
        let out = MarkdownExporter::new(separators).export_to_string(&tree);
        assert_eq!(out, "- a: :: n\n");
    }

    #[test]
    fn test_overlapping_separators_are_escaped() {
        let separators = SeparatorConfig::new().with_note("::");
        let tree = root(vec![AnnotatedNode::new("a:::b")]);
        let out = MarkdownExporter::new(separators).export_to_string(&tree);
        assert_eq!(out, "- a\\:\\::b\n");
    }

    #[test]
    fn test_root_detailed_note_is_top_level() {
        let tree = AnnotatedNode::new("")
            .with_detailed_note("intro\n\nmore")
            .with_children(vec![AnnotatedNode::new("a")]);
        assert_eq!(export(&tree), "> intro\n>\n> more\n- a\n");
    }

    #[test]
    fn test_root_with_inline_note_is_written() {
        let tree = AnnotatedNode::new("").with_inline_note("n");
        assert_eq!(export(&tree), "- : n\n");
    }

    #[test]
    fn test_markup_in_annotated_content_is_escaped() {
        let tree = root(vec![AnnotatedNode::new("<a>").with_inline_note("y")]);
        assert_eq!(export(&tree), "- \\<a>: y\n");

        let tree = root(vec![AnnotatedNode::new("<a href=\"u\">x</a>").with_detailed_note("d")]);
        assert_eq!(export(&tree), "- \\<a href=\"u\">x\\</a>\n  > d\n");
    }

    #[test]
    fn test_markup_in_inline_note_is_escaped() {
        let tree = root(vec![AnnotatedNode::new("Title").with_inline_note("<a> or <blockquote>")]);
        assert_eq!(export(&tree), "- Title: \\<a> or \\<blockquote>\n");
    }

    #[test]
    fn test_quote_tag_in_content_is_escaped() {
        let tree = root(vec![AnnotatedNode::new("x<blockquote>y")]);
        assert_eq!(export(&tree), "- x\\<blockquote>y\n");
    }

    #[test]
    fn test_custom_separators() {
        let separators = SeparatorConfig::new()
            .with_node("*")
            .with_note("::")
            .with_note_block("|")
            .with_escape("%");
        let tree = root(vec![
            AnnotatedNode::new("a :: b")
                .with_inline_note("c")
                .with_detailed_note("d"),
        ]);
        let out = MarkdownExporter::new(separators).export_to_string(&tree);
        assert_eq!(out, "* a %:: b:: c\n  | d\n");
    }

    #[test]
    fn test_empty_markers_skip_notes() {
        let separators = SeparatorConfig::new().with_note("").with_note_block("");
        let tree = root(vec![
            AnnotatedNode::new("a")
                .with_inline_note("b")
                .with_detailed_note("c"),
        ]);
        let out = MarkdownExporter::new(separators).export_to_string(&tree);
        assert_eq!(out, "- a\n");
    }

    #[test]
    fn test_indent_width() {
        let tree = root(vec![
            AnnotatedNode::new("a").with_children(vec![AnnotatedNode::new("b")]),
        ]);
        let out = MarkdownExporter::default()
            .with_config(MarkdownConfig { indent_width: 4 })
            .export_to_string(&tree);
        assert_eq!(out, "- a\n    - b\n");
    }

    #[test]
    fn test_export_to_writer() {
        let tree = root(vec![AnnotatedNode::new("a")]);
        let mut buf = Vec::new();
        MarkdownExporter::default().export(&tree, &mut buf).unwrap();
        assert_eq!(buf, b"- a\n");
    }
}
