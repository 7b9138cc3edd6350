//! Outline text → [`PureNode`] tree.
//!
//! Reads the indented outline grammar that [`crate::export::MarkdownExporter`]
//! writes:
//!
//! ```text
//! - Title: inline note
//!   > detailed note line
//!   >
//!   > another line
//!   - Child
//! ```
//!
//! Item content is kept verbatim (escape sequences included) so that the
//! annotator sees exactly what the author wrote. Consecutive block-marker
//! lines become one quote-block child rendered as
//! `<blockquote>\n<p>line<br>line</p>\n</blockquote>`.

use crate::config::SeparatorConfig;
use crate::model::PureNode;

use super::Importer;

/// Columns counted for a leading tab.
const TAB_WIDTH: usize = 2;

/// Builds outline trees from text using a separator configuration.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    config: SeparatorConfig,
}

/// An item whose subtree is still being read.
struct OpenItem {
    indent: usize,
    node: PureNode,
    quote: Vec<String>,
}

impl OpenItem {
    fn new(indent: usize, content: String) -> Self {
        Self {
            indent,
            node: PureNode::new(content),
            quote: Vec::new(),
        }
    }

    /// Turn pending block-marker lines into a quote-block child.
    fn flush_quote(&mut self) {
        if self.quote.is_empty() {
            return;
        }
        let lines: Vec<String> = self.quote.drain(..).map(|l| escape_html(&l)).collect();
        self.node.children.push(PureNode::quote_block(&lines.join("<br>")));
    }
}

/// What a single non-blank line is.
enum Line<'a> {
    Item(&'a str),
    Block(&'a str),
    Text(&'a str),
}

impl OutlineBuilder {
    pub fn new(config: SeparatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeparatorConfig {
        &self.config
    }

    /// Build a tree from outline text.
    ///
    /// The returned root has empty content; top-level items are its
    /// children. Blank lines are ignored.
    pub fn build(&self, text: &str) -> PureNode {
        let mut stack = vec![OpenItem::new(0, String::new())];

        for raw in text.lines() {
            let (indent, rest) = split_indent(raw);
            let rest = rest.trim_end();
            if rest.is_empty() {
                continue;
            }

            match self.classify(rest) {
                Line::Item(content) => {
                    close_to(&mut stack, indent);
                    if let Some(parent) = stack.last_mut() {
                        parent.flush_quote();
                    }
                    stack.push(OpenItem::new(indent, content.to_string()));
                }
                Line::Block(line) => {
                    close_to(&mut stack, indent);
                    if let Some(owner) = stack.last_mut() {
                        owner.quote.push(line.to_string());
                    }
                }
                Line::Text(line) => {
                    if stack.len() == 1 {
                        stack.push(OpenItem::new(indent, line.to_string()));
                    } else if let Some(item) = stack.last_mut() {
                        if item.node.content.is_empty() {
                            item.node.content.push_str(line);
                        } else {
                            item.node.content.push_str("<br>");
                            item.node.content.push_str(line);
                        }
                    }
                }
            }
        }

        close_to(&mut stack, 0);
        let mut root = stack
            .pop()
            .unwrap_or_else(|| OpenItem::new(0, String::new()));
        root.flush_quote();
        log::debug!(
            "event=outline_built top_level_items={}",
            root.node.children.len()
        );
        root.node
    }

    fn classify<'a>(&self, rest: &'a str) -> Line<'a> {
        let node = self.config.node();
        let note_block = self.config.note_block();

        if !node.is_empty()
            && let Some(after) = rest.strip_prefix(node)
            && (after.is_empty() || after.starts_with(char::is_whitespace))
        {
            return Line::Item(after.trim());
        }

        if !note_block.is_empty()
            && let Some(after) = rest.strip_prefix(note_block)
        {
            return Line::Block(after.strip_prefix(' ').unwrap_or(after));
        }

        if node.is_empty() {
            Line::Item(rest.trim())
        } else {
            Line::Text(rest.trim())
        }
    }
}

impl Importer for OutlineBuilder {
    fn import(&self, text: &str) -> PureNode {
        self.build(text)
    }
}

/// Pop every open item at `indent` or deeper, attaching each to its parent.
fn close_to(stack: &mut Vec<OpenItem>, indent: usize) {
    while stack.len() > 1 && stack.last().is_some_and(|top| top.indent >= indent) {
        let Some(mut done) = stack.pop() else {
            break;
        };
        done.flush_quote();
        if let Some(parent) = stack.last_mut() {
            parent.flush_quote();
            parent.node.children.push(done.node);
        }
    }
}

/// Leading indentation width and the remainder of the line.
fn split_indent(line: &str) -> (usize, &str) {
    let mut width = 0;
    for (i, c) in line.char_indices() {
        match c {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => return (width, &line[i..]),
        }
    }
    (width, "")
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> PureNode {
        OutlineBuilder::default().build(text)
    }

    #[test]
    fn test_flat_items() {
        let root = build("- a\n- b\n");
        assert_eq!(root.content, "");
        assert_eq!(root.children, vec![PureNode::new("a"), PureNode::new("b")]);
    }

    #[test]
    fn test_nesting_by_indent() {
        let root = build("- a\n  - a1\n    - a1x\n  - a2\n- b");
        assert_eq!(root.children.len(), 2);
        let a = &root.children[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].children[0].content, "a1x");
        assert_eq!(a.children[1].content, "a2");
    }

    #[test]
    fn test_tabs_count_as_indent() {
        let root = build("- a\n\t- b");
        assert_eq!(root.children[0].children[0].content, "b");
    }

    #[test]
    fn test_content_is_verbatim() {
        let root = build("- A\\: B: C");
        assert_eq!(root.children[0].content, "A\\: B: C");
    }

    #[test]
    fn test_block_lines_join_into_one_quote() {
        let root = build("- a\n  > first\n  >\n  > <b> & c\n  - child");
        let a = &root.children[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(
            a.children[0].content,
            "<blockquote>\n<p>first<br><br>&lt;b&gt; &amp; c</p>\n</blockquote>"
        );
        assert_eq!(a.children[1].content, "child");
    }

    #[test]
    fn test_block_after_child_stays_after() {
        let root = build("- a\n  - child\n  > late");
        let a = &root.children[0];
        assert_eq!(a.children[0].content, "child");
        assert!(a.children[1].content.starts_with("<blockquote>"));
    }

    #[test]
    fn test_marker_needs_whitespace() {
        let root = build("- a\n  -5 degrees");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].content, "a<br>-5 degrees");
    }

    #[test]
    fn test_text_before_any_item_becomes_item() {
        let root = build("Title\n- a");
        assert_eq!(root.children[0].content, "Title");
        assert_eq!(root.children[1].content, "a");
    }

    #[test]
    fn test_empty_item() {
        let root = build("-\n  - child");
        assert_eq!(root.children[0].content, "");
        assert_eq!(root.children[0].children[0].content, "child");
    }

    #[test]
    fn test_custom_markers() {
        let config = SeparatorConfig::new().with_node("*").with_note_block("|");
        let root = OutlineBuilder::new(config).build("* a\n  | note\n  * b");
        let a = &root.children[0];
        assert_eq!(a.children.len(), 2);
        assert!(a.children[0].content.contains("<p>note</p>"));
        assert_eq!(a.children[1].content, "b");
    }

    #[test]
    fn test_blank_lines_ignored() {
        let root = build("- a\n\n\n- b\r\n");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].content, "b");
    }
}
