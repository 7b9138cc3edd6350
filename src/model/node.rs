//! Outline tree node types.

/// A node of the outline tree before annotation.
///
/// `content` may embed a restricted markup subset (emphasis, strong, line
/// break, paragraph, list, block-quote wrapper).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PureNode {
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<PureNode>,
}

impl PureNode {
    /// Create a leaf node.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn with_children(content: impl Into<String>, children: Vec<PureNode>) -> Self {
        Self {
            content: content.into(),
            children,
        }
    }

    /// Create a block-quote node as produced by the outline builder.
    pub fn quote_block(text: &str) -> Self {
        Self::new(format!("<blockquote>\n<p>{text}</p>\n</blockquote>"))
    }
}

/// A node of the outline tree after note extraction.
///
/// Whether the node carries a note is derived from the two optional fields
/// (see [`AnnotatedNode::has_note`]) and never stored separately. An empty
/// string note is distinct from an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedNode {
    pub content: String,
    pub inline_note: Option<String>,
    pub detailed_note: Option<String>,
    pub children: Vec<AnnotatedNode>,
}

impl AnnotatedNode {
    /// Create a node without notes.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the inline note.
    pub fn with_inline_note(mut self, note: impl Into<String>) -> Self {
        self.inline_note = Some(note.into());
        self
    }

    /// Set the detailed note.
    pub fn with_detailed_note(mut self, note: impl Into<String>) -> Self {
        self.detailed_note = Some(note.into());
        self
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<AnnotatedNode>) -> Self {
        self.children = children;
        self
    }

    /// True when either note is present, even if empty.
    pub fn has_note(&self) -> bool {
        self.inline_note.is_some() || self.detailed_note.is_some()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Pre-order depth sequence of this subtree, starting at 0 for `self`.
    pub fn depths(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            out.push(depth);
            for child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AnnotatedNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("AnnotatedNode", 5)?;
        state.serialize_field("content", &self.content)?;
        if let Some(note) = &self.inline_note {
            state.serialize_field("inlineNote", note)?;
        } else {
            state.skip_field("inlineNote")?;
        }
        if let Some(note) = &self.detailed_note {
            state.serialize_field("detailedNote", note)?;
        } else {
            state.skip_field("detailedNote")?;
        }
        state.serialize_field("hasNote", &self.has_note())?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}
