//! Separator configuration.
//!
//! A [`SeparatorConfig`] is an immutable value holding the four markers that
//! drive both parsing and export. It is built once, from
//! [`SeparatorOverrides`] merged over the defaults, and handed by value (or
//! reference) to each parser or exporter instance. There is no process-wide
//! default object; two instances configured differently never interfere.

/// Default node-item marker.
pub const DEFAULT_NODE: &str = "-";
/// Default inline-note separator.
pub const DEFAULT_NOTE: &str = ":";
/// Default detailed-note block marker.
pub const DEFAULT_NOTE_BLOCK: &str = ">";
/// Default escape token.
pub const DEFAULT_ESCAPE: &str = "\\";

/// The complete set of markers used by the annotator and exporter.
///
/// An empty marker disables the feature it controls instead of being an
/// error: an empty `note` separator never splits, an empty `note_block`
/// never extracts detailed notes, and an empty `escape` leaves text as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeparatorConfig {
    node: String,
    note: String,
    note_block: String,
    escape: String,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            node: DEFAULT_NODE.to_string(),
            note: DEFAULT_NOTE.to_string(),
            note_block: DEFAULT_NOTE_BLOCK.to_string(),
            escape: DEFAULT_ESCAPE.to_string(),
        }
    }
}

impl SeparatorConfig {
    /// Create a configuration with all defaults (`-`, `:`, `>`, `\`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge caller overrides over the defaults.
    pub fn from_overrides(overrides: SeparatorOverrides) -> Self {
        let defaults = Self::default();
        Self {
            node: overrides.node.unwrap_or(defaults.node),
            note: overrides.note.unwrap_or(defaults.note),
            note_block: overrides.note_block.unwrap_or(defaults.note_block),
            escape: overrides.escape.unwrap_or(defaults.escape),
        }
    }

    /// Return a copy with a different node-item marker.
    pub fn with_node(mut self, marker: impl Into<String>) -> Self {
        self.node = marker.into();
        self
    }

    /// Return a copy with a different inline-note separator.
    pub fn with_note(mut self, marker: impl Into<String>) -> Self {
        self.note = marker.into();
        self
    }

    /// Return a copy with a different detailed-note block marker.
    pub fn with_note_block(mut self, marker: impl Into<String>) -> Self {
        self.note_block = marker.into();
        self
    }

    /// Return a copy with a different escape token.
    pub fn with_escape(mut self, marker: impl Into<String>) -> Self {
        self.escape = marker.into();
        self
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn note_block(&self) -> &str {
        &self.note_block
    }

    pub fn escape(&self) -> &str {
        &self.escape
    }
}

/// Partial separator configuration supplied by a caller.
///
/// Unset fields fall back to the defaults when merged through
/// [`SeparatorConfig::from_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", deny_unknown_fields)
)]
pub struct SeparatorOverrides {
    pub node: Option<String>,
    pub note: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "note_block"))]
    pub note_block: Option<String>,
    pub escape: Option<String>,
}

impl SeparatorOverrides {
    /// Parse overrides from a JSON object such as
    /// `{"note": "::", "noteBlock": "|"}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: SeparatorOverrides) -> Self {
        Self {
            node: other.node.or(self.node),
            note: other.note.or(self.note),
            note_block: other.note_block.or(self.note_block),
            escape: other.escape.or(self.escape),
        }
    }
}

impl From<SeparatorOverrides> for SeparatorConfig {
    fn from(overrides: SeparatorOverrides) -> Self {
        Self::from_overrides(overrides)
    }
}
