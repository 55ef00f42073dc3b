//! Tag registry
//!
//! Normalizes the configured tag list into [`TagDefinition`]s that carry a
//! regex-escaped form of the marker and a stable style handle. The registry
//! is immutable; configuration changes rebuild it wholesale.

use serde::{Deserialize, Serialize};

/// Visual style requested for a tag
///
/// Colors are passed through as configured (e.g. `"#FF8C00"`); they are
/// only interpreted by whoever draws the decorations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
}

/// A user-configured tag, as it appears in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    /// Marker text, matched case-insensitively (e.g. `"TODO"`, `"!"`)
    pub tag: String,
    #[serde(flatten)]
    pub style: TagStyle,
}

impl TagSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            style: TagStyle::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    pub fn with_strikethrough(mut self) -> Self {
        self.style.strikethrough = true;
        self
    }
}

/// Opaque handle for the style a tag is drawn with
///
/// Handles are assigned once when the registry is built and stay valid for
/// every scan made with that registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StyleId(u32);

impl StyleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Normalized tag used by the grammar builder and the scanners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub tag: String,
    /// `tag` with regex metacharacters and forward slashes escaped
    pub escaped_tag: String,
    pub style: StyleId,
    folded: String,
}

/// Ordered set of tag definitions; declaration order decides ties
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    definitions: Vec<TagDefinition>,
    styles: Vec<TagStyle>,
}

impl TagRegistry {
    pub fn new(specs: &[TagSpec]) -> Self {
        let mut definitions = Vec::with_capacity(specs.len());
        let mut styles = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            definitions.push(TagDefinition {
                tag: spec.tag.clone(),
                escaped_tag: escape_tag(&spec.tag),
                style: StyleId(index as u32),
                folded: spec.tag.to_lowercase(),
            });
            styles.push(spec.style.clone());
        }

        tracing::debug!(count = definitions.len(), "Built tag registry");
        Self {
            definitions,
            styles,
        }
    }

    pub fn definitions(&self) -> &[TagDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Style requested for a handle handed out by this registry
    pub fn style(&self, id: StyleId) -> Option<&TagStyle> {
        self.styles.get(id.index())
    }

    pub fn definition(&self, id: StyleId) -> Option<&TagDefinition> {
        self.definitions.get(id.index())
    }

    /// Regex alternation of every escaped tag, in declaration order
    pub fn alternation(&self) -> String {
        self.definitions
            .iter()
            .map(|def| def.escaped_tag.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Case-insensitive lookup of a captured marker; the first declared tag wins
    pub fn find(&self, captured: &str) -> Option<&TagDefinition> {
        let folded = captured.to_lowercase();
        self.definitions.iter().find(|def| def.folded == folded)
    }
}

/// Escape a tag for embedding in a regex alternation
pub fn escape_tag(tag: &str) -> String {
    regex::escape(tag).replace('/', "\\/")
}
