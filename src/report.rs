//! Scan results in human terms
//!
//! Joins decorations with their document to produce line/column positions
//! and the tagged text, for listing or JSON output.

use serde::Serialize;

use crate::decorations::Decorations;
use crate::document::Document;
use crate::tags::TagRegistry;

/// One tagged span, positioned for display (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagMatch {
    pub source: String,
    pub tag: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

/// Matches in document order
pub fn collect_matches(
    source: &str,
    document: &Document,
    tags: &TagRegistry,
    decorations: &Decorations,
) -> Vec<TagMatch> {
    decorations
        .to_sorted_vec()
        .into_iter()
        .filter_map(|decoration| {
            let definition = tags.definition(decoration.style)?;
            let position = document.offset_to_position(decoration.start);
            Some(TagMatch {
                source: source.to_string(),
                tag: definition.tag.clone(),
                start: decoration.start,
                end: decoration.end,
                line: position.line + 1,
                column: position.column + 1,
                text: document.slice(decoration.range())?,
            })
        })
        .collect()
}

impl TagMatch {
    pub fn to_text_line(&self) -> String {
        format!(
            "{}:{}:{}: {}  {}",
            self.source, self.line, self.column, self.tag, self.text
        )
    }

    pub fn to_json_line(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize match: {}", e))
    }
}
