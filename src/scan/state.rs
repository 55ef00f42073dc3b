//! Per-scan language state
//!
//! [`ParseState`] is derived from a language id, its comment syntax and the
//! global toggles. It decides which scanners run and carries the escaped
//! delimiter fragments the grammar builder splices into its patterns.

use serde::{Deserialize, Serialize};

use crate::syntax::{suppresses_first_line, uses_doc_blocks, CommentSyntax, MARKDOWN, PLAIN_TEXT};
use crate::tags::escape_tag;

/// Global highlighting switches, owned by the caller's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanToggles {
    pub highlight_markdown: bool,
    pub multiline_comments: bool,
    pub highlight_plain_text: bool,
    pub use_jsdoc_style: bool,
}

impl Default for ScanToggles {
    fn default() -> Self {
        Self {
            highlight_markdown: true,
            multiline_comments: true,
            highlight_plain_text: false,
            use_jsdoc_style: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub language: String,
    /// A syntax entry exists, or plain text highlighting is on
    pub supported: bool,
    pub plain_text: bool,
    /// Markdown document with Markdown highlighting enabled
    pub markdown: bool,
    pub ignore_first_line: bool,
    pub highlight_single_line: bool,
    pub highlight_block: bool,
    pub highlight_doc: bool,
    /// Escaped single-line delimiters joined as an alternation
    pub delimiter: String,
    /// `delimiter` is the block start, standing in for a missing line comment
    pub line_from_block: bool,
    pub block_start: String,
    pub block_end: String,
}

impl ParseState {
    /// `language` must already be canonical
    pub fn new(language: &str, syntax: Option<&CommentSyntax>, toggles: &ScanToggles) -> Self {
        let mut state = ParseState {
            language: language.to_string(),
            markdown: language == MARKDOWN && toggles.highlight_markdown,
            ..Default::default()
        };

        if let Some(syntax) = syntax {
            let block = syntax.block_delimiters();
            let mut delimiters = syntax.line_delimiters();
            if delimiters.is_empty() {
                // No line comment form: a block opener doubles as one
                delimiters.extend(block.map(|(start, _)| start));
                state.line_from_block = !delimiters.is_empty();
            }

            state.delimiter = delimiters
                .iter()
                .map(|d| escape_tag(d))
                .collect::<Vec<_>>()
                .join("|");

            if let Some((start, end)) = block {
                state.block_start = escape_tag(start);
                state.block_end = escape_tag(end);
                state.highlight_block = toggles.multiline_comments;
            }

            state.supported = true;
        }

        if language == PLAIN_TEXT {
            state.plain_text = true;
            state.supported = toggles.highlight_plain_text;
        }

        if !state.supported {
            return ParseState {
                language: state.language,
                plain_text: state.plain_text,
                markdown: state.markdown,
                ..Default::default()
            };
        }

        state.ignore_first_line = suppresses_first_line(language);
        state.highlight_doc = uses_doc_blocks(language) && toggles.use_jsdoc_style;
        state.highlight_single_line = state.plain_text || !state.delimiter.is_empty();
        state
    }

    /// The `/** */` scanner also runs inside ordinary block comments
    pub fn scans_doc_blocks(&self) -> bool {
        self.highlight_doc || self.highlight_block
    }
}
