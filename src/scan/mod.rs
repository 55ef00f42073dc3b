//! Comment tag scanning
//!
//! ## Architecture
//!
//! ```text
//! language id → SyntaxResolver → ParseState ─┐
//!                         TagRegistry ───────┴→ Grammar (regex sources)
//!                                               → CompiledGrammar
//!   single-line ┐
//!   block       ├→ Decorations (grouped per tag)
//!   doc block   │
//!   md lists    │
//!   md fences ──┘ (re-enters single-line + block on each fence body)
//! ```
//!
//! A scan is a pure function of the text, the language and the
//! configuration. The only shared state is the resolver's cache.

mod fence;
mod grammar;
mod scanners;
mod state;

use std::ops::Range;
use std::sync::Arc;

pub use fence::{find_fences, Fence};
pub use grammar::{
    block_expression, block_line_expression, doc_line_expression, markdown_list_expression,
    single_line_expression, Grammar, DOC_BLOCK_EXPRESSION, FENCE_EXPRESSION,
};
pub use scanners::{
    block_regions, scan_blocks, scan_doc_blocks, scan_markdown_lists, scan_single_line,
    BlockRegion, CompiledGrammar, Scope,
};
pub use state::{ParseState, ScanToggles};

use crate::decorations::{Decoration, Decorations};
use crate::document::Document;
use crate::syntax::{canonical_language, SyntaxResolver};
use crate::tags::TagRegistry;

/// Which scanners a pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Top-level document: every scanner plus fence recursion
    Document,
    /// Fence body: single-line and block scanners only
    Embedded,
}

/// Scans documents for tagged comments
#[derive(Debug, Clone)]
pub struct Highlighter {
    tags: TagRegistry,
    toggles: ScanToggles,
    resolver: Arc<SyntaxResolver>,
}

impl Highlighter {
    pub fn new(tags: TagRegistry, toggles: ScanToggles, resolver: Arc<SyntaxResolver>) -> Self {
        Self {
            tags,
            toggles,
            resolver,
        }
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn toggles(&self) -> &ScanToggles {
        &self.toggles
    }

    pub fn resolver(&self) -> &SyntaxResolver {
        &self.resolver
    }

    /// Language state for a language id or fence hint
    pub fn parse_state(&self, language: &str) -> ParseState {
        let language = canonical_language(language);
        let syntax = self.resolver.resolve(&language);
        ParseState::new(&language, syntax.as_deref(), &self.toggles)
    }

    /// Scan a whole document
    pub fn scan(&self, text: &str, language: &str) -> Decorations {
        self.scan_range(text, 0..text.len(), language)
    }

    /// Scan `text[range]`, reporting offsets relative to the start of `text`
    pub fn scan_range(&self, text: &str, range: Range<usize>, language: &str) -> Decorations {
        let scope = Scope::sub_range(text, range);
        let matches = self.scan_scope(&scope, language, Pass::Document);
        Decorations::collect(&self.tags, matches)
    }

    pub fn scan_document(&self, document: &Document) -> Decorations {
        let text = document.text();
        self.scan(&text, document.language())
    }

    fn scan_scope(&self, scope: &Scope<'_>, language: &str, pass: Pass) -> Vec<Decoration> {
        if self.tags.is_empty() {
            return Vec::new();
        }

        let state = self.parse_state(language);
        if !state.supported && !state.markdown {
            tracing::trace!(language = %state.language, "Language not supported, skipping");
            return Vec::new();
        }

        let grammar = match CompiledGrammar::compile(&Grammar::build(&state, &self.tags)) {
            Ok(grammar) => grammar,
            Err(e) => {
                tracing::warn!(language = %state.language, "Failed to compile comment grammar: {}", e);
                return Vec::new();
            }
        };

        let mut matches = scan_single_line(scope, &state, &grammar, &self.tags);
        matches.extend(scan_blocks(scope, &state, &grammar, &self.tags));

        if pass == Pass::Document {
            matches.extend(scan_doc_blocks(scope, &state, &grammar, &self.tags));
            matches.extend(scan_markdown_lists(scope, &state, &grammar, &self.tags));

            if state.markdown {
                for fence in find_fences(scope) {
                    let body = Scope::sub_range(scope.text(), fence.body.clone());
                    matches.extend(self.scan_scope(&body, &fence.language, Pass::Embedded));
                }
            }
        }

        tracing::trace!(
            language = %state.language,
            offset = scope.offset(),
            matches = matches.len(),
            "Scanned scope"
        );
        matches
    }
}
