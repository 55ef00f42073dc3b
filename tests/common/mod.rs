//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use tagline::{Config, Decorations, Highlighter, ScanToggles, SyntaxResolver, TagRegistry, TagSpec};

/// The tag list a fresh install starts with
pub fn default_specs() -> Vec<TagSpec> {
    Config::default().tags
}

/// Highlighter with default tags, toggles and the built-in language table
pub fn highlighter() -> Highlighter {
    highlighter_with(&default_specs(), ScanToggles::default())
}

pub fn highlighter_with(specs: &[TagSpec], toggles: ScanToggles) -> Highlighter {
    Highlighter::new(
        TagRegistry::new(specs),
        toggles,
        Arc::new(SyntaxResolver::builtin()),
    )
}

/// Decorated text in document order
pub fn spans(text: &str, decorations: &Decorations) -> Vec<String> {
    decorations
        .to_sorted_vec()
        .iter()
        .map(|d| text[d.range()].to_string())
        .collect()
}
