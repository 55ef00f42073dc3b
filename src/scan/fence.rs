//! Markdown code fences
//!
//! Locates triple-backtick fences so their bodies can be scanned as
//! documents in the fence's language.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::grammar::FENCE_EXPRESSION;
use super::scanners::Scope;
use crate::syntax::canonical_language;

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(FENCE_EXPRESSION).expect("fence pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    /// Hint as written after the opening backticks (may be empty)
    pub hint: String,
    /// Canonical language for the hint
    pub language: String,
    /// Absolute range of the fence body, between the fence lines
    pub body: Range<usize>,
}

/// Closed fences in the scope, in document order
pub fn find_fences(scope: &Scope<'_>) -> Vec<Fence> {
    let base = scope.offset();
    FENCE
        .captures_iter(scope.slice())
        .filter_map(|caps| {
            let body = caps.name("body")?;
            let hint = caps.name("hint").map(|m| m.as_str()).unwrap_or_default();
            Some(Fence {
                hint: hint.to_string(),
                language: canonical_language(hint),
                body: base + body.start()..base + body.end(),
            })
        })
        .collect()
}
