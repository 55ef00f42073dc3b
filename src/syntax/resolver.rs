//! Read-through cache in front of a [`SyntaxSource`]
//!
//! Lookups are keyed by canonical language id. Misses, including languages
//! the source does not know, are cached so repeated lookups stay cheap. The
//! cache is only dropped through [`SyntaxResolver::invalidate`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::languages::canonical_language;
use super::registry::{BuiltinSyntaxSource, CommentSyntax, SyntaxSource};

type SyntaxCache = HashMap<String, Option<Arc<CommentSyntax>>>;

pub struct SyntaxResolver {
    source: Box<dyn SyntaxSource>,
    cache: RwLock<SyntaxCache>,
}

impl SyntaxResolver {
    pub fn new(source: impl SyntaxSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolver backed by the compiled-in language table
    pub fn builtin() -> Self {
        Self::new(BuiltinSyntaxSource)
    }

    /// Comment syntax for a language id or fence hint
    pub fn resolve(&self, language: &str) -> Option<Arc<CommentSyntax>> {
        let key = canonical_language(language);

        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = cache.get(&key) {
                return cached.clone();
            }
        }

        let resolved = self.source.lookup(&key).map(Arc::new);
        tracing::debug!(
            language = %key,
            found = resolved.is_some(),
            "Resolved comment syntax"
        );

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.entry(key).or_insert(resolved).clone()
    }

    /// Drop every cached entry; later lookups hit the source again
    pub fn invalidate(&self) {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(entries = cache.len(), "Invalidating comment syntax cache");
        cache.clear();
    }

    pub fn cached_languages(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for SyntaxResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for SyntaxResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxResolver")
            .field("cached_languages", &self.cached_languages())
            .finish_non_exhaustive()
    }
}
