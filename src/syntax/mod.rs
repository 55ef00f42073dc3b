//! Language comment syntax
//!
//! Provides everything needed to answer "what do comments look like here?":
//! - Language detection from file paths and Markdown fence hints
//! - Pluggable comment syntax sources (built-in table, JSONC files)
//! - A cached resolver shared by every scan
//!
//! ## Lookup flow
//!
//! ```text
//! "py" → canonical_language → "python" → SyntaxResolver cache
//!      → (miss) SyntaxSource::lookup → cached Some/None
//! ```

mod languages;
mod registry;
mod resolver;

pub use languages::{
    canonical_language, language_for_path, language_from_extension, suppresses_first_line,
    uses_doc_blocks, MARKDOWN, PLAIN_TEXT,
};
pub use registry::{
    parse_language_configuration, strip_jsonc, BuiltinSyntaxSource, CommentSyntax,
    FileSyntaxSource, LayeredSyntaxSource, LineComment, SyntaxSource,
};
pub use resolver::SyntaxResolver;
